//! Marker substitution over template text.
//!
//! Markers are located in one left-to-right scan and replaced by their bound
//! value. Inserted values are never scanned again, so a value that happens to
//! contain another marker token is written out literally.

use std::collections::HashMap;

use crate::error::{GpigError, GpigResult};
use crate::params::{MarkerSpec, ParameterId, ParameterSet, MARKER_CLOSE, MARKER_OPEN};

/// Replaces every bound `\!<Identifier>` in `text`.
///
/// Unbound identifiers and unterminated markers are copied through unchanged.
pub fn replace_markers(text: &str, bindings: &HashMap<&str, &str>) -> String {
    let mut output = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(MARKER_OPEN) {
        output.push_str(&rest[..start]);
        let after_open = &rest[start + MARKER_OPEN.len()..];

        let bound = after_open.find(MARKER_CLOSE).and_then(|end| {
            bindings.get(&after_open[..end]).map(|value| (*value, end))
        });
        match bound {
            Some((value, end)) => {
                output.push_str(value);
                rest = &after_open[end + MARKER_CLOSE.len()..];
            }
            None => {
                output.push_str(MARKER_OPEN);
                rest = after_open;
            }
        }
    }

    output.push_str(rest);
    output
}

/// Substitutes parameter and namespace markers for one generation run.
#[derive(Debug)]
pub struct Substitutor<'a> {
    bindings: HashMap<&'a str, &'a str>,
}

impl<'a> Substitutor<'a> {
    /// Binds every parameter marker to its value and the namespace marker to
    /// `namespace`.
    ///
    /// Parameters without a value substitute as the empty string, except
    /// those listed in `required`, which fail with `MissingParameterError`.
    pub fn new(
        markers: &'a MarkerSpec,
        params: &'a ParameterSet,
        namespace: &'a str,
        required: &[ParameterId],
    ) -> GpigResult<Self> {
        let mut bindings = HashMap::new();

        for (id, identifier) in markers.parameters() {
            let value = match params.get(id) {
                Some(value) => value,
                None if required.contains(&id) => {
                    return Err(GpigError::MissingParameterError {
                        parameter: id.identifier().to_string(),
                    })
                }
                None => "",
            };
            bindings.insert(identifier, value);
        }
        bindings.insert(markers.namespace_identifier(), namespace);

        Ok(Self { bindings })
    }

    pub fn substitute(&self, text: &str) -> String {
        replace_markers(text, &self.bindings)
    }

    /// Returns a substitutor that also binds the repository table GUID marker.
    ///
    /// Rendering the template source again with this substitutor keeps the
    /// single-scan guarantee: a parameter value that spells the GUID marker
    /// is still written out literally.
    pub fn with_table_guid<'b>(&'b self, markers: &'b MarkerSpec, guid: &'b str) -> Substitutor<'b> {
        let mut bindings: HashMap<&'b str, &'b str> = self.bindings.clone();
        bindings.insert(markers.table_guid_identifier(), guid);
        Substitutor { bindings }
    }
}
