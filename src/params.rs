//! Generation parameters and their marker tokens.

use indexmap::IndexMap;

use crate::error::{GpigError, GpigResult};

/// Opening sequence of every marker token.
pub const MARKER_OPEN: &str = r"\!<";
/// Closing sequence of every marker token.
pub const MARKER_CLOSE: &str = ">";

/// Identifier of the namespace marker.
pub const NAMESPACE_IDENTIFIER: &str = "NameSpace";
/// Identifier of the repository table GUID marker.
pub const TABLE_GUID_IDENTIFIER: &str = "RepoTblSrcGuid";

/// The user-supplied parameters a template can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParameterId {
    PackageName,
    Version,
    DisplayName,
    AuthorName,
}

impl ParameterId {
    /// Every parameter, in prompt order.
    pub const ALL: [ParameterId; 4] = [
        ParameterId::PackageName,
        ParameterId::Version,
        ParameterId::DisplayName,
        ParameterId::AuthorName,
    ];

    /// Identifier used inside marker tokens and parameter files.
    pub fn identifier(self) -> &'static str {
        match self {
            ParameterId::PackageName => "PkgName",
            ParameterId::Version => "PkgVer",
            ParameterId::DisplayName => "PkgDisplayName",
            ParameterId::AuthorName => "PkgAuthor",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ParameterId::PackageName => "Package name",
            ParameterId::Version => "Version",
            ParameterId::DisplayName => "Display name",
            ParameterId::AuthorName => "Author name",
        }
    }

    pub fn help(self) -> &'static str {
        match self {
            ParameterId::PackageName => "Name of the generated package (com.xxx.yyy)",
            ParameterId::Version => "Version of the generated package (major.minor.patch)",
            ParameterId::DisplayName => "Name shown for the package in the package manager",
            ParameterId::AuthorName => "Author of the generated package",
        }
    }

    /// Value offered when nothing else is configured.
    pub fn fallback_default(self) -> &'static str {
        match self {
            ParameterId::PackageName => "com.author.package_name_installer",
            ParameterId::Version => "1.0.0",
            ParameterId::DisplayName => "Package Name Installer",
            ParameterId::AuthorName => "Author",
        }
    }

    pub fn from_identifier(identifier: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.identifier() == identifier)
    }
}

impl std::fmt::Display for ParameterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Parameter values keyed by [`ParameterId`], kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    values: IndexMap<ParameterId, String>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: ParameterId, value: impl Into<String>) -> Self {
        self.set(id, value);
        self
    }

    pub fn set(&mut self, id: ParameterId, value: impl Into<String>) {
        self.values.insert(id, value.into());
    }

    pub fn get(&self, id: ParameterId) -> Option<&str> {
        self.values.get(&id).map(String::as_str)
    }

    pub fn contains(&self, id: ParameterId) -> bool {
        self.values.contains_key(&id)
    }

    pub fn package_name(&self) -> Option<&str> {
        self.get(ParameterId::PackageName)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParameterId, &str)> {
        self.values.iter().map(|(id, value)| (*id, value.as_str()))
    }

    /// Overlays `other` on top of `self`; values in `other` win.
    pub fn merge(&mut self, other: ParameterSet) {
        for (id, value) in other.values {
            self.values.insert(id, value);
        }
    }

    /// Builds a parameter set from a JSON object keyed by parameter identifier.
    ///
    /// `null` yields an empty set. Unknown keys are ignored; non-string values
    /// are rejected.
    pub fn from_json(value: &serde_json::Value) -> GpigResult<Self> {
        let mut params = ParameterSet::new();
        let object = match value {
            serde_json::Value::Null => return Ok(params),
            serde_json::Value::Object(object) => object,
            other => {
                return Err(GpigError::ConfigError(format!(
                    "parameters must be a JSON object, got {}",
                    other
                )))
            }
        };

        for (key, value) in object {
            let Some(id) = ParameterId::from_identifier(key) else {
                log::debug!("Ignoring unknown parameter '{}'", key);
                continue;
            };
            let value = value.as_str().ok_or_else(|| {
                GpigError::ConfigError(format!("parameter '{}' must be a string", key))
            })?;
            params.set(id, value);
        }
        Ok(params)
    }
}

/// Marker tokens recognised in templates.
///
/// Each identifier appears inside `\!<` and `>`; since the delimiters cannot
/// occur inside an identifier, no two tokens overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerSpec {
    parameters: Vec<(ParameterId, String)>,
    namespace: String,
    table_guid: String,
}

impl Default for MarkerSpec {
    fn default() -> Self {
        Self {
            parameters: ParameterId::ALL
                .into_iter()
                .map(|id| (id, id.identifier().to_string()))
                .collect(),
            namespace: NAMESPACE_IDENTIFIER.to_string(),
            table_guid: TABLE_GUID_IDENTIFIER.to_string(),
        }
    }
}

impl MarkerSpec {
    pub fn parameters(&self) -> impl Iterator<Item = (ParameterId, &str)> {
        self.parameters.iter().map(|(id, ident)| (*id, ident.as_str()))
    }

    pub fn namespace_identifier(&self) -> &str {
        &self.namespace
    }

    pub fn table_guid_identifier(&self) -> &str {
        &self.table_guid
    }

    /// Full literal token for an identifier, e.g. `\!<PkgName>`.
    pub fn token(identifier: &str) -> String {
        format!("{}{}{}", MARKER_OPEN, identifier, MARKER_CLOSE)
    }
}
