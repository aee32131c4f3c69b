//! Reading package descriptors (`package.json`).

use std::fs;
use std::path::Path;

use log::debug;
use serde_json::Value;

use crate::constants::PACKAGE_DESCRIPTOR;
use crate::error::{GpigError, GpigResult};

/// Extracts the `name` field of a package descriptor.
///
/// # Arguments
/// * `json_text` - Content of a `package.json` file
///
/// # Returns
/// * `GpigResult<String>` - The declared package name
///
/// # Errors
/// * `GpigError::MetadataParseError` if the text is not a JSON object or has no
///   string `name` field
pub fn read_package_name(json_text: &str) -> GpigResult<String> {
    let descriptor: Value = serde_json::from_str(json_text)
        .map_err(|e| GpigError::MetadataParseError(format!("invalid package descriptor: {}", e)))?;
    let Value::Object(fields) = descriptor else {
        return Err(GpigError::MetadataParseError(
            "package descriptor is not a JSON object".to_string(),
        ));
    };

    fields
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| GpigError::MetadataParseError("package descriptor has no name".to_string()))
}

/// Reads the package name declared by `<package_root>/package.json`.
///
/// Returns `None` when the descriptor is missing or malformed.
pub fn read_package_name_in<P: AsRef<Path>>(package_root: P) -> Option<String> {
    let descriptor_path = package_root.as_ref().join(PACKAGE_DESCRIPTOR);
    let text = fs::read_to_string(&descriptor_path).ok()?;

    match read_package_name(&text) {
        Ok(name) => Some(name),
        Err(e) => {
            debug!("{}: {}", descriptor_path.display(), e);
            None
        }
    }
}
