//! Namespace derivation from package names.

use crate::error::{GpigError, GpigResult};

const REVERSE_DOMAIN_PREFIX: &str = "com.";

/// Converts a package name into a PascalCase identifier.
///
/// The `com.` prefix is dropped. Each lowercase letter that follows a
/// non-lowercase character is upper-cased; separators disappear and digits
/// are kept.
///
/// ```
/// use gpig::namespace::derive_namespace;
///
/// let namespace = derive_namespace(Some("com.author.package_name")).unwrap();
/// assert_eq!(namespace, "AuthorPackageName");
/// ```
pub fn derive_namespace(package_name: Option<&str>) -> GpigResult<String> {
    let package_name = match package_name {
        Some(name) if !name.trim().is_empty() => name,
        _ => return Err(GpigError::NamespaceDerivationError),
    };
    let name = package_name.strip_prefix(REVERSE_DOMAIN_PREFIX).unwrap_or(package_name);

    let mut namespace = String::with_capacity(name.len());
    let mut at_segment_start = true;
    for c in name.chars() {
        if c.is_lowercase() {
            if at_segment_start {
                namespace.extend(c.to_uppercase());
                at_segment_start = false;
            } else {
                namespace.push(c);
            }
        } else {
            at_segment_start = true;
            if c.is_ascii_digit() {
                namespace.push(c);
            }
        }
    }

    Ok(namespace)
}
