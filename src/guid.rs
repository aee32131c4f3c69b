//! Resolution of asset GUIDs from sidecar files and the project index.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use log::{debug, warn};
use regex::Regex;

use crate::constants::{EMPTY_GUID, META_SUFFIX, PACKAGES_DIR};
use crate::index::IndexService;

static SIDECAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^fileFormatVersion: [0-9]+\nguid: (?P<guid>[0-9a-fA-F]{32})").unwrap()
});

/// Path of the sidecar belonging to `asset_path`.
pub fn sidecar_path<P: AsRef<Path>>(asset_path: P) -> PathBuf {
    let mut path = asset_path.as_ref().as_os_str().to_owned();
    path.push(META_SUFFIX);
    PathBuf::from(path)
}

/// Extracts the GUID from sidecar text.
///
/// The header must open the file. The all-zero placeholder is treated as
/// absent.
pub fn parse_sidecar_guid(text: &str) -> Option<String> {
    let guid = SIDECAR_RE.captures(text)?.name("guid")?.as_str();
    if guid == EMPTY_GUID {
        return None;
    }
    Some(guid.to_string())
}

/// Reads the GUID stored next to `asset_path`, if any.
///
/// # Arguments
/// * `asset_path` - Asset whose `.meta` sidecar is read
///
/// # Returns
/// * `Option<String>` - The GUID, or `None` when the sidecar is missing,
///   malformed or holds the all-zero placeholder
pub fn read_sidecar_guid<P: AsRef<Path>>(asset_path: P) -> Option<String> {
    let meta_path = sidecar_path(asset_path);
    let text = fs::read_to_string(&meta_path).ok()?;
    let guid = parse_sidecar_guid(&text);
    if guid.is_none() {
        debug!("Sidecar '{}' carries no usable GUID", meta_path.display());
    }
    guid
}

/// Determines the GUID of `target_file`.
///
/// The file's own sidecar wins. Freshly written files may not be known to the
/// index yet, while a missing or placeholder sidecar is covered by asking the
/// index for `Packages/<fallback_package_name>/<fallback_relative_path>`.
/// When neither source knows the asset, the all-zero GUID is returned.
///
/// # Arguments
/// * `target_file` - Generated file whose GUID is wanted
/// * `fallback_package_name` - Package the file will be installed into
/// * `fallback_relative_path` - Path of the file inside that package
/// * `index` - Index of the host project
///
/// # Returns
/// * `String` - A 32 character hex GUID
pub fn resolve_guid<P: AsRef<Path>>(
    target_file: P,
    fallback_package_name: &str,
    fallback_relative_path: &str,
    index: &dyn IndexService,
) -> String {
    let target_file = target_file.as_ref();
    if let Some(guid) = read_sidecar_guid(target_file) {
        debug!("Resolved GUID {} from sidecar of '{}'", guid, target_file.display());
        return guid;
    }

    let fallback_path = format!(
        "{}/{}/{}",
        PACKAGES_DIR, fallback_package_name, fallback_relative_path
    );
    match index.find_by_path(&fallback_path) {
        Some(guid) => {
            debug!("Resolved GUID {} from index entry '{}'", guid, fallback_path);
            guid
        }
        None => {
            warn!(
                "No GUID known for '{}' or '{}'; using the empty GUID",
                target_file.display(),
                fallback_path
            );
            EMPTY_GUID.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sidecar_guid() {
        let text = "fileFormatVersion: 2\nguid: 0123456789abcdef0123456789ABCDEF\nMonoImporter:\n";
        assert_eq!(
            parse_sidecar_guid(text).as_deref(),
            Some("0123456789abcdef0123456789ABCDEF")
        );
    }

    #[test]
    fn test_parse_sidecar_guid_rejects_bad_headers() {
        assert!(parse_sidecar_guid("guid: 0123456789abcdef0123456789abcdef").is_none());
        assert!(parse_sidecar_guid("\nfileFormatVersion: 2\nguid: 0123456789abcdef0123456789abcdef").is_none());
        assert!(parse_sidecar_guid("fileFormatVersion: 2\r\nguid: 0123456789abcdef0123456789abcdef").is_none());
        assert!(parse_sidecar_guid("fileFormatVersion: 2\nguid: 0123").is_none());
        assert!(parse_sidecar_guid(&format!("fileFormatVersion: 2\nguid: {}", EMPTY_GUID)).is_none());
    }

    #[test]
    fn test_sidecar_path() {
        assert_eq!(sidecar_path("a/b/File.cs"), PathBuf::from("a/b/File.cs.meta"));
    }
}
