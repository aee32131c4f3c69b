//! Validation of package names and versions.

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::{
    MAX_NON_WARNING_PACKAGE_NAME_LENGTH, MAX_PACKAGE_NAME_LENGTH, PACKAGES_DIR,
    PACKAGE_DESCRIPTOR,
};
use crate::index::IndexService;
use crate::params::{ParameterId, ParameterSet};

static PACKAGE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^com\.[a-z0-9][a-z0-9\-_]*(\.[a-z0-9][a-z0-9\-_]*)*$").unwrap()
});

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(0|[1-9][0-9]{0,5})\.(0|[1-9][0-9]{0,5})\.(0|[1-9][0-9]{0,5})$").unwrap()
});

/// Outcome of checking a package name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageNameCheck {
    pub valid: bool,
    /// Valid, but longer than recommended. Advisory only.
    pub warn_length: bool,
}

/// Outcome of checking a whole parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterReport {
    pub invalid_name: bool,
    pub warn_length: bool,
    pub invalid_version: bool,
}

impl ParameterReport {
    pub fn is_valid(&self) -> bool {
        !self.invalid_name && !self.invalid_version
    }

    /// Human readable problems, errors first.
    pub fn errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.invalid_name {
            errors.push(format!(
                "package name is invalid: it must start with 'com.<author>.', be at most {} \
                 characters long and contain only lowercase letters, digits, hyphens and underscores",
                MAX_PACKAGE_NAME_LENGTH
            ));
        }
        if self.invalid_version {
            errors.push(
                "version is invalid: use 'major.minor.patch' with each part between 0 and 999999 \
                 and no leading zeros"
                    .to_string(),
            );
        }
        errors
    }

    pub fn advisory(&self) -> Option<String> {
        self.warn_length.then(|| {
            format!(
                "package name is longer than {} characters; shorter names are recommended",
                MAX_NON_WARNING_PACKAGE_NAME_LENGTH
            )
        })
    }
}

/// Checks a package name against the `com.<segment>(.<segment>)*` grammar.
///
/// Segments start with a lowercase letter or digit and continue with
/// lowercase letters, digits, hyphens and underscores.
///
/// # Arguments
/// * `name` - Package name to check
///
/// # Returns
/// * `PackageNameCheck` - Validity, plus the length advisory for valid names
///   longer than 50 characters
pub fn validate_package_name(name: &str) -> PackageNameCheck {
    let length = name.chars().count();
    let valid = !name.trim().is_empty()
        && length <= MAX_PACKAGE_NAME_LENGTH
        && PACKAGE_NAME_RE.is_match(name);

    PackageNameCheck {
        valid,
        warn_length: valid && length > MAX_NON_WARNING_PACKAGE_NAME_LENGTH,
    }
}

/// Checks a `major.minor.patch` version.
///
/// # Arguments
/// * `version` - Version string to check
///
/// # Returns
/// * `bool` - True when each component is 0 to 999999 without leading zeros
pub fn validate_version(version: &str) -> bool {
    VERSION_RE.is_match(version)
}

/// Checks name and version of a parameter set. Missing values are invalid.
///
/// # Arguments
/// * `params` - Collected parameters
///
/// # Returns
/// * `ParameterReport` - Per-field outcome; see [`ParameterReport::is_valid`]
pub fn validate_parameters(params: &ParameterSet) -> ParameterReport {
    let name = params
        .get(ParameterId::PackageName)
        .map(validate_package_name)
        .unwrap_or(PackageNameCheck {
            valid: false,
            warn_length: false,
        });
    let version_valid = params.get(ParameterId::Version).is_some_and(validate_version);

    ParameterReport {
        invalid_name: !name.valid,
        warn_length: name.warn_length,
        invalid_version: !version_valid,
    }
}

/// Conventional location of a package descriptor inside the host project.
pub fn package_descriptor_path(package_name: &str) -> String {
    format!("{}/{}/{}", PACKAGES_DIR, package_name, PACKAGE_DESCRIPTOR)
}

/// Returns true when `name` is usable and no package of that name is indexed.
///
/// # Arguments
/// * `name` - Package name to look for
/// * `index` - Index of the host project
///
/// # Returns
/// * `bool` - False for blank names and for packages whose descriptor
///   (see [`package_descriptor_path`]) is already indexed
pub fn check_package_absent(name: &str, index: &dyn IndexService) -> bool {
    if name.trim().is_empty() {
        return false;
    }
    !index.exists_package(name)
}
