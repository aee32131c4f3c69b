//! Ignore patterns for template trees.
//! Sidecar files, OS clutter and `name~` entries never become part of a
//! generated package; templates may add their own patterns via configuration.

use crate::error::{GpigError, GpigResult};
use globset::{Glob, GlobSet, GlobSetBuilder};

/// Patterns applied to every template tree.
pub const DEFAULT_IGNORE_PATTERNS: [&str; 4] = ["**/*.meta", "**/.DS_Store", "**/*~", "**/*~/**"];

/// Compiles the default patterns plus `extra` into a single set.
///
/// Patterns are matched against template-root-relative paths.
///
/// # Errors
/// * `GpigError::IgnoreError` if a pattern is not a valid glob
pub fn build_ignore_set<S: AsRef<str>>(extra: &[S]) -> GpigResult<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    let patterns =
        DEFAULT_IGNORE_PATTERNS.iter().copied().chain(extra.iter().map(|pattern| pattern.as_ref()));

    for pattern in patterns {
        let glob = Glob::new(pattern)
            .map_err(|e| GpigError::IgnoreError(format!("invalid pattern '{}': {}", pattern, e)))?;
        builder.add(glob);
    }

    builder.build().map_err(|e| GpigError::IgnoreError(e.to_string()))
}
