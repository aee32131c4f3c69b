//! gpig generates installer packages from a template tree.
//! It validates the package parameters, substitutes them into text templates,
//! stages the result in a scratch workspace and moves it into place.

/// Command-line interface module for the gpig application
pub mod cli;

/// Generator configuration (gpig.json, gpig.yml, gpig.yaml)
pub mod config;

/// Common constants
pub mod constants;

/// Error types and handling for the gpig application
pub mod error;

/// GUID resolution from sidecar files with index fallback
pub mod guid;

/// Ignore patterns for template trees
pub mod ignore;

/// Host project index and reload locking
pub mod index;

/// Logger setup
pub mod logger;

/// Generation orchestration
/// Stages templates into a scratch workspace and moves the result into place
pub mod materializer;

/// Package descriptor reading
pub mod metadata;

/// Namespace derivation from package names
pub mod namespace;

/// Parameter identifiers, values and marker tokens
pub mod params;

/// User input and interaction handling
pub mod prompt;

/// Scratch workspace management
pub mod scratch;

/// Marker substitution
pub mod substitute;

/// Template tree loading
pub mod template;

/// Package name and version validation
pub mod validate;
