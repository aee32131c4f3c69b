//! Error handling for the gpig application.
//! Defines custom error types and results used throughout the application.

use std::io;
use thiserror::Error;

/// Custom error types for gpig operations.
///
/// Precondition failures (`ValidationError`, `DuplicatePackageError`,
/// `NamespaceDerivationError`, `DestinationNotEmptyError`) are raised before
/// any filesystem change. Everything else may occur mid-run, after which the
/// scratch workspace is still cleaned up.
#[derive(Error, Debug)]
pub enum GpigError {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Represents errors raised while walking the template tree
    #[error("Failed to walk template tree: {0}.")]
    WalkdirError(#[from] walkdir::Error),

    /// Represents failures of the copy-and-delete move fallback
    #[error("Failed to move generated files: {0}.")]
    MoveError(#[from] fs_extra::error::Error),

    /// Package name or version do not match their grammar
    #[error("Validation error: {0}.")]
    ValidationError(String),

    /// A package with the requested name already exists in the host project
    #[error("Package '{package_name}' already exists in the project.")]
    DuplicatePackageError { package_name: String },

    /// The namespace could not be derived from the package name
    #[error("Cannot derive a namespace: the package name is missing or blank.")]
    NamespaceDerivationError,

    /// Generation refuses to write into a directory that already has content
    #[error("Destination directory '{destination}' is not empty.")]
    DestinationNotEmptyError { destination: String },

    /// A package descriptor or sidecar file could not be understood
    #[error("Malformed metadata: {0}.")]
    MetadataParseError(String),

    /// A parameter marked as required has no value
    #[error("Parameter '{parameter}' is required but has no value.")]
    MissingParameterError { parameter: String },

    /// Represents errors locating or reading the template tree
    #[error("Template error: {0}.")]
    TemplateError(String),

    /// Represents errors that occur during configuration parsing or processing
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Represents errors in building ignore patterns
    #[error("Ignore pattern error: {0}.")]
    IgnoreError(String),

    /// Represents errors raised by interactive prompts
    #[error("Prompt error: {0}.")]
    PromptError(String),
}

/// Convenience type alias for Results with GpigError as the error type.
///
/// # Type Parameters
/// * `T` - The type of the success value
pub type GpigResult<T> = std::result::Result<T, GpigError>;

/// Default error handler that reports the error and exits the program.
///
/// The error is written to stderr for the user and recorded as a log entry.
pub fn default_error_handler(err: GpigError) {
    log::error!("{}", err);
    eprintln!("{}", err);
    std::process::exit(1);
}
