use std::io;

use gpig::error::GpigError;

#[test]
fn test_error_conversion() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let err: GpigError = io_err.into();

    match err {
        GpigError::IoError(_) => (),
        _ => panic!("Expected IoError variant"),
    }
}

#[test]
fn test_error_display() {
    let err = GpigError::ConfigError("invalid config".to_string());
    assert_eq!(err.to_string(), "Configuration error: invalid config.");

    let err = GpigError::DestinationNotEmptyError {
        destination: "out".to_string(),
    };
    assert_eq!(err.to_string(), "Destination directory 'out' is not empty.");

    let err = GpigError::DuplicatePackageError {
        package_name: "com.author.tool".to_string(),
    };
    assert_eq!(err.to_string(), "Package 'com.author.tool' already exists in the project.");
}
