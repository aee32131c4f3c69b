//! Common constants used throughout the gpig application.

/// Supported configuration file names
pub const CONFIG_FILES: [&str; 3] = ["gpig.json", "gpig.yml", "gpig.yaml"];

/// Package descriptor file name
pub const PACKAGE_DESCRIPTOR: &str = "package.json";

/// Directory under the host project that holds installed packages
pub const PACKAGES_DIR: &str = "Packages";

/// Directory under the host project that holds project assets
pub const ASSETS_DIR: &str = "Assets";

/// Suffix of sidecar metadata files
pub const META_SUFFIX: &str = ".meta";

/// Suffix identifying text templates; stripped on output
pub const TEXT_TEMPLATE_SUFFIX: &str = ".txt";

/// Maximum length of a package name
pub const MAX_PACKAGE_NAME_LENGTH: usize = 214;

/// Package names longer than this produce an advisory warning
pub const MAX_NON_WARNING_PACKAGE_NAME_LENGTH: usize = 50;

/// Placeholder GUID that never identifies a real asset
pub const EMPTY_GUID: &str = "00000000000000000000000000000000";

/// Default base name of the scratch workspace
pub const DEFAULT_SCRATCH_NAME: &str = "GPIGTemp";

/// Default location of the repository table source inside the generated package
pub const DEFAULT_TABLE_SOURCE_PATH: &str = "Core/Data/GitRepositoryTable.cs";

/// Default name of the template directory inside a generator package
pub const DEFAULT_TEMPLATE_DIR: &str = "Templates";
