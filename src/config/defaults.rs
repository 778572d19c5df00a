//! Default configuration values

/// File name of the persisted user configuration
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Packager executable used when none is configured
pub const DEFAULT_PACKAGER_PROGRAM: &str = "bpack-packager";

/// Buildpack URI of the built-in package definition
pub const DEFAULT_BUILDPACK_URI: &str = ".";

/// Platform OS of the built-in package definition
pub const DEFAULT_PLATFORM_OS: &str = "linux";

/// Platform OS values a package definition may target
pub const SUPPORTED_PLATFORM_OS: [&str; 2] = ["linux", "windows"];

/// Package formats understood by the packager; empty means the packager default
pub const PACKAGE_FORMATS: [&str; 2] = ["image", "file"];
