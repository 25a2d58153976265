//! Default configuration values

/// Maximum number of download retry attempts
pub const MAX_DOWNLOAD_RETRIES: u32 = 3;

/// Base delay for download retry backoff (in milliseconds)
pub const DOWNLOAD_BACKOFF_BASE_MS: u64 = 1000;

/// Conventional name of the extracted source directory
pub const SOURCE_SUBFOLDER: &str = "source";

/// Conventional name of the out-of-tree build directory
pub const BUILD_SUBFOLDER: &str = "build";

/// Conventional name of the package output directory
pub const PACKAGE_SUBFOLDER: &str = "package";

/// Directory inside the package folder that receives license files
pub const LICENSES_DIR: &str = "licenses";

/// How many leading bytes of a file the executable classifier inspects
pub const SIGNATURE_LEN: usize = 4;
