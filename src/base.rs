pub type LineNumber = usize;
pub type SourceId = String;
pub type BoxResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Default name of the repository file, relative to the working directory
pub const REPOSITORY_FILE: &str = "repository.cbor";

/// Magic bytes at the start of every repository file
pub const REPOSITORY_MAGIC: &[u8; 4] = b"WTIX";

/// Current version of the repository format
pub const REPOSITORY_VERSION: u16 = 1;
