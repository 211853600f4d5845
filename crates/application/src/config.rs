//! Import configuration

/// Default maximum size of an imported file (50 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Default recursion ceiling for schema example synthesis.
pub const DEFAULT_SCHEMA_DEPTH_LIMIT: usize = 5;

/// Limits applied while importing collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportConfig {
    /// Files larger than this many bytes are rejected before being read.
    pub max_file_size: u64,
    /// Maximum `$ref` depth followed while synthesizing examples.
    pub schema_depth_limit: usize,
}

impl ImportConfig {
    /// Sets the maximum file size.
    #[must_use]
    pub const fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    /// Sets the schema depth limit.
    #[must_use]
    pub const fn with_schema_depth_limit(mut self, depth: usize) -> Self {
        self.schema_depth_limit = depth;
        self
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            schema_depth_limit: DEFAULT_SCHEMA_DEPTH_LIMIT,
        }
    }
}
