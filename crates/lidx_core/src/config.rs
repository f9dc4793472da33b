//! Index configuration.

use lidx_storage::StoreOptions;

/// Configuration for opening an index.
#[derive(Debug, Clone)]
pub struct Config {
    /// Whether to create the index directory if it doesn't exist.
    pub create_if_missing: bool,

    /// Whether to error if the index already holds data.
    pub error_if_exists: bool,

    /// Whether to fsync the store on every flush (safer but slower).
    pub sync_on_flush: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            create_if_missing: true,
            error_if_exists: false,
            sync_on_flush: true,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to create the index if missing.
    #[must_use]
    pub const fn create_if_missing(mut self, value: bool) -> Self {
        self.create_if_missing = value;
        self
    }

    /// Sets whether to error if the index exists.
    #[must_use]
    pub const fn error_if_exists(mut self, value: bool) -> Self {
        self.error_if_exists = value;
        self
    }

    /// Sets whether to fsync on every flush.
    #[must_use]
    pub const fn sync_on_flush(mut self, value: bool) -> Self {
        self.sync_on_flush = value;
        self
    }

    /// File store options derived from this configuration.
    #[must_use]
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            create_if_missing: self.create_if_missing,
            error_if_exists: self.error_if_exists,
            sync_on_write: self.sync_on_flush,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert!(config.create_if_missing);
        assert!(!config.error_if_exists);
        assert!(config.sync_on_flush);
    }

    #[test]
    fn builder_pattern() {
        let config = Config::new()
            .create_if_missing(false)
            .error_if_exists(true)
            .sync_on_flush(false);

        assert!(!config.create_if_missing);
        assert!(config.error_if_exists);
        assert!(!config.sync_on_flush);

        let options = config.store_options();
        assert!(!options.create_if_missing);
        assert!(options.error_if_exists);
        assert!(!options.sync_on_write);
    }
}
