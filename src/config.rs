use std::path::PathBuf;

use url::Url;

/// Hosted backend used when no other base address is given.
pub const DEFAULT_BASE_URL: &str = "https://postman-clone-backend-2ru3.onrender.com";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base address of the backend every call goes to.
    pub base_url: Url,
    /// Overrides the platform data directory for persisted state. Mainly for
    /// tests; `None` means `dirs::data_dir()/apitool`.
    pub data_dir: Option<PathBuf>,
}

impl Config {
    pub fn new(base_url: Url) -> Self {
        Self { base_url, data_dir: None }
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            data_dir: None,
        }
    }
}
