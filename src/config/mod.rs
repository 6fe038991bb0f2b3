use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;

/// Configuration for the application
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base endpoint of the invoicing service
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Seconds before an in-flight request is abandoned
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Where downloaded invoice PDFs are written
    #[serde(default = "default_pdf_dir")]
    pub pdf_dir: String,
}

fn default_api_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_pdf_dir() -> String {
    ".".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            pdf_dir: default_pdf_dir(),
        }
    }
}

impl Config {
    /// Load configuration from `INVOICEHUB_*` environment variables
    ///
    /// Variables are read after the optional `.env` file has been applied,
    /// and any that are missing fall back to their defaults.
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let config = envy::prefixed("INVOICEHUB_").from_env::<Config>()?;

        Ok(config)
    }

    /// Replace the service endpoint, e.g. from a command line flag
    pub fn with_api_base_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.api_base_url = url;
        }
        self
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }
}

/// Initialize environment variables and load configuration
pub fn init() -> Result<Config> {
    dotenv().ok();

    Config::load()
}
