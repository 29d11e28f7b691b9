use std::time::Duration;

/// Yearly name files published by the Social Security Administration.
pub const SSA_NAMES_URL: &str = "https://www.ssa.gov/oact/babynames/names.zip";

/// Year bounds offered by the views.
pub const FIRST_YEAR: i32 = 1880;
pub const LAST_YEAR: i32 = 2025;

/// Network and source settings for ingestion.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Where the names archive is downloaded from.
    pub source_url: String,
    /// Upper bound for the whole request, connect through body.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_url: SSA_NAMES_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: concat!("babynames-explorer/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
