//! Harness Configuration
//!
//! Resolved once when the page loads. Switching between local and production
//! means loading the other page variant.

use serde::{Deserialize, Serialize};

/// Canonical BitPay origin
pub const PROVIDER_ORIGIN: &str = "https://bitpay.com";

/// Widget API origin used by the local page variant when none is given
pub const DEFAULT_LOCAL_API_ORIGIN: &str = "http://localhost:8088";

/// Relay endpoint used by the local page variant when none is given
pub const DEFAULT_LOCAL_RELAY_URL: &str = "http://localhost:8000/api/invoices";

/// Which BitPay environment the widget talks to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Developer-configured API origin
    Local,
    /// BitPay's canonical origin
    #[default]
    Production,
}

impl Mode {
    /// Parse the page flag; anything unrecognised is production
    pub fn from_flag(flag: &str) -> Self {
        match flag.trim().to_ascii_lowercase().as_str() {
            "local" | "dev" | "development" => Self::Local,
            _ => Self::Production,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Production => "production",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable page configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Operating mode
    pub mode: Mode,

    /// Origin passed to `bitpay.setApiUrlPrefix`
    pub api_origin: String,

    /// Canonical provider origin (always trusted)
    pub provider_origin: String,

    /// Full URL of the relay's invoice endpoint
    pub relay_url: String,
}

impl HarnessConfig {
    /// Production: the widget talks to BitPay directly
    pub fn production(relay_url: impl Into<String>) -> Self {
        Self {
            mode: Mode::Production,
            api_origin: PROVIDER_ORIGIN.into(),
            provider_origin: PROVIDER_ORIGIN.into(),
            relay_url: relay_url.into(),
        }
    }

    /// Local: the widget talks to a developer-run API origin
    pub fn local(api_origin: impl Into<String>, relay_url: impl Into<String>) -> Self {
        Self {
            mode: Mode::Local,
            api_origin: trim_origin(api_origin.into()),
            provider_origin: PROVIDER_ORIGIN.into(),
            relay_url: relay_url.into(),
        }
    }

    /// Build from the attributes of the page variant
    ///
    /// `page_origin` is where the page was served from; production pages
    /// expect the relay on the same origin.
    pub fn from_page_attributes(
        mode: Option<&str>,
        api_origin: Option<&str>,
        relay_url: Option<&str>,
        page_origin: &str,
    ) -> Self {
        let mode = mode.map(Mode::from_flag).unwrap_or_default();
        let relay_url = relay_url.filter(|u| !u.is_empty()).map(str::to_string);

        match mode {
            Mode::Local => Self::local(
                api_origin
                    .filter(|o| !o.is_empty())
                    .unwrap_or(DEFAULT_LOCAL_API_ORIGIN),
                relay_url.unwrap_or_else(|| DEFAULT_LOCAL_RELAY_URL.into()),
            ),
            Mode::Production => Self::production(relay_url.unwrap_or_else(|| {
                format!("{}/api/invoices", page_origin.trim_end_matches('/'))
            })),
        }
    }

    /// Origins whose messages are accepted
    pub fn trusted_origins(&self) -> [&str; 2] {
        [self.api_origin.as_str(), self.provider_origin.as_str()]
    }

    pub fn is_trusted(&self, origin: &str) -> bool {
        self.trusted_origins().contains(&origin)
    }
}

fn trim_origin(origin: String) -> String {
    origin.trim_end_matches('/').to_string()
}
