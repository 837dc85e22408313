//! Relay Configuration
//!
//! Everything here is read once at startup. The API token only ever comes
//! from the environment (or a `.env` file loaded by the binary).

use std::fmt;

/// Canonical BitPay origin
pub const DEFAULT_API_BASE: &str = "https://bitpay.com";

/// Where BitPay sends the buyer after payment
pub const DEFAULT_REDIRECT_URL: &str = "https://bitpay.com";

/// BitPay merchant API token
///
/// `Debug` and `Display` never print the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token, for building the outbound body only
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(***)")
    }
}

impl fmt::Display for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// Relay configuration
#[derive(Clone, Debug)]
pub struct RelayConfig {
    /// Provider base URL; invoices are posted to `<api_base>/invoices`
    pub api_base: String,

    /// Merchant token (None if not configured)
    pub token: Option<ApiToken>,

    /// `redirectURL` sent with every invoice
    pub redirect_url: String,

    /// `autoRedirect` sent with every invoice
    pub auto_redirect: bool,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
            token: None,
            redirect_url: DEFAULT_REDIRECT_URL.into(),
            auto_redirect: false,
        }
    }
}

impl RelayConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let token = lookup("BITPAY_API_TOKEN")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .map(ApiToken::new);

        let api_base = lookup("BITPAY_API_BASE")
            .map(|b| b.trim_end_matches('/').to_string())
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.into());

        let redirect_url = lookup("BITPAY_REDIRECT_URL")
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_REDIRECT_URL.into());

        let auto_redirect = lookup("BITPAY_AUTO_REDIRECT")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"))
            .unwrap_or(false);

        Self {
            api_base,
            token,
            redirect_url,
            auto_redirect,
        }
    }

    /// Set the token
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(ApiToken::new(token));
        self
    }

    /// Whether a token is available
    pub const fn token_configured(&self) -> bool {
        self.token.is_some()
    }

    /// Full invoice endpoint
    pub fn invoices_url(&self) -> String {
        format!("{}/invoices", self.api_base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = RelayConfig::from_lookup(lookup(&[]));
        assert!(!config.token_configured());
        assert_eq!(config.invoices_url(), "https://bitpay.com/invoices");
        assert_eq!(config.redirect_url, "https://bitpay.com");
        assert!(!config.auto_redirect);
    }

    #[test]
    fn test_overrides() {
        let config = RelayConfig::from_lookup(lookup(&[
            ("BITPAY_API_TOKEN", "tok_123"),
            ("BITPAY_API_BASE", "https://test.bitpay.com/"),
            ("BITPAY_REDIRECT_URL", "https://example.com/done"),
            ("BITPAY_AUTO_REDIRECT", "true"),
        ]));
        assert_eq!(config.token.as_ref().map(ApiToken::expose), Some("tok_123"));
        assert_eq!(config.invoices_url(), "https://test.bitpay.com/invoices");
        assert_eq!(config.redirect_url, "https://example.com/done");
        assert!(config.auto_redirect);
    }

    #[test]
    fn test_blank_token_is_missing() {
        let config = RelayConfig::from_lookup(lookup(&[("BITPAY_API_TOKEN", "   ")]));
        assert!(!config.token_configured());
    }

    #[test]
    fn test_token_is_redacted() {
        let config = RelayConfig::default().with_token("super-secret");
        let printed = format!("{config:?}");
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("***"));
    }
}
