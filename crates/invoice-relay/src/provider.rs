//! Provider Transport
//!
//! The relay talks to BitPay only through [`InvoiceProvider`], so tests can
//! swap in an in-memory transport.

use async_trait::async_trait;

use crate::error::Result;
use crate::request::ProviderInvoiceBody;

/// BitPay API version header value
pub const ACCEPT_VERSION: &str = "2.0.0";

/// Raw provider answer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderReply {
    /// HTTP status code
    pub status: u16,

    /// Unparsed response body
    pub body: String,
}

impl ProviderReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Outbound transport to the invoice API (Strategy pattern)
#[async_trait]
pub trait InvoiceProvider: Send + Sync {
    /// Issue exactly one invoice-creation call
    ///
    /// Any HTTP status is a reply. Only failures to get a reply are errors.
    async fn post_invoice(&self, body: &ProviderInvoiceBody) -> Result<ProviderReply>;
}

/// reqwest-backed transport
pub struct HttpInvoiceProvider {
    client: reqwest::Client,
    invoices_url: String,
}

impl HttpInvoiceProvider {
    /// Create a transport for `<api_base>/invoices`
    pub fn new(api_base: &str) -> Self {
        Self::with_client(reqwest::Client::new(), api_base)
    }

    /// Create with a preconfigured client
    pub fn with_client(client: reqwest::Client, api_base: &str) -> Self {
        Self {
            client,
            invoices_url: format!("{}/invoices", api_base.trim_end_matches('/')),
        }
    }

    pub fn invoices_url(&self) -> &str {
        &self.invoices_url
    }
}

#[async_trait]
impl InvoiceProvider for HttpInvoiceProvider {
    async fn post_invoice(&self, body: &ProviderInvoiceBody) -> Result<ProviderReply> {
        tracing::debug!(url = %self.invoices_url, "Posting invoice to provider");

        let response = self
            .client
            .post(&self.invoices_url)
            .header("x-accept-version", ACCEPT_VERSION)
            .json(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(ProviderReply { status, body })
    }
}
