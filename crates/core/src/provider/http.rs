//! Response handling shared by the provider clients.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use super::ProviderError;

/// Build an HTTP client with the given request timeout.
pub(crate) fn build_client(timeout_secs: u64) -> Result<Client, ProviderError> {
    let client = Client::builder()
        .user_agent(concat!("blitz/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(timeout_secs))
        .build()?;
    Ok(client)
}

/// Map a non-success status to a [`ProviderError`], then decode the JSON body.
pub(crate) async fn decode_json<T: DeserializeOwned>(
    response: Response,
    what: &str,
) -> Result<T, ProviderError> {
    let status = response.status();
    if status == 401 {
        return Err(ProviderError::NotConfigured(format!(
            "{} rejected the API key",
            what
        )));
    }
    if status == 429 {
        return Err(ProviderError::RateLimited);
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::Api {
            status: status.as_u16(),
            message: body,
        });
    }

    response
        .json()
        .await
        .map_err(|e| {
            ProviderError::Parse(format!(
                "Failed to parse {} response: {}",
                what,
                e.without_url()
            ))
        })
}
