use crate::{ClientConfig, EndpointConfig, Error, TransmitError, CONTENT_TYPE_JSON};
use bytes::Bytes;
use reqwest::{header, Client, StatusCode};
use url::Url;

/// Sends one encoded payload to one endpoint
#[derive(Debug, Clone)]
pub struct RelayClient {
    client: Client,
}

impl RelayClient {
    /// Creates an instance of [`RelayClient`]
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(Error::Client)?;

        Ok(Self { client })
    }

    /// Wraps an already configured [`Client`]
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// POSTs `payload` to `endpoint`.
    ///
    /// Any 2xx is a success. The response body is never read.
    pub async fn send(
        &self,
        payload: Bytes,
        endpoint: &EndpointConfig,
    ) -> Result<StatusCode, TransmitError> {
        let url = Url::parse(&endpoint.url).map_err(|source| TransmitError::InvalidUrl {
            url: endpoint.url.clone(),
            source,
        })?;

        let response = self
            .client
            .post(url)
            .header(header::CONTENT_TYPE, CONTENT_TYPE_JSON)
            .body(payload)
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            Ok(status)
        } else {
            Err(TransmitError::Status(status.as_u16()))
        }
    }
}
