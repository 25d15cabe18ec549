use super::{Relay, RelayClient};
use crate::{ClientConfig, EndpointProvider, Error, TransmitError};
use bytes::Bytes;
use futures_channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures_util::StreamExt;
use reqwest::StatusCode;
use std::sync::Arc;
use tokio::runtime::Handle;

/// A [`Relay`] that will POST payloads to an HTTP endpoint
///
/// Payloads are queued and drained by a background task, so [`Relay::transport`]
/// never waits on the network.
#[derive(Debug, Clone)]
pub struct Http {
    sender: UnboundedSender<Bytes>,
}

impl Http {
    /// Creates an instance of [`Http`] [`Relay`]
    ///
    /// Must be called within a Tokio runtime, the worker is spawned onto it.
    pub fn new<P>(config: ClientConfig, endpoint: P) -> Result<Self, Error>
    where
        P: EndpointProvider + 'static,
    {
        let client = RelayClient::new(&config)?;

        Self::with_client(client, config.concurrency, endpoint)
    }

    /// Same as [`Http::new`] with a prebuilt client
    pub fn with_client<P>(client: RelayClient, concurrency: usize, endpoint: P) -> Result<Self, Error>
    where
        P: EndpointProvider + 'static,
    {
        let runtime = Handle::try_current().map_err(|_| Error::NoRuntime)?;

        let (sender, receiver) = mpsc::unbounded::<Bytes>();

        let task = Box::pin(handle_http_connection(
            client,
            Arc::new(endpoint),
            concurrency.max(1),
            receiver,
        ));

        let _ = runtime.spawn(task);

        Ok(Self { sender })
    }
}

async fn handle_http_connection<P>(
    client: RelayClient,
    endpoint: Arc<P>,
    concurrency: usize,
    receiver: UnboundedReceiver<Bytes>,
) where
    P: EndpointProvider,
{
    let client = &client;
    let endpoint = endpoint.as_ref();

    receiver
        .for_each_concurrent(concurrency, move |payload| {
            deliver(client, endpoint, payload)
        })
        .await;

    tracing::debug!("HTTP relay queue closed");
}

/// Makes one transmission attempt
async fn attempt<P>(
    client: &RelayClient,
    endpoint: &P,
    payload: Bytes,
) -> Result<StatusCode, TransmitError>
where
    P: EndpointProvider + ?Sized,
{
    match endpoint.endpoint() {
        Some(endpoint) => client.send(payload, &endpoint).await,
        None => Err(TransmitError::MissingEndpoint),
    }
}

/// Makes one transmission attempt and logs its outcome
async fn deliver<P>(client: &RelayClient, endpoint: &P, payload: Bytes)
where
    P: EndpointProvider + ?Sized,
{
    match attempt(client, endpoint, payload).await {
        Ok(status) => {
            let status_code = status.as_u16();
            tracing::debug!(%status_code, "Notification relayed");
        }
        Err(error) => {
            let cause = error.report();

            match error.status_code() {
                Some(status_code) => {
                    tracing::error!(%status_code, %cause, "Couldn't complete HTTP request successfully");
                }
                None => {
                    tracing::error!(%cause, "Couldn't send data to HTTP relay");
                }
            }
        }
    }
}

impl Relay for Http {
    fn transport(&self, payload: Bytes) -> crate::Result<()> {
        self.sender
            .unbounded_send(payload)
            .map_err(|_| Error::RelayClosed)
    }
}
