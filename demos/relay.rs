use notification_relay::*;
use std::time::Duration;
use tokio::time::sleep;
use tracing_subscriber::EnvFilter;

#[tokio::main(worker_threads = 1)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let endpoint = EndpointStore::new();

    if let Some(url) = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("NOTIFICATION_RELAY_URL").ok())
    {
        endpoint.set_url(url);
    }

    let relay = match Http::new(ClientConfig::default(), endpoint.clone()) {
        Ok(relay) => relay,
        Err(ref error) => {
            tracing::error!(%error, "Couldn't set up HTTP relay");
            return;
        }
    };

    let capture = Capture::new(relay);

    capture_samples(&capture);

    for event in capture.log().snapshot() {
        tracing::info!(
            package = event.source_id.as_deref().unwrap_or("-"),
            title = event.title_or_default(),
            text = event.body_or_default(),
            "Logged notification"
        );
    }

    // Needed on standalone demo to wait until all notifications have been sent
    sleep(Duration::from_secs(5)).await;
}

fn capture_samples<R: Relay>(capture: &Capture<R>) {
    capture.on_raw_event(RawEvent::new(
        Some("com.bank.app"),
        Some("Payment"),
        Some("You received $10"),
    ));
    capture.on_raw_event(RawEvent::new(Some("com.chat"), None, None));
    capture.on_raw_event(RawEvent::new(None, Some("System"), Some("Battery low")));
}
