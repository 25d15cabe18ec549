use bytes::Bytes;
use notification_relay::*;
use std::time::{Duration, Instant};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
    sync::mpsc,
    time::timeout,
};

const WAIT: Duration = Duration::from_secs(5);

#[derive(Debug)]
struct Request {
    head: String,
    body: Vec<u8>,
}

impl Request {
    fn header(&self, name: &str) -> Option<&str> {
        self.head.lines().skip(1).find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim()
                .eq_ignore_ascii_case(name)
                .then(|| value.trim())
        })
    }

    fn body(&self) -> &str {
        std::str::from_utf8(&self.body).unwrap()
    }
}

struct Server {
    url: String,
    requests: mpsc::UnboundedReceiver<Request>,
}

impl Server {
    /// Accepts connections and answers every request with `status`
    async fn start(status: u16) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/hook", listener.local_addr().unwrap());
        let (sender, requests) = mpsc::unbounded_channel();

        let _ = tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let sender = sender.clone();

                let _ = tokio::spawn(async move {
                    let request = read_request(&mut stream).await;
                    let _ = sender.send(request);

                    let response = format!(
                        "HTTP/1.1 {} Test\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
                        status
                    );
                    stream.write_all(response.as_bytes()).await.unwrap();
                    let _ = stream.shutdown().await;
                });
            }
        });

        Self { url, requests }
    }

    async fn next_request(&mut self) -> Request {
        timeout(WAIT, self.requests.recv())
            .await
            .expect("request within timeout")
            .expect("server running")
    }
}

async fn read_request(stream: &mut TcpStream) -> Request {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let read = stream.read(&mut chunk).await.unwrap();
        assert!(read > 0, "connection closed before full request");
        buffer.extend_from_slice(&chunk[..read]);

        if let Some(end) = buffer.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buffer[..end]).into_owned();
            let length = head
                .lines()
                .find_map(|line| {
                    let (key, value) = line.split_once(':')?;
                    key.trim()
                        .eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);

            let body_start = end + 4;
            if buffer.len() >= body_start + length {
                return Request {
                    head,
                    body: buffer[body_start..body_start + length].to_vec(),
                };
            }
        }
    }
}

/// Address nothing listens on
async fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    format!("http://{}/hook", addr)
}

fn client() -> RelayClient {
    let client = reqwest::Client::builder()
        .no_proxy()
        .timeout(WAIT)
        .build()
        .unwrap();

    RelayClient::from_client(client)
}

fn bank_event() -> RawEvent {
    RawEvent::new(Some("com.bank.app"), Some("Payment"), Some("You received $10"))
}

#[tokio::test]
async fn send_posts_json_and_reports_status() {
    let mut server = Server::start(200).await;
    let payload = encode(&NormalizedEvent::from(bank_event()));

    let status = client()
        .send(payload, &EndpointConfig::new(server.url.clone()))
        .await
        .unwrap();

    assert_eq!(status.as_u16(), 200);

    let request = server.next_request().await;
    assert!(request.head.starts_with("POST /hook "));
    assert_eq!(request.header("content-type"), Some(CONTENT_TYPE_JSON));
    assert_eq!(
        request.body(),
        r#"{"package":"com.bank.app","title":"Payment","text":"You received $10"}"#
    );
}

#[tokio::test]
async fn any_2xx_is_success() {
    let server = Server::start(204).await;

    let status = client()
        .send(Bytes::from_static(b"{}"), &EndpointConfig::new(server.url.clone()))
        .await
        .unwrap();

    assert_eq!(status.as_u16(), 204);
}

#[tokio::test]
async fn server_error_becomes_transmit_error() {
    let server = Server::start(500).await;

    let error = client()
        .send(Bytes::from_static(b"{}"), &EndpointConfig::new(server.url.clone()))
        .await
        .unwrap_err();

    assert!(matches!(error, TransmitError::Status(500)));
    assert_eq!(error.status_code(), Some(500));
}

#[tokio::test]
async fn connection_refused_becomes_transmit_error() {
    let url = refused_url().await;

    let error = client()
        .send(Bytes::from_static(b"{}"), &EndpointConfig::new(url))
        .await
        .unwrap_err();

    assert!(matches!(error, TransmitError::Transport(_)));
    assert!(
        error.report().to_lowercase().contains("refused"),
        "cause missing from {:?}",
        error.report()
    );
}

/// Address that accepts connections and never answers
async fn hung_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/hook", listener.local_addr().unwrap());

    let _ = tokio::spawn(async move {
        let mut held = Vec::new();

        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });

    url
}

fn impatient_client() -> RelayClient {
    let client = reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_millis(300))
        .build()
        .unwrap();

    RelayClient::from_client(client)
}

#[tokio::test]
async fn silent_endpoint_times_out() {
    let url = hung_url().await;

    let error = impatient_client()
        .send(Bytes::from_static(b"{}"), &EndpointConfig::new(url))
        .await
        .unwrap_err();

    match error {
        TransmitError::Transport(ref source) => assert!(source.is_timeout()),
        ref other => panic!("expected a transport timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn silent_endpoint_does_not_block_capture() {
    let relay = Http::with_client(impatient_client(), 4, EndpointConfig::new(hung_url().await)).unwrap();
    let capture = Capture::new(relay);

    let started = Instant::now();
    for _ in 0..50 {
        capture.on_raw_event(bank_event());
    }
    let elapsed = started.elapsed();

    assert!(elapsed < Duration::from_millis(250), "capture took {:?}", elapsed);
    assert_eq!(capture.log().len(), 50);
}

#[tokio::test]
async fn capture_relays_and_logs() {
    let mut server = Server::start(200).await;
    let relay = Http::with_client(client(), 4, EndpointConfig::new(server.url.clone())).unwrap();
    let capture = Capture::new(relay);

    capture.on_raw_event(bank_event());

    assert_eq!(
        capture.log().snapshot().last(),
        Some(&NormalizedEvent::from(bank_event()))
    );

    let request = server.next_request().await;
    assert_eq!(
        request.body(),
        r#"{"package":"com.bank.app","title":"Payment","text":"You received $10"}"#
    );
}

#[tokio::test]
async fn capture_relays_placeholders_for_missing_fields() {
    let mut server = Server::start(200).await;
    let relay = Http::with_client(client(), 4, EndpointConfig::new(server.url.clone())).unwrap();
    let capture = Capture::new(relay);

    capture.on_raw_event(RawEvent::new(Some("com.chat"), None, None));

    let request = server.next_request().await;
    assert!(request.body().contains(r#""title":"No Title","text":"No Text""#));
}

#[tokio::test]
async fn unreachable_endpoint_does_not_block_logging() {
    let relay = Http::with_client(client(), 4, EndpointConfig::new(refused_url().await)).unwrap();
    let capture = Capture::new(relay);

    for _ in 0..3 {
        capture.on_raw_event(bank_event());
    }

    assert_eq!(capture.log().len(), 3);
}

#[tokio::test]
async fn failing_endpoint_keeps_worker_alive() {
    let mut server = Server::start(500).await;
    let relay = Http::with_client(client(), 1, EndpointConfig::new(server.url.clone())).unwrap();
    let capture = Capture::new(relay);

    capture.on_raw_event(bank_event());
    capture.on_raw_event(RawEvent::default());

    let _ = server.next_request().await;
    let second = server.next_request().await;

    assert!(second.body().contains("No Title"));
    assert_eq!(capture.log().len(), 2);
}

#[tokio::test]
async fn endpoint_change_applies_to_next_event() {
    let mut first = Server::start(200).await;
    let mut second = Server::start(200).await;

    let store = EndpointStore::without_default();
    store.set_url(first.url.clone());

    let relay = Http::with_client(client(), 1, store.clone()).unwrap();
    let capture = Capture::new(relay);

    capture.on_raw_event(bank_event());
    let _ = first.next_request().await;

    store.set_url(second.url.clone());
    capture.on_raw_event(RawEvent::new(Some("com.other"), Some("Moved"), None));

    let request = second.next_request().await;
    assert!(request.body().contains("com.other"));
}

#[tokio::test]
async fn missing_endpoint_skips_relay_but_logs() {
    let relay = Http::with_client(client(), 1, EndpointStore::without_default()).unwrap();
    let capture = Capture::new(relay);

    capture.on_raw_event(bank_event());

    assert_eq!(capture.log().len(), 1);
}

#[tokio::test]
async fn log_subscribers_follow_capture() {
    let capture = Capture::new(Noop::new());
    let mut subscription = capture.log().subscribe();

    capture.on_raw_event(bank_event());

    let events = timeout(WAIT, subscription.changed())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(events, vec![NormalizedEvent::from(bank_event())]);
}
