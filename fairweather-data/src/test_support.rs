//! Test doubles for the data adapters.
//!
//! [`StubVenueSource`] answers venue fetches from a per-category table.
//! [`CannedServer`] is a minimal loopback HTTP server that replays fixed
//! responses and records what it was sent, so the HTTP adapters can be
//! exercised without a real service.

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use async_trait::async_trait;
use fairweather_core::Venue;
use log::debug;

use crate::gather::{GatherError, GatherQuery, VenueSource};

/// Stub `VenueSource` returning pre-configured batches per category.
///
/// Categories without an entry yield an empty batch. Every query is
/// recorded.
#[derive(Debug, Default)]
pub struct StubVenueSource {
    responses: HashMap<String, Result<Vec<Venue>, GatherError>>,
    calls: Mutex<Vec<GatherQuery>>,
}

impl StubVenueSource {
    /// A source with no configured categories.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer fetches for `category` with `venues`.
    #[must_use]
    pub fn with_venues(mut self, category: impl Into<String>, venues: Vec<Venue>) -> Self {
        self.responses.insert(category.into(), Ok(venues));
        self
    }

    /// Fail fetches for `category` with `error`.
    #[must_use]
    pub fn with_error(mut self, category: impl Into<String>, error: GatherError) -> Self {
        self.responses.insert(category.into(), Err(error));
        self
    }

    /// Queries received so far, in arrival order.
    #[must_use]
    pub fn calls(&self) -> Vec<GatherQuery> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl VenueSource for StubVenueSource {
    async fn fetch(&self, query: &GatherQuery) -> Result<Vec<Venue>, GatherError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(query.clone());
        }
        let category = query.category.as_deref().unwrap_or_default();
        self.responses
            .get(category)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// A response replayed by [`CannedServer`].
#[derive(Debug, Clone)]
pub struct CannedResponse {
    status: u16,
    body: String,
    delay: Duration,
}

impl CannedResponse {
    /// Respond with `status` and a JSON content type.
    #[must_use]
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    /// Wait `delay` before answering.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn render(&self) -> String {
        let reason = if self.status == 200 { "OK" } else { "Canned" };
        format!(
            "HTTP/1.1 {} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status,
            self.body.len(),
            self.body
        )
    }
}

/// A request received by [`CannedServer`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedRequest {
    /// HTTP method.
    pub method: String,
    /// Request target including any query string.
    pub path: String,
    /// Headers with lower-cased names.
    pub headers: Vec<(String, String)>,
    /// Body decoded as UTF-8.
    pub body: String,
}

impl CapturedRequest {
    /// Look up a header by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Loopback HTTP server answering one connection per canned response.
///
/// The server thread exits after the last response has been sent.
#[derive(Debug)]
pub struct CannedServer {
    base_url: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl CannedServer {
    /// Bind an ephemeral loopback port and start replaying `responses`.
    ///
    /// # Panics
    ///
    /// Panics if no loopback port can be bound.
    #[must_use]
    pub fn start(responses: impl IntoIterator<Item = CannedResponse>) -> Self {
        let listener = match TcpListener::bind("127.0.0.1:0") {
            Ok(listener) => listener,
            Err(err) => panic!("failed to bind loopback listener: {err}"),
        };
        let base_url = match listener.local_addr() {
            Ok(addr) => format!("http://{addr}"),
            Err(err) => panic!("failed to read listener address: {err}"),
        };
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&requests);
        let queue: Vec<CannedResponse> = responses.into_iter().collect();
        thread::spawn(move || serve(&listener, queue, &log));
        Self { base_url, requests }
    }

    /// A loopback URL nothing is listening on.
    ///
    /// # Panics
    ///
    /// Panics if no loopback port can be bound.
    #[must_use]
    pub fn unused_base_url() -> String {
        match TcpListener::bind("127.0.0.1:0").and_then(|listener| listener.local_addr()) {
            Ok(addr) => format!("http://{addr}"),
            Err(err) => panic!("failed to reserve loopback port: {err}"),
        }
    }

    /// Base URL of the server, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Requests received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

fn serve(listener: &TcpListener, queue: Vec<CannedResponse>, log: &Mutex<Vec<CapturedRequest>>) {
    for response in queue {
        let Ok((mut stream, _)) = listener.accept() else {
            break;
        };
        match read_request(&stream) {
            Ok(request) => {
                if let Ok(mut requests) = log.lock() {
                    requests.push(request);
                }
            }
            Err(err) => debug!("canned server failed to read request: {err}"),
        }
        if !response.delay.is_zero() {
            thread::sleep(response.delay);
        }
        if let Err(err) = stream.write_all(response.render().as_bytes()) {
            debug!("canned server failed to write response: {err}");
        }
    }
}

fn read_request(stream: &TcpStream) -> std::io::Result<CapturedRequest> {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_owned();
    let path = parts.next().unwrap_or_default().to_owned();

    let mut headers = Vec::new();
    let mut content_length = 0_usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let header = line.trim_end();
        if header.is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            let key = name.trim().to_ascii_lowercase();
            let trimmed = value.trim().to_owned();
            if key == "content-length" {
                content_length = trimmed.parse().unwrap_or(0);
            }
            headers.push((key, trimmed));
        }
    }

    let mut body = vec![0_u8; content_length];
    reader.read_exact(&mut body)?;
    Ok(CapturedRequest {
        method,
        path,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}
