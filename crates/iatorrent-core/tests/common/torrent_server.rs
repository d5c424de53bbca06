//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves fixed responses per request path, answers 404 for anything else, and
//! records every requested path so tests can assert how many GETs were made.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub enum Route {
    /// `200 OK` with this body.
    Ok(Vec<u8>),
    /// Any status line (e.g. "503 Service Unavailable") with a short body.
    Status(&'static str),
    /// `302 Found` pointing at another path on this server.
    Redirect(String),
    /// `200 OK` advertising `declared` bytes but closing after sending `body`.
    Truncated { body: Vec<u8>, declared: usize },
}

pub struct TorrentServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl TorrentServer {
    /// Number of requests received for `path` (e.g. "/abc/abc_archive.torrent").
    pub fn hits(&self, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.as_str() == path)
            .count()
    }

    pub fn total_hits(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

/// Path the pipeline requests for `identifier`.
pub fn torrent_path(identifier: &str) -> String {
    format!("/{}/{}_archive.torrent", identifier, identifier)
}

/// Starts a server in a background thread. Runs until the process exits.
pub fn start(routes: HashMap<String, Route>) -> TorrentServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let base_url = format!("http://127.0.0.1:{}", port);
    let routes = Arc::new(routes);
    let requests = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&requests);
    let origin = base_url.clone();
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let log = Arc::clone(&log);
            let origin = origin.clone();
            thread::spawn(move || handle(stream, &routes, &log, &origin));
        }
    });
    TorrentServer { base_url, requests }
}

fn handle(
    mut stream: TcpStream,
    routes: &HashMap<String, Route>,
    log: &Mutex<Vec<String>>,
    origin: &str,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(5)));
    let Some(path) = read_request_path(&mut stream) else {
        return;
    };
    log.lock().unwrap().push(path.clone());

    match routes.get(&path) {
        Some(Route::Ok(body)) => respond(&mut stream, "200 OK", &[], body, body.len()),
        Some(Route::Status(status)) => {
            respond(&mut stream, status, &[], b"error page", "error page".len())
        }
        Some(Route::Redirect(to)) => {
            let location = format!("Location: {}{}", origin, to);
            respond(&mut stream, "302 Found", &[&location], b"", 0)
        }
        Some(Route::Truncated { body, declared }) => {
            respond(&mut stream, "200 OK", &[], body, *declared)
        }
        None => respond(&mut stream, "404 Not Found", &[], b"not found", "not found".len()),
    }
    let _ = stream.flush();
    let _ = stream.shutdown(Shutdown::Write);
}

fn respond(
    stream: &mut TcpStream,
    status: &str,
    extra_headers: &[&str],
    body: &[u8],
    content_length: usize,
) {
    let mut head = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n",
        status, content_length
    );
    for h in extra_headers {
        head.push_str(h);
        head.push_str("\r\n");
    }
    head.push_str("\r\n");
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
}

/// Reads the full request head and returns the request path of a GET.
fn read_request_path(stream: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let request = String::from_utf8_lossy(&buf);
    let mut first = request.lines().next()?.split_whitespace();
    let method = first.next()?;
    let path = first.next()?;
    if !method.eq_ignore_ascii_case("GET") {
        return None;
    }
    Some(path.to_string())
}
