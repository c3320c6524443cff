use std::sync::{Arc, Mutex};

use anyhow;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Canned response for one method/path pair.
pub struct StubRoute {
    pub method: &'static str,
    pub path: String,
    pub status: u16,
    pub body: String,
}

impl StubRoute {
    pub fn get(path: &str, status: u16, body: &str) -> StubRoute {
        StubRoute {
            method: "GET",
            path: String::from(path),
            status,
            body: String::from(body),
        }
    }

    pub fn post(path: &str, status: u16, body: &str) -> StubRoute {
        StubRoute {
            method: "POST",
            path: String::from(path),
            status,
            body: String::from(body),
        }
    }
}

type Hits = Arc<Mutex<Vec<(String, String, String)>>>;

/// A minimal HTTP/1.1 stand-in for the platform, bound to an ephemeral
/// local port. Unmatched paths answer 404.
pub struct StubServer {
    pub base_url: String,
    hits: Hits,
}

impl StubServer {
    pub async fn start(routes: Vec<StubRoute>) -> anyhow::Result<StubServer> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let hits: Hits = Arc::new(Mutex::new(vec![]));

        let routes = Arc::new(routes);
        let accept_hits = hits.clone();

        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };

                let routes = routes.clone();
                let hits = accept_hits.clone();

                tokio::spawn(async move {
                    let _ = handle(stream, routes, hits).await;
                });
            }
        });

        Ok(StubServer {
            base_url: format!("http://{}", addr),
            hits,
        })
    }

    /// Requests served so far, as (method, path, body).
    pub fn hits(&self) -> Vec<(String, String, String)> {
        self.hits.lock().unwrap().clone()
    }

    pub fn hit_count(&self, method: &str, path: &str) -> usize {
        self.hits()
            .iter()
            .filter(|(m, p, _)| m == method && p == path)
            .count()
    }
}

async fn handle(
    mut stream: TcpStream,
    routes: Arc<Vec<StubRoute>>,
    hits: Hits,
) -> anyhow::Result<()> {
    let mut buf = vec![0u8; 65536];
    let mut filled = 0usize;

    let head_end = loop {
        let n = stream.read(&mut buf[filled..]).await?;

        if n == 0 {
            return Ok(());
        }

        filled += n;

        if let Some(pos) = find_blank_line(&buf[..filled]) {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();

    let content_length = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;

            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0);

    let body_start = head_end + 4;

    while filled < body_start + content_length {
        let n = stream.read(&mut buf[filled..]).await?;

        if n == 0 {
            break;
        }

        filled += n;
    }

    let body_end = (body_start + content_length).min(filled);
    let body = String::from_utf8_lossy(&buf[body_start..body_end]).to_string();

    let request_line = head.lines().next().unwrap_or("");
    let mut parts = request_line.split_whitespace();
    let method = String::from(parts.next().unwrap_or(""));
    let path = String::from(parts.next().unwrap_or(""));

    hits.lock().unwrap().push((method.clone(), path.clone(), body));

    let (status, response_body) = match routes
        .iter()
        .find(|route| route.method == method && route.path == path)
    {
        Some(route) => (route.status, route.body.clone()),
        None => (404, String::from("{\"detail\": \"not found\"}")),
    };

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason_phrase(status),
        response_body.len(),
        response_body
    );

    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await?;

    Ok(())
}

fn find_blank_line(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|window| window == b"\r\n\r\n")
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "",
    }
}
