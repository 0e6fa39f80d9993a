#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    /// Header names are lowercased
    pub headers: HashMap<String, String>,
}

/// Minimal HTTP/1.1 server answering canned responses by path.
/// Unknown paths get a 404.
pub struct TestServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start(routes: Vec<(&str, u16, &str)>) -> Self {
        let routes: Arc<HashMap<String, (u16, String)>> = Arc::new(
            routes
                .into_iter()
                .map(|(path, status, body)| (path.to_string(), (status, body.to_string())))
                .collect(),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind test server");
        let addr = listener.local_addr().expect("local addr");
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = requests.clone();
        let handle = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let routes = routes.clone();
                let recorded = recorded.clone();
                tokio::spawn(async move {
                    serve(stream, &routes, &recorded).await;
                });
            }
        });

        Self {
            base_url: format!("http://{}/", addr),
            requests,
            handle,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve(
    mut stream: TcpStream,
    routes: &HashMap<String, (u16, String)>,
    recorded: &Mutex<Vec<RecordedRequest>>,
) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }

    let head = String::from_utf8_lossy(&buf).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_string();
    let path = request_line.next().unwrap_or_default().to_string();
    let headers = lines
        .take_while(|line| !line.is_empty())
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_lowercase(), v.trim().to_string()))
        .collect();

    recorded.lock().unwrap().push(RecordedRequest {
        method,
        path: path.clone(),
        headers,
    });

    let (status, body) = routes
        .get(&path)
        .cloned()
        .unwrap_or((404, r#"{"error":"not found"}"#.to_string()));
    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

pub const EN_DOCUMENT: &str = r#"{
  "language": { "code": "en" },
  "terms": {
    "title": "Terms of Service",
    "version": "Version 1.2",
    "effectiveDate": "Effective 2024-01-01",
    "notice": "Please read these terms carefully.",
    "sections": [
      {
        "title": "1. Acceptance",
        "content": [
          { "type": "paragraph", "text": "By using Ai Lazy Pack you agree to these terms." },
          { "type": "list", "items": ["Be at least 13 years old", "Provide accurate information"] }
        ]
      }
    ]
  },
  "privacy": {
    "title": "Privacy Policy",
    "version": "Version 1.0",
    "effectiveDate": "Effective 2024-01-01",
    "updatedDate": "Updated 2024-06-01",
    "intro": "We respect your privacy.",
    "sections": [
      { "title": "Data we collect", "content": [{ "type": "paragraph", "text": "Only what is needed." }] }
    ]
  },
  "consent": { "title": "Consent", "text": "I agree to the terms and privacy policy." },
  "contact": "support@ailazypack.example"
}"#;

pub const VI_DOCUMENT: &str = r#"{
  "language": { "code": "vi" },
  "terms": { "title": "Điều khoản dịch vụ", "version": "Phiên bản 1.2" },
  "privacy": { "title": "Chính sách quyền riêng tư" },
  "consent": { "title": "Đồng ý", "text": "Tôi đồng ý." },
  "contact": "hotro@ailazypack.example"
}"#;
