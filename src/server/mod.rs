//! HTTP surface for the feedback service.
//!
//! Blocking microserver with a thread-per-connection TCP accept loop; the
//! service is built before the loop starts and shared read-only. Request and
//! response bodies are typed serde structs validated at this boundary -
//! nothing untyped reaches the core.
//!
//! Routes:
//! - `POST /api/analyze`     {comment, department?} -> analyzed record
//! - `POST /api/analyze-csv` raw CSV body -> {results: [...]}
//! - `GET  /api/feedback`    {feedback: [...]} newest first
//! - `GET  /api/export-csv`  {csv: "..."} (payload is directly-writable CSV)
//! - `GET  /health`          status/version/uptime

pub mod microserver;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::net::{Shutdown, TcpListener};
use std::sync::Arc;
use std::time::Instant;

use crate::error::InputError;
use crate::ingest::AnalyzedComment;
use crate::service::FeedbackService;
use crate::store::FeedbackRecord;

use microserver::{HttpRequest, HttpResponse};

/// Server state shared across connection threads.
pub struct ServerState {
    service: FeedbackService,
    start_time: Instant,
    version: String,
}

impl ServerState {
    pub fn new(service: FeedbackService) -> Self {
        Self {
            service,
            start_time: Instant::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

// === API types ===

#[derive(Deserialize)]
struct AnalyzeRequest {
    comment: String,
    #[serde(default)]
    department: String,
}

#[derive(Serialize)]
struct CsvResults {
    results: Vec<AnalyzedComment>,
}

#[derive(Serialize)]
struct FeedbackList {
    feedback: Vec<FeedbackRecord>,
}

#[derive(Serialize)]
struct CsvExport {
    csv: String,
}

#[derive(Serialize)]
struct Health {
    status: String,
    version: String,
    uptime_secs: u64,
}

// === Helpers ===

/// Consistent JSON error body.
fn json_error(status: u16, message: &str) -> HttpResponse {
    HttpResponse::json(status, &serde_json::json!({ "error": message }))
}

/// Map a service error to a response: input-validation errors surface with
/// their message as 400, everything else is a generic 500.
fn error_response(err: &anyhow::Error) -> HttpResponse {
    if let Some(input) = err.downcast_ref::<InputError>() {
        json_error(400, &input.to_string())
    } else {
        eprintln!("request failed: {err:#}");
        json_error(500, "internal server error")
    }
}

/// Permissive CORS headers on every response.
fn with_cors_headers(response: HttpResponse) -> HttpResponse {
    response
        .with_header("Access-Control-Allow-Origin", "*")
        .with_header("Access-Control-Allow-Methods", "GET, POST, OPTIONS")
        .with_header("Access-Control-Allow-Headers", "Content-Type")
}

// === Routing ===

pub fn route_request(request: &HttpRequest, state: &ServerState) -> HttpResponse {
    let response = match (request.method.as_str(), request.path.as_str()) {
        ("OPTIONS", _) => HttpResponse::empty(204),
        ("GET", "/health") => handle_health(state),
        ("POST", "/api/analyze") => handle_analyze(request, state),
        ("POST", "/api/analyze-csv") => handle_analyze_csv(request, state),
        ("GET", "/api/feedback") => handle_feedback(state),
        ("GET", "/api/export-csv") => handle_export(state),
        _ => json_error(404, "Not found"),
    };
    with_cors_headers(response)
}

fn handle_health(state: &ServerState) -> HttpResponse {
    HttpResponse::json(
        200,
        &Health {
            status: "ok".to_string(),
            version: state.version.clone(),
            uptime_secs: state.uptime_secs(),
        },
    )
}

fn handle_analyze(request: &HttpRequest, state: &ServerState) -> HttpResponse {
    if request.body.is_empty() {
        return json_error(400, "Missing request body");
    }

    let body: AnalyzeRequest = match serde_json::from_slice(&request.body) {
        Ok(body) => body,
        Err(e) => return json_error(400, &format!("Invalid JSON: {}", e)),
    };

    match state.service.analyze(&body.comment, &body.department) {
        Ok(result) => HttpResponse::json(200, &result),
        Err(e) => error_response(&e),
    }
}

fn handle_analyze_csv(request: &HttpRequest, state: &ServerState) -> HttpResponse {
    if request.body.is_empty() {
        return json_error(400, "Missing CSV body");
    }

    match state.service.ingest(request.body.as_slice()) {
        Ok(results) => HttpResponse::json(200, &CsvResults { results }),
        Err(e) => error_response(&e),
    }
}

fn handle_feedback(state: &ServerState) -> HttpResponse {
    match state.service.list() {
        Ok(feedback) => HttpResponse::json(200, &FeedbackList { feedback }),
        Err(e) => error_response(&e),
    }
}

fn handle_export(state: &ServerState) -> HttpResponse {
    match state.service.export_csv() {
        Ok(csv) => HttpResponse::json(200, &CsvExport { csv }),
        Err(e) => error_response(&e),
    }
}

// === Transport: accept loop ===

fn handle_connection(stream: &mut std::net::TcpStream, state: &ServerState) {
    let request = match microserver::read_request(stream) {
        Some(Ok(request)) => request,
        Some(Err(msg)) => {
            microserver::write_response(stream, &with_cors_headers(json_error(400, &msg)));
            return;
        }
        None => return,
    };

    let response = route_request(&request, state);
    microserver::write_response(stream, &response);
}

/// Bind and serve forever.
pub fn run_server(host: &str, port: u16, service: FeedbackService) -> Result<()> {
    let state = Arc::new(ServerState::new(service));
    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr)?;

    println!("pulse server starting");
    println!("   Listening on http://{}", addr);
    println!("   Press Ctrl+C to stop\n");

    for stream in listener.incoming() {
        match stream {
            Ok(mut stream) => {
                let state = Arc::clone(&state);
                std::thread::spawn(move || {
                    handle_connection(&mut stream, &state);
                    let _ = stream.shutdown(Shutdown::Write);
                });
            }
            Err(e) => eprintln!("accept error: {}", e),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_state(temp: &TempDir) -> ServerState {
        ServerState::new(FeedbackService::open(temp.path()).unwrap())
    }

    fn post(path: &str, body: &[u8]) -> HttpRequest {
        HttpRequest {
            method: "POST".to_string(),
            path: path.to_string(),
            headers: vec![],
            body: body.to_vec(),
        }
    }

    fn get(path: &str) -> HttpRequest {
        HttpRequest {
            method: "GET".to_string(),
            path: path.to_string(),
            headers: vec![],
            body: vec![],
        }
    }

    fn body_json(response: &HttpResponse) -> serde_json::Value {
        serde_json::from_slice(&response.body).unwrap()
    }

    #[test]
    fn test_analyze_endpoint() {
        let temp = TempDir::new().unwrap();
        let state = test_state(&temp);

        let request = post(
            "/api/analyze",
            br#"{"comment": "The new facilities are a great improvement.", "department": "estates"}"#,
        );
        let response = route_request(&request, &state);
        assert_eq!(response.status, 200);

        let json = body_json(&response);
        assert_eq!(json["sentiment"], "positive");
        assert_eq!(json["department"], "estates");
        assert!(json["score"].as_f64().unwrap() > 0.0);
        assert!(json["id"].as_i64().unwrap() > 0);
    }

    #[test]
    fn test_analyze_rejects_blank_comment_with_400() {
        let temp = TempDir::new().unwrap();
        let state = test_state(&temp);

        let response = route_request(&post("/api/analyze", br#"{"comment": "  "}"#), &state);
        assert_eq!(response.status, 400);
        assert!(body_json(&response)["error"].is_string());
    }

    #[test]
    fn test_analyze_csv_missing_column_is_400() {
        let temp = TempDir::new().unwrap();
        let state = test_state(&temp);

        let response = route_request(
            &post("/api/analyze-csv", b"text,department\nhello,math\n"),
            &state,
        );
        assert_eq!(response.status, 400);
        let json = body_json(&response);
        assert!(json["error"].as_str().unwrap().contains("'comment'"));
    }

    #[test]
    fn test_csv_then_feedback_then_export() {
        let temp = TempDir::new().unwrap();
        let state = test_state(&temp);

        let csv = b"comment,department\nThe course has three sections.,math\n";
        let response = route_request(&post("/api/analyze-csv", csv), &state);
        assert_eq!(response.status, 200);
        assert_eq!(body_json(&response)["results"].as_array().unwrap().len(), 1);

        let response = route_request(&get("/api/feedback"), &state);
        assert_eq!(response.status, 200);
        let feedback = body_json(&response);
        assert_eq!(feedback["feedback"].as_array().unwrap().len(), 1);
        assert_eq!(feedback["feedback"][0]["sentiment"], "neutral");

        let response = route_request(&get("/api/export-csv"), &state);
        assert_eq!(response.status, 200);
        let export = body_json(&response);
        let csv_text = export["csv"].as_str().unwrap();
        assert!(csv_text.starts_with("id,comment,department,sentiment,score,timestamp"));
        assert_eq!(csv_text.lines().count(), 2);
    }

    #[test]
    fn test_unknown_route_is_404_with_cors() {
        let temp = TempDir::new().unwrap();
        let state = test_state(&temp);

        let response = route_request(&get("/nope"), &state);
        assert_eq!(response.status, 404);
        assert!(response
            .headers
            .iter()
            .any(|(k, v)| k == "Access-Control-Allow-Origin" && v == "*"));
    }

    #[test]
    fn test_options_preflight() {
        let temp = TempDir::new().unwrap();
        let state = test_state(&temp);

        let request = HttpRequest {
            method: "OPTIONS".to_string(),
            path: "/api/analyze".to_string(),
            headers: vec![],
            body: vec![],
        };
        let response = route_request(&request, &state);
        assert_eq!(response.status, 204);
        assert!(response.body.is_empty());
    }
}
