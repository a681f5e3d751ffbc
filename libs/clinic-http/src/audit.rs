//! Request/response audit logging.
//!
//! One structured record per request on the `api_audit` target: request
//! metadata and body, response status and body, tagged with the build
//! version. Side effect only; the response passes through unchanged.

use axum::body::{to_bytes, Body};
use axum::extract::Request;
use axum::http::{header, HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::Response;

/// Bodies above this size are cut in the log record; request bodies are
/// not captured at all past the cap, response bodies are truncated to it.
const MAX_CAPTURED_BODY: usize = 64 * 1024;

pub async fn audit_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let query = req.uri().query().unwrap_or_default().to_owned();
    let headers = format_headers(req.headers());

    let (req, request_body) = capture_request_body(req).await;

    let response = next.run(req).await;
    let status = response.status();

    let (parts, body) = response.into_parts();
    let body_bytes = to_bytes(body, usize::MAX).await.unwrap_or_default();
    let response_body = captured_response(status, &body_bytes);

    tracing::info!(
        target: "api_audit",
        %method,
        path,
        query,
        headers,
        request_body,
        status = status.as_u16(),
        response_body,
        version = env!("CARGO_PKG_VERSION"),
        "api request"
    );

    Response::from_parts(parts, Body::from(body_bytes))
}

/// Forbidden responses are logged without their body; anything else is
/// cut at [`MAX_CAPTURED_BODY`]. Only the log record is affected, the
/// caller still receives the full bytes.
fn captured_response(status: StatusCode, bytes: &[u8]) -> String {
    if status == StatusCode::FORBIDDEN {
        return String::from("null");
    }
    if bytes.len() > MAX_CAPTURED_BODY {
        let mut text = String::from_utf8_lossy(&bytes[..MAX_CAPTURED_BODY]).into_owned();
        text.push_str("<truncated>");
        return text;
    }
    String::from_utf8_lossy(bytes).into_owned()
}

/// Buffer JSON bodies of known, bounded size; anything else (multipart
/// uploads, oversized or streaming payloads) passes through unbuffered.
async fn capture_request_body(req: Request) -> (Request, String) {
    let is_json = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"));
    let length = req
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok());

    match (is_json, length) {
        (true, Some(len)) if len <= MAX_CAPTURED_BODY => {
            let (parts, body) = req.into_parts();
            match to_bytes(body, MAX_CAPTURED_BODY).await {
                Ok(bytes) => {
                    let text = String::from_utf8_lossy(&bytes).into_owned();
                    (Request::from_parts(parts, Body::from(bytes)), text)
                }
                Err(_) => (
                    Request::from_parts(parts, Body::empty()),
                    String::from("<unreadable body>"),
                ),
            }
        }
        (true, _) => (req, String::from("<body too large>")),
        (false, _) => (req, String::from("<non-json body omitted>")),
    }
}

fn format_headers(headers: &HeaderMap) -> String {
    let mut out = String::new();
    for (name, value) in headers {
        if !out.is_empty() {
            out.push_str(", ");
        }
        out.push_str(name.as_str());
        out.push('=');
        out.push_str(value.to_str().unwrap_or("<binary>"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request as HttpRequest;
    use axum::middleware;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use tower::ServiceExt as _;

    fn app() -> Router {
        Router::new()
            .route(
                "/echo",
                post(|Json(v): Json<serde_json::Value>| async move { Json(v) }),
            )
            .layer(middleware::from_fn(audit_log))
    }

    #[tokio::test]
    async fn response_passes_through_unaltered() {
        let request = HttpRequest::builder()
            .method("POST")
            .uri("/echo")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"hello":"world"}"#))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["hello"], "world");
    }

    #[tokio::test]
    async fn oversized_response_reaches_the_client_whole() {
        let app = Router::new()
            .route(
                "/big",
                get(|| async { "x".repeat(MAX_CAPTURED_BODY + 1024) }),
            )
            .layer(middleware::from_fn(audit_log));

        let request = HttpRequest::builder()
            .uri("/big")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(bytes.len(), MAX_CAPTURED_BODY + 1024);
    }

    #[test]
    fn oversized_response_body_is_cut_in_the_record() {
        let body = vec![b'a'; MAX_CAPTURED_BODY + 10];
        let captured = captured_response(StatusCode::OK, &body);
        assert!(captured.ends_with("<truncated>"));
        assert_eq!(captured.len(), MAX_CAPTURED_BODY + "<truncated>".len());
    }

    #[test]
    fn forbidden_response_body_is_not_recorded() {
        assert_eq!(captured_response(StatusCode::FORBIDDEN, b"secret"), "null");
    }

    #[tokio::test]
    async fn capture_skips_multipart() {
        let req = HttpRequest::builder()
            .method("POST")
            .uri("/upload")
            .header("content-type", "multipart/form-data; boundary=x")
            .body(Body::from("--x--"))
            .unwrap();

        let (_req, captured) = capture_request_body(req).await;
        assert_eq!(captured, "<non-json body omitted>");
    }
}
