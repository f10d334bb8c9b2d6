//! HTTP digest analysis server.
//!
//! Hashes text, inspects digests and compares pairs over a small JSON API.
//! Every request is independent; the only shared state is the hasher and the
//! default algorithm.

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use digestscope_core::{
    ComparisonReport, Digest, DigestError, DigestReport, Explorer, HashAlgorithm,
    RustCryptoHasher,
};

/// Shared server state.
struct AppState {
    explorer: Explorer<RustCryptoHasher>,
}

#[derive(Deserialize)]
struct InspectRequest {
    text: String,
    /// Overrides the server default (md5, sha1, sha256, sha512).
    algorithm: Option<String>,
}

#[derive(Deserialize)]
struct CompareRequest {
    text_a: String,
    text_b: String,
    algorithm: Option<String>,
}

#[derive(Deserialize)]
struct AnalyzeRequest {
    digest_a: String,
    digest_b: String,
    /// Source texts; without them the avalanche effect is reported as 0.
    #[serde(default)]
    text_a: String,
    #[serde(default)]
    text_b: String,
}

#[derive(Serialize)]
struct InspectResponse {
    algorithm: HashAlgorithm,
    report: DigestReport,
}

#[derive(Serialize)]
struct CompareResponse {
    algorithm: HashAlgorithm,
    report: ComparisonReport,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    default_algorithm: HashAlgorithm,
}

#[derive(Serialize)]
struct AlgorithmEntry {
    name: &'static str,
    display_name: &'static str,
    hex_length: usize,
    bit_length: usize,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

fn bad_request(message: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    let error = message.into();
    log::warn!("rejected request: {error}");
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error }))
}

fn engine_error(e: DigestError) -> (StatusCode, Json<ErrorResponse>) {
    bad_request(e.to_string())
}

fn resolve_algorithm(
    requested: Option<&str>,
    default: HashAlgorithm,
) -> Result<HashAlgorithm, (StatusCode, Json<ErrorResponse>)> {
    match requested {
        Some(name) => name.parse().map_err(engine_error),
        None => Ok(default),
    }
}

async fn handle_inspect(
    State(state): State<Arc<AppState>>,
    Json(req): Json<InspectRequest>,
) -> ApiResult<InspectResponse> {
    let algorithm = resolve_algorithm(req.algorithm.as_deref(), state.explorer.algorithm())?;
    let explorer = state.explorer.clone().with_algorithm(algorithm);
    let report = explorer.inspect(&req.text).map_err(engine_error)?;
    Ok(Json(InspectResponse { algorithm, report }))
}

async fn handle_compare(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CompareRequest>,
) -> ApiResult<CompareResponse> {
    let algorithm = resolve_algorithm(req.algorithm.as_deref(), state.explorer.algorithm())?;
    let explorer = state.explorer.clone().with_algorithm(algorithm);
    let report = explorer
        .compare_texts(&req.text_a, &req.text_b)
        .map_err(engine_error)?;
    log::debug!(
        "compare {}: {} bits differ",
        algorithm.name(),
        report.comparison.diff_bits
    );
    Ok(Json(CompareResponse { algorithm, report }))
}

async fn handle_analyze(Json(req): Json<AnalyzeRequest>) -> ApiResult<ComparisonReport> {
    let a = Digest::parse(&req.digest_a).map_err(engine_error)?;
    let b = Digest::parse(&req.digest_b).map_err(engine_error)?;
    if a.algorithm() != b.algorithm() {
        return Err(bad_request(format!(
            "digests come from different algorithms ({} vs {})",
            a.algorithm().display_name(),
            b.algorithm().display_name()
        )));
    }
    ComparisonReport::build(a.as_str(), b.as_str(), &req.text_a, &req.text_b)
        .map(Json)
        .map_err(engine_error)
}

async fn handle_algorithms() -> Json<Vec<AlgorithmEntry>> {
    Json(
        HashAlgorithm::ALL
            .iter()
            .map(|a| AlgorithmEntry {
                name: a.name(),
                display_name: a.display_name(),
                hex_length: a.hex_len(),
                bit_length: a.bit_len(),
            })
            .collect(),
    )
}

async fn handle_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: digestscope_core::VERSION,
        default_algorithm: state.explorer.algorithm(),
    })
}

async fn handle_index(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "digestscope server",
        "version": digestscope_core::VERSION,
        "default_algorithm": state.explorer.algorithm(),
        "endpoints": {
            "/": "This API index",
            "/health": "Health check",
            "/api/v1/algorithms": "Supported hash algorithms",
            "/api/v1/inspect": {
                "method": "POST",
                "description": "Hash one text and report statistics, bit counts and the bit pattern",
                "body": { "text": "Input text", "algorithm": "Optional: md5, sha1, sha256, sha512" }
            },
            "/api/v1/compare": {
                "method": "POST",
                "description": "Hash two texts and compare the digests",
                "body": { "text_a": "Original text", "text_b": "Modified text", "algorithm": "Optional" }
            },
            "/api/v1/analyze": {
                "method": "POST",
                "description": "Compare two precomputed digests of the same algorithm",
                "body": { "digest_a": "Hex digest", "digest_b": "Hex digest", "text_a": "Optional source text", "text_b": "Optional source text" }
            },
        },
    }))
}

/// Build the axum router with `algorithm` as the default for requests that
/// do not name one.
pub fn build_router(algorithm: HashAlgorithm) -> Router {
    let state = Arc::new(AppState {
        explorer: Explorer::new(RustCryptoHasher, algorithm),
    });

    Router::new()
        .route("/", get(handle_index))
        .route("/health", get(handle_health))
        .route("/api/v1/algorithms", get(handle_algorithms))
        .route("/api/v1/inspect", post(handle_inspect))
        .route("/api/v1/compare", post(handle_compare))
        .route("/api/v1/analyze", post(handle_analyze))
        .with_state(state)
}

/// Run the HTTP analysis server until it fails.
pub async fn run_server(host: &str, port: u16, algorithm: HashAlgorithm) -> std::io::Result<()> {
    let app = build_router(algorithm);
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("listening on {addr} (default algorithm {})", algorithm.name());
    axum::serve(listener, app).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(HashAlgorithm::Sha256);
        let resp = app.oneshot(get_req("/health")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["default_algorithm"], "sha256");
    }

    #[tokio::test]
    async fn test_index_lists_endpoints() {
        let app = build_router(HashAlgorithm::Md5);
        let body = body_json(app.oneshot(get_req("/")).await.unwrap()).await;
        assert_eq!(body["default_algorithm"], "md5");
        assert!(body["endpoints"]["/api/v1/compare"].is_object());
    }

    #[tokio::test]
    async fn test_algorithms() {
        let app = build_router(HashAlgorithm::Sha256);
        let body = body_json(app.oneshot(get_req("/api/v1/algorithms")).await.unwrap()).await;
        let list = body.as_array().unwrap();
        assert_eq!(list.len(), 4);
        assert_eq!(list[0]["name"], "md5");
        assert_eq!(list[3]["hex_length"], 128);
    }

    #[tokio::test]
    async fn test_inspect_uses_default_algorithm() {
        let app = build_router(HashAlgorithm::Sha256);
        let resp = app
            .oneshot(post_json("/api/v1/inspect", serde_json::json!({ "text": "abc" })))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["algorithm"], "sha256");
        assert_eq!(
            body["report"]["digest"],
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[tokio::test]
    async fn test_inspect_algorithm_override() {
        let app = build_router(HashAlgorithm::Sha256);
        let resp = app
            .oneshot(post_json(
                "/api/v1/inspect",
                serde_json::json!({ "text": "abc", "algorithm": "MD5" }),
            ))
            .await
            .unwrap();
        let body = body_json(resp).await;
        assert_eq!(body["report"]["digest"], "900150983cd24fb0d6963f7d28e17f72");
    }

    #[tokio::test]
    async fn test_inspect_rejects_empty_text() {
        let app = build_router(HashAlgorithm::Sha256);
        let resp = app
            .oneshot(post_json("/api/v1/inspect", serde_json::json!({ "text": "   " })))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(resp).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_inspect_rejects_unknown_algorithm() {
        let app = build_router(HashAlgorithm::Sha256);
        let resp = app
            .oneshot(post_json(
                "/api/v1/inspect",
                serde_json::json!({ "text": "abc", "algorithm": "blake3" }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_compare_texts() {
        let app = build_router(HashAlgorithm::Sha256);
        let resp = app
            .oneshot(post_json(
                "/api/v1/compare",
                serde_json::json!({ "text_a": "abc", "text_b": "abd" }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        let comparison = &body["report"]["comparison"];
        assert_eq!(comparison["identical"], false);
        assert_eq!(comparison["input_diff_count"], 1);
        assert!(comparison["diff_bits"].as_u64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_analyze_digests() {
        let app = build_router(HashAlgorithm::Sha256);
        let resp = app
            .oneshot(post_json(
                "/api/v1/analyze",
                serde_json::json!({
                    "digest_a": "900150983CD24FB0D6963F7D28E17F72",
                    "digest_b": "900150983cd24fb0d6963f7d28e17f73",
                }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["comparison"]["diff_positions"], serde_json::json!([31]));
        assert_eq!(body["comparison"]["diff_bits"], 1);
        assert_eq!(body["comparison"]["avalanche_effect"], 0.0);
    }

    #[tokio::test]
    async fn test_analyze_rejects_mixed_algorithms() {
        let app = build_router(HashAlgorithm::Sha256);
        let resp = app
            .oneshot(post_json(
                "/api/v1/analyze",
                serde_json::json!({
                    "digest_a": "900150983cd24fb0d6963f7d28e17f72",
                    "digest_b": "a9993e364706816aba3e25717850c26c9cd0d89d",
                }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("different algorithms"));
    }

    #[tokio::test]
    async fn test_analyze_rejects_bad_hex() {
        let app = build_router(HashAlgorithm::Sha256);
        let resp = app
            .oneshot(post_json(
                "/api/v1/analyze",
                serde_json::json!({ "digest_a": "zz", "digest_b": "zz" }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
