use super::*;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    response::Response,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::gate::RequestGate;
use crate::reviewer::Reviewer;
use crate::test_support::StubProvider;

const TOKEN: &str = "s3cret";

fn create_test_router(provider: Arc<StubProvider>, deployment: Option<&str>) -> Router {
    let state = AppState::new(
        RequestGate::new(Some(TOKEN.to_string()), deployment.map(str::to_string)),
        Reviewer::new(provider, "Answer in JSON."),
    );
    create_router(Arc::new(state))
}

fn review_request(headers: &[(&str, &str)], body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/revisor")
        .header("content-type", "application/json");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_version_endpoint() {
    let app = create_test_router(Arc::new(StubProvider::replying("{}")), None);
    let response = app
        .oneshot(Request::builder().uri("/version").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({"version": "1.0.0"}));
}

#[tokio::test]
async fn test_version_ignores_headers() {
    let app = create_test_router(Arc::new(StubProvider::replying("{}")), None);
    let response = app
        .oneshot(
            Request::builder()
                .uri("/version")
                .header("token_id", "whatever")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_review_endpoint_success() {
    let provider = Arc::new(StubProvider::replying("```json\n{\"score\": 5}\n```"));
    let app = create_test_router(provider.clone(), Some("default-dep"));

    let response = app
        .oneshot(review_request(&[("token_id", TOKEN)], r#"{"texto": "Lorem ipsum"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({"score": 5}));

    let seen = provider.last_request().unwrap();
    assert_eq!(seen.deployment, "default-dep");
    assert_eq!(seen.messages[0].content, "Answer in JSON.");
    assert_eq!(seen.messages[1].content, "Lorem ipsum");
}

#[tokio::test]
async fn test_review_endpoint_deployment_override() {
    let provider = Arc::new(StubProvider::replying("{}"));
    let app = create_test_router(provider.clone(), Some("default-dep"));

    let response = app
        .oneshot(review_request(
            &[("token_id", TOKEN), ("assistant_id", "other-dep")],
            r#"{"texto": "x"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(provider.last_request().unwrap().deployment, "other-dep");
}

#[tokio::test]
async fn test_review_endpoint_wrong_token_regardless_of_body() {
    for body in [r#"{"texto": "x"}"#, "", "{not json"] {
        let provider = Arc::new(StubProvider::replying("{}"));
        let app = create_test_router(provider.clone(), Some("dep"));

        let response = app
            .oneshot(review_request(&[("token_id", "wrong")], body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await, json!({"detail": "Token inválido"}));
        assert_eq!(provider.calls(), 0);
    }
}

#[tokio::test]
async fn test_review_endpoint_wrong_token_with_oversized_body() {
    let provider = Arc::new(StubProvider::replying("{}"));
    let app = create_test_router(provider.clone(), Some("dep"));
    let body = format!(r#"{{"texto": "{}"}}"#, "a".repeat(3 * 1024 * 1024));

    let response = app
        .oneshot(review_request(&[("token_id", "wrong")], &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_review_endpoint_oversized_body() {
    let provider = Arc::new(StubProvider::replying("{}"));
    let app = create_test_router(provider.clone(), Some("dep"));
    let body = format!(r#"{{"texto": "{}"}}"#, "a".repeat(3 * 1024 * 1024));

    let response = app
        .oneshot(review_request(&[("token_id", TOKEN)], &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_review_endpoint_missing_token() {
    let app = create_test_router(Arc::new(StubProvider::replying("{}")), Some("dep"));
    let response = app
        .oneshot(review_request(&[], r#"{"texto": "x"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_review_endpoint_missing_text() {
    let provider = Arc::new(StubProvider::replying("{}"));
    let app = create_test_router(provider.clone(), Some("dep"));

    let response = app
        .oneshot(review_request(&[("token_id", TOKEN)], r#"{"texto": ""}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({"detail": "Campo 'texto' é obrigatório"})
    );
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_review_endpoint_malformed_body() {
    let app = create_test_router(Arc::new(StubProvider::replying("{}")), Some("dep"));
    let response = app
        .oneshot(review_request(&[("token_id", TOKEN)], "{not json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(response).await["detail"].is_string());
}

#[tokio::test]
async fn test_review_endpoint_no_deployment() {
    let provider = Arc::new(StubProvider::replying("{}"));
    let app = create_test_router(provider.clone(), None);

    let response = app
        .oneshot(review_request(&[("token_id", TOKEN)], r#"{"texto": "x"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        json!({"detail": "Deployment não configurado."})
    );
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_review_endpoint_null_reply() {
    let app = create_test_router(Arc::new(StubProvider::with_content(Value::Null)), Some("dep"));
    let response = app
        .oneshot(review_request(&[("token_id", TOKEN)], r#"{"texto": "x"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, Value::Null);
}

#[tokio::test]
async fn test_review_endpoint_unparseable_reply() {
    let app = create_test_router(Arc::new(StubProvider::replying("I think it is fine")), Some("dep"));
    let response = app
        .oneshot(review_request(&[("token_id", TOKEN)], r#"{"texto": "x"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let detail = json_body(response).await["detail"].as_str().unwrap().to_string();
    assert!(detail.starts_with("Resposta do assistente não é JSON válido."));
    assert!(detail.contains("I think it is fine"));
}

#[tokio::test]
async fn test_review_endpoint_upstream_failure() {
    let app = create_test_router(Arc::new(StubProvider::failing(429, "rate limited")), Some("dep"));
    let response = app
        .oneshot(review_request(&[("token_id", TOKEN)], r#"{"texto": "x"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let detail = json_body(response).await["detail"].as_str().unwrap().to_string();
    assert!(detail.contains("rate limited"));
}

#[tokio::test]
async fn test_unknown_route() {
    let app = create_test_router(Arc::new(StubProvider::replying("{}")), None);
    let response = app
        .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = create_test_router(Arc::new(StubProvider::replying("{}")), None);
    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/revisor")
                .header("origin", "https://example.org")
                .header("access-control-request-method", "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("https://example.org")
    );
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-credentials")
            .and_then(|v| v.to_str().ok()),
        Some("true")
    );
}
