use crate::e2e::helpers;

use helpers::TestContext;
use hyper::StatusCode;
use serde_json::json;

#[tokio::test]
async fn it_should_reject_empty_text() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .client
        .post("/api/v1/tts", &json!({"text": ""}))
        .await
        .unwrap();

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn it_should_reject_whitespace_only_text() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .client
        .post("/api/v1/tts", &json!({"text": "   \n\t  "}))
        .await
        .unwrap();

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert!(!response.detail().is_empty());
}

#[tokio::test]
async fn it_should_accept_text_at_the_length_boundary() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .client
        .post("/api/v1/tts", &json!({"text": "a".repeat(5000)}))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn it_should_reject_text_over_the_length_boundary() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .client
        .post("/api/v1/tts", &json!({"text": "a".repeat(5001)}))
        .await
        .unwrap();

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn it_should_reject_a_blank_language_code() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .client
        .post("/api/v1/tts", &json!({"text": "Hello", "lang": "  "}))
        .await
        .unwrap();

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn it_should_reject_a_body_without_text() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .client
        .post("/api/v1/tts", &json!({"lang": "en"}))
        .await
        .unwrap();

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    // The rejection is structured JSON with a detail field, like every
    // other error response
    let body = response.body.as_ref().expect("error body must be JSON");
    let detail = body.get("detail").and_then(|v| v.as_str()).unwrap();
    assert!(detail.contains("empty"), "{}", detail);
}

#[tokio::test]
async fn it_should_reject_a_save_body_without_text() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .client
        .post("/api/v1/tts/save", &json!({"lang": "en"}))
        .await
        .unwrap();

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert!(!response.detail().is_empty());
}
