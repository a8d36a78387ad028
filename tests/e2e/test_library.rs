use crate::e2e::helpers;

use helpers::mock_engine::MockSynthesisEngine;
use helpers::TestContext;
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

async fn save(ctx: &TestContext, text: &str, lang: &str) -> String {
    let response = ctx
        .client
        .post("/api/v1/tts/save", &json!({"text": text, "lang": lang}))
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);
    response
        .body
        .as_ref()
        .unwrap()
        .get("filename")
        .and_then(|v| v.as_str())
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn it_should_list_an_empty_library() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx.client.get("/api/v1/library").await.unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    assert_eq!(body.get("total_files").and_then(|v| v.as_u64()), Some(0));
    assert_eq!(body.get("files").unwrap().as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn it_should_list_saved_files_with_metadata() {
    let ctx = TestContext::new().await.unwrap();
    let first = save(&ctx, "first entry", "en").await;
    let second = save(&ctx, "second entry", "sv").await;

    let response = ctx.client.get("/api/v1/library").await.unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    assert_eq!(body.get("total_files").and_then(|v| v.as_u64()), Some(2));

    let files = body.get("files").unwrap().as_array().unwrap();
    let names: Vec<&str> = files
        .iter()
        .map(|f| f.get("filename").and_then(|v| v.as_str()).unwrap())
        .collect();
    assert!(names.contains(&first.as_str()));
    assert!(names.contains(&second.as_str()));

    for file in files {
        assert!(file.get("size").and_then(|v| v.as_u64()).unwrap() > 0);
        assert!(file.get("size_mb").is_some());
        assert!(file.get("created").is_some());
        assert!(file.get("modified").is_some());
    }
}

#[tokio::test]
async fn it_should_fetch_saved_audio_byte_for_byte() {
    let ctx = TestContext::new().await.unwrap();
    let filename = save(&ctx, "round trip", "en").await;

    let response = ctx
        .client
        .get(&format!("/api/v1/library/{}", filename))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.header("content-type"), Some("audio/mpeg"));
    assert_eq!(
        response.body_bytes,
        MockSynthesisEngine::expected_audio("round trip", "en")
    );
}

#[tokio::test]
async fn it_should_delete_a_saved_file() {
    let ctx = TestContext::new().await.unwrap();
    let keep = save(&ctx, "keep me", "en").await;
    let drop = save(&ctx, "drop me", "en").await;

    let response = ctx
        .client
        .delete(&format!("/api/v1/library/{}", drop))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("success"));

    // The listing shrinks and the deleted file is gone
    let listing = ctx.client.get("/api/v1/library").await.unwrap();
    let body = listing.body.as_ref().unwrap();
    assert_eq!(body.get("total_files").and_then(|v| v.as_u64()), Some(1));

    let fetch_deleted = ctx
        .client
        .get(&format!("/api/v1/library/{}", drop))
        .await
        .unwrap();
    fetch_deleted.assert_status(StatusCode::NOT_FOUND);

    let fetch_kept = ctx
        .client
        .get(&format!("/api/v1/library/{}", keep))
        .await
        .unwrap();
    fetch_kept.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn it_should_return_not_found_for_missing_files() {
    let ctx = TestContext::new().await.unwrap();

    let fetch = ctx
        .client
        .get("/api/v1/library/nonexistent.mp3")
        .await
        .unwrap();
    fetch.assert_status(StatusCode::NOT_FOUND);

    let delete = ctx
        .client
        .delete("/api/v1/library/nonexistent.mp3")
        .await
        .unwrap();
    delete.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn it_should_reject_traversal_attempts() {
    let ctx = TestContext::new().await.unwrap();

    let fetch = ctx
        .client
        .get("/api/v1/library/..%2Fetc%2Fpasswd")
        .await
        .unwrap();
    fetch.assert_status(StatusCode::BAD_REQUEST);

    let delete = ctx
        .client
        .delete("/api/v1/library/a%2Fb.mp3")
        .await
        .unwrap();
    delete.assert_status(StatusCode::BAD_REQUEST);

    let dotdot = ctx.client.get("/api/v1/library/..secret.mp3").await.unwrap();
    dotdot.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn it_should_reject_non_audio_extensions() {
    let ctx = TestContext::new().await.unwrap();
    std::fs::write(ctx.library_path().join("notes.txt"), b"not audio").unwrap();

    let response = ctx.client.get("/api/v1/library/notes.txt").await.unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.detail().contains("MP3"));
}
