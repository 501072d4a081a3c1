use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Envelope, PasswordChanged, PostSummary, SearchHit};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes: bytes::Bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str, auth: Option<&str>) -> Request<String> {
    let mut builder = Request::builder().uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(http::header::AUTHORIZATION, auth);
    }
    builder.body(String::new()).unwrap()
}

fn password_request(auth: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri("/user/password")
        .header(http::header::CONTENT_TYPE, "application/json")
        .header(http::header::AUTHORIZATION, auth)
        .body(body.to_string())
        .unwrap()
}

// --- post-list ---

#[tokio::test]
async fn post_list_returns_own_posts() {
    let resp = app()
        .oneshot(get("/community/post-list", Some("Bearer abc")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let env: Envelope<Vec<PostSummary>> = body_json(resp).await;
    assert!(env.is_success);
    let posts = env.result.unwrap();
    assert_eq!(posts.len(), 2);
    assert!(posts.iter().all(|p| p.post_id == 1 || p.post_id == 2));
}

#[tokio::test]
async fn post_list_empty_for_user_without_posts() {
    let resp = app()
        .oneshot(get("/community/post-list", Some("Bearer ghi")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let env: Envelope<Vec<PostSummary>> = body_json(resp).await;
    assert!(env.is_success);
    assert!(env.result.unwrap().is_empty());
}

#[tokio::test]
async fn post_list_without_token_is_401() {
    for auth in [None, Some("Bearer"), Some("Bearer nope")] {
        let resp = app().oneshot(get("/community/post-list", auth)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{auth:?}");
        let env: Envelope<Vec<PostSummary>> = body_json(resp).await;
        assert!(!env.is_success);
        assert!(env.result.is_none());
    }
}

// --- search ---

#[tokio::test]
async fn search_matches_title_and_content() {
    let resp = app()
        .oneshot(get("/community/search?keyword=lab&menu=&boardName=", Some("Bearer def")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let env: Envelope<Vec<SearchHit>> = body_json(resp).await;
    let ids: Vec<u64> = env.result.unwrap().iter().map(|h| h.post_id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn search_applies_filters() {
    let resp = app()
        .oneshot(get(
            "/community/search?keyword=lab&menu=doctoral&boardName=Free",
            Some("Bearer abc"),
        ))
        .await
        .unwrap();

    let env: Envelope<Vec<SearchHit>> = body_json(resp).await;
    let hits = env.result.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].post_id, 3);
}

#[tokio::test]
async fn search_without_keyword_is_400() {
    let resp = app()
        .oneshot(get("/community/search?keyword=", Some("Bearer abc")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- password ---

#[tokio::test]
async fn password_with_literal_bearer_is_401() {
    let resp = app()
        .oneshot(password_request(
            "Bearer",
            r#"{"currentPassword":"alice-pass","newPassword":"new-pass-1","confirmPassword":"new-pass-1"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn password_mismatch_is_200_with_failure_flag() {
    let resp = app()
        .oneshot(password_request(
            "Bearer abc",
            r#"{"currentPassword":"alice-pass","newPassword":"new-pass-1","confirmPassword":"new-pass-2"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let env: Envelope<PasswordChanged> = body_json(resp).await;
    assert!(!env.is_success);
    assert_eq!(env.message, "new passwords do not match");
}

#[tokio::test]
async fn password_too_short_is_400() {
    let resp = app()
        .oneshot(password_request(
            "Bearer abc",
            r#"{"currentPassword":"alice-pass","newPassword":"short","confirmPassword":"short"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn password_change_then_old_password_fails() {
    use tower::Service;

    let mut app = app().into_service();
    let body = r#"{"currentPassword":"alice-pass","newPassword":"new-pass-1","confirmPassword":"new-pass-1"}"#;

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(password_request("Bearer abc", body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let env: Envelope<PasswordChanged> = body_json(resp).await;
    assert!(env.is_success);
    assert_eq!(env.result, Some(PasswordChanged { changed: true }));

    // same request again: the current password is now stale
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(password_request("Bearer abc", body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let env: Envelope<PasswordChanged> = body_json(resp).await;
    assert!(!env.is_success);
    assert_eq!(env.message, "current password does not match");
}
