use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub is_success: bool,
    pub message: String,
    pub result: Option<T>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub post_id: u64,
    pub board_name: String,
    pub title: String,
    pub comment_count: u32,
    pub view_count: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub post_id: u64,
    pub board_name: String,
    pub menu: String,
    pub title: String,
    pub content: String,
    pub comment_count: u32,
    pub view_count: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePassword {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PasswordChanged {
    pub changed: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub keyword: Option<String>,
    pub menu: Option<String>,
    pub board_name: Option<String>,
}

#[derive(Clone, Debug)]
struct Post {
    id: u64,
    author: String,
    board_name: String,
    menu: String,
    title: String,
    content: String,
    comment_count: u32,
    view_count: u32,
}

#[derive(Clone, Debug)]
struct User {
    name: String,
    password: String,
}

#[derive(Debug, Default)]
pub struct Store {
    /// Access token to user.
    users: HashMap<String, User>,
    posts: Vec<Post>,
}

pub const MIN_PASSWORD_LEN: usize = 8;

impl Store {
    /// Three users: `abc` (alice, two posts), `def` (bob, one post) and
    /// `ghi` (carol, no posts). Passwords are `<name>-pass`.
    pub fn seeded() -> Self {
        let mut store = Store::default();
        for (token, name) in [("abc", "alice"), ("def", "bob"), ("ghi", "carol")] {
            store.users.insert(
                token.to_string(),
                User {
                    name: name.to_string(),
                    password: format!("{name}-pass"),
                },
            );
        }
        let seed = [
            (1, "alice", "Free", "graduate", "Lab life in winter", "Anyone else stuck in the lab?", 3, 41),
            (2, "alice", "Q&A", "graduate", "Thesis formatting", "Which template does the school accept?", 1, 12),
            (3, "bob", "Free", "doctoral", "Conference travel", "Tips for cheap lab travel", 0, 7),
        ];
        for (id, author, board_name, menu, title, content, comment_count, view_count) in seed {
            store.posts.push(Post {
                id,
                author: author.to_string(),
                board_name: board_name.to_string(),
                menu: menu.to_string(),
                title: title.to_string(),
                content: content.to_string(),
                comment_count,
                view_count,
            });
        }
        store
    }
}

pub type Db = Arc<RwLock<Store>>;

type Reply<T> = (StatusCode, Json<Envelope<T>>);

fn ok<T>(result: T) -> Reply<T> {
    (
        StatusCode::OK,
        Json(Envelope {
            is_success: true,
            message: "ok".to_string(),
            result: Some(result),
        }),
    )
}

fn fail<T>(status: StatusCode, message: &str) -> Reply<T> {
    (
        status,
        Json(Envelope {
            is_success: false,
            message: message.to_string(),
            result: None,
        }),
    )
}

pub fn app() -> Router {
    app_with(Store::seeded())
}

pub fn app_with(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/community/post-list", get(post_list))
        .route("/community/search", get(search))
        .route("/user/password", post(change_password))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Resolve `Authorization: Bearer <token>` to a known token.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_string())
}

async fn post_list(State(db): State<Db>, headers: HeaderMap) -> Reply<Vec<PostSummary>> {
    let store = db.read().await;
    let Some(user) = bearer_token(&headers).and_then(|t| store.users.get(&t)) else {
        return fail(StatusCode::UNAUTHORIZED, "invalid or missing access token");
    };
    let posts = store
        .posts
        .iter()
        .filter(|p| p.author == user.name)
        .map(|p| PostSummary {
            post_id: p.id,
            board_name: p.board_name.clone(),
            title: p.title.clone(),
            comment_count: p.comment_count,
            view_count: p.view_count,
        })
        .collect();
    ok(posts)
}

async fn search(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(params): Query<SearchParams>,
) -> Reply<Vec<SearchHit>> {
    let store = db.read().await;
    if bearer_token(&headers).and_then(|t| store.users.get(&t)).is_none() {
        return fail(StatusCode::UNAUTHORIZED, "invalid or missing access token");
    }
    let keyword = params.keyword.unwrap_or_default();
    if keyword.is_empty() {
        return fail(StatusCode::BAD_REQUEST, "keyword is required");
    }
    let menu = params.menu.unwrap_or_default();
    let board_name = params.board_name.unwrap_or_default();

    let hits = store
        .posts
        .iter()
        .filter(|p| p.title.contains(&keyword) || p.content.contains(&keyword))
        .filter(|p| menu.is_empty() || p.menu == menu)
        .filter(|p| board_name.is_empty() || p.board_name == board_name)
        .map(|p| SearchHit {
            post_id: p.id,
            board_name: p.board_name.clone(),
            menu: p.menu.clone(),
            title: p.title.clone(),
            content: p.content.clone(),
            comment_count: p.comment_count,
            view_count: p.view_count,
        })
        .collect();
    ok(hits)
}

async fn change_password(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<ChangePassword>,
) -> Reply<PasswordChanged> {
    let mut store = db.write().await;
    let token = bearer_token(&headers).unwrap_or_default();
    let Some(user) = store.users.get_mut(&token) else {
        return fail(StatusCode::UNAUTHORIZED, "invalid or missing access token");
    };
    if input.new_password.len() < MIN_PASSWORD_LEN {
        return fail(StatusCode::BAD_REQUEST, "password must be at least 8 characters");
    }
    // Business-rule failures come back as 200 with isSuccess=false.
    if input.current_password != user.password {
        return fail(StatusCode::OK, "current password does not match");
    }
    if input.new_password != input.confirm_password {
        return fail(StatusCode::OK, "new passwords do not match");
    }
    user.password = input.new_password;
    tracing::info!(user = %user.name, "password changed");
    ok(PasswordChanged { changed: true })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_serializes_camel_case() {
        let (_, Json(env)) = ok(vec![1u32]);
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["isSuccess"], true);
        assert_eq!(json["message"], "ok");
        assert_eq!(json["result"][0], 1);
    }

    #[test]
    fn failure_envelope_has_null_result() {
        let (status, Json(env)) = fail::<Vec<u32>>(StatusCode::BAD_REQUEST, "nope");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["isSuccess"], false);
        assert!(json["result"].is_null());
    }

    #[test]
    fn bearer_token_requires_a_value() {
        let mut headers = HeaderMap::new();
        assert!(bearer_token(&headers).is_none());

        headers.insert(header::AUTHORIZATION, "Bearer".parse().unwrap());
        assert!(bearer_token(&headers).is_none());

        headers.insert(header::AUTHORIZATION, "Bearer ".parse().unwrap());
        assert!(bearer_token(&headers).is_none());

        headers.insert(header::AUTHORIZATION, "Bearer abc".parse().unwrap());
        assert_eq!(bearer_token(&headers).as_deref(), Some("abc"));
    }

    #[test]
    fn seeded_store_has_three_users() {
        let store = Store::seeded();
        assert_eq!(store.users.len(), 3);
        assert_eq!(store.posts.iter().filter(|p| p.author == "alice").count(), 2);
    }

    #[test]
    fn search_params_accept_missing_filters() {
        let params: SearchParams = serde_json::from_str(r#"{"keyword":"lab"}"#).unwrap();
        assert_eq!(params.keyword.as_deref(), Some("lab"));
        assert!(params.menu.is_none());
        assert!(params.board_name.is_none());
    }
}
