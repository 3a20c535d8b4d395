//! In-process stand-in for the blog REST server.
//!
//! Ids are handed out as strings, the way json-server does, so the client's id parsing is
//! exercised too.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub type Db = Arc<Mutex<Vec<Value>>>;

pub fn app(db: Db) -> Router {
    Router::new()
        .route("/blogs", get(list_blogs).post(create_blog))
        .route("/blogs/:id", get(get_blog).delete(delete_blog))
        .with_state(db)
}

/// Starts the server on a random local port and returns its base URL.
pub async fn spawn(blogs: Vec<Value>) -> (String, Db) {
    let db: Db = Arc::new(Mutex::new(blogs));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let router = app(db.clone());
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{addr}"), db)
}

pub fn blog_json(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": format!("About {title}"),
        "content": "One.\n\nTwo.",
        "category": ["FINANCE"],
        "coverImage": "",
        "date": "2025-01-05T10:00:00.000Z"
    })
}

async fn list_blogs(State(db): State<Db>) -> Json<Vec<Value>> {
    Json(db.lock().unwrap().clone())
}

async fn get_blog(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Value>, StatusCode> {
    let blogs = db.lock().unwrap();
    blogs
        .iter()
        .find(|blog| blog["id"] == id.as_str())
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn create_blog(
    State(db): State<Db>,
    Json(mut input): Json<Value>,
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    if input.get("id").is_some() || input.get("title").is_none() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }

    let mut blogs = db.lock().unwrap();
    let next = blogs
        .iter()
        .filter_map(|blog| blog["id"].as_str()?.parse::<u64>().ok())
        .max()
        .unwrap_or(0)
        + 1;
    input["id"] = Value::String(next.to_string());
    blogs.push(input.clone());
    Ok((StatusCode::CREATED, Json(input)))
}

async fn delete_blog(State(db): State<Db>, Path(id): Path<String>) -> StatusCode {
    let mut blogs = db.lock().unwrap();
    let before = blogs.len();
    blogs.retain(|blog| blog["id"] != id.as_str());
    if blogs.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    }
}
