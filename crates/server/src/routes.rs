use axum::Router;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Value, json};

use play_core::model::{GameId, Topic, TopicSlug};
use services::catalog::TopicRecord;

use crate::pages;
use crate::state::SharedState;

/// Builds the full route table over the shared state.
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/api/topics", get(list_topics))
        .route("/api/topics/{topic}", get(get_topic))
        .route("/api/generate/{topic}", post(generate_topic))
        .route("/api/progress/{game}", get(get_progress).put(put_progress))
        .route("/topics", get(topics_redirect))
        .route("/topics/{topic}/{game}", get(serve_game))
        .fallback(not_found)
        .with_state(state)
}

//
// ─── WIRE TYPES ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize)]
struct ProgressBody {
    game: String,
    payload: Value,
    #[serde(rename = "savedAt")]
    saved_at: DateTime<Utc>,
}

fn no_store_json<T: Serialize>(body: &T) -> Response {
    match serde_json::to_string(body) {
        Ok(json) => (
            StatusCode::OK,
            [
                (header::CACHE_CONTROL, "no-store"),
                (header::CONTENT_TYPE, "application/json"),
            ],
            json,
        )
            .into_response(),
        Err(error) => {
            tracing::error!(%error, "response serialization failed");
            internal_error()
        }
    }
}

fn not_found_json(message: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        axum::Json(json!({ "error": message })),
    )
        .into_response()
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        axum::Json(json!({ "error": "Internal server error" })),
    )
        .into_response()
}

//
// ─── CATALOG API ───────────────────────────────────────────────────────────────
//

async fn list_topics(State(state): State<SharedState>) -> Response {
    match state.catalog().list_topics().await {
        Ok(records) => {
            let topics: Vec<Topic> = records.into_iter().map(TopicRecord::into_topic).collect();
            no_store_json(&topics)
        }
        Err(error) => {
            tracing::error!(%error, "failed to list topics");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                axum::Json(json!({ "error": "Failed to fetch topics" })),
            )
                .into_response()
        }
    }
}

async fn get_topic(State(state): State<SharedState>, Path(topic): Path<String>) -> Response {
    let Ok(slug) = topic.parse::<TopicSlug>() else {
        return not_found_json("Topic not found");
    };

    match state.catalog().get_topic(&slug).await {
        Ok(topic) => no_store_json(&topic),
        Err(error) => {
            tracing::debug!(%error, "topic lookup failed");
            not_found_json("Topic not found")
        }
    }
}

async fn generate_topic(Path(topic): Path<String>) -> Response {
    if topic.parse::<TopicSlug>().is_err() {
        return (
            StatusCode::BAD_REQUEST,
            axum::Json(json!({ "error": "Invalid topic name" })),
        )
            .into_response();
    }

    // Generation runs out of process; this endpoint only acknowledges.
    axum::Json(json!({
        "success": true,
        "message": format!("Course generation for \"{topic}\" initiated"),
        "topic": topic,
        "status": "generating",
    }))
    .into_response()
}

//
// ─── GAME PAGES ────────────────────────────────────────────────────────────────
//

async fn serve_game(
    State(state): State<SharedState>,
    Path((topic, game)): Path<(String, String)>,
) -> Response {
    let Ok(slug) = topic.parse::<TopicSlug>() else {
        return (StatusCode::NOT_FOUND, Html(pages::page_not_found())).into_response();
    };
    let game_fallback =
        || (StatusCode::NOT_FOUND, Html(pages::game_not_found(slug.as_str()))).into_response();

    let Ok(game) = game.parse::<GameId>() else {
        return game_fallback();
    };

    let resource = match state.catalog().resolve_game(&slug, &game).await {
        Ok(resource) => resource,
        Err(error) => {
            tracing::debug!(%error, "game lookup failed");
            return game_fallback();
        }
    };

    match resource.read().await {
        Ok(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            bytes,
        )
            .into_response(),
        Err(error) => {
            // resolved a moment ago but unreadable now; report absence
            tracing::warn!(%error, topic = %slug, game = %game, "game resource vanished");
            game_fallback()
        }
    }
}

async fn topics_redirect() -> Response {
    // topic browsing lives on the home page
    (StatusCode::FOUND, [(header::LOCATION, "/")]).into_response()
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html(pages::page_not_found())).into_response()
}

//
// ─── PROGRESS API ──────────────────────────────────────────────────────────────
//

async fn get_progress(State(state): State<SharedState>, Path(game): Path<String>) -> Response {
    // an unaddressable id can never have stored progress; absence is null,
    // matching the load contract
    let Ok(game) = game.parse::<GameId>() else {
        return axum::Json(Value::Null).into_response();
    };

    match state.progress().load(&game).await {
        Some(record) => axum::Json(ProgressBody {
            game: game.to_string(),
            payload: record.payload,
            saved_at: record.saved_at,
        })
        .into_response(),
        None => axum::Json(Value::Null).into_response(),
    }
}

async fn put_progress(
    State(state): State<SharedState>,
    Path(game): Path<String>,
    axum::Json(payload): axum::Json<Value>,
) -> Response {
    let Ok(game) = game.parse::<GameId>() else {
        return (
            StatusCode::BAD_REQUEST,
            axum::Json(json!({ "error": "Invalid game id" })),
        )
            .into_response();
    };

    state.progress().save(&game, payload).await;
    axum::Json(json!({ "ok": true })).into_response()
}
