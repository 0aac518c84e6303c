//! # アプリケーション構築
//!
//! DI（ストア・State）の初期化とルーター構築を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use todolist_infra::TodoRepository;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handler::{
        TodoState,
        create_todo,
        delete_all_todos,
        delete_todo,
        get_todo,
        health_check,
        list_todos,
        update_todo,
    },
    openapi::openapi_json,
};

/// ルーターを構築する
///
/// ストアは呼び出し側で構築して注入する（グローバル状態を持たない）。
/// `allow_all_origins` が有効な場合、任意のオリジンからの
/// クロスオリジンリクエストを許可する。
pub fn build_app(store: Arc<dyn TodoRepository>, allow_all_origins: bool) -> Router {
    let state = Arc::new(TodoState { store });

    let router = Router::new()
        .route("/health", get(health_check))
        .route("/openapi.json", get(openapi_json))
        .route(
            "/",
            post(create_todo).get(list_todos).delete(delete_all_todos),
        )
        .route(
            "/{id}",
            get(get_todo).patch(update_todo).delete(delete_todo),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if allow_all_origins {
        router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        router
    }
}
