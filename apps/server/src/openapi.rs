//! # OpenAPI 仕様定義
//!
//! utoipa を使用して OpenAPI 仕様を Rust の型から自動生成する。
//! `ApiDoc::openapi()` で OpenAPI ドキュメントを取得でき、
//! [`openapi_json`] が `GET /openapi.json` としてそれを配信する。

use axum::Json;
use utoipa::OpenApi;

use crate::handler::{health, todo};

#[derive(OpenApi)]
#[openapi(
   info(
      title = "ToDoList API",
      version = "0.1.0",
      description = "To-Do リスト管理 API"
   ),
   paths(
      // health
      health::health_check,
      // todos
      todo::create_todo,
      todo::list_todos,
      todo::get_todo,
      todo::update_todo,
      todo::delete_todo,
      todo::delete_all_todos,
   ),
   components(schemas(
      todo::TodoDto,
      todo::NewTodoRequest,
      todo::TodoPatchRequest,
      todolist_shared::ErrorResponse,
      todolist_shared::HealthResponse,
   )),
   tags(
      (name = "health", description = "ヘルスチェック"),
      (name = "todos", description = "To-Do アイテム管理"),
   )
)]
pub struct ApiDoc;

/// OpenAPI ドキュメントを JSON で返す
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapiドキュメントに全ルートが含まれる() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        assert!(paths.contains_key("/"));
        assert!(paths.contains_key("/{id}"));
        assert!(paths.contains_key("/health"));
    }
}
