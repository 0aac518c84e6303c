//! # To-Do API ハンドラ
//!
//! To-Do アイテムの CRUD エンドポイントを実装する。
//!
//! 各ハンドラはストアへの単一呼び出しとエラー変換のみを行う薄いアダプタ。
//! 唯一の非自明な振る舞いである部分更新のマージはストアが所有する。

use std::sync::Arc;

use axum::{
   Json,
   extract::{Path, State},
   http::StatusCode,
   response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use todolist_domain::{NewTodo, Todo, TodoId, TodoPatch};
use todolist_infra::TodoRepository;
use utoipa::ToSchema;

use crate::error::ApiError;

/// To-Do ハンドラーの State
///
/// ストアは構築時に注入される（プロセス全体で 1 インスタンス）。
pub struct TodoState {
   pub store: Arc<dyn TodoRepository>,
}

/// To-Do アイテム DTO
///
/// ワイヤ上の表現。省略されたオプションフィールドは `null` として出力する。
#[derive(Debug, Serialize, ToSchema)]
pub struct TodoDto {
   pub id:        i64,
   pub title:     Option<String>,
   pub user:      Option<String>,
   pub order:     Option<i32>,
   pub completed: bool,
   pub url:       String,
}

impl TodoDto {
   fn from_todo(todo: &Todo) -> Self {
      Self {
         id:        todo.id().as_i64(),
         title:     todo.title().map(ToOwned::to_owned),
         user:      todo.user().map(ToOwned::to_owned),
         order:     todo.order(),
         completed: todo.completed(),
         url:       todo.url().to_string(),
      }
   }
}

/// 作成リクエスト
///
/// `id` と `url` はクライアントから指定できない。
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct NewTodoRequest {
   pub title:     Option<String>,
   pub user:      Option<String>,
   pub order:     Option<i32>,
   pub completed: Option<bool>,
}

impl From<NewTodoRequest> for NewTodo {
   fn from(req: NewTodoRequest) -> Self {
      Self {
         title:     req.title,
         user:      req.user,
         order:     req.order,
         completed: req.completed,
      }
   }
}

/// 部分更新リクエスト
///
/// 省略されたフィールドは既存の値を保持する。
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct TodoPatchRequest {
   pub title:     Option<String>,
   pub user:      Option<String>,
   pub order:     Option<i32>,
   pub completed: Option<bool>,
}

impl From<TodoPatchRequest> for TodoPatch {
   fn from(req: TodoPatchRequest) -> Self {
      Self {
         title:     req.title,
         user:      req.user,
         order:     req.order,
         completed: req.completed,
      }
   }
}

/// To-Do アイテムを作成する
///
/// ## エンドポイント
/// POST /
#[utoipa::path(
   post,
   path = "/",
   tag = "todos",
   request_body = NewTodoRequest,
   responses(
      (status = 200, description = "作成されたアイテム", body = TodoDto)
   )
)]
pub async fn create_todo(
   State(state): State<Arc<TodoState>>,
   Json(req): Json<NewTodoRequest>,
) -> Result<Response, ApiError> {
   let todo = state.store.create(req.into()).await?;

   Ok((StatusCode::OK, Json(TodoDto::from_todo(&todo))).into_response())
}

/// 全 To-Do アイテムを取得する
///
/// ## エンドポイント
/// GET /
#[utoipa::path(
   get,
   path = "/",
   tag = "todos",
   responses(
      (status = 200, description = "アイテム一覧", body = [TodoDto])
   )
)]
pub async fn list_todos(State(state): State<Arc<TodoState>>) -> Result<Response, ApiError> {
   let todos = state.store.find_all().await?;

   let dtos: Vec<TodoDto> = todos.iter().map(TodoDto::from_todo).collect();
   Ok((StatusCode::OK, Json(dtos)).into_response())
}

/// 単一の To-Do アイテムを取得する
///
/// ## エンドポイント
/// GET /{id}
#[utoipa::path(
   get,
   path = "/{id}",
   tag = "todos",
   params(
      ("id" = i64, Path, description = "アイテム ID")
   ),
   responses(
      (status = 200, description = "アイテム", body = TodoDto),
      (status = 404, description = "アイテムが存在しない", body = todolist_shared::ErrorResponse)
   )
)]
pub async fn get_todo(
   State(state): State<Arc<TodoState>>,
   Path(id): Path<i64>,
) -> Result<Response, ApiError> {
   let todo = state
      .store
      .find_by_id(TodoId::new(id))
      .await?
      .ok_or_else(|| ApiError::NotFound(format!("todo が見つかりません: id={id}")))?;

   Ok((StatusCode::OK, Json(TodoDto::from_todo(&todo))).into_response())
}

/// To-Do アイテムを部分更新する
///
/// パッチに存在するフィールドだけを上書きする（`id` と `url` は不変）。
///
/// ## エンドポイント
/// PATCH /{id}
#[utoipa::path(
   patch,
   path = "/{id}",
   tag = "todos",
   params(
      ("id" = i64, Path, description = "アイテム ID")
   ),
   request_body = TodoPatchRequest,
   responses(
      (status = 200, description = "マージ後のアイテム", body = TodoDto),
      (status = 404, description = "アイテムが存在しない", body = todolist_shared::ErrorResponse)
   )
)]
pub async fn update_todo(
   State(state): State<Arc<TodoState>>,
   Path(id): Path<i64>,
   Json(req): Json<TodoPatchRequest>,
) -> Result<Response, ApiError> {
   let todo = state
      .store
      .update(TodoId::new(id), req.into())
      .await?
      .ok_or_else(|| ApiError::NotFound(format!("todo が見つかりません: id={id}")))?;

   Ok((StatusCode::OK, Json(TodoDto::from_todo(&todo))).into_response())
}

/// To-Do アイテムを削除する
///
/// ## エンドポイント
/// DELETE /{id}
#[utoipa::path(
   delete,
   path = "/{id}",
   tag = "todos",
   params(
      ("id" = i64, Path, description = "アイテム ID")
   ),
   responses(
      (status = 200, description = "削除完了"),
      (status = 404, description = "アイテムが存在しない", body = todolist_shared::ErrorResponse)
   )
)]
pub async fn delete_todo(
   State(state): State<Arc<TodoState>>,
   Path(id): Path<i64>,
) -> Result<Response, ApiError> {
   let deleted = state.store.delete_by_id(TodoId::new(id)).await?;

   if !deleted {
      return Err(ApiError::NotFound(format!("todo が見つかりません: id={id}")));
   }

   Ok(StatusCode::OK.into_response())
}

/// 全 To-Do アイテムを削除する
///
/// 注意: この DELETE は全アイテムを削除する。
///
/// ## エンドポイント
/// DELETE /
#[utoipa::path(
   delete,
   path = "/",
   tag = "todos",
   responses(
      (status = 200, description = "全件削除完了")
   )
)]
pub async fn delete_all_todos(State(state): State<Arc<TodoState>>) -> Result<Response, ApiError> {
   state.store.delete_all().await?;

   Ok(StatusCode::OK.into_response())
}
