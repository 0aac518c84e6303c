//! # サーバーエラー定義
//!
//! ハンドラで発生するエラーと、HTTP レスポンスへの変換を定義する。
//!
//! ## エラー分類
//!
//! - [`ApiError::NotFound`] → 404（ID による検索・更新・削除の対象なし）
//! - [`ApiError::Store`] → 500（メディア障害。詳細はログにのみ出力する）
//!
//! 不正なリクエストボディは axum の抽出層が拒否するため、
//! ここでは独立したエラー種別を設けない。

use axum::{
   Json,
   http::StatusCode,
   response::{IntoResponse, Response},
};
use thiserror::Error;
use todolist_infra::InfraError;
use todolist_shared::ErrorResponse;

/// ハンドラで発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
   /// リソースが見つからない
   #[error("リソースが見つかりません: {0}")]
   NotFound(String),

   /// ストアエラー
   #[error("ストアエラー: {0}")]
   Store(#[from] InfraError),
}

impl IntoResponse for ApiError {
   fn into_response(self) -> Response {
      let (status, body) = match &self {
         ApiError::NotFound(msg) => (
            StatusCode::NOT_FOUND,
            ErrorResponse::not_found(msg.clone()),
         ),
         ApiError::Store(e) => {
            tracing::error!("ストアエラー: {}", e);
            (
               StatusCode::INTERNAL_SERVER_ERROR,
               ErrorResponse::internal_error(),
            )
         }
      };

      (status, Json(body)).into_response()
   }
}
