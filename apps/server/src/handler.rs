//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、マージ規則などのロジックはストア／ドメイン層に委譲

pub mod health;
pub mod todo;

pub use health::health_check;
pub use todo::{
   TodoState,
   create_todo,
   delete_all_todos,
   delete_todo,
   get_todo,
   list_todos,
   update_todo,
};
