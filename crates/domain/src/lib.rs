//! # ToDoList ドメイン層
//!
//! To-Do アイテムのエンティティと、その上の業務ルールを定義する。
//!
//! ## 設計方針
//!
//! - インフラ（axum / sqlx）に依存しない純粋なドメインモデル
//! - ID は Newtype で型安全に扱う
//! - 部分更新のマージ規則はエンティティのメソッドとして一箇所に定義し、
//!   ストア実装間で共有する
//!
//! ## 依存関係
//!
//! ```text
//! server → infra → domain
//!     ↘      ↓
//!       shared
//! ```
//!
//! ドメイン層はインフラ層に依存しない（依存性逆転の原則）。

pub mod todo;

pub use todo::{NewTodo, Todo, TodoId, TodoPatch};
