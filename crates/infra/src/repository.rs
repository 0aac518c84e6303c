//! # ストア実装
//!
//! アイテムストアの操作契約（トレイト）と、その永続化実装を提供する。
//!
//! ## 設計方針
//!
//! - **依存性逆転**: ハンドラ層はトレイトにのみ依存する
//! - **データベース抽象化**: sqlx を使用し、PostgreSQL 固有の処理をカプセル化
//! - **テスタビリティ**: トレイト経由でインメモリ実装に差し替え可能

pub mod todo_repository;

pub use todo_repository::{PostgresTodoRepository, TodoRepository};
