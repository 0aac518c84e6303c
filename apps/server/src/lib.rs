//! # ToDoList サーバーライブラリ
//!
//! ルーター構築・設定・ハンドラを公開する。バイナリ（`main.rs`）と
//! 結合テストの両方からこのクレート経由でアプリケーションを組み立てる。

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod openapi;
