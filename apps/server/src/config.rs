//! # サーバー設定
//!
//! 環境変数から ToDoList サーバーの設定を読み込む。

use std::env;

/// ToDoList サーバーの設定
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// バインドアドレス
    pub host: String,
    /// ポート番号
    pub port: u16,
    /// データベース接続 URL（未設定の場合はインメモリストアを使用）
    pub database_url: Option<String>,
    /// アイテムの `url` フィールド導出に使うベース URL
    pub base_url: String,
    /// 任意のオリジンからのクロスオリジンリクエストを許可するか
    pub allow_all_origins: bool,
}

impl ServerConfig {
    /// 環境変数から設定を読み込む
    ///
    /// | 変数名 | 必須 | デフォルト |
    /// |--------|------|-----------|
    /// | `HOST` | No | `0.0.0.0` |
    /// | `PORT` | No | `8080` |
    /// | `DATABASE_URL` | No | なし（インメモリストア） |
    /// | `BASE_URL` | No | `http://localhost:{port}` |
    /// | `CORS_ALLOW_ALL` | No | `true` |
    pub fn from_env() -> Self {
        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .expect("PORT は有効なポート番号である必要があります");

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
            database_url: env::var("DATABASE_URL").ok(),
            base_url: env::var("BASE_URL").unwrap_or_else(|_| format!("http://localhost:{port}")),
            allow_all_origins: env::var("CORS_ALLOW_ALL")
                .map(|v| v.trim().eq_ignore_ascii_case("true"))
                .unwrap_or(true),
        }
    }
}
