//! # ToDoList サーバー
//!
//! To-Do リストを管理する REST API サーバー。
//!
//! ## 役割
//!
//! - **CRUD API**: To-Do アイテムの作成・取得・部分更新・削除
//! - **ストア選択**: PostgreSQL（`DATABASE_URL` 設定時）またはインメモリ
//! - **OpenAPI**: `GET /openapi.json` で仕様を配信
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `PORT` | No | ポート番号（デフォルト: `8080`） |
//! | `DATABASE_URL` | No | PostgreSQL 接続 URL（未設定でインメモリストア） |
//! | `BASE_URL` | No | `url` フィールド導出のベース URL |
//! | `CORS_ALLOW_ALL` | No | 任意オリジンの許可（デフォルト: `true`） |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（インメモリストア）
//! cargo run -p todolist-server
//!
//! # 本番環境（PostgreSQL）
//! PORT=8080 DATABASE_URL=postgres://localhost/tododb cargo run -p todolist-server --release
//! ```

use std::{net::SocketAddr, sync::Arc};

use todolist_infra::{InMemoryTodoRepository, PostgresTodoRepository, TodoRepository, db};
use todolist_server::{app_builder::build_app, config::ServerConfig};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// ToDoList サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
   // .env ファイルを読み込む（存在する場合）
   dotenvy::dotenv().ok();

   // トレーシング初期化
   tracing_subscriber::registry()
      .with(
         tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "info,todolist=debug".into()),
      )
      .with(tracing_subscriber::fmt::layer())
      .init();

   // 設定読み込み
   let config = ServerConfig::from_env();

   tracing::info!(
      "ToDoList サーバーを起動します: {}:{}",
      config.host,
      config.port
   );

   // ストアを構築（バックエンドは DATABASE_URL の有無で決まる）
   let store: Arc<dyn TodoRepository> = match &config.database_url {
      Some(database_url) => {
         let pool = db::create_pool(database_url)
            .await
            .expect("データベース接続に失敗しました");
         // テーブル作成は冪等（適用済みマイグレーションはスキップされる）
         db::run_migrations(&pool)
            .await
            .expect("マイグレーションの適用に失敗しました");
         tracing::info!("データベースに接続しました");
         Arc::new(PostgresTodoRepository::new(pool, config.base_url.clone()))
      }
      None => {
         tracing::warn!("DATABASE_URL が未設定のためインメモリストアを使用します");
         Arc::new(InMemoryTodoRepository::new(config.base_url.clone()))
      }
   };

   // ルーター構築
   let app = build_app(store, config.allow_all_origins);

   // サーバー起動
   let addr: SocketAddr = format!("{}:{}", config.host, config.port)
      .parse()
      .expect("アドレスのパースに失敗しました");

   let listener = TcpListener::bind(addr).await?;
   tracing::info!("ToDoList サーバーが起動しました: {}", addr);

   axum::serve(listener, app).await?;

   Ok(())
}
