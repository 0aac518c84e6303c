//! # TodoRepository
//!
//! To-Do アイテムの永続化を担当するストア。
//!
//! ## 設計方針
//!
//! - **単一の契約**: トレイトを 1 つ定義し、PostgreSQL 実装とインメモリ実装
//!   （[`crate::memory::InMemoryTodoRepository`]）が同じ契約を満たす
//! - **ID の採番はメディアに委譲**: PostgreSQL 版はテーブルのシーケンスを使用
//!   （一意・単調増加・不変のみを保証）
//! - **1 操作 1 ステートメント**: マージ更新も COALESCE で単一の UPDATE にする

use async_trait::async_trait;
use sqlx::PgPool;
use todolist_domain::{NewTodo, Todo, TodoId, TodoPatch};

use crate::error::InfraError;

/// アイテムストアのトレイト
///
/// To-Do アイテムの永続化操作を定義する。インフラ層で具体的な実装を提供し、
/// ハンドラ層から利用する。
#[async_trait]
pub trait TodoRepository: Send + Sync {
   /// 新しいアイテムを作成する
   ///
   /// 次の ID を採番し、`url` を導出し、`completed` をデフォルト化した上で
   /// コレクションに追加する。確定したアイテムを返す。
   /// メディア障害以外では失敗しない。
   async fn create(&self, draft: NewTodo) -> Result<Todo, InfraError>;

   /// 保持している全アイテムを返す
   ///
   /// インメモリ版は挿入順、PostgreSQL 版は `ORDER BY id`。
   async fn find_all(&self) -> Result<Vec<Todo>, InfraError>;

   /// ID でアイテムを検索する
   ///
   /// # 戻り値
   ///
   /// - `Ok(Some(todo))`: アイテムが見つかった場合
   /// - `Ok(None)`: アイテムが見つからない場合
   /// - `Err(_)`: メディアエラー
   async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, InfraError>;

   /// アイテムに部分更新をマージして永続化する
   ///
   /// パッチに存在するフィールドだけを上書きする（`id` と `url` は不変）。
   /// 対象が存在しない場合は `Ok(None)` を返し、何も変更しない。
   async fn update(&self, id: TodoId, patch: TodoPatch) -> Result<Option<Todo>, InfraError>;

   /// ID でアイテムを削除する
   ///
   /// 対象が存在しない場合は `Ok(false)` を返し、コレクションは変更しない。
   async fn delete_by_id(&self, id: TodoId) -> Result<bool, InfraError>;

   /// 全アイテムを無条件に削除する
   ///
   /// 採番済みの ID は再利用されない。
   async fn delete_all(&self) -> Result<(), InfraError>;
}

/// PostgreSQL 実装の TodoRepository
///
/// 変異の順序と分離はメディア（PostgreSQL）のトランザクション制御に委譲する。
#[derive(Debug, Clone)]
pub struct PostgresTodoRepository {
   pool:     PgPool,
   base_url: String,
}

/// todos テーブルの行
///
/// `user` / `order` は予約語のためテーブル側では引用符付きカラムになっている。
#[derive(sqlx::FromRow)]
struct TodoRow {
   id:        i64,
   title:     Option<String>,
   user:      Option<String>,
   order:     Option<i32>,
   completed: bool,
   url:       String,
}

impl TodoRow {
   fn into_todo(self) -> Todo {
      Todo::from_db(
         TodoId::new(self.id),
         self.title,
         self.user,
         self.order,
         self.completed,
         self.url,
      )
   }
}

impl PostgresTodoRepository {
   /// 新しいリポジトリインスタンスを作成
   ///
   /// `base_url` は作成時の `url` 導出（`{base_url}/{id}`）に使用する。
   pub fn new(pool: PgPool, base_url: impl Into<String>) -> Self {
      Self {
         pool,
         base_url: base_url.into(),
      }
   }
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
   async fn create(&self, draft: NewTodo) -> Result<Todo, InfraError> {
      // シーケンスから採番した ID を同一ステートメント内で url の導出にも使う
      let row = sqlx::query_as::<_, TodoRow>(
         r#"
            INSERT INTO todos (id, title, "user", "order", completed, url)
            SELECT seq.next_id, $1::text, $2::text, $3::integer, $4::boolean,
                   $5::text || seq.next_id::text
            FROM (SELECT nextval(pg_get_serial_sequence('todos', 'id')) AS next_id) AS seq
            RETURNING id, title, "user", "order", completed, url
            "#,
      )
      .bind(draft.title)
      .bind(draft.user)
      .bind(draft.order)
      .bind(draft.completed.unwrap_or(false))
      .bind(format!("{}/", self.base_url))
      .fetch_one(&self.pool)
      .await?;

      Ok(row.into_todo())
   }

   async fn find_all(&self) -> Result<Vec<Todo>, InfraError> {
      let rows = sqlx::query_as::<_, TodoRow>(
         r#"
            SELECT id, title, "user", "order", completed, url
            FROM todos
            ORDER BY id
            "#,
      )
      .fetch_all(&self.pool)
      .await?;

      Ok(rows.into_iter().map(TodoRow::into_todo).collect())
   }

   async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, InfraError> {
      let row = sqlx::query_as::<_, TodoRow>(
         r#"
            SELECT id, title, "user", "order", completed, url
            FROM todos
            WHERE id = $1
            "#,
      )
      .bind(id.as_i64())
      .fetch_optional(&self.pool)
      .await?;

      Ok(row.map(TodoRow::into_todo))
   }

   async fn update(&self, id: TodoId, patch: TodoPatch) -> Result<Option<Todo>, InfraError> {
      // null 合体マージをメディア側で実行する（id と url には触れない）
      let row = sqlx::query_as::<_, TodoRow>(
         r#"
            UPDATE todos
            SET title     = COALESCE($2, title),
                "user"    = COALESCE($3, "user"),
                "order"   = COALESCE($4, "order"),
                completed = COALESCE($5, completed)
            WHERE id = $1
            RETURNING id, title, "user", "order", completed, url
            "#,
      )
      .bind(id.as_i64())
      .bind(patch.title)
      .bind(patch.user)
      .bind(patch.order)
      .bind(patch.completed)
      .fetch_optional(&self.pool)
      .await?;

      Ok(row.map(TodoRow::into_todo))
   }

   async fn delete_by_id(&self, id: TodoId) -> Result<bool, InfraError> {
      let result = sqlx::query("DELETE FROM todos WHERE id = $1")
         .bind(id.as_i64())
         .execute(&self.pool)
         .await?;

      Ok(result.rows_affected() > 0)
   }

   async fn delete_all(&self) -> Result<(), InfraError> {
      sqlx::query("DELETE FROM todos").execute(&self.pool).await?;

      Ok(())
   }
}
