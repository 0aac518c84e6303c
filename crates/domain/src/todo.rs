//! # To-Do アイテム
//!
//! システム唯一のエンティティ。フラットなレコードで、関連エンティティを持たない。
//!
//! ## 設計判断
//!
//! ### Newtype パターンの採用
//!
//! `TodoId` は `i64` をラップした Newtype である。これにより:
//!
//! - 型安全性: 生の `i64`（並び順など）と ID の取り違えをコンパイラが検出
//! - ゼロコスト: 実行時のオーバーヘッドなし
//!
//! ### 連番 ID の採用
//!
//! ID はストアが採番する単調増加の整数。一度採番された ID はプロセス生存中は
//! 再利用されない（削除後も欠番のまま）。
//!
//! ### completed の正規化
//!
//! `completed` はワイヤ上では省略可能だが、作成時に `false` へ正規化される。
//! したがってエンティティ上では常に値を持つ。

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// To-Do アイテムの一意識別子
///
/// ストアが採番する。単調増加・再利用なし・採番後は不変。
#[derive(
   Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
)]
#[display("{_0}")]
pub struct TodoId(i64);

impl TodoId {
   /// 採番済みの値から ID を作成する
   ///
   /// ストア（インメモリのカウンタ、または PostgreSQL のシーケンス）だけが
   /// 新しい値を生み出す。それ以外の場所では既存の値の復元にのみ使用する。
   pub fn new(value: i64) -> Self {
      Self(value)
   }

   /// 内部の整数値を取得する
   pub fn as_i64(&self) -> i64 {
      self.0
   }
}

/// To-Do アイテム
///
/// `id` と `url` は作成時に一度だけ決まり、以後は不変。
/// その他のフィールドは部分更新（[`Todo::apply_patch`]）で書き換わる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
   id:        TodoId,
   title:     Option<String>,
   user:      Option<String>,
   order:     Option<i32>,
   completed: bool,
   url:       String,
}

/// 作成リクエストのドラフト
///
/// クライアントが指定できるフィールドのみを持つ。`id` と `url` はストアが決める。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTodo {
   pub title:     Option<String>,
   pub user:      Option<String>,
   pub order:     Option<i32>,
   pub completed: Option<bool>,
}

/// 部分更新のパッチ
///
/// `None` のフィールドは「変更しない」を意味する（null 合体マージ）。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
   pub title:     Option<String>,
   pub user:      Option<String>,
   pub order:     Option<i32>,
   pub completed: Option<bool>,
}

impl Todo {
   /// ドラフトから新しいアイテムを作成する
   ///
   /// - `completed` が未指定なら `false` に正規化する
   /// - `url` を `{base_url}/{id}` として導出する
   ///
   /// ストアの `create` だけが呼び出す。
   pub fn new(id: TodoId, draft: NewTodo, base_url: &str) -> Self {
      Self {
         id,
         title: draft.title,
         user: draft.user,
         order: draft.order,
         completed: draft.completed.unwrap_or(false),
         url: format!("{base_url}/{id}"),
      }
   }

   /// 永続化済みの値からエンティティを復元する
   ///
   /// データベースの行やストアの保持値を型安全なエンティティに戻す際に使用する。
   pub fn from_db(
      id: TodoId,
      title: Option<String>,
      user: Option<String>,
      order: Option<i32>,
      completed: bool,
      url: String,
   ) -> Self {
      Self {
         id,
         title,
         user,
         order,
         completed,
         url,
      }
   }

   /// 部分更新をマージする
   ///
   /// パッチに存在するフィールドだけを上書きし、`None` のフィールドは
   /// 既存の値を保持する。`id` と `url` には触れない。
   pub fn apply_patch(&mut self, patch: TodoPatch) {
      self.title = patch.title.or(self.title.take());
      self.user = patch.user.or(self.user.take());
      self.order = patch.order.or(self.order);
      self.completed = patch.completed.unwrap_or(self.completed);
   }

   pub fn id(&self) -> TodoId {
      self.id
   }

   pub fn title(&self) -> Option<&str> {
      self.title.as_deref()
   }

   pub fn user(&self) -> Option<&str> {
      self.user.as_deref()
   }

   pub fn order(&self) -> Option<i32> {
      self.order
   }

   pub fn completed(&self) -> bool {
      self.completed
   }

   pub fn url(&self) -> &str {
      &self.url
   }
}
