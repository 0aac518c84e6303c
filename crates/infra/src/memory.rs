//! # インメモリストア
//!
//! プロセス内のコレクションにアイテムを保持するストア実装。
//! `DATABASE_URL` が未設定の環境とテストで使用する。
//!
//! ## 変異の直列化
//!
//! すべてのアクセスは単一の `Mutex` を経由する。これにより同時に実行される
//! 変異は常に 1 つであり、変異と交差する読み取りは変異前か変異後の状態の
//! いずれかを観測する（中間状態は観測しない）。

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use todolist_domain::{NewTodo, Todo, TodoId, TodoPatch};

use crate::{error::InfraError, repository::TodoRepository};

/// インメモリ実装の TodoRepository
///
/// `Clone` してもコレクションは共有される（`Arc` 経由）。
#[derive(Clone)]
pub struct InMemoryTodoRepository {
   inner:    Arc<Mutex<MemoryState>>,
   base_url: String,
}

/// Mutex が保護する内部状態
///
/// `next_id` は成功した作成ごとに加算され、削除後もリセットされない。
struct MemoryState {
   next_id: i64,
   items:   Vec<Todo>,
}

impl InMemoryTodoRepository {
   /// 新しい空のストアを作成する
   ///
   /// ID の採番は 0 から始まる。
   pub fn new(base_url: impl Into<String>) -> Self {
      Self {
         inner:    Arc::new(Mutex::new(MemoryState {
            next_id: 0,
            items:   Vec::new(),
         })),
         base_url: base_url.into(),
      }
   }

   fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, InfraError> {
      self
         .inner
         .lock()
         .map_err(|_| InfraError::unexpected("ストアのロックが汚染されています"))
   }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
   async fn create(&self, draft: NewTodo) -> Result<Todo, InfraError> {
      let mut state = self.lock()?;

      let id = TodoId::new(state.next_id);
      state.next_id += 1;

      let todo = Todo::new(id, draft, &self.base_url);
      state.items.push(todo.clone());

      Ok(todo)
   }

   async fn find_all(&self) -> Result<Vec<Todo>, InfraError> {
      Ok(self.lock()?.items.clone())
   }

   async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, InfraError> {
      Ok(self.lock()?.items.iter().find(|t| t.id() == id).cloned())
   }

   async fn update(&self, id: TodoId, patch: TodoPatch) -> Result<Option<Todo>, InfraError> {
      let mut state = self.lock()?;

      let Some(todo) = state.items.iter_mut().find(|t| t.id() == id) else {
         return Ok(None);
      };

      todo.apply_patch(patch);
      Ok(Some(todo.clone()))
   }

   async fn delete_by_id(&self, id: TodoId) -> Result<bool, InfraError> {
      let mut state = self.lock()?;

      let Some(pos) = state.items.iter().position(|t| t.id() == id) else {
         return Ok(false);
      };

      state.items.remove(pos);
      Ok(true)
   }

   async fn delete_all(&self) -> Result<(), InfraError> {
      // next_id はリセットしない（ID の再利用を防ぐ）
      self.lock()?.items.clear();
      Ok(())
   }
}
