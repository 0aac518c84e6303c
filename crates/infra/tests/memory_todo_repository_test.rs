//! インメモリストアの結合テスト
//!
//! ストア契約（採番・マージ・削除・直列化）をインメモリ実装に対して検証する。

use pretty_assertions::assert_eq;
use todolist_domain::{NewTodo, TodoId, TodoPatch};
use todolist_infra::{InMemoryTodoRepository, TodoRepository};

const BASE_URL: &str = "http://localhost:8080";

fn store() -> InMemoryTodoRepository {
    InMemoryTodoRepository::new(BASE_URL)
}

fn draft(title: &str) -> NewTodo {
    NewTodo {
        title: Some(title.to_string()),
        ..NewTodo::default()
    }
}

#[tokio::test]
async fn test_createでn件のidが相異なり単調増加する() {
    let store = store();

    let mut ids = Vec::new();
    for i in 0..5 {
        let todo = store.create(draft(&format!("item-{i}"))).await.unwrap();
        ids.push(todo.id().as_i64());
    }

    assert_eq!(ids, vec![0, 1, 2, 3, 4]);
}

#[tokio::test]
async fn test_削除後もidは再利用されない() {
    let store = store();

    let first = store.create(draft("a")).await.unwrap();
    let second = store.create(draft("b")).await.unwrap();
    assert!(store.delete_by_id(first.id()).await.unwrap());
    assert!(store.delete_by_id(second.id()).await.unwrap());

    let third = store.create(draft("c")).await.unwrap();

    // 0 と 1 は欠番のまま、次の採番は 2
    assert_eq!(third.id().as_i64(), 2);
}

#[tokio::test]
async fn test_delete_all後もidは再利用されない() {
    let store = store();

    store.create(draft("a")).await.unwrap();
    store.create(draft("b")).await.unwrap();
    store.delete_all().await.unwrap();

    let next = store.create(draft("c")).await.unwrap();

    assert_eq!(next.id().as_i64(), 2);
    assert_eq!(store.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_completed未指定はfalseで指定時はその値になる() {
    let store = store();

    let defaulted = store.create(draft("a")).await.unwrap();
    let explicit = store
        .create(NewTodo {
            completed: Some(true),
            ..draft("b")
        })
        .await
        .unwrap();

    assert!(!defaulted.completed());
    assert!(explicit.completed());
}

#[tokio::test]
async fn test_createでurlがidから導出される() {
    let store = store();

    let todo = store.create(draft("a")).await.unwrap();

    assert_eq!(todo.url(), format!("{BASE_URL}/{}", todo.id()));
}

#[tokio::test]
async fn test_updateはパッチのフィールドだけを上書きする() {
    let store = store();
    let created = store
        .create(NewTodo {
            title:     Some("牛乳を買う".to_string()),
            user:      Some("alice".to_string()),
            order:     Some(1),
            completed: None,
        })
        .await
        .unwrap();

    let updated = store
        .update(
            created.id(),
            TodoPatch {
                title: Some("パンを買う".to_string()),
                ..TodoPatch::default()
            },
        )
        .await
        .unwrap()
        .expect("対象が存在すること");

    assert_eq!(updated.title(), Some("パンを買う"));
    assert_eq!(updated.user(), Some("alice"));
    assert_eq!(updated.order(), Some(1));
    assert!(!updated.completed());
    assert_eq!(updated.id(), created.id());
    assert_eq!(updated.url(), created.url());

    // 永続化されていること
    let found = store.find_by_id(created.id()).await.unwrap().unwrap();
    assert_eq!(found, updated);
}

#[tokio::test]
async fn test_update対象が存在しない場合は変更なしでnoneを返す() {
    let store = store();
    store.create(draft("a")).await.unwrap();
    let before = store.find_all().await.unwrap();

    let result = store
        .update(
            TodoId::new(999),
            TodoPatch {
                completed: Some(true),
                ..TodoPatch::default()
            },
        )
        .await
        .unwrap();

    assert!(result.is_none());
    assert_eq!(store.find_all().await.unwrap(), before);
}

#[tokio::test]
async fn test_delete_by_id対象が存在しない場合はコレクションが変化しない() {
    let store = store();
    store.create(draft("a")).await.unwrap();
    let before = store.find_all().await.unwrap();

    let deleted = store.delete_by_id(TodoId::new(999)).await.unwrap();

    assert!(!deleted);
    assert_eq!(store.find_all().await.unwrap(), before);
}

#[tokio::test]
async fn test_delete_allの後find_allは空を返す() {
    let store = store();
    store.create(draft("a")).await.unwrap();
    store.create(draft("b")).await.unwrap();

    store.delete_all().await.unwrap();

    assert!(store.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_find_allは挿入順を保つ() {
    let store = store();
    for i in 0..4 {
        store.create(draft(&format!("item-{i}"))).await.unwrap();
    }

    let titles: Vec<_> = store
        .find_all()
        .await
        .unwrap()
        .iter()
        .map(|t| t.title().unwrap().to_string())
        .collect();

    assert_eq!(titles, vec!["item-0", "item-1", "item-2", "item-3"]);
}

/// 並行 create の安全性
///
/// M 個の create を並行実行しても、アイテムの欠落と ID の重複が
/// 発生しないことを検証する（同時に実行される変異は常に 1 つ）。
#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_並行createでアイテム欠落とid重複が発生しない() {
    const CONCURRENCY: usize = 64;

    let store = store();

    let handles: Vec<_> = (0..CONCURRENCY)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move { store.create(draft(&format!("item-{i}"))).await })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        let todo = handle.await.unwrap().unwrap();
        ids.push(todo.id().as_i64());
    }

    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), CONCURRENCY, "ID が重複しないこと");
    assert_eq!(
        store.find_all().await.unwrap().len(),
        CONCURRENCY,
        "アイテムが欠落しないこと"
    );
}
