//! Item repository
//!
//! - insert: plain INSERT, id assigned by SQLite
//! - get: primary-key lookup, used to refresh after commit
//! - list: `ORDER BY id` so paging is deterministic

use crate::db::{DbError, Session};
use crate::models::{Item, ListWindow, NewItem};

/// Item repository over one session
pub struct ItemRepo<'a> {
    session: &'a mut Session,
}

impl<'a> ItemRepo<'a> {
    pub fn new(session: &'a mut Session) -> Self {
        Self { session }
    }

    /// Add an item to the session's unit of work, returning its new id.
    ///
    /// Nothing is visible to other sessions until the session commits.
    pub async fn insert(&mut self, item: &NewItem) -> Result<i64, DbError> {
        let result = sqlx::query("INSERT INTO items (name, description) VALUES (?, ?)")
            .bind(&item.name)
            .bind(item.description.as_deref())
            .execute(self.session.conn().await?)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Load a single item by id.
    pub async fn get(&mut self, id: i64) -> Result<Item, DbError> {
        let row = sqlx::query("SELECT id, name, description FROM items WHERE id = ?")
            .bind(id)
            .fetch_optional(self.session.conn().await?)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "item",
                id: id.to_string(),
            })?;

        Ok(Item::from_row(&row)?)
    }

    /// List items in id order within the given window.
    pub async fn list(&mut self, window: ListWindow) -> Result<Vec<Item>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description
            FROM items
            ORDER BY id ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(window.limit())
        .bind(window.offset())
        .fetch_all(self.session.conn().await?)
        .await?;

        rows.iter()
            .map(|row| Item::from_row(row).map_err(DbError::from))
            .collect()
    }

    /// Total number of stored items.
    pub async fn count(&mut self) -> Result<i64, DbError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM items")
            .fetch_one(self.session.conn().await?)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::db::Engine;
    use tempfile::TempDir;

    async fn open_engine() -> (TempDir, Engine) {
        let dir = TempDir::new().unwrap();
        let engine = Engine::new(DatabaseConfig::for_path(&dir.path().join("items.db")));
        engine.open().await.unwrap();
        (dir, engine)
    }

    fn new_item(name: &str, description: Option<&str>) -> NewItem {
        NewItem {
            name: name.to_owned(),
            description: description.map(str::to_owned),
        }
    }

    #[tokio::test]
    async fn insert_then_get() {
        let (_dir, engine) = open_engine().await;
        let mut session = engine.session().unwrap();

        let id = ItemRepo::new(&mut session)
            .insert(&new_item("lamp", Some("brass")))
            .await
            .unwrap();
        session.commit().await.unwrap();

        let item = ItemRepo::new(&mut session).get(id).await.unwrap();
        assert_eq!(
            item,
            Item {
                id,
                name: "lamp".into(),
                description: Some("brass".into()),
            }
        );

        session.close().await.unwrap();
        engine.close().await;
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let (_dir, engine) = open_engine().await;
        let mut session = engine.session().unwrap();

        let err = ItemRepo::new(&mut session).get(42).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "item", .. }));

        session.close().await.unwrap();
        engine.close().await;
    }

    #[tokio::test]
    async fn ids_are_increasing() {
        let (_dir, engine) = open_engine().await;
        let mut session = engine.session().unwrap();
        let mut repo = ItemRepo::new(&mut session);

        let first = repo.insert(&new_item("a", None)).await.unwrap();
        let second = repo.insert(&new_item("b", None)).await.unwrap();
        assert!(second > first);

        session.commit().await.unwrap();
        session.close().await.unwrap();
        engine.close().await;
    }

    #[tokio::test]
    async fn list_respects_window_and_order() {
        let (_dir, engine) = open_engine().await;
        let mut session = engine.session().unwrap();
        let mut repo = ItemRepo::new(&mut session);

        for name in ["a", "b", "c", "d", "e"] {
            repo.insert(&new_item(name, None)).await.unwrap();
        }

        let names = |items: Vec<Item>| items.into_iter().map(|i| i.name).collect::<Vec<_>>();

        let all = repo.list(ListWindow::default()).await.unwrap();
        assert_eq!(names(all), ["a", "b", "c", "d", "e"]);

        let middle = repo.list(ListWindow::new(1, 2)).await.unwrap();
        assert_eq!(names(middle), ["b", "c"]);

        assert!(repo.list(ListWindow::new(0, 0)).await.unwrap().is_empty());
        assert!(repo.list(ListWindow::new(5, 10)).await.unwrap().is_empty());

        let unbounded = repo.list(ListWindow::new(3, u64::MAX)).await.unwrap();
        assert_eq!(names(unbounded), ["d", "e"]);

        assert_eq!(repo.count().await.unwrap(), 5);

        session.close().await.unwrap();
        engine.close().await;
    }
}
