//! Persistence seam for list documents.
//!
//! A list is stored as one row whose `items` column carries the JSON-encoded
//! item sequence, so every operation here reads or writes a whole document.

use std::future::Future;

use libsql::Connection;

use crate::error::StoreError;
use crate::model::{Item, List, ListPatch, NewList};

pub type StoreResult<T> = Result<T, StoreError>;

/// Document-style access to the list collection.
pub trait ListStore: Sync {
    /// Lists owned by `owner_id`, pinned first, then oldest first.
    fn find_by_owner(&self, owner_id: &str) -> impl Future<Output = StoreResult<Vec<List>>> + Send;

    fn find_by_id(&self, id: &str) -> impl Future<Output = StoreResult<Option<List>>> + Send;

    fn find_by_name(
        &self,
        owner_id: &str,
        name: &str,
    ) -> impl Future<Output = StoreResult<Option<List>>> + Send;

    fn insert(&self, list: NewList) -> impl Future<Output = StoreResult<List>> + Send;

    /// Applies `patch`; `None` when no list has this id.
    fn update(
        &self,
        id: &str,
        patch: ListPatch,
    ) -> impl Future<Output = StoreResult<Option<List>>> + Send;

    /// Overwrites the item sequence of a list; `false` when it no longer exists.
    fn save_items(&self, id: &str, items: &[Item]) -> impl Future<Output = StoreResult<bool>> + Send;

    fn delete(&self, id: &str) -> impl Future<Output = StoreResult<bool>> + Send;
}

const LIST_COLUMNS: &str = "id, name, user_id, is_pinned, items, created_at, updated_at";
const OWNER_ORDER: &str = "ORDER BY is_pinned DESC, created_at ASC, rowid ASC";

pub struct SqlListStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqlListStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    async fn fetch_all(
        &self,
        query: &str,
        params: impl libsql::params::IntoParams,
    ) -> StoreResult<Vec<List>> {
        let mut rows = self.conn.query(query, params).await?;
        let mut lists = Vec::new();
        while let Some(row) = rows.next().await? {
            lists.push(row_to_list(&row)?);
        }
        Ok(lists)
    }

    async fn fetch_one(
        &self,
        query: &str,
        params: impl libsql::params::IntoParams,
    ) -> StoreResult<Option<List>> {
        let mut rows = self.conn.query(query, params).await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_list(&row)?)),
            None => Ok(None),
        }
    }
}

impl ListStore for SqlListStore<'_> {
    async fn find_by_owner(&self, owner_id: &str) -> StoreResult<Vec<List>> {
        let query = format!("SELECT {LIST_COLUMNS} FROM lists WHERE user_id = ? {OWNER_ORDER}");
        self.fetch_all(&query, libsql::params![owner_id]).await
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<List>> {
        let query = format!("SELECT {LIST_COLUMNS} FROM lists WHERE id = ?");
        self.fetch_one(&query, libsql::params![id]).await
    }

    async fn find_by_name(&self, owner_id: &str, name: &str) -> StoreResult<Option<List>> {
        let query = format!("SELECT {LIST_COLUMNS} FROM lists WHERE user_id = ? AND name = ? LIMIT 1");
        self.fetch_one(&query, libsql::params![owner_id, name]).await
    }

    async fn insert(&self, list: NewList) -> StoreResult<List> {
        let query = format!(
            r#"
            INSERT INTO lists (name, user_id, is_pinned)
            VALUES (?, ?, ?)
            RETURNING {LIST_COLUMNS}
            "#
        );
        let pinned = i64::from(list.is_pinned);
        self.fetch_one(&query, libsql::params![list.name, list.owner_id, pinned])
            .await?
            .ok_or_else(|| StoreError::Unavailable("insert returned no row".to_string()))
    }

    async fn update(&self, id: &str, patch: ListPatch) -> StoreResult<Option<List>> {
        if patch.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut updates = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(name) = patch.name {
            updates.push("name = ?");
            params.push(name.into());
        }
        if let Some(is_pinned) = patch.is_pinned {
            updates.push("is_pinned = ?");
            params.push(i64::from(is_pinned).into());
        }

        updates.push("updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')");
        params.push(id.to_string().into());

        let query = format!(
            "UPDATE lists SET {} WHERE id = ? RETURNING {LIST_COLUMNS}",
            updates.join(", ")
        );
        self.fetch_one(&query, params).await
    }

    async fn save_items(&self, id: &str, items: &[Item]) -> StoreResult<bool> {
        let encoded = serde_json::to_string(items)?;
        let affected = self
            .conn
            .execute(
                r#"
                UPDATE lists
                SET items = ?, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                WHERE id = ?
                "#,
                libsql::params![encoded, id],
            )
            .await?;
        Ok(affected > 0)
    }

    async fn delete(&self, id: &str) -> StoreResult<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM lists WHERE id = ?", libsql::params![id])
            .await?;
        Ok(affected > 0)
    }
}

fn row_to_list(row: &libsql::Row) -> StoreResult<List> {
    let id: String = row.get(0)?;
    let raw_items: String = row.get(4)?;
    let items: Vec<Item> = serde_json::from_str(&raw_items).map_err(|e| StoreError::Corrupt {
        id: id.clone(),
        reason: e.to_string(),
    })?;
    let is_pinned: i64 = row.get(3)?;

    Ok(List {
        id,
        name: row.get(1)?,
        owner_id: row.get(2)?,
        is_pinned: is_pinned != 0,
        items,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}
