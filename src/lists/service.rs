use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;

use crate::error::{ListError, ListResult};
use crate::model::{Item, List, ListPatch, NewList};
use crate::store::ListStore;

/// Outcome of inserting one item into several lists by id.
#[derive(Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOutcome {
    pub added_to_lists: Vec<String>,
    pub already_present_in_lists: Vec<String>,
    pub not_found_lists: Vec<String>,
}

impl AddOutcome {
    /// True when every requested id was unknown.
    pub fn is_miss(&self) -> bool {
        self.added_to_lists.is_empty() && self.already_present_in_lists.is_empty()
    }

    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if !self.added_to_lists.is_empty() {
            parts.push(format!("Item added to lists: {}.", self.added_to_lists.join(", ")));
        }
        if !self.already_present_in_lists.is_empty() {
            parts.push(format!(
                "Item already present in lists: {}.",
                self.already_present_in_lists.join(", ")
            ));
        }
        if !self.not_found_lists.is_empty() {
            parts.push(format!("Lists not found: {}.", self.not_found_lists.join(", ")));
        }
        parts.join(" ")
    }
}

/// Where a user's lists hold one item.
#[derive(Debug, PartialEq, Serialize)]
pub struct ItemInLists {
    pub item: Item,
    pub lists: Vec<String>,
}

/// Parses the `itemIds` field of a request: a non-empty array of non-empty
/// strings. Duplicates collapse, request order is kept.
pub fn parse_list_ids(raw: Option<Value>) -> ListResult<Vec<String>> {
    let invalid = || ListError::Validation("No lists selected or invalid format.".to_string());

    let Some(Value::Array(values)) = raw else {
        return Err(invalid());
    };
    if values.is_empty() {
        return Err(invalid());
    }

    let mut ids: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        match value {
            Value::String(id) if !id.trim().is_empty() => {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
            _ => return Err(invalid()),
        }
    }
    Ok(ids)
}

pub struct Lists<S> {
    store: S,
}

impl<S: ListStore> Lists<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    pub async fn create_list(&self, new: NewList) -> ListResult<List> {
        if self.store.find_by_name(&new.owner_id, &new.name).await?.is_some() {
            return Err(ListError::Conflict(
                "List name already exists for this user".to_string(),
            ));
        }

        let list = self.store.insert(new).await?;
        tracing::info!(list_id = %list.id, owner = %list.owner_id, "list created");
        Ok(list)
    }

    pub async fn lists_for_user(&self, owner_id: &str) -> ListResult<Vec<List>> {
        Ok(self.store.find_by_owner(owner_id).await?)
    }

    pub async fn update_list(&self, id: &str, patch: ListPatch) -> ListResult<List> {
        let current = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ListError::NotFound("List not found".to_string()))?;

        if let Some(name) = patch.name.as_deref().filter(|n| *n != current.name) {
            if let Some(clash) = self.store.find_by_name(&current.owner_id, name).await? {
                if clash.id != current.id {
                    return Err(ListError::Conflict(
                        "List name already exists for this user".to_string(),
                    ));
                }
            }
        }

        self.store
            .update(id, patch)
            .await?
            .ok_or_else(|| ListError::NotFound("List not found".to_string()))
    }

    pub async fn delete_list(&self, id: &str) -> ListResult<()> {
        if !self.store.delete(id).await? {
            return Err(ListError::NotFound("List not found".to_string()));
        }
        tracing::info!(list_id = %id, "list deleted");
        Ok(())
    }

    /// Appends `item` to each list in `list_ids` that does not hold it yet.
    /// Lists are fetched by id alone; ownership is not checked.
    pub async fn add_item_to_lists(&self, list_ids: &[String], item: Item) -> ListResult<AddOutcome> {
        let item_id = item
            .id()
            .ok_or_else(|| ListError::Validation("Invalid item details provided.".to_string()))?;
        let mut outcome = AddOutcome::default();

        for list_id in list_ids {
            let Some(mut list) = self.store.find_by_id(list_id).await? else {
                outcome.not_found_lists.push(list_id.clone());
                continue;
            };

            if list.contains(&item_id) {
                outcome.already_present_in_lists.push(list.name);
                continue;
            }

            list.items.push(item.clone());
            self.store.save_items(&list.id, &list.items).await?;
            tracing::info!(list_id = %list.id, item_id = %item_id, "item added to list");
            outcome.added_to_lists.push(list.name);
        }

        if outcome.is_miss() {
            return Err(ListError::NotFound(
                "No lists were updated or found for the given item.".to_string(),
            ));
        }
        Ok(outcome)
    }

    /// Distinct item ids across all of a user's lists, first-seen order.
    pub async fn all_item_ids(&self, owner_id: &str) -> ListResult<Vec<String>> {
        let lists = self.store.find_by_owner(owner_id).await?;
        let mut seen = HashSet::new();
        let mut ids = Vec::new();

        for item in lists.iter().flat_map(|list| list.items.iter()) {
            if let Some(id) = item.id() {
                if seen.insert(id.clone()) {
                    ids.push(id);
                }
            }
        }
        Ok(ids)
    }

    pub async fn item_in_lists(&self, owner_id: &str, item_id: &str) -> ListResult<ItemInLists> {
        let lists = self.store.find_by_owner(owner_id).await?;

        let item = lists
            .iter()
            .find_map(|list| list.position_of(item_id).map(|idx| list.items[idx].clone()))
            .ok_or_else(|| ListError::NotFound("Item not found in any list".to_string()))?;

        let lists = lists
            .into_iter()
            .filter(|list| list.contains(item_id))
            .map(|list| list.name)
            .collect();

        Ok(ItemInLists { item, lists })
    }
}
