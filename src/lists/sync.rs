use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;

use super::Lists;
use crate::error::{ListError, ListResult};
use crate::model::{Item, List, ratings_differ};
use crate::store::ListStore;

/// Validated input for an item synchronization.
#[derive(Debug, Clone)]
pub struct SyncCommand {
    pub user_id: String,
    pub item: Item,
    /// Lists that should hold the item once the call returns.
    pub target_list_ids: HashSet<String>,
}

impl SyncCommand {
    pub fn new(user_id: &str, item: Item, target_list_ids: Vec<String>) -> ListResult<Self> {
        if user_id.trim().is_empty() {
            return Err(ListError::Validation("userId is required.".to_string()));
        }
        if target_list_ids.is_empty() {
            return Err(ListError::Validation(
                "No lists selected or invalid format.".to_string(),
            ));
        }
        if item.id().is_none() {
            return Err(ListError::Validation("Invalid item details provided.".to_string()));
        }

        Ok(SyncCommand {
            user_id: user_id.to_string(),
            item,
            target_list_ids: target_list_ids.into_iter().collect(),
        })
    }
}

/// Names of the lists touched by a synchronization, by kind of change.
#[derive(Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncOutcome {
    pub added_to: Vec<String>,
    pub updated_in: Vec<String>,
    pub removed_from: Vec<String>,
    pub rating_updated_in: Vec<String>,
}

impl SyncOutcome {
    pub fn is_unchanged(&self) -> bool {
        self.added_to.is_empty()
            && self.updated_in.is_empty()
            && self.removed_from.is_empty()
            && self.rating_updated_in.is_empty()
    }

    pub fn summary(&self) -> String {
        if self.is_unchanged() {
            return "No changes made.".to_string();
        }

        [
            ("Item added to lists", &self.added_to),
            ("Item updated in lists", &self.updated_in),
            ("Item removed from lists", &self.removed_from),
            ("Rating updated in lists", &self.rating_updated_in),
        ]
        .into_iter()
        .filter(|(_, names)| !names.is_empty())
        .map(|(label, names)| format!("{}: {}.", label, names.join(", ")))
        .collect::<Vec<_>>()
        .join(" ")
    }
}

enum Membership {
    Added,
    Removed,
    Replaced,
    Kept,
}

impl<S: ListStore> Lists<S> {
    /// Reconciles one item across every list owned by `cmd.user_id`.
    ///
    /// Lists are visited and persisted one at a time. There is no transaction
    /// spanning them: when a write fails, lists persisted earlier in the loop
    /// keep their changes and the error is returned.
    pub async fn sync_item(&self, cmd: SyncCommand) -> ListResult<SyncOutcome> {
        let item_id = cmd
            .item
            .id()
            .ok_or_else(|| ListError::Validation("Invalid item details provided.".to_string()))?;
        let mut outcome = SyncOutcome::default();

        for mut list in self.store().find_by_owner(&cmd.user_id).await? {
            let should_have = cmd.target_list_ids.contains(&list.id);
            let rating_changed = reconcile_rating(&mut list, &item_id, &cmd.item);
            if rating_changed {
                outcome.rating_updated_in.push(list.name.clone());
            }

            let membership = apply_membership(&mut list, &item_id, &cmd.item, should_have);
            match membership {
                Membership::Added => outcome.added_to.push(list.name.clone()),
                Membership::Removed => outcome.removed_from.push(list.name.clone()),
                Membership::Replaced => outcome.updated_in.push(list.name.clone()),
                Membership::Kept => {}
            }

            if rating_changed || !matches!(membership, Membership::Kept) {
                self.persist(&list).await?;
                tracing::info!(
                    list_id = %list.id,
                    item_id = %item_id,
                    rating_changed,
                    "list synchronized"
                );
            }
        }

        Ok(outcome)
    }

    async fn persist(&self, list: &List) -> ListResult<()> {
        if !self.store().save_items(&list.id, &list.items).await? {
            tracing::warn!(list_id = %list.id, "list vanished during synchronization");
        }
        Ok(())
    }
}

/// Copies the incoming rating onto the stored record when the item is present
/// and the caller supplied a different one.
fn reconcile_rating(list: &mut List, item_id: &str, incoming: &Item) -> bool {
    let (Some(idx), Some(rating)) = (list.position_of(item_id), incoming.rating()) else {
        return false;
    };

    let stored = &mut list.items[idx];
    if !ratings_differ(rating, stored.rating()) {
        return false;
    }
    stored.set_rating(rating.clone());
    true
}

fn apply_membership(list: &mut List, item_id: &str, incoming: &Item, should_have: bool) -> Membership {
    match (list.position_of(item_id), should_have) {
        (None, true) => {
            list.items.push(incoming.clone());
            Membership::Added
        }
        (Some(idx), false) => {
            list.items.remove(idx);
            Membership::Removed
        }
        (Some(idx), true) => {
            let replacement = with_rating_of(incoming, list.items[idx].rating());
            if replacement == list.items[idx] {
                return Membership::Kept;
            }
            list.items[idx] = replacement;
            Membership::Replaced
        }
        (None, false) => Membership::Kept,
    }
}

/// The incoming record, carrying the stored rating instead of its own.
fn with_rating_of(incoming: &Item, stored_rating: Option<&Value>) -> Item {
    let mut replacement = incoming.clone();
    match stored_rating {
        Some(rating) => replacement.set_rating(rating.clone()),
        None => replacement.clear_rating(),
    }
    replacement
}
