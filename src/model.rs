use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ListError, ListResult};

pub const ITEM_ID_FIELD: &str = "id";
pub const USER_RATING_FIELD: &str = "userRating";

/// A media item as embedded in a list.
///
/// Only `id` and `userRating` mean anything to this service; every other
/// field is caller metadata and is stored verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item(Map<String, Value>);

impl Item {
    /// Builds an item from a raw request payload, rejecting anything that is
    /// not an object carrying a usable `id`.
    pub fn from_payload(payload: Value) -> ListResult<Item> {
        let Value::Object(fields) = payload else {
            return Err(ListError::Validation(
                "Invalid item details provided.".to_string(),
            ));
        };

        let item = Item(fields);
        if item.id().is_none() {
            return Err(ListError::Validation(
                "Item details must include a non-empty id.".to_string(),
            ));
        }

        match item.rating() {
            None | Some(Value::Null) | Some(Value::Number(_)) => Ok(item),
            Some(_) => Err(ListError::Validation(
                "userRating must be a number or null.".to_string(),
            )),
        }
    }

    /// The external identifier, normalised to text so numeric and string ids
    /// compare the same way everywhere.
    pub fn id(&self) -> Option<String> {
        item_key(self.0.get(ITEM_ID_FIELD)?)
    }

    pub fn has_id(&self, id: &str) -> bool {
        self.id().as_deref() == Some(id)
    }

    /// `None` when the record carries no `userRating` field at all.
    pub fn rating(&self) -> Option<&Value> {
        self.0.get(USER_RATING_FIELD)
    }

    pub fn set_rating(&mut self, rating: Value) {
        self.0.insert(USER_RATING_FIELD.to_string(), rating);
    }

    pub fn clear_rating(&mut self) {
        self.0.remove(USER_RATING_FIELD);
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

fn item_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Compares two ratings, treating a missing field as `null` and numbers by
/// value (`4` equals `4.0`).
pub fn ratings_differ(incoming: &Value, stored: Option<&Value>) -> bool {
    let stored = stored.unwrap_or(&Value::Null);
    match (incoming, stored) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() != b.as_f64(),
        (a, b) => a != b,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: String,
    pub name: String,
    #[serde(rename = "userId")]
    pub owner_id: String,
    pub is_pinned: bool,
    pub items: Vec<Item>,
    pub created_at: String,
    pub updated_at: String,
}

impl List {
    pub fn position_of(&self, item_id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.has_id(item_id))
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.position_of(item_id).is_some()
    }
}

/// Validated input for list creation.
#[derive(Debug, Clone)]
pub struct NewList {
    pub name: String,
    pub owner_id: String,
    pub is_pinned: bool,
}

/// Partial update for a list's own fields; `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct ListPatch {
    pub name: Option<String>,
    pub is_pinned: Option<bool>,
}

impl ListPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.is_pinned.is_none()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateList {
    pub name: Option<String>,
    #[serde(alias = "ownerId")]
    pub user_id: Option<String>,
    #[serde(alias = "isPin")]
    pub is_pinned: Option<bool>,
}

impl CreateList {
    pub fn validate(self) -> ListResult<NewList> {
        let name = non_empty(self.name, "List name is required.")?;
        let owner_id = present(self.user_id, "userId is required.")?;
        Ok(NewList {
            name,
            owner_id,
            is_pinned: self.is_pinned.unwrap_or(false),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateList {
    pub name: Option<String>,
    #[serde(alias = "isPin")]
    pub is_pinned: Option<bool>,
}

impl UpdateList {
    pub fn validate(self) -> ListResult<ListPatch> {
        let name = match self.name {
            Some(name) => Some(non_empty(Some(name), "List name cannot be empty.")?),
            None => None,
        };
        Ok(ListPatch {
            name,
            is_pinned: self.is_pinned,
        })
    }
}

fn non_empty(value: Option<String>, msg: &str) -> ListResult<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ListError::Validation(msg.to_string())),
    }
}

/// Like `non_empty` but keeps the value untouched; owner ids are lookup keys.
fn present(value: Option<String>, msg: &str) -> ListResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ListError::Validation(msg.to_string())),
    }
}
