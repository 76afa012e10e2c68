//! Wire format of the menu API.
//!
//! Item objects are decoded field by field: a missing or mistyped field becomes
//! `None` instead of failing the record. [`RawMenuItem::validate`] is the single
//! place that turns a raw record into a [`MenuItem`] or rejects it.

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::domain::{ItemId, MenuItem};

pub const MENU_PATH: &str = "/burgers";

#[derive(Debug, Clone, Deserialize)]
pub struct MenuListResponse {
    pub burgers: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawMenuItem {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub bitcoin: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub vegetarian: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub promoted: Option<bool>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemRejection {
    #[error("missing or mistyped field `{0}`")]
    MissingField(&'static str),
    #[error("id must be positive, got {0}")]
    NonPositiveId(i64),
    #[error("name must not be empty")]
    EmptyName,
}

impl RawMenuItem {
    /// Anything that is not a JSON object decodes to an all-empty record.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }

    pub fn validate(self) -> Result<MenuItem, ItemRejection> {
        let id = self.id.ok_or(ItemRejection::MissingField("id"))?;
        if id <= 0 {
            return Err(ItemRejection::NonPositiveId(id));
        }
        let name = self.name.ok_or(ItemRejection::MissingField("name"))?;
        if name.trim().is_empty() {
            return Err(ItemRejection::EmptyName);
        }
        let price_units = self.bitcoin.ok_or(ItemRejection::MissingField("bitcoin"))?;
        let image_path = self.image.ok_or(ItemRejection::MissingField("image"))?;

        Ok(MenuItem {
            id: ItemId(id),
            name,
            notes: self.notes.unwrap_or_default(),
            price_units,
            image_path,
            is_vegetarian: self.vegetarian.unwrap_or(false),
            is_promoted: self.promoted.unwrap_or(false),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRequest {
    pub id: ItemId,
    pub bitcoin: u64,
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
