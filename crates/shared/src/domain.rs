use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix used for every price shown to a customer.
pub const CURRENCY_SYMBOL: &str = "฿";

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(ItemId);

/// A validated menu entry as served by `GET /burgers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: ItemId,
    pub name: String,
    pub notes: String,
    /// Price in the smallest currency unit.
    pub price_units: u64,
    /// Path relative to the API base, e.g. `/images/classic.png`.
    pub image_path: String,
    pub is_vegetarian: bool,
    pub is_promoted: bool,
}

impl MenuItem {
    pub fn price_label(&self) -> String {
        format_price(self.price_units)
    }
}

pub fn format_price(price_units: u64) -> String {
    format!("{CURRENCY_SYMBOL}{price_units}")
}
