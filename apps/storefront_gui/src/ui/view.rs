//! Pure row layout: turns the model's items into the rows the list paints.

use client_core::resolve_image_url;
use shared::domain::{ItemId, MenuItem};
use url::Url;

pub const NO_ITEMS_MESSAGE: &str = "No items available";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Standard,
    Promoted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    /// Position in the model, also used as the image slot.
    pub index: usize,
    pub kind: RowKind,
    pub item_id: ItemId,
    pub name: String,
    pub vegetarian_visible: bool,
    pub price_label: String,
    pub purchase_enabled: bool,
    /// `None` when the item's image path can't be joined onto the base URL.
    pub image_url: Option<Url>,
}

impl ItemRow {
    pub fn name_shadow(&self) -> bool {
        self.kind == RowKind::Promoted
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuRow {
    NoItems,
    Item(ItemRow),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    ShowNotes(usize),
    ConfirmPurchase(usize),
}

pub fn layout_rows(items: &[MenuItem], base_url: &Url, reachable: bool) -> Vec<MenuRow> {
    if items.is_empty() {
        return vec![MenuRow::NoItems];
    }

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let image_url = match resolve_image_url(base_url, &item.image_path) {
                Ok(url) => Some(url),
                Err(err) => {
                    tracing::warn!(item_id = item.id.0, "unusable image path: {err}");
                    None
                }
            };
            MenuRow::Item(ItemRow {
                index,
                kind: if item.is_promoted {
                    RowKind::Promoted
                } else {
                    RowKind::Standard
                },
                item_id: item.id,
                name: item.name.clone(),
                vegetarian_visible: item.is_vegetarian,
                price_label: item.price_label(),
                purchase_enabled: reachable,
                image_url,
            })
        })
        .collect()
}
