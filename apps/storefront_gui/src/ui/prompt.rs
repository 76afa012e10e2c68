//! Modal prompts shown over the menu list.

use shared::domain::{format_price, ItemId, MenuItem};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiError;

pub const ORDER_THANKS_TITLE: &str = "Thank you for your order";
pub const ORDER_THANKS_BODY: &str =
    "Prepare for a rich gustatory experience of intergalactic dimensions";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    Notes {
        name: String,
        notes: String,
    },
    ConfirmPurchase {
        item_id: ItemId,
        name: String,
        price_units: u64,
    },
    Message {
        title: String,
        body: String,
    },
    Error {
        title: String,
        body: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptChoice {
    Confirm,
    Dismiss,
}

impl Prompt {
    pub fn notes_for(item: &MenuItem) -> Self {
        Self::Notes {
            name: item.name.clone(),
            notes: item.notes.clone(),
        }
    }

    pub fn confirm_purchase(item: &MenuItem) -> Self {
        Self::ConfirmPurchase {
            item_id: item.id,
            name: item.name.clone(),
            price_units: item.price_units,
        }
    }

    pub fn order_placed() -> Self {
        Self::Message {
            title: ORDER_THANKS_TITLE.to_string(),
            body: ORDER_THANKS_BODY.to_string(),
        }
    }

    pub fn from_error(error: &UiError) -> Self {
        Self::Error {
            title: error.title(),
            body: error.message().to_string(),
        }
    }

    pub fn title(&self) -> String {
        match self {
            Prompt::Notes { name, .. } => format!("{name} notes"),
            Prompt::ConfirmPurchase { .. } => "Confirm purchase".to_string(),
            Prompt::Message { title, .. } | Prompt::Error { title, .. } => title.clone(),
        }
    }

    pub fn body(&self) -> String {
        match self {
            Prompt::Notes { notes, .. } => notes.clone(),
            Prompt::ConfirmPurchase {
                name, price_units, ..
            } => format!(
                "Would you like to purchase a {name} for {}",
                format_price(*price_units)
            ),
            Prompt::Message { body, .. } | Prompt::Error { body, .. } => body.clone(),
        }
    }

    /// Buttons in display order. The first one is the default.
    pub fn actions(&self) -> &'static [(&'static str, PromptChoice)] {
        match self {
            Prompt::ConfirmPurchase { .. } => &[
                ("Purchase", PromptChoice::Confirm),
                ("Cancel", PromptChoice::Dismiss),
            ],
            _ => &[("OK", PromptChoice::Dismiss)],
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Prompt::Error { .. })
    }
}

/// The backend command a prompt answer leads to, if any.
pub fn resolve_choice(prompt: &Prompt, choice: PromptChoice) -> Option<BackendCommand> {
    match (prompt, choice) {
        (
            Prompt::ConfirmPurchase {
                item_id,
                name,
                price_units,
            },
            PromptChoice::Confirm,
        ) => Some(BackendCommand::SubmitPurchase {
            item_id: *item_id,
            name: name.clone(),
            price_units: *price_units,
        }),
        _ => None,
    }
}
