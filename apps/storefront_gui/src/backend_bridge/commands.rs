//! Backend commands queued from UI to backend worker.

use client_core::{CachePolicy, FetchTicket};
use shared::domain::ItemId;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    LoadMenu {
        ticket: FetchTicket,
        policy: CachePolicy,
    },
    SubmitPurchase {
        item_id: ItemId,
        name: String,
        price_units: u64,
    },
    LoadImage {
        slot: usize,
        url: Url,
    },
    CancelImage {
        slot: usize,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::LoadMenu { .. } => "load_menu",
            BackendCommand::SubmitPurchase { .. } => "submit_purchase",
            BackendCommand::LoadImage { .. } => "load_image",
            BackendCommand::CancelImage { .. } => "cancel_image",
        }
    }
}
