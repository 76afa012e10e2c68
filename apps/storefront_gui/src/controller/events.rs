//! UI/backend events and error modeling for the storefront controller.

use client_core::FetchTicket;
use shared::{
    domain::MenuItem,
    error::{FetchError, PurchaseError},
};
use url::Url;

use crate::media::RowImage;

pub enum UiEvent {
    Info(String),
    Error(UiError),
    MenuLoaded {
        ticket: FetchTicket,
        items: Vec<MenuItem>,
    },
    MenuFailed {
        ticket: FetchTicket,
        error: UiError,
    },
    PurchaseCompleted {
        name: String,
    },
    PurchaseFailed {
        name: String,
        error: UiError,
    },
    ImageLoaded {
        url: Url,
        image: RowImage,
    },
    ImageFailed {
        url: Url,
    },
    ReachabilityChanged(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Parse,
    Encoding,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    LoadMenu,
    Purchase,
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Transport => "Network",
        UiErrorCategory::Parse => "Parsing",
        UiErrorCategory::Encoding => "Encoding",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn new(
        category: UiErrorCategory,
        context: UiErrorContext,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            context,
            message: message.into(),
        }
    }

    pub fn from_fetch(err: &FetchError) -> Self {
        let category = match err {
            FetchError::Network(_) => UiErrorCategory::Transport,
            FetchError::Parse(_) => UiErrorCategory::Parse,
        };
        Self::new(category, UiErrorContext::LoadMenu, err.to_string())
    }

    pub fn from_purchase(err: &PurchaseError) -> Self {
        let category = match err {
            PurchaseError::EncodingFailed(_) => UiErrorCategory::Encoding,
            PurchaseError::Network(_) | PurchaseError::EmptyResponse => UiErrorCategory::Transport,
        };
        Self::new(category, UiErrorContext::Purchase, err.to_string())
    }

    /// Prompt title, e.g. "Parsing error".
    pub fn title(&self) -> String {
        format!("{} error", err_label(self.category))
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
