//! UI layer for the storefront: app shell, row layout, row painting, and prompts.

pub mod app;
pub mod prompt;
pub mod rows;
pub mod view;

pub use app::StorefrontApp;
