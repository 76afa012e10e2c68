//! Types shared by the storefront client library and its front-ends.

pub mod domain;
pub mod error;
pub mod protocol;
