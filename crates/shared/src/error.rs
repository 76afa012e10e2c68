use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("network error while loading menu: {0}")]
    Network(String),
    #[error("could not parse menu response: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseError {
    #[error("could not encode purchase payload: {0}")]
    EncodingFailed(String),
    #[error("network error while submitting purchase: {0}")]
    Network(String),
    #[error("purchase endpoint returned an empty response")]
    EmptyResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageLoadError {
    #[error("network error while loading image {url}: {message}")]
    Network { url: String, message: String },
    #[error("could not decode image {url}: {message}")]
    Decode { url: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("row index {index} out of bounds for {count} menu items")]
pub struct IndexError {
    pub index: usize,
    pub count: usize,
}
