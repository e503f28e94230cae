use storefront_types::StorefrontError;
use thiserror::Error;

/// Failure of a single-product lookup, reduced to a fixed user-facing message.
///
/// Status text and response body are not carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("the product does not exist")]
    NotFound,

    #[error("something is failing on the server")]
    Conflict,

    #[error("you are not allowed")]
    Unauthorized,

    #[error("oops, something went wrong")]
    Unknown,
}

impl From<StorefrontError> for LookupError {
    fn from(err: StorefrontError) -> Self {
        match err.status() {
            Some(404) => Self::NotFound,
            Some(409) => Self::Conflict,
            Some(401) => Self::Unauthorized,
            _ => Self::Unknown,
        }
    }
}
