use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContextError {
    /// The payload handed to a product context does not have the product
    /// shape (code, variants, translations, images). Caller defect.
    #[error("payload is not a product: {reason}")]
    TypeMismatch { reason: String },

    /// An element of the product's variant collection is not a variant.
    /// Upstream data is corrupt.
    #[error("variant #{index} of product {product} is not a variant: {reason}")]
    InvariantViolation {
        product: String,
        index: usize,
        reason: String,
    },

    #[error("routing error: {0}")]
    Routing(#[from] RoutingError),

    #[error("thumbnail error: {0}")]
    Thumbnail(#[from] ThumbnailError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    #[error("route \"{0}\" does not exist")]
    RouteNotFound(String),

    #[error("missing parameter \"{parameter}\" for route \"{route}\"")]
    MissingParameter { route: String, parameter: String },

    #[error("invalid host \"{host}\": {reason}")]
    InvalidHost { host: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThumbnailError {
    #[error("image path is empty")]
    EmptyPath,

    #[error("thumbnail filter name is empty")]
    EmptyFilter,
}
