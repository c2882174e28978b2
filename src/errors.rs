use thiserror::Error;

/// Errors surfaced by the fee and pricing calculators.
///
/// All variants are terminal at this layer: nothing is retried, and the
/// calling layer (an HTTP controller, typically) maps them to responses.
#[derive(Debug, Error)]
pub enum FeeError {
    /// Price must be strictly positive.
    #[error("invalid price: {price} (must be > 0)")]
    InvalidPrice { price: f64 },

    /// Price exceeds the configured ceiling.
    #[error("price {price} exceeds maximum allowed {max}")]
    PriceTooLarge { price: f64, max: f64 },

    /// Unknown product passed to the tier resolver.
    #[error("product not found: {product_id}")]
    ProductNotFound { product_id: u64 },

    /// A store read failed. Distinct from a legitimate empty result,
    /// which falls back to default fee tiers instead.
    #[error("store read failed")]
    Store(#[source] anyhow::Error),
}

impl FeeError {
    pub fn store(err: anyhow::Error) -> Self {
        FeeError::Store(err)
    }
}
