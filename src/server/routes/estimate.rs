use crate::error::AppError;
use crate::estimator::{DEFAULT_QUANTITY, Estimate};
use axum::{Json, extract::Query};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct EstimateParams {
    /// Kept as text so bad input maps to our own error body instead of axum's rejection.
    pub quantity: Option<String>,
}

pub(super) async fn estimate_handler(
    Query(params): Query<EstimateParams>,
) -> Result<Json<Estimate>, AppError> {
    let quantity = match params.quantity.as_deref().map(str::trim) {
        None | Some("") => DEFAULT_QUANTITY,
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|e| AppError::InvalidQuantity(format!("{raw:?}: {e}")))?,
    };

    Estimate::for_quantity(quantity)
        .map(Json)
        .ok_or_else(|| AppError::InvalidQuantity(format!("{quantity} is too large")))
}
