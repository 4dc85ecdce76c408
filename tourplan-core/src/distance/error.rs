use thiserror::Error;

use crate::MatrixError;

/// Errors from [`crate::distance::DistanceProvider::distance_matrix`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistanceError {
    /// No job nodes were provided.
    ///
    /// A matrix needs at least one node. Callers should pre-filter input to
    /// avoid this condition.
    #[error("at least one job node is required")]
    EmptyInput,
    /// The provider returned a malformed matrix.
    #[error("provider returned an invalid matrix: {0}")]
    InvalidMatrix(#[from] MatrixError),
    /// The provider could not produce a matrix.
    #[error("distance provider unavailable: {message}")]
    Unavailable {
        /// Provider-specific detail.
        message: String,
    },
}

impl DistanceError {
    /// Wrap a provider failure message.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}
