//! Crate error type.
//!
//! Only load-time configuration problems and contract violations are errors.
//! Infeasibility and candidate exhaustion are ordinary values (`bool`,
//! `Option::None`, empty collections) handled by the search loops.

use thiserror::Error;

/// Errors raised while assembling problem data or algorithms.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Two trips of the same job share an identifier.
    #[error("duplicate trip identifier `{0}`")]
    DuplicateTrip(String),

    /// Two vehicles of the same fleet share an identifier.
    #[error("duplicate vehicle identifier `{0}`")]
    DuplicateVehicle(String),

    /// A trip or vehicle declares a negative capacity.
    #[error("`{id}` declares a negative capacity ({capacity})")]
    NegativeCapacity {
        /// Identifier of the offending trip or vehicle.
        id: String,
        /// Declared capacity.
        capacity: i32,
    },

    /// A trip could not be classified as inbound or outbound.
    #[error("cannot classify trip `{0}` as inbound or outbound")]
    AmbiguousDirection(String),

    /// A refinement algorithm was built without an initial solution.
    #[error("algorithm `{0}` requires an initial solution")]
    MissingInitial(String),

    /// A configuration value is out of range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        reason: String,
    },
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
