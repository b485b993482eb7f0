//! Invariant and constraint checking for routes and plannings.
//!
//! Routes cache their feasibility as a single flag. The checker here recomputes
//! every constraint independently and reports each broken one as a typed
//! [`Violation`], which is what tests and debug assertions need.

mod evaluator;

pub use evaluator::{
    check_planning, check_route, evaluate, structural_violations, Violation, ViolationType,
};
