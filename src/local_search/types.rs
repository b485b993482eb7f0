//! The local-search strategy contract.

use std::fmt;

use rand::RngCore;

use crate::evaluation::structural_violations;
use crate::models::Planning;
use crate::objective::Objective;

/// One improvement move family, applied to a whole planning.
pub trait LocalSearchStrategy: fmt::Debug + Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Runs one pass over `planning`, committing only feasible, strictly
    /// improving moves. Returns `true` if anything changed.
    fn apply(
        &self,
        planning: &mut Planning,
        objective: &dyn Objective,
        rng: &mut dyn RngCore,
    ) -> bool;

    /// [`apply`](Self::apply) with chain and time-monotonicity checks before
    /// and after in debug builds.
    fn improve(
        &self,
        planning: &mut Planning,
        objective: &dyn Objective,
        rng: &mut dyn RngCore,
    ) -> bool {
        debug_assert!(is_sound(planning), "{} got a broken planning", self.name());
        let changed = self.apply(planning, objective, rng);
        debug_assert!(is_sound(planning), "{} broke the planning", self.name());
        changed
    }
}

fn is_sound(planning: &Planning) -> bool {
    planning
        .routes()
        .iter()
        .enumerate()
        .all(|(index, route)| structural_violations(route, index).is_empty())
}
