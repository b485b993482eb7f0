//! Domain model types for pickup-and-delivery problems.
//!
//! Input data ([`Position`], [`Service`], [`Trip`], [`Vehicle`], gathered in a
//! [`Job`] and a [`Fleet`]) is immutable and shared behind `Arc`. Search
//! state ([`Stop`], [`PlannedTrip`], [`Route`], [`Planning`]) is owned and
//! cloned whenever a strategy needs a rollback copy. A [`Solution`] wraps a
//! planning with its inputs.

mod fleet;
mod job;
mod planned_trip;
mod planning;
mod position;
mod route;
mod service;
mod solution;
mod stop;
mod trip;
mod vehicle;

pub use fleet::Fleet;
pub use job::Job;
pub use planned_trip::PlannedTrip;
pub use planning::Planning;
pub use position::Position;
pub use route::{Chain, Route};
pub use service::{Service, TimeWindow};
pub use solution::Solution;
pub use stop::{Stop, StopKind};
pub use trip::{Trip, TripDirection};
pub use vehicle::Vehicle;
