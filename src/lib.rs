//! # u-darp
//!
//! Pickup-and-delivery / dial-a-ride optimization: assign trips with time
//! windows to a fleet of capacity-limited vehicles.
//!
//! ## Modules
//!
//! - [`models`] — Domain model (Trip, Vehicle, Stop, Route, Planning, Job, Fleet, Solution)
//! - [`surface`] — Distance and travel-time metrics
//! - [`objective`] — Whole-solution scoring and best-of selection
//! - [`criterion`] — Ranking of insertion candidates
//! - [`evaluation`] — Constraint checking with detailed violations
//! - [`constructive`] — Insertion heuristics
//! - [`local_search`] — Improvement of existing plannings
//! - [`metaheuristics`] — Iterative restarts, staged pipelines, GRASP
//! - [`algorithm`] — Common algorithm contract and configuration
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use u_darp::algorithm::{Algorithm, AlgorithmConfig};
//! use u_darp::constructive::InsertionConfig;
//! use u_darp::models::{Fleet, Job, Position, Service, TimeWindow, Trip, Vehicle};
//! use u_darp::objective::DialARideObjective;
//! use u_darp::surface::GeoSurface;
//!
//! let depot = Service::new(Position::new(0.0, 0.0), TimeWindow::new(0.0, 1440.0).unwrap());
//! let fleet = Fleet::new(vec![Vehicle::new("v0", depot, 4)]).unwrap();
//! let job = Job::new(
//!     vec![Trip::new("t0", Service::at(Position::new(1.0, 1.0)), Service::at(Position::new(3.0, 1.0)))],
//!     Arc::new(DialARideObjective),
//!     Arc::new(GeoSurface::euclidean()),
//! )
//! .unwrap();
//!
//! let config = AlgorithmConfig::Insertion(InsertionConfig::default());
//! let solution = config.build(Arc::new(fleet), Arc::new(job), None).unwrap().optimize().unwrap();
//! assert_eq!(solution.coverage(), 1);
//! assert!(solution.feasible());
//! ```

pub mod algorithm;
pub mod constructive;
pub mod criterion;
pub mod error;
pub mod evaluation;
pub mod local_search;
pub mod metaheuristics;
pub mod models;
pub mod objective;
pub mod random;
pub mod surface;

#[cfg(test)]
mod test_utils;

pub use error::{Error, Result};
