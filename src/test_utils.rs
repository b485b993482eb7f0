//! Shared fixtures for unit tests.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::Rng;

use crate::models::{Fleet, Job, Position, Route, Service, TimeWindow, Trip, Vehicle};
use crate::objective::{DialARideObjective, Objective};
use crate::random::create_rng;
use crate::surface::GeoSurface;

pub(crate) fn depot_vehicle(
    id: &str,
    x: f64,
    y: f64,
    earliest: f64,
    latest: f64,
    capacity: i32,
) -> Arc<Vehicle> {
    Arc::new(Vehicle::new(id, depot(x, y, earliest, latest), capacity))
}

pub(crate) fn depot(x: f64, y: f64, earliest: f64, latest: f64) -> Service {
    Service::new(
        Position::new(x, y),
        TimeWindow::new(earliest, latest).expect("valid window"),
    )
}

pub(crate) fn route_for(vehicle: Arc<Vehicle>) -> Route {
    Route::new(vehicle, Arc::new(GeoSurface::euclidean()))
}

pub(crate) fn simple_trip(id: &str, from: (f64, f64), to: (f64, f64)) -> Arc<Trip> {
    Arc::new(Trip::new(
        id,
        Service::at(Position::new(from.0, from.1)),
        Service::at(Position::new(to.0, to.1)),
    ))
}

pub(crate) fn windowed_trip(
    id: &str,
    from: (f64, f64),
    to: (f64, f64),
    earliest: f64,
    latest: f64,
) -> Arc<Trip> {
    Arc::new(Trip::new(
        id,
        depot(from.0, from.1, earliest, latest),
        Service::at(Position::new(to.0, to.1)),
    ))
}

pub(crate) fn instance(
    vehicles: Vec<Vehicle>,
    trips: Vec<Trip>,
    objective: Arc<dyn Objective>,
) -> (Arc<Fleet>, Arc<Job>) {
    let fleet = Fleet::new(vehicles).expect("valid fleet");
    let job = Job::new(trips, objective, Arc::new(GeoSurface::euclidean())).expect("valid job");
    (Arc::new(fleet), Arc::new(job))
}

/// One vehicle of capacity 1 at the origin; `A: (0,0) -> (1,1)` then
/// `B: (1,1) -> (10,10)`.
pub(crate) fn scenario_one() -> (Arc<Fleet>, Arc<Job>) {
    let vehicle = Vehicle::new("v", depot(0.0, 0.0, 0.0, 1440.0), 1);
    let a = Trip::new(
        "A",
        depot(0.0, 0.0, 0.0, 10.0),
        Service::at(Position::new(1.0, 1.0)),
    );
    let b = Trip::new(
        "B",
        depot(1.0, 1.0, 0.0, 20.0),
        Service::at(Position::new(10.0, 10.0)),
    );
    instance(vec![vehicle], vec![a, b], Arc::new(DialARideObjective))
}

/// Random instance on a 20x20 grid with loose windows.
pub(crate) fn random_instance(
    seed: u64,
    trips: usize,
    vehicles: usize,
    objective: Arc<dyn Objective>,
) -> (Arc<Fleet>, Arc<Job>) {
    fn point(rng: &mut StdRng) -> Position {
        Position::new(
            rng.random_range(0..20) as f64,
            rng.random_range(0..20) as f64,
        )
    }

    let mut rng = create_rng(seed);
    let fleet: Vec<Vehicle> = (0..vehicles)
        .map(|v| {
            let at = point(&mut rng);
            Vehicle::new(
                format!("v{v}"),
                Service::new(at, TimeWindow::new(0.0, 500.0).expect("valid")),
                2,
            )
        })
        .collect();
    let requests: Vec<Trip> = (0..trips)
        .map(|t| {
            let from = point(&mut rng);
            let to = point(&mut rng);
            let earliest = rng.random_range(0..60) as f64;
            Trip::new(
                format!("t{t}"),
                Service::new(from, TimeWindow::new(earliest, earliest + 120.0).expect("valid")),
                Service::at(to),
            )
        })
        .collect();
    instance(fleet, requests, objective)
}
