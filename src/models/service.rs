//! Time window and service types.

use serde::{Deserialize, Serialize};

use super::Position;

/// A time window constraint for service at a position.
///
/// Service may start no later than `latest` and no earlier than `earliest`
/// (waiting is allowed if early). `latest` may be `+∞` for an open window.
///
/// # Examples
///
/// ```
/// use u_darp::models::TimeWindow;
///
/// let tw = TimeWindow::new(100.0, 200.0).unwrap();
/// assert!(tw.earliest() <= tw.latest());
/// assert!(tw.contains(150.0));
/// assert!(!tw.contains(250.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    earliest: f64,
    latest: f64,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// Returns `None` if `earliest > latest`, `earliest` is not finite or
    /// `latest` is NaN.
    pub fn new(earliest: f64, latest: f64) -> Option<Self> {
        if !earliest.is_finite() || latest.is_nan() || earliest > latest {
            return None;
        }
        Some(Self { earliest, latest })
    }

    /// A window open from time zero onwards.
    pub fn unbounded() -> Self {
        Self {
            earliest: 0.0,
            latest: f64::INFINITY,
        }
    }

    /// Earliest allowable service start.
    pub fn earliest(&self) -> f64 {
        self.earliest
    }

    /// Latest allowable service start.
    pub fn latest(&self) -> f64 {
        self.latest
    }

    /// Width of the window.
    pub fn width(&self) -> f64 {
        self.latest - self.earliest
    }

    /// Returns `true` if the given time falls within this window.
    pub fn contains(&self, time: f64) -> bool {
        time >= self.earliest && time <= self.latest
    }

    /// Returns the waiting time if arriving at the given time.
    ///
    /// Zero if the vehicle arrives within or after the window.
    pub fn waiting_time(&self, arrival: f64) -> f64 {
        if arrival < self.earliest {
            self.earliest - arrival
        } else {
            0.0
        }
    }

    /// Returns `true` if arriving at the given time violates this window.
    pub fn is_violated(&self, arrival: f64) -> bool {
        arrival > self.latest
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// Something to do at a position within a time window, taking some time.
///
/// Trips use services for their pickup and delivery ends; vehicles use them
/// for their depots.
///
/// # Examples
///
/// ```
/// use u_darp::models::{Position, Service, TimeWindow};
///
/// let service = Service::new(Position::new(1.0, 2.0), TimeWindow::new(0.0, 30.0).unwrap())
///     .with_duration(3.0)
///     .with_id("pickup-1");
/// assert_eq!(service.duration(), 3.0);
/// assert_eq!(service.latest(), 30.0);
/// assert_eq!(service.id(), Some("pickup-1"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    position: Position,
    window: TimeWindow,
    duration: f64,
    id: Option<String>,
}

impl Service {
    /// Creates an instantaneous service.
    pub fn new(position: Position, window: TimeWindow) -> Self {
        Self {
            position,
            window,
            duration: 0.0,
            id: None,
        }
    }

    /// Creates a service with an open window.
    pub fn at(position: Position) -> Self {
        Self::new(position, TimeWindow::unbounded())
    }

    /// Sets the service duration. Negative values are clamped to zero.
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration.max(0.0);
        self
    }

    /// Sets an identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Where the service happens.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Allowed window for the start of service.
    pub fn window(&self) -> &TimeWindow {
        &self.window
    }

    /// Earliest service start.
    pub fn earliest(&self) -> f64 {
        self.window.earliest()
    }

    /// Latest service start.
    pub fn latest(&self) -> f64 {
        self.window.latest()
    }

    /// Service duration.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Optional identifier.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_window_valid() {
        let tw = TimeWindow::new(10.0, 20.0).expect("valid");
        assert_eq!(tw.earliest(), 10.0);
        assert_eq!(tw.latest(), 20.0);
        assert_eq!(tw.width(), 10.0);
    }

    #[test]
    fn test_time_window_invalid() {
        assert!(TimeWindow::new(20.0, 10.0).is_none());
        assert!(TimeWindow::new(f64::NAN, 10.0).is_none());
        assert!(TimeWindow::new(10.0, f64::NAN).is_none());
        assert!(TimeWindow::new(f64::NEG_INFINITY, 10.0).is_none());
    }

    #[test]
    fn test_time_window_open() {
        let tw = TimeWindow::new(5.0, f64::INFINITY).expect("open window");
        assert!(tw.contains(1e12));
        assert!(!tw.is_violated(1e12));
        assert_eq!(TimeWindow::default(), TimeWindow::unbounded());
    }

    #[test]
    fn test_time_window_contains() {
        let tw = TimeWindow::new(10.0, 20.0).expect("valid");
        assert!(tw.contains(10.0));
        assert!(tw.contains(15.0));
        assert!(tw.contains(20.0));
        assert!(!tw.contains(9.9));
        assert!(!tw.contains(20.1));
    }

    #[test]
    fn test_time_window_waiting() {
        let tw = TimeWindow::new(10.0, 20.0).expect("valid");
        assert!((tw.waiting_time(5.0) - 5.0).abs() < 1e-10);
        assert!((tw.waiting_time(10.0)).abs() < 1e-10);
        assert!((tw.waiting_time(15.0)).abs() < 1e-10);
    }

    #[test]
    fn test_time_window_violated() {
        let tw = TimeWindow::new(10.0, 20.0).expect("valid");
        assert!(!tw.is_violated(10.0));
        assert!(!tw.is_violated(20.0));
        assert!(tw.is_violated(20.1));
    }

    #[test]
    fn test_service_defaults() {
        let s = Service::at(Position::new(1.0, 1.0));
        assert_eq!(s.duration(), 0.0);
        assert_eq!(s.earliest(), 0.0);
        assert!(s.latest().is_infinite());
        assert!(s.id().is_none());
    }

    #[test]
    fn test_service_negative_duration_clamped() {
        let s = Service::at(Position::new(0.0, 0.0)).with_duration(-4.0);
        assert_eq!(s.duration(), 0.0);
    }
}
