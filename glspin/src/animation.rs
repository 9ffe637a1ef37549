use std::time::{Duration, Instant};

use cgmath::{Deg, Vector3};

///
/// Rotation angle advanced by wall-clock time at a fixed angular velocity
///
#[derive(Debug, Clone)]
pub struct Spinner {
    angle: f32,
    /// Degrees per second
    pub velocity: f32,
    pub axis: Vector3<f32>,
    last: Option<Instant>,
}

impl Spinner {
    pub fn new(velocity: f32, axis: Vector3<f32>) -> Self {
        Self {
            angle: 0.0,
            velocity,
            axis,
            last: None,
        }
    }

    pub fn fixed() -> Self {
        Self::new(0.0, Vector3::unit_y())
    }

    pub fn angle(&self) -> Deg<f32> {
        Deg(self.angle)
    }

    /// Angle stays finite and inside `[0, 360)` for any finite velocity.
    pub fn advance(&mut self, elapsed: Duration) -> Deg<f32> {
        if !self.velocity.is_finite() {
            return self.angle();
        }

        // f64 keeps the product finite for any f32 velocity
        let delta = (elapsed.as_secs_f64() * self.velocity as f64).rem_euclid(360.0);
        let angle = (self.angle as f64 + delta).rem_euclid(360.0) as f32;

        // rounding to f32 can land exactly on 360
        self.angle = if angle >= 360.0 { 0.0 } else { angle };
        self.angle()
    }

    /// The first tick only remembers `now`.
    pub fn tick(&mut self, now: Instant) -> Deg<f32> {
        let elapsed = self
            .last
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or_default();
        self.last = Some(now);

        self.advance(elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_by_velocity() {
        let mut spinner = Spinner::new(180.0, Vector3::unit_y());

        assert_eq!(spinner.advance(Duration::from_millis(500)), Deg(90.0));
        assert_eq!(spinner.advance(Duration::from_millis(500)), Deg(180.0));
    }

    #[test]
    fn wraps_around() {
        let mut spinner = Spinner::new(180.0, Vector3::unit_y());
        let angle = spinner.advance(Duration::from_millis(2500));

        assert!((angle.0 - 90.0).abs() < 1e-3);

        let mut backwards = Spinner::new(-90.0, Vector3::unit_y());
        assert_eq!(backwards.advance(Duration::from_secs(1)), Deg(270.0));
    }

    #[test]
    fn tiny_negative_step_stays_below_full_turn() {
        let mut spinner = Spinner::new(-30.0, Vector3::unit_y());
        let angle = spinner.advance(Duration::from_nanos(1));

        assert!((0.0..360.0).contains(&angle.0), "{angle:?}");
    }

    #[test]
    fn huge_velocity_stays_finite() {
        let mut spinner = Spinner::new(1e38, Vector3::unit_y());

        let angle = spinner.advance(Duration::from_secs(5));
        assert!(angle.0.is_finite());
        assert!((0.0..360.0).contains(&angle.0));

        let angle = spinner.advance(Duration::from_millis(16));
        assert!((0.0..360.0).contains(&angle.0));
    }

    #[test]
    fn non_finite_velocity_keeps_angle() {
        let mut spinner = Spinner::new(90.0, Vector3::unit_y());
        spinner.advance(Duration::from_secs(1));

        spinner.velocity = f32::INFINITY;
        assert_eq!(spinner.advance(Duration::from_secs(1)), Deg(90.0));
    }

    #[test]
    fn first_tick_does_not_advance() {
        let mut spinner = Spinner::new(180.0, Vector3::unit_y());
        let start = Instant::now();

        assert_eq!(spinner.tick(start), Deg(0.0));
        let angle = spinner.tick(start + Duration::from_millis(250));
        assert!((angle.0 - 45.0).abs() < 1e-3);
    }

    #[test]
    fn fixed_stays_put() {
        let mut spinner = Spinner::fixed();
        let start = Instant::now();

        spinner.tick(start);
        assert_eq!(spinner.tick(start + Duration::from_secs(3)), Deg(0.0));
    }
}
