use crate::geometry::Point;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use thiserror::Error;

pub const DEFAULT_POINTS: usize = 5;
pub const DEFAULT_LEG: Duration = Duration::from_millis(1000);

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    SerializeDisplay,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
pub enum Easing {
    #[default]
    #[strum(to_string = "linear")]
    Linear,
    #[strum(to_string = "ease-in-out", serialize = "easeinout", serialize = "cubic")]
    EaseInOut,
}

impl Easing {
    pub fn apply(&self, progress: f64) -> f64 {
        let t = progress.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum OrbitError {
    #[error("orbit needs at least one point")]
    NoPoints,
    #[error("orbit leg must be longer than zero")]
    ZeroLeg,
    #[error("orbit radius must be finite and non-negative, got {0}")]
    Radius(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSpec {
    pub points: usize,
    pub radius: f64,
    pub leg: Duration,
    pub rest: Duration,
    pub easing: Easing,
}

impl OrbitSpec {
    pub fn new(points: usize, radius: f64) -> Self {
        Self {
            points,
            radius,
            leg: DEFAULT_LEG,
            rest: Duration::ZERO,
            easing: Easing::Linear,
        }
    }

    pub fn validate(&self) -> Result<(), OrbitError> {
        if self.points == 0 {
            return Err(OrbitError::NoPoints);
        }
        if self.leg.is_zero() {
            return Err(OrbitError::ZeroLeg);
        }
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(OrbitError::Radius(self.radius));
        }
        Ok(())
    }

    pub fn cycle(&self) -> Duration {
        self.leg * 2 + self.rest
    }

    /// Points are spread evenly, clockwise from +x.
    pub fn angle_degrees(&self, index: usize) -> f64 {
        360.0 / self.points.max(1) as f64 * index as f64
    }

    pub fn peak(&self, index: usize) -> Point {
        Point::on_circle(self.radius, self.angle_degrees(index))
    }

    pub fn offset_at(&self, index: usize, elapsed: Duration) -> Point {
        self.peak(index) * self.weight_at(elapsed)
    }

    pub fn offsets_at(&self, elapsed: Duration) -> Vec<Point> {
        (0..self.points).map(|i| self.offset_at(i, elapsed)).collect()
    }

    /// Fraction of the peak reached at `elapsed`, shared by every point.
    pub fn weight_at(&self, elapsed: Duration) -> f64 {
        if self.leg.is_zero() {
            return 0.0;
        }

        let cycle = self.cycle().as_nanos();
        let (iteration, rem) = (elapsed.as_nanos() / cycle, elapsed.as_nanos() % cycle);
        // odd iterations play backwards
        let local = if iteration % 2 == 1 { cycle - rem } else { rem };

        let leg = self.leg.as_nanos();
        if local <= leg {
            self.easing.apply(local as f64 / leg as f64)
        } else if local <= 2 * leg {
            1.0 - self.easing.apply((local - leg) as f64 / leg as f64)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use strum::IntoEnumIterator;

    const RADIUS: f64 = 28.0;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn orbit() -> OrbitSpec {
        OrbitSpec::new(DEFAULT_POINTS, RADIUS)
    }

    fn assert_point(actual: Point, x: f64, y: f64) {
        assert_abs_diff_eq!(actual.x, x, epsilon = 1e-9);
        assert_abs_diff_eq!(actual.y, y, epsilon = 1e-9);
    }

    #[test]
    fn test_angles_are_evenly_spaced() {
        let orbit = orbit();
        for i in 0..5 {
            assert_abs_diff_eq!(orbit.angle_degrees(i), i as f64 * 72.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_origin_at_cycle_boundaries_and_peak_midway() {
        let orbit = orbit();
        for i in 0..5 {
            assert_point(orbit.offset_at(i, ms(0)), 0.0, 0.0);
            assert_point(orbit.offset_at(i, ms(2000)), 0.0, 0.0);
            assert_point(orbit.offset_at(i, ms(4000)), 0.0, 0.0);

            let angle = (i as f64 * 72.0).to_radians();
            assert_point(
                orbit.offset_at(i, ms(1000)),
                RADIUS * angle.cos(),
                RADIUS * angle.sin(),
            );
        }
    }

    #[test]
    fn test_point_three_sits_at_216_degrees() {
        let orbit = orbit();
        let angle = 216.0_f64.to_radians();

        assert_abs_diff_eq!(orbit.angle_degrees(3), 216.0, epsilon = 1e-12);
        assert_point(
            orbit.offset_at(3, ms(1000)),
            RADIUS * angle.cos(),
            RADIUS * angle.sin(),
        );
    }

    #[test]
    fn test_linear_legs() {
        let orbit = orbit();
        let peak = orbit.peak(1);
        assert_point(orbit.offset_at(1, ms(500)), peak.x * 0.5, peak.y * 0.5);
        assert_point(orbit.offset_at(1, ms(1750)), peak.x * 0.25, peak.y * 0.25);
    }

    #[test]
    fn test_reversed_iterations_mirror() {
        let orbit = orbit();
        for t in [130, 640, 1000, 1333, 1999] {
            assert_abs_diff_eq!(
                orbit.weight_at(ms(t)),
                orbit.weight_at(ms(4000 - t)),
                epsilon = 1e-12
            );
        }
        assert_abs_diff_eq!(orbit.weight_at(ms(3000)), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_trailing_rest_holds_origin() {
        let orbit = OrbitSpec {
            rest: ms(2000),
            ..orbit()
        };

        assert_eq!(orbit.cycle(), ms(4000));
        assert_abs_diff_eq!(orbit.weight_at(ms(1000)), 1.0, epsilon = 1e-12);
        assert_eq!(orbit.weight_at(ms(2500)), 0.0);
        assert_eq!(orbit.weight_at(ms(3999)), 0.0);
        // the reversed iteration starts with the rest
        assert_eq!(orbit.weight_at(ms(5000)), 0.0);
        assert_abs_diff_eq!(orbit.weight_at(ms(7000)), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ease_in_out() {
        let orbit = OrbitSpec {
            easing: Easing::EaseInOut,
            ..orbit()
        };

        assert_abs_diff_eq!(orbit.weight_at(ms(500)), 0.5, epsilon = 1e-12);
        assert!(orbit.weight_at(ms(250)) < 0.25);
        assert!(orbit.weight_at(ms(750)) > 0.75);
    }

    #[test]
    fn test_offsets_at_covers_every_point() {
        let offsets = orbit().offsets_at(ms(1000));
        assert_eq!(offsets.len(), 5);
        assert!(offsets.iter().all(|p| (p.length() - RADIUS).abs() < 1e-9));
    }

    #[test]
    fn test_easing_parsing() {
        let cases = vec![
            ("\"linear\"", Easing::Linear),
            ("\"LINEAR\"", Easing::Linear),
            ("\"ease-in-out\"", Easing::EaseInOut),
            ("\"cubic\"", Easing::EaseInOut),
        ];

        for (json, expected) in cases {
            let parsed: Easing = serde_json::from_str(json).unwrap();
            assert_eq!(parsed, expected);
        }
    }

    #[test]
    fn test_easing_reads_back_what_it_writes() {
        for easing in Easing::iter() {
            let json = serde_json::to_string(&easing).unwrap();
            let parsed: Easing = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, easing, "{json}");
        }
        assert_eq!(serde_json::to_string(&Easing::EaseInOut).unwrap(), "\"ease-in-out\"");
    }

    #[test]
    fn test_validate() {
        assert!(orbit().validate().is_ok());
        assert_eq!(OrbitSpec::new(0, RADIUS).validate(), Err(OrbitError::NoPoints));
        assert_eq!(
            OrbitSpec {
                leg: Duration::ZERO,
                ..orbit()
            }
            .validate(),
            Err(OrbitError::ZeroLeg)
        );
        assert_eq!(OrbitSpec::new(5, -1.0).validate(), Err(OrbitError::Radius(-1.0)));
    }
}
