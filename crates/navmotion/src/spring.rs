use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

pub const DAMPING_RATIO_MEDIUM_BOUNCY: f64 = 0.5;
pub const STIFFNESS_LOW: f64 = 200.0;
/// Displacement and velocity below which the motion counts as settled.
pub const DEFAULT_THRESHOLD: f64 = 0.01;

// Upper bound on how long a segment may take to settle, in seconds.
const SETTLE_CAP: f64 = 60.0;

#[derive(Debug, Error, PartialEq)]
pub enum SpringError {
    #[error("damping ratio must be positive and finite, got {0}")]
    DampingRatio(f64),
    #[error("stiffness must be positive and finite, got {0}")]
    Stiffness(f64),
    #[error("threshold must be positive and finite, got {0}")]
    Threshold(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpringSpec {
    pub damping_ratio: f64,
    pub stiffness: f64,
    pub threshold: f64,
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self {
            damping_ratio: DAMPING_RATIO_MEDIUM_BOUNCY,
            stiffness: STIFFNESS_LOW,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl SpringSpec {
    pub fn new(damping_ratio: f64, stiffness: f64) -> Self {
        Self {
            damping_ratio,
            stiffness,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), SpringError> {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if !usable(self.damping_ratio) {
            return Err(SpringError::DampingRatio(self.damping_ratio));
        }
        if !usable(self.stiffness) {
            return Err(SpringError::Stiffness(self.stiffness));
        }
        if !usable(self.threshold) {
            return Err(SpringError::Threshold(self.threshold));
        }
        Ok(())
    }

    fn natural_frequency(&self) -> f64 {
        self.stiffness.sqrt()
    }
}

/// Displacement from the target as a function of local time, per damping regime.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Response {
    Under {
        decay: f64,
        damped: f64,
        a: f64,
        b: f64,
    },
    Critical {
        omega: f64,
        a: f64,
        b: f64,
    },
    Over {
        r1: f64,
        r2: f64,
        c1: f64,
        c2: f64,
    },
}

impl Response {
    fn solve(spec: &SpringSpec, x0: f64, v0: f64) -> Self {
        let omega = spec.natural_frequency();
        let zeta = spec.damping_ratio;

        if (zeta - 1.0).abs() < 1e-9 {
            Self::Critical {
                omega,
                a: x0,
                b: v0 + omega * x0,
            }
        } else if zeta < 1.0 {
            let decay = zeta * omega;
            let damped = omega * (1.0 - zeta * zeta).sqrt();
            Self::Under {
                decay,
                damped,
                a: x0,
                b: (v0 + decay * x0) / damped,
            }
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -omega * (zeta - root);
            let r2 = -omega * (zeta + root);
            let c2 = (v0 - r1 * x0) / (r2 - r1);
            Self::Over {
                r1,
                r2,
                c1: x0 - c2,
                c2,
            }
        }
    }

    fn displacement(&self, t: f64) -> f64 {
        match *self {
            Self::Under { decay, damped, a, b } => {
                (-decay * t).exp() * (a * (damped * t).cos() + b * (damped * t).sin())
            }
            Self::Critical { omega, a, b } => (a + b * t) * (-omega * t).exp(),
            Self::Over { r1, r2, c1, c2 } => c1 * (r1 * t).exp() + c2 * (r2 * t).exp(),
        }
    }

    fn velocity(&self, t: f64) -> f64 {
        match *self {
            Self::Under { decay, damped, a, b } => {
                let (sin, cos) = (damped * t).sin_cos();
                (-decay * t).exp()
                    * ((-decay * a + damped * b) * cos + (-decay * b - damped * a) * sin)
            }
            Self::Critical { omega, a, b } => ((b - omega * a) - omega * b * t) * (-omega * t).exp(),
            Self::Over { r1, r2, c1, c2 } => {
                c1 * r1 * (r1 * t).exp() + c2 * r2 * (r2 * t).exp()
            }
        }
    }

    /// Local time after which both displacement and velocity stay below `eps`.
    fn settle_time(&self, eps: f64) -> f64 {
        match *self {
            Self::Under { decay, damped, a, b } => {
                let amplitude = a.hypot(b);
                let omega = decay.hypot(damped);
                decay_crossing(amplitude, 0.0, decay, eps)
                    .max(decay_crossing(omega * amplitude, 0.0, decay, eps))
            }
            Self::Critical { omega, a, b } => decay_crossing(a.abs(), b.abs(), omega, eps).max(
                decay_crossing((b - omega * a).abs(), omega * b.abs(), omega, eps),
            ),
            Self::Over { r1, r2, c1, c2 } => {
                let rate = -r1;
                decay_crossing(c1.abs() + c2.abs(), 0.0, rate, eps).max(decay_crossing(
                    (c1 * r1).abs() + (c2 * r2).abs(),
                    0.0,
                    rate,
                    eps,
                ))
            }
        }
    }
}

/// First time after which `(p + q·t)·e^(-rate·t)` stays at or below `eps`.
fn decay_crossing(p: f64, q: f64, rate: f64, eps: f64) -> f64 {
    let bound = |t: f64| (p + q * t) * (-rate * t).exp();

    // the bound is decreasing from here on
    let mut lo = if q > 0.0 {
        ((q - rate * p) / (rate * q)).max(0.0)
    } else {
        0.0
    };
    if bound(lo) <= eps {
        return lo;
    }

    let mut hi = lo.max(1.0);
    while bound(hi) > eps && hi < SETTLE_CAP {
        hi *= 2.0;
    }
    if bound(hi) > eps {
        return hi.min(SETTLE_CAP);
    }

    for _ in 0..64 {
        let mid = 0.5 * (lo + hi);
        if bound(mid) > eps {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    hi
}

/// One spring segment from `from` (with `velocity`) toward `target`, started at `start`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringMotion {
    target: f64,
    start: Duration,
    response: Response,
    settle: Duration,
}

impl SpringMotion {
    pub fn new(spec: &SpringSpec, from: f64, target: f64, velocity: f64, start: Duration) -> Self {
        let response = Response::solve(spec, from - target, velocity);
        let settle = Duration::from_secs_f64(response.settle_time(spec.threshold));
        Self {
            target,
            start,
            response,
            settle,
        }
    }

    pub fn at_rest(spec: &SpringSpec, value: f64, start: Duration) -> Self {
        Self::new(spec, value, value, 0.0, start)
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn settle_time(&self) -> Duration {
        self.settle
    }

    pub fn settles_at(&self) -> Duration {
        self.start + self.settle
    }

    pub fn is_settled(&self, now: Duration) -> bool {
        now >= self.settles_at()
    }

    fn local(&self, now: Duration) -> f64 {
        now.saturating_sub(self.start).as_secs_f64()
    }

    pub fn value_at(&self, now: Duration) -> f64 {
        if self.is_settled(now) {
            self.target
        } else {
            self.target + self.response.displacement(self.local(now))
        }
    }

    pub fn velocity_at(&self, now: Duration) -> f64 {
        if self.is_settled(now) {
            0.0
        } else {
            self.response.velocity(self.local(now))
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedValue {
    spec: SpringSpec,
    motion: SpringMotion,
}

impl AnimatedValue {
    pub fn new(spec: SpringSpec, value: f64) -> Self {
        let motion = SpringMotion::at_rest(&spec, value, Duration::ZERO);
        Self { spec, motion }
    }

    pub fn motion(&self) -> &SpringMotion {
        &self.motion
    }

    pub fn value(&self, now: Duration) -> f64 {
        self.motion.value_at(now)
    }

    pub fn velocity(&self, now: Duration) -> f64 {
        self.motion.velocity_at(now)
    }

    pub fn target(&self) -> f64 {
        self.motion.target()
    }

    pub fn is_running(&self, now: Duration) -> bool {
        !self.motion.is_settled(now)
    }

    /// Starts moving toward `target` from wherever the value is at `now`, keeping its velocity.
    pub fn animate_to(&mut self, target: f64, now: Duration) {
        let (value, velocity) = (self.value(now), self.velocity(now));
        self.motion = SpringMotion::new(&self.spec, value, target, velocity, now);
    }

    pub fn snap_to(&mut self, value: f64, now: Duration) {
        self.motion = SpringMotion::at_rest(&self.spec, value, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn samples(motion: &SpringMotion) -> impl Iterator<Item = f64> + '_ {
        let end = motion.settles_at().as_millis() as u64 + 500;
        (0..=end).map(move |t| motion.value_at(ms(t)))
    }

    #[test]
    fn test_converges_exactly_and_stays() {
        let spec = SpringSpec::default();
        let motion = SpringMotion::new(&spec, 0.0, 2.0, 0.0, Duration::ZERO);

        assert_eq!(motion.value_at(motion.settles_at()), 2.0);
        assert_eq!(motion.value_at(motion.settles_at() + Duration::from_secs(10)), 2.0);
        assert_eq!(motion.velocity_at(motion.settles_at()), 0.0);
    }

    #[test]
    fn test_settles_close_to_target_before_snapping() {
        let spec = SpringSpec::default();
        let motion = SpringMotion::new(&spec, 0.0, 3.0, 0.0, Duration::ZERO);
        let just_before = motion.settles_at() - ms(1);

        assert!((motion.value_at(just_before) - 3.0).abs() < spec.threshold);
    }

    #[test]
    fn test_medium_bouncy_overshoots() {
        let spec = SpringSpec::default();
        let motion = SpringMotion::new(&spec, 0.0, 2.0, 0.0, Duration::ZERO);
        let peak = samples(&motion).fold(f64::MIN, f64::max);

        // zeta = 0.5 overshoots by roughly 16%
        assert!(peak > 2.25 && peak < 2.4, "peak was {peak}");
    }

    #[test]
    fn test_settle_time_is_visible_but_short() {
        let spec = SpringSpec::default();
        let motion = SpringMotion::new(&spec, 0.0, 4.0, 0.0, Duration::ZERO);
        let settle = motion.settle_time();

        assert!(settle > ms(500), "settle was {settle:?}");
        assert!(settle < ms(3000), "settle was {settle:?}");
    }

    #[test]
    fn test_critical_and_over_damping_never_overshoot() {
        for zeta in [1.0, 2.5] {
            let spec = SpringSpec::new(zeta, STIFFNESS_LOW);
            let motion = SpringMotion::new(&spec, 0.0, 1.0, 0.0, Duration::ZERO);

            assert!(samples(&motion).all(|v| v <= 1.0 + 1e-9), "zeta {zeta} overshot");
            assert_eq!(motion.value_at(motion.settles_at()), 1.0);
        }
    }

    #[test]
    fn test_initial_conditions_hold_in_every_regime() {
        for zeta in [0.3, 1.0, 1.8] {
            let spec = SpringSpec::new(zeta, 150.0);
            let motion = SpringMotion::new(&spec, 1.5, -0.5, 3.0, ms(100));

            assert_abs_diff_eq!(motion.value_at(ms(100)), 1.5, epsilon = 1e-9);
            assert_abs_diff_eq!(motion.velocity_at(ms(100)), 3.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_velocity_matches_numeric_derivative() {
        let spec = SpringSpec::default();
        let motion = SpringMotion::new(&spec, 0.0, 4.0, 0.0, Duration::ZERO);
        let t = Duration::from_secs_f64(0.2);
        let h = Duration::from_secs_f64(1e-6);
        let numeric = (motion.value_at(t + h) - motion.value_at(t - h)) / 2e-6;

        assert_abs_diff_eq!(motion.velocity_at(t), numeric, epsilon = 1e-3);
    }

    #[test]
    fn test_already_at_target_is_settled() {
        let motion = SpringMotion::at_rest(&SpringSpec::default(), 3.0, ms(40));
        assert_eq!(motion.settle_time(), Duration::ZERO);
        assert!(motion.is_settled(ms(40)));
        assert_eq!(motion.value_at(ms(40)), 3.0);
    }

    #[test]
    fn test_retarget_keeps_value_and_velocity() {
        let mut value = AnimatedValue::new(SpringSpec::default(), 0.0);
        value.animate_to(4.0, Duration::ZERO);

        let at = ms(150);
        let (before, speed) = (value.value(at), value.velocity(at));
        value.animate_to(1.0, at);

        assert_abs_diff_eq!(value.value(at), before, epsilon = 1e-9);
        assert_abs_diff_eq!(value.velocity(at), speed, epsilon = 1e-9);
        assert_eq!(value.target(), 1.0);

        let settled = value.motion().settles_at();
        assert_eq!(value.value(settled), 1.0);
        assert!(!value.is_running(settled));
    }

    #[test]
    fn test_validate() {
        assert!(SpringSpec::default().validate().is_ok());
        assert_eq!(
            SpringSpec::new(0.0, 200.0).validate(),
            Err(SpringError::DampingRatio(0.0))
        );
        assert_eq!(
            SpringSpec::new(0.5, -1.0).validate(),
            Err(SpringError::Stiffness(-1.0))
        );
        assert!(SpringSpec::new(f64::NAN, 200.0).validate().is_err());

        let spec = SpringSpec {
            threshold: 0.0,
            ..SpringSpec::default()
        };
        assert_eq!(spec.validate(), Err(SpringError::Threshold(0.0)));
    }
}
