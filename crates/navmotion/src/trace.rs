use crate::layout::BarLayout;
use crate::scene::{Frame, Scene};
use crate::selection::SelectError;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TapTarget {
    Tab(usize),
    X(f64),
}

/// A scripted tap, written `TAB@MS` or `x:PIXELS@MS`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tap {
    pub target: TapTarget,
    pub at: Duration,
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseTapError {
    #[error("expected TAB@MS or x:PIXELS@MS, got '{0}'")]
    Format(String),
    #[error("invalid tab index '{0}'")]
    Tab(String),
    #[error("invalid x coordinate '{0}'")]
    X(String),
    #[error("invalid time '{0}'")]
    Time(String),
}

impl FromStr for Tap {
    type Err = ParseTapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (target, at) = s
            .trim()
            .split_once('@')
            .ok_or_else(|| ParseTapError::Format(s.to_string()))?;

        let at = at
            .trim()
            .trim_end_matches("ms")
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|_| ParseTapError::Time(at.to_string()))?;

        let target = match target.trim().strip_prefix("x:") {
            Some(x) => x
                .parse::<f64>()
                .ok()
                .filter(|x| x.is_finite())
                .map(TapTarget::X)
                .ok_or_else(|| ParseTapError::X(x.to_string()))?,
            None => target
                .trim()
                .parse::<usize>()
                .map(TapTarget::Tab)
                .map_err(|_| ParseTapError::Tab(target.to_string()))?,
        };

        Ok(Self { target, at })
    }
}

impl fmt::Display for Tap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target {
            TapTarget::Tab(i) => write!(f, "{}@{}", i, self.at.as_millis()),
            TapTarget::X(x) => write!(f, "x:{}@{}", x, self.at.as_millis()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceOptions {
    pub width: f64,
    pub height: f64,
    pub until: Duration,
    pub step: Duration,
}

/// Plays `taps` against `scene` and returns one frame per `step`, from zero through `until`.
pub fn run(
    scene: &mut Scene,
    taps: &[Tap],
    options: &TraceOptions,
) -> Result<Vec<Frame>, SelectError> {
    let mut pending: Vec<Tap> = taps.to_vec();
    pending.sort_by_key(|tap| tap.at);
    let mut pending = pending.into_iter().peekable();

    let step = options.step.max(Duration::from_millis(1));
    let mut frames = Vec::new();
    let mut now = Duration::ZERO;

    while now <= options.until {
        while let Some(tap) = pending.next_if(|tap| tap.at <= now) {
            scene.advance(tap.at);
            let slots = scene.tabs().len();
            let index = match tap.target {
                TapTarget::Tab(i) => Some(i),
                TapTarget::X(x) => BarLayout::slot_at(x, options.width, slots),
            };
            match index {
                Some(i) => {
                    scene.select(i)?;
                }
                None => log::warn!("Tap {} hit no slot", tap),
            }
        }

        scene.advance(now);
        frames.push(scene.frame(options.width, options.height));
        now += step;
    }

    Ok(frames)
}
