use crate::config::{Config, ConfigError};
use crate::geometry::Circle;
use crate::layout::BarLayout;
use crate::orbit::{DEFAULT_POINTS, OrbitSpec};
use crate::selection::{ColorTiming, SelectError, SelectionTracker, TrackerUpdate};
use crate::spring::SpringSpec;
use crate::tab::{TabBar, TabColor};
use serde::Serialize;
use std::time::Duration;

/// Drawing order is bar background, then `points`, then `indicator` on top.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub elapsed_ms: f64,
    pub position: f64,
    pub selected: usize,
    pub slot_width: f64,
    pub indicator: Circle,
    pub points: Vec<Circle>,
    pub color: TabColor,
}

pub struct Scene {
    layout: BarLayout,
    tracker: SelectionTracker,
    orbit: OrbitSpec,
    now: Duration,
}

impl Default for Scene {
    fn default() -> Self {
        let layout = BarLayout::default();
        Self::new(
            TabBar::default(),
            layout,
            SpringSpec::default(),
            OrbitSpec::new(DEFAULT_POINTS, layout.orbit_radius()),
            ColorTiming::default(),
        )
    }
}

impl Scene {
    pub fn new(
        tabs: TabBar,
        layout: BarLayout,
        spring: SpringSpec,
        orbit: OrbitSpec,
        color_timing: ColorTiming,
    ) -> Self {
        Self {
            layout,
            tracker: SelectionTracker::new(tabs, spring, color_timing),
            orbit,
            now: Duration::ZERO,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(
            config.tab_bar()?,
            config.bar,
            config.spring,
            config.orbit_spec(),
            config.color_timing,
        ))
    }

    /// Swaps in a new configuration, keeping the clock and, when it still exists, the
    /// selected tab.
    pub fn reconfigure(&mut self, config: &Config) -> Result<(), ConfigError> {
        let mut next = Self::from_config(config)?;
        next.now = self.now;

        if let Err(e) = next.tracker.jump_to(self.tracker.selected_index(), self.now) {
            log::warn!("Selection reset after reconfigure: {}", e);
        }

        *self = next;
        Ok(())
    }

    pub fn tabs(&self) -> &TabBar {
        self.tracker.tabs()
    }

    pub fn tracker(&self) -> &SelectionTracker {
        &self.tracker
    }

    pub fn layout(&self) -> &BarLayout {
        &self.layout
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn advance(&mut self, now: Duration) -> TrackerUpdate {
        self.now = self.now.max(now);
        self.tracker.tick(self.now)
    }

    pub fn select(&mut self, index: usize) -> Result<TrackerUpdate, SelectError> {
        self.tracker.select(index, self.now)
    }

    pub fn position(&self) -> f64 {
        self.tracker.position(self.now)
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.tracker.is_selected(index, self.now)
    }

    pub fn color(&self) -> TabColor {
        self.tracker.color()
    }

    pub fn frame(&self, width: f64, height: f64) -> Frame {
        let slots = self.tabs().len();
        let position = self.position();
        let center = self.layout.indicator_center(position, width, height, slots);

        let points = self
            .orbit
            .offsets_at(self.now)
            .into_iter()
            .map(|offset| Circle::new(center + offset, self.layout.point_radius))
            .collect();

        Frame {
            elapsed_ms: self.now.as_secs_f64() * 1000.0,
            position,
            selected: self.tracker.selected_index(),
            slot_width: BarLayout::slot_width(width, slots),
            indicator: Circle::new(center, self.layout.main_radius),
            points,
            color: self.tracker.color(),
        }
    }
}
