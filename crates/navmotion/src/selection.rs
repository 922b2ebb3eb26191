use crate::spring::{AnimatedValue, SpringSpec};
use crate::tab::{TabBar, TabColor};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use thiserror::Error;

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
pub enum ColorTiming {
    #[default]
    #[strum(to_string = "on-tap", serialize = "tap", serialize = "start")]
    OnTap,
    /// The colour lands once the motion started by the tap settles. A tap that is
    /// retargeted before settling never applies its colour.
    #[strum(to_string = "on-settle", serialize = "settle", serialize = "end")]
    OnSettle,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectError {
    #[error("tab {index} is out of range for a bar of {len} tabs")]
    OutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackerUpdate {
    pub should_redraw: bool,
    pub color_applied: bool,
}

impl TrackerUpdate {
    pub fn new(should_redraw: bool, color_applied: bool) -> Self {
        Self {
            should_redraw,
            color_applied,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SelectionTracker {
    tabs: TabBar,
    position: AnimatedValue,
    selected: usize,
    color: TabColor,
    color_timing: ColorTiming,
    pending_color: Option<usize>,
    was_running: bool,
}

impl SelectionTracker {
    pub fn new(tabs: TabBar, spring: SpringSpec, color_timing: ColorTiming) -> Self {
        let color = tabs.first().color;
        Self {
            tabs,
            position: AnimatedValue::new(spring, 0.0),
            selected: 0,
            color,
            color_timing,
            pending_color: None,
            was_running: false,
        }
    }

    pub fn tabs(&self) -> &TabBar {
        &self.tabs
    }

    /// The most recently tapped tab, regardless of where the indicator currently is.
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn color(&self) -> TabColor {
        self.color
    }

    pub fn position(&self, now: Duration) -> f64 {
        self.position.value(now)
    }

    pub fn is_running(&self, now: Duration) -> bool {
        self.position.is_running(now)
    }

    /// True only while the live position sits exactly on `index`.
    pub fn is_selected(&self, index: usize, now: Duration) -> bool {
        self.position(now) == index as f64
    }

    fn tab_color(&self, index: usize) -> Result<TabColor, SelectError> {
        self.tabs
            .get(index)
            .map(|tab| tab.color)
            .ok_or(SelectError::OutOfRange {
                index,
                len: self.tabs.len(),
            })
    }

    pub fn select(&mut self, index: usize, now: Duration) -> Result<TrackerUpdate, SelectError> {
        let color = self.tab_color(index)?;

        self.selected = index;
        self.position.animate_to(index as f64, now);
        self.was_running = self.position.is_running(now);

        let color_applied = match self.color_timing {
            ColorTiming::OnTap => {
                self.color = color;
                self.pending_color = None;
                true
            }
            ColorTiming::OnSettle => {
                self.pending_color = Some(index);
                self.apply_pending_color(now)
            }
        };

        log::debug!(
            "selected tab {} (settles in {:?})",
            index,
            self.position.motion().settle_time()
        );

        Ok(TrackerUpdate::new(true, color_applied))
    }

    /// Moves straight to `index` without animating, e.g. after rebuilding the scene.
    pub fn jump_to(&mut self, index: usize, now: Duration) -> Result<(), SelectError> {
        self.color = self.tab_color(index)?;
        self.selected = index;
        self.pending_color = None;
        self.was_running = false;
        self.position.snap_to(index as f64, now);
        Ok(())
    }

    pub fn tick(&mut self, now: Duration) -> TrackerUpdate {
        let running = self.position.is_running(now);
        let color_applied = self.apply_pending_color(now);
        let should_redraw = running || self.was_running || color_applied;
        self.was_running = running;

        TrackerUpdate::new(should_redraw, color_applied)
    }

    fn apply_pending_color(&mut self, now: Duration) -> bool {
        if self.position.is_running(now) {
            return false;
        }
        match self.pending_color.take() {
            Some(index) => {
                if let Some(tab) = self.tabs.get(index) {
                    self.color = tab.color;
                }
                true
            }
            None => false,
        }
    }
}
