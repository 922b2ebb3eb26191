use crate::geometry::Point;
use serde::Deserialize;
use thiserror::Error;

pub const BAR_HEIGHT: f64 = 80.0;
pub const CIRCLE_OFFSET_Y: f64 = 32.0;
pub const MAIN_RADIUS: f64 = 36.0;
pub const POINT_RADIUS: f64 = 8.0;

#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("{name} must be finite and non-negative, got {value}")]
    Negative { name: &'static str, value: f64 },
    #[error("point radius {point} must not exceed main radius {main}")]
    PointTooLarge { point: f64, main: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct BarLayout {
    pub height: f64,
    /// Gap between the indicator's bottom edge and the bar's bottom edge.
    pub circle_offset_y: f64,
    pub main_radius: f64,
    pub point_radius: f64,
}

impl Default for BarLayout {
    fn default() -> Self {
        Self {
            height: BAR_HEIGHT,
            circle_offset_y: CIRCLE_OFFSET_Y,
            main_radius: MAIN_RADIUS,
            point_radius: POINT_RADIUS,
        }
    }
}

impl BarLayout {
    pub fn validate(&self) -> Result<(), LayoutError> {
        for (name, value) in [
            ("height", self.height),
            ("circle_offset_y", self.circle_offset_y),
            ("main_radius", self.main_radius),
            ("point_radius", self.point_radius),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::Negative { name, value });
            }
        }
        if self.point_radius > self.main_radius {
            return Err(LayoutError::PointTooLarge {
                point: self.point_radius,
                main: self.main_radius,
            });
        }
        Ok(())
    }

    /// How far the indicator pokes above the top edge of the bar.
    pub fn overflow(&self) -> f64 {
        (self.main_radius * 2.0 + self.circle_offset_y - self.height).max(0.0)
    }

    pub fn orbit_radius(&self) -> f64 {
        self.main_radius - self.point_radius
    }

    pub fn slot_width(width: f64, slots: usize) -> f64 {
        width / slots.max(1) as f64
    }

    pub fn indicator_x(position: f64, width: f64, slots: usize) -> f64 {
        let slot = Self::slot_width(width, slots);
        position * slot + slot / 2.0
    }

    pub fn indicator_y(&self, height: f64) -> f64 {
        height - self.main_radius - self.circle_offset_y
    }

    pub fn indicator_center(&self, position: f64, width: f64, height: f64, slots: usize) -> Point {
        Point::new(
            Self::indicator_x(position, width, slots),
            self.indicator_y(height),
        )
    }

    pub fn slot_at(x: f64, width: f64, slots: usize) -> Option<usize> {
        if slots == 0 || !(0.0..width).contains(&x) {
            return None;
        }
        let index = (x / Self::slot_width(width, slots)) as usize;
        Some(index.min(slots - 1))
    }
}
