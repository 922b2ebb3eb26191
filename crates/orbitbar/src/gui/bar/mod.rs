pub mod view;

pub use view::{draw_bar, draw_body};

pub const BODY_TEXT: &str = "Sample Content";
pub const BODY_FONT_SIZE: f64 = 16.0;
/// Lifts the tab icons off the bottom edge of the bar.
pub const TAB_BOTTOM_PADDING: i32 = 20;
