use super::{BODY_FONT_SIZE, BODY_TEXT};
use crate::gui::theme::{self, ThemeColors};
use cairo::{Context, LinearGradient};
use navmotion::geometry::Circle;
use navmotion::layout::BarLayout;
use navmotion::scene::Frame;
use navmotion::tab::TabColor;
use palette::Srgba;
use std::f64::consts::PI;

fn fill_circle(cr: &Context, circle: &Circle, color: Srgba<f64>) -> Result<(), cairo::Error> {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
    cr.arc(circle.center.x, circle.center.y, circle.radius, 0.0, 2.0 * PI);
    cr.fill()
}

/// The bar band occupies the bottom `layout.height` of the canvas; anything above it is
/// headroom for the indicator.
fn draw_background(
    cr: &Context,
    layout: &BarLayout,
    colors: &ThemeColors,
    width: f64,
    height: f64,
) -> Result<(), cairo::Error> {
    let top = (height - layout.height).max(0.0);
    let gradient = LinearGradient::new(0.0, top, 0.0, height);

    let (r, g, b, a) = colors.bar_top.into_components();
    gradient.add_color_stop_rgba(0.0, r, g, b, a);
    let (r, g, b, a) = colors.bar_bottom.into_components();
    gradient.add_color_stop_rgba(1.0, r, g, b, a);

    cr.set_source(&gradient)?;
    cr.rectangle(0.0, top, width, height - top);
    cr.fill()
}

pub fn draw_bar(
    cr: &Context,
    frame: &Frame,
    layout: &BarLayout,
    colors: &ThemeColors,
    width: f64,
    height: f64,
) -> Result<(), cairo::Error> {
    draw_background(cr, layout, colors, width, height)?;

    for point in &frame.points {
        fill_circle(cr, point, colors.orbit_point)?;
    }

    fill_circle(cr, &frame.indicator, theme::tab_rgba(frame.color))
}

/// Fills the content area with the selected colour and centres the placeholder text in the
/// part not covered by the bar.
pub fn draw_body(
    cr: &Context,
    color: TabColor,
    layout: &BarLayout,
    colors: &ThemeColors,
    width: f64,
    height: f64,
) -> Result<(), cairo::Error> {
    let (r, g, b, a) = theme::tab_rgba(color).into_components();
    cr.set_source_rgba(r, g, b, a);
    cr.rectangle(0.0, 0.0, width, height);
    cr.fill()?;

    let visible = (height - layout.height).max(0.0);
    let (r, g, b, a) = colors.body_text.into_components();
    cr.set_source_rgba(r, g, b, a);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
    cr.set_font_size(BODY_FONT_SIZE);
    if let Ok(ext) = cr.text_extents(BODY_TEXT) {
        cr.move_to(
            width / 2.0 - ext.width() / 2.0 - ext.x_bearing(),
            visible / 2.0 - ext.height() / 2.0 - ext.y_bearing(),
        );
        cr.show_text(BODY_TEXT)?;
    }
    Ok(())
}
