use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use navmotion::tab::{TabBar, TabColor};
use palette::Srgba;

pub struct ThemeColors {
    pub bar_top: Srgba<f64>,
    pub bar_bottom: Srgba<f64>,
    pub orbit_point: Srgba<f64>,
    pub body_text: Srgba<f64>,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bar_top: Srgba::new(0.0, 0.0, 0.0, 0.8),
            bar_bottom: Srgba::new(0.0, 0.0, 0.0, 1.0),
            orbit_point: Srgba::new(1.0, 1.0, 1.0, 1.0),
            body_text: Srgba::new(0.0, 0.0, 0.0, 1.0),
        }
    }
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        let fallback = Self::default();
        Self {
            bar_top: Self::lookup_color(context, "orbitbar_bar_top_color", fallback.bar_top),
            bar_bottom: Self::lookup_color(
                context,
                "orbitbar_bar_bottom_color",
                fallback.bar_bottom,
            ),
            orbit_point: Self::lookup_color(context, "orbitbar_point_color", fallback.orbit_point),
            body_text: Self::lookup_color(context, "orbitbar_text_color", fallback.body_text),
        }
    }

    fn lookup_color(context: &gtk::StyleContext, name: &str, fallback: Srgba<f64>) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                Srgba::new(
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                )
            })
            .unwrap_or(fallback)
    }
}

/// Tab colours are always drawn opaque.
pub fn tab_rgba(color: TabColor) -> Srgba<f64> {
    let (r, g, b) = color.to_f64().into_components();
    Srgba::new(r, g, b, 1.0)
}

/// Each selected tab sits on a pill of its own colour.
pub fn tab_css(tabs: &TabBar) -> String {
    tabs.iter()
        .enumerate()
        .map(|(i, tab)| {
            format!(
                ".orbitbar-tab-{i}.selected {{ background-color: {}; }}\n",
                tab.color
            )
        })
        .collect()
}

/// Installs the per-tab rules, replacing `previous` if given.
pub fn load_tab_css(tabs: &TabBar, previous: Option<&gtk::CssProvider>) -> gtk::CssProvider {
    let provider = gtk::CssProvider::new();
    provider.load_from_data(&tab_css(tabs));

    if let Some(display) = gdk::Display::default() {
        if let Some(previous) = previous {
            gtk::style_context_remove_provider_for_display(&display, previous);
        }
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
    provider
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
@define-color orbitbar_bar_top_color alpha(black, 0.8);
@define-color orbitbar_bar_bottom_color black;
@define-color orbitbar_point_color white;
@define-color orbitbar_text_color black;

.orbitbar-body, .orbitbar-bar, .orbitbar-tabs {
    background: none;
    background-color: transparent;
}

.orbitbar-tab {
    background: none;
    box-shadow: none;
    color: white;
    min-width: 48px;
    min-height: 48px;
    border-radius: 999px;
}

.orbitbar-tab.selected {
    color: #404040;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use navmotion::tab::Tab;

    #[test]
    fn test_tab_css_has_a_rule_per_tab() {
        let css = tab_css(&TabBar::default());
        assert_eq!(css.lines().count(), 5);
        assert!(css.starts_with(".orbitbar-tab-0.selected { background-color: #"));
    }

    #[test]
    fn test_tab_css_uses_tab_colour() {
        let tab = Tab::new("a", TabColor::from_rgb(0x10, 0x20, 0x30));
        let tabs = TabBar::new(vec![tab]).unwrap();
        assert_eq!(
            tab_css(&tabs),
            ".orbitbar-tab-0.selected { background-color: #102030; }\n"
        );
    }
}
