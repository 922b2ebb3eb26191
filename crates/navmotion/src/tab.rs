use palette::Srgb;
use palette::rgb::FromHexError;
use serde::Deserialize;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

crate::string_newtype! {
    /// Freedesktop icon name, resolved by the toolkit's icon theme.
    pub struct TabIcon;
}

/// An opaque colour written as `#RRGGBB` in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, SerializeDisplay, DeserializeFromStr)]
pub struct TabColor(Srgb<u8>);

impl TabColor {
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self(Srgb::new(red, green, blue))
    }

    pub fn rgb(&self) -> Srgb<u8> {
        self.0
    }

    pub fn to_f64(&self) -> Srgb<f64> {
        self.0.into_format()
    }
}

impl FromStr for TabColor {
    type Err = FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Srgb::from_str(s.trim()).map(Self)
    }
}

impl fmt::Display for TabColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.0.into_components();
        write!(f, "#{r:02X}{g:02X}{b:02X}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Tab {
    pub icon: TabIcon,
    pub color: TabColor,
}

impl Tab {
    pub fn new(icon: impl Into<String>, color: TabColor) -> Self {
        Self {
            icon: TabIcon::new(icon),
            color,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TabError {
    #[error("a tab bar needs at least one tab")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabBar {
    tabs: Vec<Tab>,
}

impl TabBar {
    pub fn new(tabs: Vec<Tab>) -> Result<Self, TabError> {
        if tabs.is_empty() {
            return Err(TabError::Empty);
        }
        Ok(Self { tabs })
    }

    // never empty
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn get(&self, index: usize) -> Option<&Tab> {
        self.tabs.get(index)
    }

    pub fn first(&self) -> &Tab {
        &self.tabs[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.iter()
    }
}

impl Default for TabBar {
    fn default() -> Self {
        Self {
            tabs: default_tabs(),
        }
    }
}

pub fn default_tabs() -> Vec<Tab> {
    vec![
        Tab::new("go-home-symbolic", TabColor::from_rgb(0xF3, 0xE0, 0xEC)),
        Tab::new("system-search-symbolic", TabColor::from_rgb(0xEA, 0xD5, 0xE6)),
        Tab::new("emblem-favorite-symbolic", TabColor::from_rgb(0xF2, 0xBE, 0xFC)),
        Tab::new(
            "preferences-system-notifications-symbolic",
            TabColor::from_rgb(0xCA, 0x9C, 0xE1),
        ),
        Tab::new("emblem-system-symbolic", TabColor::from_rgb(0x68, 0x5F, 0x74)),
    ]
}
