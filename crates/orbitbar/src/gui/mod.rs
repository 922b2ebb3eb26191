pub mod app;
pub mod bar;
pub mod theme;
pub mod window;
