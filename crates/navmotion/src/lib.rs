pub mod clock;
pub mod config;
pub mod geometry;
pub mod layout;
pub mod macros;
pub mod orbit;
pub mod scene;
pub mod selection;
pub mod spring;
pub mod tab;
pub mod trace;
