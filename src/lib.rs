pub mod app;
pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod geometry;
pub mod loaders;
pub mod math;
pub mod renderer;
pub mod scene;
pub mod theme;
pub mod types;
pub mod ui;

pub use app::App;
pub use config::ViewerConfig;
