pub mod app;
pub mod completion;
pub mod config;
pub mod plan;
pub mod state;
