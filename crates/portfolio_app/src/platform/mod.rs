//! Terminal front end: configuration, logging and the stdin chat loop.
mod app;
mod args;
mod config;
mod logging;
mod ui;

pub use app::run_app;
