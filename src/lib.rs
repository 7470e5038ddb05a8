pub mod api;
pub mod config;
pub mod error;
pub mod form;
pub mod logging;
pub mod runtime;
pub mod state;
pub mod task;
pub mod terminal;
pub mod ui;
pub mod widgets;
