pub mod browser;
pub mod config;
pub mod form;
pub mod output;
pub mod report;
pub mod scoring;
pub mod state;
pub mod stderr_buffer;
pub mod tui;
