pub mod config;
pub mod feed;
pub mod fetch;
pub mod location;
pub mod pipeline;
pub mod tui;
