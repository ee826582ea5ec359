pub mod analyzer;
pub mod catalog;
pub mod metrics;
pub mod poller;
pub mod renderer;
pub mod telegram;
