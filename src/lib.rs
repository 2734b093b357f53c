pub mod catalog;
pub mod config;
pub mod filter;
pub mod listing;
pub mod render;
pub mod stats;
pub mod tracing;
pub mod view;
