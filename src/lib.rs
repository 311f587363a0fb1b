pub mod cache;
pub mod config;
pub mod expression;
pub mod mapping;
pub mod render;
pub mod types;
