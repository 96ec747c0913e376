pub mod cli;
pub mod config;
pub mod filter;
pub mod import;
pub mod model;
pub mod normalize;
pub mod store;
