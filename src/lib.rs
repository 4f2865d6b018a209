pub mod config;
pub mod dataset;
pub mod filter;
pub mod output;
pub mod rank;
pub mod scoring;
