pub mod browser;
pub mod cli;
pub mod config;
pub mod engine;
pub mod network;
pub mod ops;
pub mod report;
