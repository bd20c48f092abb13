pub mod benchmark;
pub mod client;
pub mod config;
pub mod recording;
pub mod runner;
