pub mod client;
pub mod config;
pub mod outcome;
pub mod protocol;
pub mod report;
pub mod runner;
