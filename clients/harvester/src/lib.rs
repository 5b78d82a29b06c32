mod client;
mod config;
mod contracts;

pub use client::HarvesterClient;
pub use config::{GasSettings, HarvesterClientConfig};
