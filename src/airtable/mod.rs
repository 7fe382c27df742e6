pub mod client;
pub mod config;
pub mod pacer;
pub mod records;
