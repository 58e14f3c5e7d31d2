pub mod aggregate;
pub mod chart;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod schedule;
pub mod seed;
pub mod types;
