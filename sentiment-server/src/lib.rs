// Library exports for sentiment-server
// The operator tools reuse the dataset accessor and repositories from here

pub mod api;
pub mod config;
pub mod db;
pub mod state;
pub mod stats;
