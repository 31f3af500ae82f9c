pub mod schema;
pub mod connection;
pub mod dataset;
pub mod repositories;

pub use connection::{Database, DbPool};
pub use dataset::Dataset;
