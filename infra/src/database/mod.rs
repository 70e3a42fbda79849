//! Database module - MySQL implementations using SQLx
//!
//! Connection pool management and the MySQL user repository.

pub mod connection;
pub mod mysql;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::MySqlUserRepository;
