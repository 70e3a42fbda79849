//! HTTP clients for sibling services

pub mod user_client;

pub use user_client::HttpUserClient;
