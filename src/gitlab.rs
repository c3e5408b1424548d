//! Everything needed to talk to the gitlab REST API
pub mod connection;
pub mod jenkins;
pub mod project;
