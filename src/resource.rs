//! Declarative resources built on top of the [gitlab](crate::gitlab) API
pub mod data;
pub mod jenkins_ci;
pub mod schema;
