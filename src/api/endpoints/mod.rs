//! REST endpoint handlers.

pub mod analysis;
pub mod analytics;
pub mod assessments;
pub mod catalog;
pub mod health;
pub mod patients;
pub mod summary;
pub mod timeline;
pub mod treatments;
