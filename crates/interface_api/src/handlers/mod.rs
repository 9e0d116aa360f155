//! Request handlers

pub mod analytics;
pub mod health;
pub mod premium;
