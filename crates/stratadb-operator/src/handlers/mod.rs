//! HTTP request handlers for the management API.

pub mod health;
pub mod services;
