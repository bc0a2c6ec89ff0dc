//! Cardbox - debit card API for customer banking portals
//!
//! This library provides the core functionality for the cardbox service:
//! database operations, API token auth, and the debit card resource handlers.

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod util;
