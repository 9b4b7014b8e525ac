//! FitTrack Backend Library
//!
//! Exposes the backend modules for integration tests.

pub mod config;
pub mod db;
pub mod error;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
