//! # PlantOps Rust Backend
//!
//! Manufacturing-operations analysis engine.
//!
//! This crate provides the Rust backend for the PlantOps manufacturing
//! dashboard. Its centerpiece is the downtime-transition analysis engine:
//! the raw, time-ordered log of production-line stoppages is turned into a
//! transition-frequency model between causes (or categories, or equipment),
//! ranked and truncated to the most significant entries. The backend exposes
//! a REST API via Axum for the dashboard frontend.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Data Transfer Objects (DTOs) for API responses
//! - [`models`]: Domain types (downtime events, grouping dimensions, filters)
//! - [`db`]: Repository pattern over the downtime event store
//! - [`services`]: The analysis pipeline (filter resolution, sequence
//!   building, transition aggregation, ranking, result assembly)
//! - [`routes`]: Route-specific response types
//! - [`http`]: Axum-based HTTP server and request handlers

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;

pub mod db;
pub mod models;

pub mod routes;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
