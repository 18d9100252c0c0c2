//! Linkforge - link resolution and caching for a URL shortener
//!
//! This library provides the core of the Linkforge service: short-code
//! generation, durable link storage, a fail-open cache layer, the redirect
//! resolution engine and the background expiry sweeper.
//!
//! # Architecture
//! - `cache`: link and stats caches (in-memory or Redis)
//! - `storage`: storage backends and data access
//! - `services`: link management and redirect resolution
//! - `runtime`: application lifecycle and the expiry sweeper
//! - `config`: configuration management
//! - `system`: logging setup

pub mod cache;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
