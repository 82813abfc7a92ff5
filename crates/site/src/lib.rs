//! Brand Mappers public site library.
//!
//! Server-rendered marketing pages hydrated from the keyed settings store,
//! plus the contact form endpoint. Exposed as a library so the router can be
//! exercised in-process by the integration tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
