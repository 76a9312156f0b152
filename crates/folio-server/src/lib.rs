//! folio server library entry.
//!
//! This crate wires the template store, rendering dispatcher, metrics
//! registry, instrumentation middleware and uptime tracker into the site's
//! HTTP surface. It is intended to be consumed by the binary (`main.rs`) and
//! by integration tests.

pub mod app_state;
pub mod config;
pub mod contact;
pub mod obs;
pub mod ops;
pub mod pages;
pub mod render;
pub mod router;
