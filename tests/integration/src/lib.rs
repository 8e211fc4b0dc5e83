//! Integration test utilities for the reactions widget
//!
//! This crate provides an in-process fake of the reactions service and
//! helpers for driving the widget against it over real HTTP.

pub mod fake_server;
pub mod fixtures;
pub mod helpers;

pub use fake_server::*;
pub use fixtures::*;
pub use helpers::*;
