//! Bluefin Releases - terminal browser for the Bluefin release catalog
//!
//! This library crate exposes internal modules for integration testing.

pub mod config;
pub mod data;
pub mod nav;
pub mod theme;
pub mod tui;
