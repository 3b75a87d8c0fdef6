// ABOUTME: Library root for zonectl - exposes zone management types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod admin;
pub mod config;
pub mod converge;
pub mod diagnostics;
pub mod error;
pub mod output;
pub mod platform;
pub mod provision;
pub mod runner;
pub mod types;
