//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math types and operations
//! - Handle types for arena-backed storage
//! - Tick timing
//! - Logging utilities

pub mod math;
pub mod collections;
pub mod time;
pub mod logging;
