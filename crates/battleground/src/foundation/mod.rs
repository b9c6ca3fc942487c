//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the scenario:
//! - Math types and orientation helpers
//! - Geometric primitives (bounding boxes, planes)
//! - Time management
//! - Logging utilities

pub mod math;
pub mod geometry;
pub mod time;
pub mod logging;
