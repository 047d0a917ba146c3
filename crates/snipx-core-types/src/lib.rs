//! Core types shared across snipx facilities
//!
//! This crate provides the canonical schema constants used by both the
//! error facility and the logging facility, so every layer emits the same
//! field keys and event names.

pub mod schema;
