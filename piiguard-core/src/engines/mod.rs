//! This module contains the `DetectionEngine` implementations.
//!
//! Each engine is a separate file within this directory and implements the
//! `DetectionEngine` trait.
//!
//! # License
//! MIT OR APACHE 2.0

pub mod regex_engine;
