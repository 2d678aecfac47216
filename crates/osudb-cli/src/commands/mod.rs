//! CLI command implementations.
//!
//! This module contains the implementation of each CLI command.

pub mod beatmaps;
pub mod collections;
pub mod info;
pub mod scores;
