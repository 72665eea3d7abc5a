//! Shared utilities for the moderated chat relay.

pub mod logger;
pub mod time;
