//! CLI library components for LinkSight.

#![allow(missing_docs)]

pub mod batch;
pub mod logging;
pub mod output;
