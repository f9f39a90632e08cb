//! Core infrastructure shared by the lifecycle phases.

pub mod output;
