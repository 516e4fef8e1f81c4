//! Core timekeeping

pub mod timer;
