//! Weekly shift scheduling.
//!
//! Employees state one preferred shift per day. [`schedule::generate`] first
//! honours those preferences, then tops up every (day, shift) cell to the
//! minimum headcount by drawing from whoever is still free, reporting any cell
//! it cannot fill.

pub mod config;
pub mod display;
pub mod error;
pub mod form;
pub mod logging;
pub mod parser;
pub mod prompt;
pub mod schedule;
pub mod web;

pub use error::{ImportError, Result, SchedulerError};
