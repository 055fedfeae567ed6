//! Core simulation library for walkers walking toward each other.
//!
//! Main components:
//! - [`walker`] — a point with a start and a current position.
//! - [`relations`] — the directed, weighted relation graph.
//! - [`system`] — the walking system, its step function and state iterator.
//! - [`vectorize`] — curves and rings derived from a run.
//! - [`plot`] — backend-independent lines and colors for rendering.
//! - [`persist`] — saving and loading the essential state.
//! - [`colormap`] / [`interp`] — colors and scalar remapping.
//! - [`config`] — update policy and random generation settings.
//! - [`error`] — the shared error type.
//! - [`types`] — shared type aliases and IDs.

pub mod colormap;
pub mod config;
pub mod error;
pub mod interp;
pub mod persist;
pub mod plot;
pub mod relations;
pub mod system;
pub mod types;
pub mod vectorize;
pub mod walker;

pub use error::{Result, WalkError};
pub use system::WalkingSystem;
