//! One-dimensional spring-column water surface.
//!
//! ## Architecture
//!
//! ```text
//! splash(x, radius, speed) ──► pending queue
//!                                   │
//!             advance() ────────────┤
//!                                   ▼
//!                         ┌───────────────────┐
//!                         │  splash::inject   │  velocity += speed * falloff
//!                         └─────────┬─────────┘
//!                                   ▼
//!                         ┌───────────────────┐
//!                         │ integrator        │  per column spring + damper
//!                         └─────────┬─────────┘
//!                                   ▼
//!                         ┌───────────────────┐
//!                         │ propagator        │  left→right, right→left sweeps
//!                         └─────────┬─────────┘
//!                                   ▼
//!                           heights for drawing
//! ```
//!
//! Everything here is synchronous and allocation-free per step. Columns are
//! owned by [`WaterStrip`]; the free functions operate on plain slices so
//! they can be tested in isolation.

pub mod grid;
pub mod integrator;
pub mod propagator;
pub mod splash;
pub mod strip;

pub use grid::{Column, ColumnGrid};
pub use splash::Splash;
pub use strip::{DriverState, WaterStrip};
