//! Cosmic-ray primary flux models.
//!
//! Model families live in [`models`]; [`PrimaryFlux`] selects one at
//! runtime. Derived quantities (nucleon flux, ⟨ln A⟩, spectral indices)
//! are generic over the [`FluxModel`] trait.

pub mod derived;
pub mod model;
pub mod models;
pub mod primary;
pub mod provider;
pub mod spline_table;

pub use model::{FluxModel, NucleonFlux};
pub use primary::PrimaryFlux;
