//! Numerical primitives for CRFlux.

pub mod grid;
pub mod roots;
pub mod spline;
