#![deny(missing_docs)]

//! Core data types shared by the null-graph constructor and samplers.
//!
//! Everything downstream works on a single [`IntMatrix`] as the source of
//! truth for topology. Errors flow through [`NgError`], and all randomness is
//! drawn from an [`RngHandle`] seeded once by the caller.

pub mod errors;
pub mod matrix;
pub mod rng;

pub use errors::{ErrorInfo, NgError};
pub use matrix::IntMatrix;
pub use rng::RngHandle;
