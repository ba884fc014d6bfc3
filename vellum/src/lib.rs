//! # Portable graphics state for the vellum 2D engine
//!
//! This crate contains the driver-agnostic vocabulary the engine uses to talk about render state:
//! colors, rectangles, matrices, blending, texture sampling parameters and the shader-side
//! collaborators a backend needs to reach at draw time.
//!
//! It doesn’t issue any graphics call by itself. Backends, such as
//! [vellum-gl](https://crates.io/crates/vellum-gl), translate these types into native API calls and
//! cache what they have already sent to the driver.
//!
//! # Feature flags
//!
//! None so far.

#![deny(missing_docs)]

pub mod blending;
pub mod color;
pub mod matrix;
pub mod shader;
pub mod texture;
pub mod viewport;
