//! OpenGL backend.
//!
//! This crate keeps an in-memory mirror of the OpenGL state the [vellum](https://crates.io/crates/vellum)
//! engine relies on, so that redundant driver calls are skipped and the current state can be read
//! back for free. It also detects, once per context, what the driver is able to do, and smooths
//! over the differences between desktop OpenGL and OpenGL ES 2.
//!
//! The entry point is [`GLState`], created over a [`Driver`]. The regular driver is [`GlDriver`],
//! which resolves OpenGL symbols with the loader of your windowing crate:
//!
//! ```ignore
//! use vellum_gl::{GLState, GlDriver};
//!
//! let driver = unsafe { GlDriver::new(|s| window.get_proc_address(s) as _) };
//! let mut state = GLState::new(driver);
//! state.init_context()?;
//! ```

pub mod capabilities;
pub mod debug;
pub mod driver;
pub mod gl;
pub mod gl_driver;
pub mod matrix_stack;
pub mod state;
pub mod vertex;

mod blending;
mod texture;

pub use capabilities::{Api, Capabilities, GLVersion, Support, Vendor};
pub use driver::{Driver, LoadError};
pub use gl_driver::GlDriver;
pub use state::{GLState, InitError, StateError, Stats};
pub use vertex::VertexAttrib;
