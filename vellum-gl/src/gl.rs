//! Generated OpenGL bindings.
//!
//! Desktop OpenGL 4.6 compatibility profile plus the extensions the state cache knows how to fall
//! back to. Entry points live in the [`Gl`] function table rather than in globals, so that each
//! driver owns the table of the context it was loaded for.

#![allow(
  clippy::all,
  dead_code,
  missing_docs,
  non_camel_case_types,
  non_snake_case,
  non_upper_case_globals,
  unused_imports,
  unused_parens
)]

include!(concat!(env!("OUT_DIR"), "/gl_bindings.rs"));
