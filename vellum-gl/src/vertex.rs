//! Built-in vertex attributes.
//!
//! The engine feeds positions, texture coordinates and colors through fixed slots. On shader
//! pipelines, a slot is a generic attribute index; on the fixed-function pipeline, each slot has
//! its own client-side array.

use crate::gl;
use crate::gl::types::{GLenum, GLuint};

/// A built-in vertex attribute slot.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum VertexAttrib {
  /// Vertex position.
  Position,
  /// Texture coordinates.
  TexCoord,
  /// Per-vertex color.
  Color,
}

impl VertexAttrib {
  /// Generic attribute index the slot is bound to in shaders.
  pub fn index(self) -> GLuint {
    match self {
      VertexAttrib::Position => 0,
      VertexAttrib::TexCoord => 1,
      VertexAttrib::Color => 2,
    }
  }

  /// Fixed-function client-side array backing the slot.
  pub fn client_array(self) -> GLenum {
    match self {
      VertexAttrib::Position => gl::VERTEX_ARRAY,
      VertexAttrib::TexCoord => gl::TEXTURE_COORD_ARRAY,
      VertexAttrib::Color => gl::COLOR_ARRAY,
    }
  }
}
