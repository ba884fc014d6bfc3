//! Texture sampling parameters, as the driver understands them.

use vellum::texture::{FilterMode, WrapMode};

use crate::gl;
use crate::gl::types::GLenum;

pub(crate) fn min_filter_to_glenum(min: FilterMode, mipmap: Option<FilterMode>) -> GLenum {
  match (min, mipmap) {
    (FilterMode::Nearest, None) => gl::NEAREST,
    (FilterMode::Linear, None) => gl::LINEAR,
    (FilterMode::Nearest, Some(FilterMode::Nearest)) => gl::NEAREST_MIPMAP_NEAREST,
    (FilterMode::Nearest, Some(FilterMode::Linear)) => gl::NEAREST_MIPMAP_LINEAR,
    (FilterMode::Linear, Some(FilterMode::Nearest)) => gl::LINEAR_MIPMAP_NEAREST,
    (FilterMode::Linear, Some(FilterMode::Linear)) => gl::LINEAR_MIPMAP_LINEAR,
  }
}

pub(crate) fn mag_filter_to_glenum(mag: FilterMode) -> GLenum {
  match mag {
    FilterMode::Nearest => gl::NEAREST,
    FilterMode::Linear => gl::LINEAR,
  }
}

pub(crate) fn wrap_to_glenum(wrap: WrapMode) -> GLenum {
  match wrap {
    WrapMode::Clamp => gl::CLAMP_TO_EDGE,
    WrapMode::Repeat => gl::REPEAT,
    WrapMode::MirroredRepeat => gl::MIRRORED_REPEAT,
  }
}

/// Clamp a requested anisotropy to what the driver accepts.
pub(crate) fn clamp_anisotropy(requested: f32, max: f32) -> f32 {
  requested.max(1.).min(max)
}
