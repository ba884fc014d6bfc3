//! Human-readable names of `GL_KHR_debug` message attributes.
//!
//! Useful when forwarding driver debug messages to the log.

use crate::gl;
use crate::gl::types::GLenum;

/// Name of a debug message severity.
pub fn debug_severity_str(severity: GLenum) -> &'static str {
  match severity {
    gl::DEBUG_SEVERITY_HIGH => "high",
    gl::DEBUG_SEVERITY_MEDIUM => "medium",
    gl::DEBUG_SEVERITY_LOW => "low",
    _ => "unknown",
  }
}

/// Name of a debug message source.
pub fn debug_source_str(source: GLenum) -> &'static str {
  match source {
    gl::DEBUG_SOURCE_API => "API",
    gl::DEBUG_SOURCE_WINDOW_SYSTEM => "window",
    gl::DEBUG_SOURCE_SHADER_COMPILER => "shader",
    gl::DEBUG_SOURCE_THIRD_PARTY => "external",
    gl::DEBUG_SOURCE_APPLICATION => "vellum",
    gl::DEBUG_SOURCE_OTHER => "other",
    _ => "unknown",
  }
}

/// Name of a debug message type.
pub fn debug_type_str(ty: GLenum) -> &'static str {
  match ty {
    gl::DEBUG_TYPE_ERROR => "error",
    gl::DEBUG_TYPE_DEPRECATED_BEHAVIOR => "deprecated behavior",
    gl::DEBUG_TYPE_UNDEFINED_BEHAVIOR => "undefined behavior",
    gl::DEBUG_TYPE_PERFORMANCE => "performance",
    gl::DEBUG_TYPE_PORTABILITY => "portability",
    gl::DEBUG_TYPE_OTHER => "other",
    _ => "unknown",
  }
}
