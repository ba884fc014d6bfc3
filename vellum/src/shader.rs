//! Shader-side collaborators.
//!
//! Compiling shaders and uploading user uniforms is not this crate’s business, but backends still
//! need to reach the active shader right before a draw: to refresh the uniforms the engine
//! provides on its own and to make sure every surface the shader samples from is readable.

use crate::matrix::Matrix4;

/// Uniforms the engine feeds to every shader.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BuiltinUniform {
  /// Current model-view transform.
  TransformMatrix,
  /// Current projection.
  ProjectionMatrix,
  /// Projection × transform.
  TransformProjectionMatrix,
  /// Size of rasterized points.
  PointSize,
}

/// A resource currently bound to a shader for sampling.
pub trait SampledResource {
  /// Whether the resource must be resolved before it can be sampled.
  ///
  /// Multisampled render targets answer `true`; plain textures answer `false`.
  fn needs_multisample_resolve(&self) -> bool;

  /// Resolve the multisampled contents into their sampleable form.
  fn resolve_multisample(&mut self);
}

/// The shader program a draw is about to run with.
pub trait Shader {
  /// Refresh the screen-dependent uniforms if the screen changed since they were last sent.
  fn check_screen_params(&mut self) {}

  /// Send a matrix to a built-in uniform.
  fn send_builtin_matrix(&mut self, builtin: BuiltinUniform, matrix: &Matrix4);

  /// Send a scalar to a built-in uniform.
  fn send_builtin_float(&mut self, builtin: BuiltinUniform, value: f32);

  /// Visit every resource currently bound to the shader.
  fn visit_bound_resources(&mut self, visit: &mut dyn FnMut(&mut dyn SampledResource));
}
