//! Graphics state.
//!
//! [`GLState`] mirrors the part of the driver state the engine touches all the time, so that
//! reading it back never round-trips to the driver and rebinding what is already bound costs
//! nothing. Every mutation must go through its setters for the mirror to stay truthful.

use log::{debug, info, warn};
use std::error;
use std::fmt;
use std::marker::PhantomData;
use std::os::raw::c_void;
use vellum::blending::{BlendState, Equation};
use vellum::color::Color;
use vellum::matrix::Matrix4;
use vellum::shader::{BuiltinUniform, SampledResource, Shader};
use vellum::texture::{Filter, Wrap};
use vellum::viewport::Viewport;

use crate::blending::{from_blending_equation, from_blending_factor};
use crate::capabilities::{Capabilities, Support, Vendor};
use crate::driver::{Driver, LoadError};
use crate::gl;
use crate::gl::types::{GLenum, GLint, GLsizei, GLuint};
use crate::matrix_stack::Matrices;
use crate::texture::{clamp_anisotropy, mag_filter_to_glenum, min_filter_to_glenum, wrap_to_glenum};
use crate::vertex::VertexAttrib;

/// Cached value.
///
/// A cached value is used to prevent issuing costy GPU commands if we know the target value is
/// already set to what the command tries to set. An empty cache never matches, which forces the
/// next command to run.
#[derive(Debug)]
struct Cached<T>(Option<T>)
where
  T: PartialEq;

impl<T> Cached<T>
where
  T: PartialEq,
{
  fn empty() -> Self {
    Cached(None)
  }

  /// Explicitly invalidate a value.
  fn invalidate(&mut self) {
    self.0 = None;
  }

  fn set(&mut self, value: T) {
    self.0 = Some(value);
  }

  /// Check if the cached value is invalid regarding a value.
  ///
  /// A non-cached value (i.e. empty) is always invalid whatever compared value. If a value is
  /// already cached, then it’s invalid if it’s not equal ([`PartialEq`]) to the input value.
  fn is_invalid(&self, new_val: &T) -> bool {
    match &self.0 {
      Some(ref t) => t != new_val,
      _ => true,
    }
  }
}

/// Profiling counters.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Stats {
  /// Draw calls submitted since the last [`GLState::reset_draw_calls`].
  pub draw_calls: u64,
  /// Estimated amount of texture memory, in bytes.
  pub texture_memory: usize,
}

/// The graphics state.
///
/// This type represents the current state of a given graphics context. It acts as a forward-gate
/// to the driver calls the engine needs and adds a small cache layer over it to prevent from
/// issuing the same call (with the same parameters) twice.
///
/// A [`GLState`] is bound to the context current on the thread that created it: it is neither
/// [`Send`] nor [`Sync`].
#[derive(Debug)]
pub struct GLState<D> {
  _a: PhantomData<*const ()>, // !Send and !Sync

  driver: D,
  initialized: bool,
  caps: Capabilities,
  stats: Stats,
  matrices: Matrices,

  color: Color,
  clear_color: Color,
  viewport: Viewport,
  // top-left origin
  scissor: Viewport,
  offscreen_target_active: bool,
  blend_state: BlendState,
  point_size: f32,

  // texture units; each entry is the 2D texture bound to it
  texture_units: Vec<GLuint>,
  current_texture_unit: usize,

  default_framebuffer: GLuint,
  default_texture: GLuint,

  // bit patterns of the last fixed-function uploads
  last_projection: Cached<[u32; 16]>,
  last_transform: Cached<[u32; 16]>,
}

impl<D> GLState<D>
where
  D: Driver,
{
  /// Create a new, uninitialized state over `driver`.
  ///
  /// Nothing is sent to the driver until [`GLState::init_context`] is called.
  pub fn new(driver: D) -> Self {
    GLState {
      _a: PhantomData,
      driver,
      initialized: false,
      caps: Capabilities::default(),
      stats: Stats::default(),
      matrices: Matrices::new(),
      color: Color::WHITE,
      clear_color: Color::TRANSPARENT,
      viewport: Viewport::default(),
      scissor: Viewport::default(),
      offscreen_target_active: false,
      blend_state: BlendState::REPLACE,
      point_size: 1.,
      texture_units: vec![0],
      current_texture_unit: 0,
      default_framebuffer: 0,
      default_texture: 0,
      last_projection: Cached::empty(),
      last_transform: Cached::empty(),
    }
  }

  /// Initialize the state against the context currently bound to the driver.
  ///
  /// Resolves the driver entry points, detects the driver capabilities and reads back the current
  /// driver state. Calling it on an initialized state does nothing.
  pub fn init_context(&mut self) -> Result<(), InitError> {
    if self.initialized {
      return Ok(());
    }

    self.driver.load()?;

    self.caps = Capabilities::detect(&mut self.driver);
    debug!(
      "detected {} on a {} driver",
      self.caps.version(),
      self.caps.vendor()
    );

    if self.caps.arb_buffer_objects_only() {
      debug!("buffer objects only available through GL_ARB_vertex_buffer_object");
      self.driver.alias_arb_buffer_objects();
    }

    self.matrices.reset();
    self.read_back_state();
    self.read_back_texture_units();

    self.default_framebuffer = if self.caps.supports_offscreen() {
      // non-zero on some platforms
      let mut binding = [0];
      self
        .driver
        .get_integer_v(gl::DRAW_FRAMEBUFFER_BINDING, &mut binding);
      binding[0] as GLuint
    } else {
      0
    };

    self.set_blend_state(BlendState::REPLACE)?;

    self.caps.query_limits(&mut self.driver);
    debug!(
      "max texture size: {}, max render targets: {}, max anisotropy: {}",
      self.caps.max_texture_size(),
      self.caps.max_render_targets(),
      self.caps.max_anisotropy()
    );

    self.create_default_texture();

    self.last_projection.invalidate();
    self.last_transform.invalidate();

    if self.caps.uses_fixed_function() {
      self.driver.matrix_mode(gl::MODELVIEW);
    }

    self.initialized = true;
    info!("graphics context initialized ({})", self.caps.version());

    Ok(())
  }

  /// Release what [`GLState::init_context`] created.
  ///
  /// Calling it on an uninitialized state does nothing.
  pub fn deinit_context(&mut self) {
    if !self.initialized {
      return;
    }

    let default_texture = self.default_texture;
    self.delete_texture(default_texture);
    self.default_texture = 0;

    self.initialized = false;
    info!("graphics context released");
  }

  /// Whether [`GLState::init_context`] succeeded and [`GLState::deinit_context`] wasn’t called
  /// since.
  pub fn is_initialized(&self) -> bool {
    self.initialized
  }

  fn read_back_state(&mut self) {
    let mut rgba = [1.; 4];
    if self.uses_generic_attributes() {
      self.driver.get_vertex_attrib_f_v(
        VertexAttrib::Color.index(),
        gl::CURRENT_VERTEX_ATTRIB,
        &mut rgba,
      );
    } else {
      self.driver.get_float_v(gl::CURRENT_COLOR, &mut rgba);
    }
    self.color = Color::from_normalized(rgba);

    let mut rgba = [0.; 4];
    self.driver.get_float_v(gl::COLOR_CLEAR_VALUE, &mut rgba);
    self.clear_color = Color::from_normalized(rgba);

    let mut rect = [0; 4];
    self.driver.get_integer_v(gl::VIEWPORT, &mut rect);
    self.viewport = Viewport::from_array(rect);

    // the driver has a bottom-left origin
    let mut rect = [0; 4];
    self.driver.get_integer_v(gl::SCISSOR_BOX, &mut rect);
    self.scissor = Viewport::from_array(rect).flip_y(self.viewport.height);

    self.point_size = if self.caps.uses_fixed_function() {
      let mut size = [1.];
      self.driver.get_float_v(gl::POINT_SIZE, &mut size);
      size[0]
    } else {
      1.
    };
  }

  fn read_back_texture_units(&mut self) {
    if self.caps.supports_shaders() {
      let mut units = [1];
      self
        .driver
        .get_integer_v(gl::MAX_COMBINED_TEXTURE_IMAGE_UNITS, &mut units);
      let units = units[0].max(1) as usize;

      let mut active = [gl::TEXTURE0 as GLint];
      self.driver.get_integer_v(gl::ACTIVE_TEXTURE, &mut active);
      let active = active[0] as GLenum;

      self.texture_units = vec![0; units];
      self.current_texture_unit = (active.saturating_sub(gl::TEXTURE0) as usize).min(units - 1);

      for unit in 0..units {
        self.driver.active_texture(gl::TEXTURE0 + unit as GLenum);
        let texture = self.read_back_bound_texture();
        self.texture_units[unit] = texture;
      }

      self.driver.active_texture(active);
    } else {
      self.texture_units = vec![self.read_back_bound_texture()];
      self.current_texture_unit = 0;
    }
  }

  fn read_back_bound_texture(&mut self) -> GLuint {
    let mut texture = [0];
    self
      .driver
      .get_integer_v(gl::TEXTURE_BINDING_2D, &mut texture);
    texture[0] as GLuint
  }

  // a repeating white pixel, so that sampling in shaders works for untextured primitives too
  fn create_default_texture(&mut self) {
    let previous = self.texture_units[self.current_texture_unit];

    self.default_texture = self.driver.gen_texture();
    self.bind_texture(self.default_texture);

    let target = gl::TEXTURE_2D;
    self
      .driver
      .tex_parameter_i(target, gl::TEXTURE_MIN_FILTER, gl::NEAREST as GLint);
    self
      .driver
      .tex_parameter_i(target, gl::TEXTURE_MAG_FILTER, gl::NEAREST as GLint);
    self
      .driver
      .tex_parameter_i(target, gl::TEXTURE_WRAP_S, gl::REPEAT as GLint);
    self
      .driver
      .tex_parameter_i(target, gl::TEXTURE_WRAP_T, gl::REPEAT as GLint);
    self.driver.tex_image_2d(
      target,
      0,
      gl::LUMINANCE as GLint,
      1,
      1,
      gl::LUMINANCE,
      gl::UNSIGNED_BYTE,
      &[255],
    );

    self.bind_texture(previous);
  }

  // ES 2 feeds everything through generic attributes
  fn uses_generic_attributes(&self) -> bool {
    self.caps.uses_builtin_uniforms()
  }

  /// Driver capabilities.
  pub fn capabilities(&self) -> &Capabilities {
    &self.caps
  }

  /// GPU vendor.
  pub fn vendor(&self) -> Vendor {
    self.caps.vendor()
  }

  /// Largest width or height of a texture.
  pub fn max_texture_size(&self) -> i32 {
    self.caps.max_texture_size()
  }

  /// Amount of color targets that can be rendered to at once.
  pub fn max_render_targets(&self) -> i32 {
    self.caps.max_render_targets()
  }

  /// Highest anisotropy a texture filter accepts.
  pub fn max_anisotropy(&self) -> f32 {
    self.caps.max_anisotropy()
  }

  /// Profiling counters.
  pub fn stats(&self) -> Stats {
    self.stats
  }

  /// Zero the draw call counter.
  pub fn reset_draw_calls(&mut self) {
    self.stats.draw_calls = 0;
  }

  /// Account for a texture whose size changed from `old_size` to `new_size` bytes.
  ///
  /// Pass `0` as `old_size` for a new texture and `0` as `new_size` for a released one. The
  /// estimate never goes below zero.
  pub fn update_texture_memory_size(&mut self, old_size: usize, new_size: usize) {
    let memory = self.stats.texture_memory;
    self.stats.texture_memory = if new_size >= old_size {
      memory.saturating_add(new_size - old_size)
    } else {
      memory.saturating_sub(old_size - new_size)
    };
  }

  /// The driver.
  pub fn driver(&self) -> &D {
    &self.driver
  }

  /// The driver, mutably.
  ///
  /// Calls made directly on the driver bypass the cache; the state will keep believing whatever
  /// it last set.
  pub fn driver_mut(&mut self) -> &mut D {
    &mut self.driver
  }

  /// Framebuffer the window system renders to.
  pub fn default_framebuffer(&self) -> GLuint {
    self.default_framebuffer
  }

  /// The 1×1 white texture bound when drawing untextured primitives.
  pub fn default_texture(&self) -> GLuint {
    self.default_texture
  }

  /// Push a copy of the current transform.
  pub fn push_transform(&mut self) {
    self.matrices.transform.push();
  }

  /// Restore the previously pushed transform and return the current one.
  ///
  /// Returns `None`, leaving the stack untouched, if nothing was pushed.
  pub fn pop_transform(&mut self) -> Option<Matrix4> {
    let popped = self.matrices.transform.pop();

    if popped.is_none() {
      warn!("unbalanced transform pop");
    }

    popped
  }

  /// Current transform.
  pub fn transform(&self) -> &Matrix4 {
    self.matrices.transform.top()
  }

  /// Current transform, mutably.
  pub fn transform_mut(&mut self) -> &mut Matrix4 {
    self.matrices.transform.top_mut()
  }

  /// Push a copy of the current projection.
  pub fn push_projection(&mut self) {
    self.matrices.projection.push();
  }

  /// Restore the previously pushed projection and return the current one.
  ///
  /// Returns `None`, leaving the stack untouched, if nothing was pushed.
  pub fn pop_projection(&mut self) -> Option<Matrix4> {
    let popped = self.matrices.projection.pop();

    if popped.is_none() {
      warn!("unbalanced projection pop");
    }

    popped
  }

  /// Current projection.
  pub fn projection(&self) -> &Matrix4 {
    self.matrices.projection.top()
  }

  /// Current projection, mutably.
  pub fn projection_mut(&mut self) -> &mut Matrix4 {
    self.matrices.projection.top_mut()
  }

  /// Get everything ready for the next draw call.
  ///
  /// `shader` is the shader the draw will run with, if any. Its engine-provided uniforms get
  /// refreshed and the multisampled targets it samples from resolved. On the fixed-function
  /// pipeline, the current matrices are uploaded if they changed since the last draw.
  pub fn prepare_draw(&mut self, shader: Option<&mut dyn Shader>) {
    let transform = *self.matrices.transform.top();
    let projection = *self.matrices.projection.top();

    if let Some(shader) = shader {
      shader.check_screen_params();

      if self.caps.supports_multisample_resolve() {
        shader.visit_bound_resources(&mut |resource: &mut dyn SampledResource| {
          if resource.needs_multisample_resolve() {
            resource.resolve_multisample();
          }
        });
      }

      if self.caps.uses_builtin_uniforms() {
        shader.send_builtin_matrix(BuiltinUniform::TransformMatrix, &transform);
        shader.send_builtin_matrix(BuiltinUniform::ProjectionMatrix, &projection);
        shader.send_builtin_matrix(
          BuiltinUniform::TransformProjectionMatrix,
          &(projection * transform),
        );
        shader.send_builtin_float(BuiltinUniform::PointSize, self.point_size);
      }
    }

    if self.caps.uses_fixed_function() {
      let projection_bits = projection.to_bits();
      if self.last_projection.is_invalid(&projection_bits) {
        self.driver.matrix_mode(gl::PROJECTION);
        self.driver.load_matrix_f(projection.elements());
        self.driver.matrix_mode(gl::MODELVIEW);
        self.last_projection.set(projection_bits);
      }

      let transform_bits = transform.to_bits();
      if self.last_transform.is_invalid(&transform_bits) {
        self.driver.load_matrix_f(transform.elements());
        self.last_transform.set(transform_bits);
      }
    }
  }

  /// Draw `count` vertices starting at `first`.
  ///
  /// # Safety
  ///
  /// Every enabled attribute array must hold at least `first + count` vertices.
  pub unsafe fn draw_arrays(&mut self, mode: GLenum, first: GLint, count: GLsizei) {
    self.driver.draw_arrays(mode, first, count);
    self.stats.draw_calls += 1;
  }

  /// Draw `count` indexed vertices.
  ///
  /// # Safety
  ///
  /// `indices` is either an offset into the bound element buffer or client memory holding `count`
  /// indices of type `ty`, each of them valid for every enabled attribute array.
  pub unsafe fn draw_elements(
    &mut self,
    mode: GLenum,
    count: GLsizei,
    ty: GLenum,
    indices: *const c_void,
  ) {
    self.driver.draw_elements(mode, count, ty, indices);
    self.stats.draw_calls += 1;
  }

  /// Draw `count` indexed vertices, adding `base_vertex` to every index.
  ///
  /// # Safety
  ///
  /// Same contract as [`GLState::draw_elements`], on the offset indices.
  pub unsafe fn draw_elements_base_vertex(
    &mut self,
    mode: GLenum,
    count: GLsizei,
    ty: GLenum,
    indices: *const c_void,
    base_vertex: GLint,
  ) {
    self
      .driver
      .draw_elements_base_vertex(mode, count, ty, indices, base_vertex);
    self.stats.draw_calls += 1;
  }

  /// Enable the array backing a built-in vertex attribute.
  pub fn enable_vertex_attrib_array(&mut self, attrib: VertexAttrib) {
    if self.uses_generic_attributes() {
      self.driver.enable_vertex_attrib_array(attrib.index());
    } else {
      self.driver.enable_client_state(attrib.client_array());
    }
  }

  /// Disable the array backing a built-in vertex attribute.
  pub fn disable_vertex_attrib_array(&mut self, attrib: VertexAttrib) {
    if self.uses_generic_attributes() {
      self.driver.disable_vertex_attrib_array(attrib.index());
    } else {
      self.driver.disable_client_state(attrib.client_array());
    }
  }

  /// Point a built-in vertex attribute at its data.
  ///
  /// Unsigned byte data is normalized to *[0; 1]*.
  ///
  /// # Safety
  ///
  /// `pointer` is either an offset into the bound array buffer or client memory that must outlive
  /// every draw call reading from it.
  pub unsafe fn set_vertex_attrib_array(
    &mut self,
    attrib: VertexAttrib,
    size: GLint,
    ty: GLenum,
    stride: GLsizei,
    pointer: *const c_void,
  ) {
    if self.uses_generic_attributes() {
      let normalized = ty == gl::UNSIGNED_BYTE;
      self
        .driver
        .vertex_attrib_pointer(attrib.index(), size, ty, normalized, stride, pointer);
    } else {
      match attrib {
        VertexAttrib::Position => self.driver.vertex_pointer(size, ty, stride, pointer),
        VertexAttrib::TexCoord => self.driver.tex_coord_pointer(size, ty, stride, pointer),
        VertexAttrib::Color => self.driver.color_pointer(size, ty, stride, pointer),
      }
    }
  }

  /// Set the constant color of vertices without a color attribute.
  pub fn set_color(&mut self, color: Color) {
    if self.uses_generic_attributes() {
      let [r, g, b, a] = color.to_normalized();
      self
        .driver
        .vertex_attrib_4f(VertexAttrib::Color.index(), r, g, b, a);
    } else {
      self.driver.color_4ub(color.r, color.g, color.b, color.a);
    }

    self.color = color;
  }

  /// Current constant vertex color.
  pub fn color(&self) -> Color {
    self.color
  }

  /// Set the color framebuffers are cleared with.
  pub fn set_clear_color(&mut self, color: Color) {
    let [r, g, b, a] = color.to_normalized();
    self.driver.clear_color(r, g, b, a);
    self.clear_color = color;
  }

  /// Current clear color.
  pub fn clear_color(&self) -> Color {
    self.clear_color
  }

  /// Set the viewport.
  ///
  /// The scissor is re-applied, since its driver-side position depends on the viewport height.
  pub fn set_viewport(&mut self, viewport: Viewport) {
    self
      .driver
      .viewport(viewport.x, viewport.y, viewport.width, viewport.height);
    self.viewport = viewport;

    self.apply_scissor();
  }

  /// Current viewport.
  pub fn viewport(&self) -> Viewport {
    self.viewport
  }

  /// Set the scissor rectangle, with a top-left origin.
  pub fn set_scissor(&mut self, scissor: Viewport) {
    self.scissor = scissor;
    self.apply_scissor();
  }

  /// Current scissor rectangle, with a top-left origin.
  pub fn scissor(&self) -> Viewport {
    self.scissor
  }

  /// Tell whether an off-screen target is being rendered to.
  ///
  /// Off-screen targets share the engine’s top-left origin, unlike the window system framebuffer.
  /// The scissor is re-applied when this changes.
  pub fn set_offscreen_target_active(&mut self, active: bool) {
    if self.offscreen_target_active != active {
      self.offscreen_target_active = active;
      self.apply_scissor();
    }
  }

  /// Whether an off-screen target is being rendered to.
  pub fn is_offscreen_target_active(&self) -> bool {
    self.offscreen_target_active
  }

  fn apply_scissor(&mut self) {
    let s = if self.offscreen_target_active {
      self.scissor
    } else {
      self.scissor.flip_y(self.viewport.height)
    };

    self.driver.scissor(s.x, s.y, s.width, s.height);
  }

  /// Set the blend equation and factors.
  ///
  /// Fails, without changing anything, if the driver has no way to honor `blend_state`.
  pub fn set_blend_state(&mut self, blend_state: BlendState) -> Result<(), StateError> {
    let equation = self.caps.blend_equation();
    if equation == Support::Unsupported && blend_state.equation != Equation::Additive {
      // additive is what drivers without glBlendEquation do anyway
      return Err(warned(StateError::UnsupportedBlendEquation(
        blend_state.equation,
      )));
    }

    let func_separate = self.caps.blend_func_separate();
    if blend_state.is_separate() && func_separate == Support::Unsupported {
      return Err(warned(StateError::UnsupportedSeparateBlendFactors));
    }

    let mode = from_blending_equation(blend_state.equation);
    match equation {
      Support::Core => self.driver.blend_equation(mode),
      Support::Extension => self.driver.blend_equation_ext(mode),
      Support::Unsupported => (),
    }

    let src_rgb = from_blending_factor(blend_state.src_rgb);
    let dst_rgb = from_blending_factor(blend_state.dst_rgb);

    if !blend_state.is_separate() {
      self.driver.blend_func(src_rgb, dst_rgb);
    } else {
      let src_alpha = from_blending_factor(blend_state.src_alpha);
      let dst_alpha = from_blending_factor(blend_state.dst_alpha);

      match func_separate {
        Support::Core => self
          .driver
          .blend_func_separate(src_rgb, dst_rgb, src_alpha, dst_alpha),
        Support::Extension => self
          .driver
          .blend_func_separate_ext(src_rgb, dst_rgb, src_alpha, dst_alpha),
        Support::Unsupported => (),
      }
    }

    self.blend_state = blend_state;
    Ok(())
  }

  /// Current blend state.
  pub fn blend_state(&self) -> BlendState {
    self.blend_state
  }

  /// Set the size of rasterized points.
  ///
  /// Shader pipelines receive it as a built-in uniform in [`GLState::prepare_draw`].
  pub fn set_point_size(&mut self, size: f32) {
    if self.caps.uses_fixed_function() {
      self.driver.point_size(size);
    }

    self.point_size = size;
  }

  /// Current point size.
  pub fn point_size(&self) -> f32 {
    self.point_size
  }

  /// Number of texture units.
  pub fn texture_unit_count(&self) -> usize {
    self.texture_units.len()
  }

  /// Active texture unit.
  pub fn texture_unit(&self) -> usize {
    self.current_texture_unit
  }

  /// Texture bound to `unit`, or `None` if there’s no such unit.
  pub fn bound_texture(&self, unit: usize) -> Option<GLuint> {
    self.texture_units.get(unit).copied()
  }

  /// Make `unit` the active texture unit.
  pub fn set_texture_unit(&mut self, unit: usize) -> Result<(), StateError> {
    self.check_texture_unit(unit)?;

    if unit != self.current_texture_unit {
      if self.texture_units.len() > 1 {
        self.driver.active_texture(gl::TEXTURE0 + unit as GLenum);
      } else {
        return Err(warned(StateError::MultitexturingUnsupported));
      }
    }

    self.current_texture_unit = unit;
    Ok(())
  }

  /// Bind `texture` to the active texture unit.
  pub fn bind_texture(&mut self, texture: GLuint) {
    let unit = self.current_texture_unit;

    if self.texture_units[unit] != texture {
      self.texture_units[unit] = texture;
      self.driver.bind_texture(gl::TEXTURE_2D, texture);
    }
  }

  /// Bind `texture` to `unit`.
  ///
  /// If the texture wasn’t already bound there, `unit` becomes the active unit, unless
  /// `restore_previous` is set, in which case the previously active unit is restored.
  pub fn bind_texture_to_unit(
    &mut self,
    texture: GLuint,
    unit: usize,
    restore_previous: bool,
  ) -> Result<(), StateError> {
    self.check_texture_unit(unit)?;

    if self.texture_units[unit] != texture {
      let previous = self.current_texture_unit;
      self.set_texture_unit(unit)?;

      self.texture_units[unit] = texture;
      self.driver.bind_texture(gl::TEXTURE_2D, texture);

      if restore_previous {
        self.set_texture_unit(previous)?;
      }
    }

    Ok(())
  }

  /// Delete `texture`.
  ///
  /// The driver unbinds a deleted texture from every unit; so does the cache.
  pub fn delete_texture(&mut self, texture: GLuint) {
    for bound in &mut self.texture_units {
      if *bound == texture {
        *bound = 0;
      }
    }

    self.driver.delete_texture(texture);
  }

  /// Set the filtering of the texture bound to the active unit.
  ///
  /// Returns the anisotropy actually applied, clamped to what the driver accepts.
  pub fn set_texture_filter(&mut self, filter: &Filter) -> f32 {
    let min = min_filter_to_glenum(filter.min, filter.mipmap);
    let mag = mag_filter_to_glenum(filter.mag);

    self
      .driver
      .tex_parameter_i(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, min as GLint);
    self
      .driver
      .tex_parameter_i(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, mag as GLint);

    let anisotropy = clamp_anisotropy(filter.anisotropy, self.caps.max_anisotropy());
    if self.caps.supports_anisotropic_filtering() {
      self.driver.tex_parameter_f(
        gl::TEXTURE_2D,
        gl::TEXTURE_MAX_ANISOTROPY_EXT,
        anisotropy,
      );
    }

    anisotropy
  }

  /// Set the wrapping of the texture bound to the active unit.
  pub fn set_texture_wrap(&mut self, wrap: Wrap) {
    self.driver.tex_parameter_i(
      gl::TEXTURE_2D,
      gl::TEXTURE_WRAP_S,
      wrap_to_glenum(wrap.s) as GLint,
    );
    self.driver.tex_parameter_i(
      gl::TEXTURE_2D,
      gl::TEXTURE_WRAP_T,
      wrap_to_glenum(wrap.t) as GLint,
    );
  }

  fn check_texture_unit(&self, unit: usize) -> Result<(), StateError> {
    let units = self.texture_units.len();

    if unit < units {
      Ok(())
    } else {
      Err(warned(StateError::InvalidTextureUnit { unit, units }))
    }
  }
}

fn warned(e: StateError) -> StateError {
  warn!("{}", e);
  e
}

/// An error that might happen when changing the state.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StateError {
  /// The driver can only blend additively.
  UnsupportedBlendEquation(Equation),
  /// The driver can’t blend RGB and alpha channels with different factors.
  UnsupportedSeparateBlendFactors,
  /// No such texture unit.
  InvalidTextureUnit {
    /// Requested unit.
    unit: usize,
    /// Number of units available.
    units: usize,
  },
  /// The driver has a single texture unit.
  MultitexturingUnsupported,
}

impl fmt::Display for StateError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StateError::UnsupportedBlendEquation(ref e) => {
        write!(f, "unsupported blend equation: {:?}", e)
      }
      StateError::UnsupportedSeparateBlendFactors => {
        f.write_str("separate RGB and alpha blend factors are unsupported")
      }
      StateError::InvalidTextureUnit { unit, units } => write!(
        f,
        "invalid texture unit {} (only {} available)",
        unit, units
      ),
      StateError::MultitexturingUnsupported => f.write_str("multitexturing is unsupported"),
    }
  }
}

impl error::Error for StateError {}

/// An error that might happen when initializing a context.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InitError {
  /// The driver entry points couldn’t be resolved.
  Load(LoadError),
  /// The initial state couldn’t be applied.
  State(StateError),
}

impl fmt::Display for InitError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      InitError::Load(ref e) => write!(f, "cannot load driver: {}", e),
      InitError::State(ref e) => write!(f, "cannot set initial state: {}", e),
    }
  }
}

impl error::Error for InitError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      InitError::Load(e) => Some(e),
      InitError::State(e) => Some(e),
    }
  }
}

impl From<LoadError> for InitError {
  fn from(e: LoadError) -> Self {
    InitError::Load(e)
  }
}

impl From<StateError> for InitError {
  fn from(e: StateError) -> Self {
    InitError::State(e)
  }
}
