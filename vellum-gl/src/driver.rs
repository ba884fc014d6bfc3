//! The driver seam.
//!
//! [`Driver`] is the narrow set of native calls the state cache issues. The production
//! implementation is [`GlDriver`](crate::gl_driver::GlDriver), which forwards to a loaded OpenGL
//! function table. A tracing wrapper or a headless recorder implementing the trait can sit behind
//! a [`GLState`](crate::state::GLState) just the same.
//!
//! Methods are named after the OpenGL entry points they stand for and take the same arguments,
//! with slices in place of out-pointers. Methods taking raw data pointers are `unsafe`: the driver
//! dereferences them when the next draw call happens, which the type system cannot follow.

use std::error;
use std::fmt;
use std::os::raw::c_void;

use crate::gl::types::{GLenum, GLfloat, GLint, GLsizei, GLuint};

#[cfg(test)]
pub(crate) mod mock;

/// Native graphics driver calls needed by the state cache.
pub trait Driver {
  /// Resolve the driver entry points.
  ///
  /// Called once by [`GLState::init_context`](crate::state::GLState::init_context), before any
  /// other method.
  fn load(&mut self) -> Result<(), LoadError>;

  /// Route the core buffer-object entry points to their `GL_ARB_vertex_buffer_object`
  /// equivalents.
  ///
  /// Used on drivers exposing buffer objects only through the extension, so that the rest of the
  /// engine can call the core names unconditionally.
  fn alias_arb_buffer_objects(&mut self);

  /// `glGetString`.
  fn get_string(&mut self, name: GLenum) -> Option<String>;

  /// `glGetStringi`.
  fn get_string_i(&mut self, name: GLenum, index: GLuint) -> Option<String>;

  /// `glGetIntegerv`.
  fn get_integer_v(&mut self, pname: GLenum, params: &mut [GLint]);

  /// `glGetFloatv`.
  fn get_float_v(&mut self, pname: GLenum, params: &mut [GLfloat]);

  /// `glGetVertexAttribfv`.
  fn get_vertex_attrib_f_v(&mut self, index: GLuint, pname: GLenum, params: &mut [GLfloat; 4]);

  /// `glActiveTexture`.
  fn active_texture(&mut self, texture: GLenum);

  /// `glGenTextures` for a single texture.
  fn gen_texture(&mut self) -> GLuint;

  /// `glBindTexture`.
  fn bind_texture(&mut self, target: GLenum, texture: GLuint);

  /// `glDeleteTextures` for a single texture.
  fn delete_texture(&mut self, texture: GLuint);

  /// `glTexParameteri`.
  fn tex_parameter_i(&mut self, target: GLenum, pname: GLenum, param: GLint);

  /// `glTexParameterf`.
  fn tex_parameter_f(&mut self, target: GLenum, pname: GLenum, param: GLfloat);

  /// `glTexImage2D`.
  ///
  /// `pixels` must cover the whole upload at the current unpack alignment; implementations may
  /// panic otherwise.
  #[allow(clippy::too_many_arguments)]
  fn tex_image_2d(
    &mut self,
    target: GLenum,
    level: GLint,
    internal_format: GLint,
    width: GLsizei,
    height: GLsizei,
    format: GLenum,
    ty: GLenum,
    pixels: &[u8],
  );

  /// `glVertexAttrib4f`.
  fn vertex_attrib_4f(&mut self, index: GLuint, x: GLfloat, y: GLfloat, z: GLfloat, w: GLfloat);

  /// `glColor4ub`.
  fn color_4ub(&mut self, r: u8, g: u8, b: u8, a: u8);

  /// `glClearColor`.
  fn clear_color(&mut self, r: GLfloat, g: GLfloat, b: GLfloat, a: GLfloat);

  /// `glViewport`.
  fn viewport(&mut self, x: GLint, y: GLint, width: GLsizei, height: GLsizei);

  /// `glScissor`.
  fn scissor(&mut self, x: GLint, y: GLint, width: GLsizei, height: GLsizei);

  /// `glBlendEquation`.
  fn blend_equation(&mut self, mode: GLenum);

  /// `glBlendEquationEXT`.
  fn blend_equation_ext(&mut self, mode: GLenum);

  /// `glBlendFunc`.
  fn blend_func(&mut self, src: GLenum, dst: GLenum);

  /// `glBlendFuncSeparate`.
  fn blend_func_separate(
    &mut self,
    src_rgb: GLenum,
    dst_rgb: GLenum,
    src_alpha: GLenum,
    dst_alpha: GLenum,
  );

  /// `glBlendFuncSeparateEXT`.
  fn blend_func_separate_ext(
    &mut self,
    src_rgb: GLenum,
    dst_rgb: GLenum,
    src_alpha: GLenum,
    dst_alpha: GLenum,
  );

  /// `glPointSize`.
  fn point_size(&mut self, size: GLfloat);

  /// `glMatrixMode`.
  fn matrix_mode(&mut self, mode: GLenum);

  /// `glLoadMatrixf`.
  fn load_matrix_f(&mut self, m: &[GLfloat; 16]);

  /// `glEnableVertexAttribArray`.
  fn enable_vertex_attrib_array(&mut self, index: GLuint);

  /// `glDisableVertexAttribArray`.
  fn disable_vertex_attrib_array(&mut self, index: GLuint);

  /// `glEnableClientState`.
  fn enable_client_state(&mut self, array: GLenum);

  /// `glDisableClientState`.
  fn disable_client_state(&mut self, array: GLenum);

  /// `glVertexAttribPointer`.
  ///
  /// # Safety
  ///
  /// `pointer` is either an offset into the bound array buffer or client memory that must outlive
  /// every draw call reading from it.
  unsafe fn vertex_attrib_pointer(
    &mut self,
    index: GLuint,
    size: GLint,
    ty: GLenum,
    normalized: bool,
    stride: GLsizei,
    pointer: *const c_void,
  );

  /// `glVertexPointer`.
  ///
  /// # Safety
  ///
  /// Same contract as [`Driver::vertex_attrib_pointer`].
  unsafe fn vertex_pointer(&mut self, size: GLint, ty: GLenum, stride: GLsizei, pointer: *const c_void);

  /// `glTexCoordPointer`.
  ///
  /// # Safety
  ///
  /// Same contract as [`Driver::vertex_attrib_pointer`].
  unsafe fn tex_coord_pointer(
    &mut self,
    size: GLint,
    ty: GLenum,
    stride: GLsizei,
    pointer: *const c_void,
  );

  /// `glColorPointer`.
  ///
  /// # Safety
  ///
  /// Same contract as [`Driver::vertex_attrib_pointer`].
  unsafe fn color_pointer(&mut self, size: GLint, ty: GLenum, stride: GLsizei, pointer: *const c_void);

  /// `glDrawArrays`.
  ///
  /// # Safety
  ///
  /// Every enabled attribute array must hold at least `first + count` vertices.
  unsafe fn draw_arrays(&mut self, mode: GLenum, first: GLint, count: GLsizei);

  /// `glDrawElements`.
  ///
  /// # Safety
  ///
  /// `indices` is either an offset into the bound element buffer or client memory holding `count`
  /// indices of type `ty`, each of them valid for every enabled attribute array.
  unsafe fn draw_elements(&mut self, mode: GLenum, count: GLsizei, ty: GLenum, indices: *const c_void);

  /// `glDrawElementsBaseVertex`.
  ///
  /// # Safety
  ///
  /// Same contract as [`Driver::draw_elements`], with `base_vertex` added to every index.
  unsafe fn draw_elements_base_vertex(
    &mut self,
    mode: GLenum,
    count: GLsizei,
    ty: GLenum,
    indices: *const c_void,
    base_vertex: GLint,
  );
}

/// Failure to resolve the driver entry points.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LoadError {
  /// The loader couldn’t find a symbol every supported driver provides.
  MissingEntryPoint(&'static str),
}

impl fmt::Display for LoadError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      LoadError::MissingEntryPoint(name) => write!(f, "missing driver entry point: {}", name),
    }
  }
}

impl error::Error for LoadError {}
