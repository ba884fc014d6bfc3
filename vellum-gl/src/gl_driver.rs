//! OpenGL driver.
//!
//! [`GlDriver`] owns an OpenGL function table and forwards every [`Driver`] call to it. The table
//! is resolved by a user-provided loader, typically the windowing library’s `get_proc_address`.

use std::ffi::CStr;
use std::fmt;
use std::os::raw::{c_char, c_void};
use std::ptr;

use crate::driver::{Driver, LoadError};
use crate::gl::types::{GLenum, GLfloat, GLint, GLsizei, GLuint};
use crate::gl::{self, Gl};

// Largest amount of values a single glGet* query can write.
const MAX_QUERY_VALUES: usize = 16;

/// OpenGL implementation of [`Driver`].
pub struct GlDriver {
  loader: Box<dyn FnMut(&str) -> *const c_void>,
  gl: Gl,
}

impl GlDriver {
  /// Create a driver that will resolve its entry points with `loader`.
  ///
  /// Nothing is resolved until [`Driver::load`] runs; calling any other method before that panics.
  ///
  /// # Safety
  ///
  /// The context `loader` resolves symbols for must be current on the calling thread whenever a
  /// method of the driver is called, and the symbols it returns must be the entry points they are
  /// named after.
  pub unsafe fn new<F>(loader: F) -> Self
  where
    F: 'static + FnMut(&str) -> *const c_void,
  {
    GlDriver {
      loader: Box::new(loader),
      gl: Gl::load_with(|_| ptr::null()),
    }
  }

  /// The underlying function table.
  ///
  /// Calls made through it bypass any state cache built on top of this driver.
  pub fn gl(&self) -> &Gl {
    &self.gl
  }
}

impl fmt::Debug for GlDriver {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("GlDriver")
      .field("loaded", &self.gl.GetString.is_loaded())
      .finish()
  }
}

impl Driver for GlDriver {
  fn load(&mut self) -> Result<(), LoadError> {
    let loader = &mut self.loader;
    let table = Gl::load_with(|symbol| loader(symbol));

    // entry points present in every desktop GL and GLES 2 driver
    let required = [
      ("glGetString", table.GetString.is_loaded()),
      ("glGetIntegerv", table.GetIntegerv.is_loaded()),
      ("glGetFloatv", table.GetFloatv.is_loaded()),
      ("glViewport", table.Viewport.is_loaded()),
      ("glScissor", table.Scissor.is_loaded()),
      ("glClearColor", table.ClearColor.is_loaded()),
      ("glGenTextures", table.GenTextures.is_loaded()),
      ("glBindTexture", table.BindTexture.is_loaded()),
      ("glDeleteTextures", table.DeleteTextures.is_loaded()),
      ("glTexParameteri", table.TexParameteri.is_loaded()),
      ("glTexImage2D", table.TexImage2D.is_loaded()),
      ("glBlendFunc", table.BlendFunc.is_loaded()),
      ("glDrawArrays", table.DrawArrays.is_loaded()),
      ("glDrawElements", table.DrawElements.is_loaded()),
    ];

    if let Some(&(name, _)) = required.iter().find(|(_, loaded)| !loaded) {
      return Err(LoadError::MissingEntryPoint(name));
    }

    self.gl = table;
    Ok(())
  }

  fn alias_arb_buffer_objects(&mut self) {
    let gl = &mut self.gl;

    gl.BindBuffer = gl.BindBufferARB.clone();
    gl.BufferData = gl.BufferDataARB.clone();
    gl.BufferSubData = gl.BufferSubDataARB.clone();
    gl.DeleteBuffers = gl.DeleteBuffersARB.clone();
    gl.GenBuffers = gl.GenBuffersARB.clone();
    gl.GetBufferParameteriv = gl.GetBufferParameterivARB.clone();
    gl.GetBufferPointerv = gl.GetBufferPointervARB.clone();
    gl.GetBufferSubData = gl.GetBufferSubDataARB.clone();
    gl.IsBuffer = gl.IsBufferARB.clone();
    gl.MapBuffer = gl.MapBufferARB.clone();
    gl.UnmapBuffer = gl.UnmapBufferARB.clone();
  }

  fn get_string(&mut self, name: GLenum) -> Option<String> {
    unsafe {
      let s = self.gl.GetString(name);

      if s.is_null() {
        None
      } else {
        Some(
          CStr::from_ptr(s as *const c_char)
            .to_string_lossy()
            .into_owned(),
        )
      }
    }
  }

  fn get_string_i(&mut self, name: GLenum, index: GLuint) -> Option<String> {
    if !self.gl.GetStringi.is_loaded() {
      return None;
    }

    unsafe {
      let s = self.gl.GetStringi(name, index);

      if s.is_null() {
        None
      } else {
        Some(
          CStr::from_ptr(s as *const c_char)
            .to_string_lossy()
            .into_owned(),
        )
      }
    }
  }

  fn get_integer_v(&mut self, pname: GLenum, params: &mut [GLint]) {
    let mut values = [0; MAX_QUERY_VALUES];
    unsafe { self.gl.GetIntegerv(pname, values.as_mut_ptr()) };
    params.copy_from_slice(&values[..params.len()]);
  }

  fn get_float_v(&mut self, pname: GLenum, params: &mut [GLfloat]) {
    let mut values = [0.; MAX_QUERY_VALUES];
    unsafe { self.gl.GetFloatv(pname, values.as_mut_ptr()) };
    params.copy_from_slice(&values[..params.len()]);
  }

  fn get_vertex_attrib_f_v(&mut self, index: GLuint, pname: GLenum, params: &mut [GLfloat; 4]) {
    let mut values = [0.; MAX_QUERY_VALUES];
    unsafe { self.gl.GetVertexAttribfv(index, pname, values.as_mut_ptr()) };
    params.copy_from_slice(&values[..4]);
  }

  fn active_texture(&mut self, texture: GLenum) {
    unsafe { self.gl.ActiveTexture(texture) }
  }

  fn gen_texture(&mut self) -> GLuint {
    let mut texture = 0;
    unsafe { self.gl.GenTextures(1, &mut texture) };
    texture
  }

  fn bind_texture(&mut self, target: GLenum, texture: GLuint) {
    unsafe { self.gl.BindTexture(target, texture) }
  }

  fn delete_texture(&mut self, texture: GLuint) {
    unsafe { self.gl.DeleteTextures(1, &texture) }
  }

  fn tex_parameter_i(&mut self, target: GLenum, pname: GLenum, param: GLint) {
    unsafe { self.gl.TexParameteri(target, pname, param) }
  }

  fn tex_parameter_f(&mut self, target: GLenum, pname: GLenum, param: GLfloat) {
    unsafe { self.gl.TexParameterf(target, pname, param) }
  }

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
  ) {
    // the driver reads rows padded to the unpack alignment, so a short slice would be over-read
    let mut alignment = 4;
    unsafe { self.gl.GetIntegerv(gl::UNPACK_ALIGNMENT, &mut alignment) };

    assert!(
      pixels.len() >= upload_size(width, height, format, ty, alignment),
      "texel data too short for a {}×{} upload",
      width,
      height
    );

    unsafe {
      self.gl.TexImage2D(
        target,
        level,
        internal_format,
        width,
        height,
        0,
        format,
        ty,
        pixels.as_ptr() as *const c_void,
      );
    }
  }

  fn vertex_attrib_4f(&mut self, index: GLuint, x: GLfloat, y: GLfloat, z: GLfloat, w: GLfloat) {
    unsafe { self.gl.VertexAttrib4f(index, x, y, z, w) }
  }

  fn color_4ub(&mut self, r: u8, g: u8, b: u8, a: u8) {
    unsafe { self.gl.Color4ub(r, g, b, a) }
  }

  fn clear_color(&mut self, r: GLfloat, g: GLfloat, b: GLfloat, a: GLfloat) {
    unsafe { self.gl.ClearColor(r, g, b, a) }
  }

  fn viewport(&mut self, x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
    unsafe { self.gl.Viewport(x, y, width, height) }
  }

  fn scissor(&mut self, x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
    unsafe { self.gl.Scissor(x, y, width, height) }
  }

  fn blend_equation(&mut self, mode: GLenum) {
    unsafe { self.gl.BlendEquation(mode) }
  }

  fn blend_equation_ext(&mut self, mode: GLenum) {
    unsafe { self.gl.BlendEquationEXT(mode) }
  }

  fn blend_func(&mut self, src: GLenum, dst: GLenum) {
    unsafe { self.gl.BlendFunc(src, dst) }
  }

  fn blend_func_separate(
    &mut self,
    src_rgb: GLenum,
    dst_rgb: GLenum,
    src_alpha: GLenum,
    dst_alpha: GLenum,
  ) {
    unsafe { self.gl.BlendFuncSeparate(src_rgb, dst_rgb, src_alpha, dst_alpha) }
  }

  fn blend_func_separate_ext(
    &mut self,
    src_rgb: GLenum,
    dst_rgb: GLenum,
    src_alpha: GLenum,
    dst_alpha: GLenum,
  ) {
    unsafe {
      self
        .gl
        .BlendFuncSeparateEXT(src_rgb, dst_rgb, src_alpha, dst_alpha)
    }
  }

  fn point_size(&mut self, size: GLfloat) {
    unsafe { self.gl.PointSize(size) }
  }

  fn matrix_mode(&mut self, mode: GLenum) {
    unsafe { self.gl.MatrixMode(mode) }
  }

  fn load_matrix_f(&mut self, m: &[GLfloat; 16]) {
    unsafe { self.gl.LoadMatrixf(m.as_ptr()) }
  }

  fn enable_vertex_attrib_array(&mut self, index: GLuint) {
    unsafe { self.gl.EnableVertexAttribArray(index) }
  }

  fn disable_vertex_attrib_array(&mut self, index: GLuint) {
    unsafe { self.gl.DisableVertexAttribArray(index) }
  }

  fn enable_client_state(&mut self, array: GLenum) {
    unsafe { self.gl.EnableClientState(array) }
  }

  fn disable_client_state(&mut self, array: GLenum) {
    unsafe { self.gl.DisableClientState(array) }
  }

  unsafe fn vertex_attrib_pointer(
    &mut self,
    index: GLuint,
    size: GLint,
    ty: GLenum,
    normalized: bool,
    stride: GLsizei,
    pointer: *const c_void,
  ) {
    let normalized = if normalized { gl::TRUE } else { gl::FALSE };
    self
      .gl
      .VertexAttribPointer(index, size, ty, normalized, stride, pointer)
  }

  unsafe fn vertex_pointer(&mut self, size: GLint, ty: GLenum, stride: GLsizei, pointer: *const c_void) {
    self.gl.VertexPointer(size, ty, stride, pointer)
  }

  unsafe fn tex_coord_pointer(
    &mut self,
    size: GLint,
    ty: GLenum,
    stride: GLsizei,
    pointer: *const c_void,
  ) {
    self.gl.TexCoordPointer(size, ty, stride, pointer)
  }

  unsafe fn color_pointer(&mut self, size: GLint, ty: GLenum, stride: GLsizei, pointer: *const c_void) {
    self.gl.ColorPointer(size, ty, stride, pointer)
  }

  unsafe fn draw_arrays(&mut self, mode: GLenum, first: GLint, count: GLsizei) {
    self.gl.DrawArrays(mode, first, count)
  }

  unsafe fn draw_elements(&mut self, mode: GLenum, count: GLsizei, ty: GLenum, indices: *const c_void) {
    self.gl.DrawElements(mode, count, ty, indices)
  }

  unsafe fn draw_elements_base_vertex(
    &mut self,
    mode: GLenum,
    count: GLsizei,
    ty: GLenum,
    indices: *const c_void,
    base_vertex: GLint,
  ) {
    self
      .gl
      .DrawElementsBaseVertex(mode, count, ty, indices, base_vertex)
  }
}

// Bytes read by glTexImage2D; every row but the last is padded to `alignment`.
fn upload_size(width: GLsizei, height: GLsizei, format: GLenum, ty: GLenum, alignment: GLint) -> usize {
  let components = match format {
    gl::RED | gl::ALPHA | gl::LUMINANCE => 1,
    gl::RG | gl::LUMINANCE_ALPHA => 2,
    gl::RGB => 3,
    _ => 4,
  };

  let component_size = match ty {
    gl::UNSIGNED_BYTE | gl::BYTE => 1,
    gl::UNSIGNED_SHORT | gl::SHORT | gl::HALF_FLOAT => 2,
    _ => 4,
  };

  let (width, height) = (width.max(0) as usize, height.max(0) as usize);
  let alignment = alignment.max(1) as usize;

  if height == 0 {
    return 0;
  }

  let row = width * components * component_size;
  let padded_row = (row + alignment - 1) / alignment * alignment;

  padded_row * (height - 1) + row
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unresolvable_table_fails_to_load() {
    let mut driver = unsafe { GlDriver::new(|_| ptr::null()) };

    assert_eq!(
      driver.load(),
      Err(LoadError::MissingEntryPoint("glGetString"))
    );
  }

  #[test]
  fn upload_sizes() {
    assert_eq!(upload_size(1, 1, gl::LUMINANCE, gl::UNSIGNED_BYTE, 4), 1);
    assert_eq!(upload_size(4, 2, gl::RGBA, gl::UNSIGNED_BYTE, 4), 32);
    assert_eq!(upload_size(3, 3, gl::RGB, gl::FLOAT, 4), 108);
    // 3-byte rows padded to 4 bytes, except the last one
    assert_eq!(upload_size(1, 3, gl::RGB, gl::UNSIGNED_BYTE, 4), 11);
    assert_eq!(upload_size(1, 3, gl::RGB, gl::UNSIGNED_BYTE, 1), 9);
  }
}
