//! Recording driver used by the unit tests.
//!
//! The mock answers queries from tables scripted by the test and records every state-changing call,
//! so tests can assert on exactly what reached the driver.

use std::collections::HashMap;
use std::os::raw::c_void;

use crate::driver::{Driver, LoadError};
use crate::gl;
use crate::gl::types::{GLenum, GLfloat, GLint, GLsizei, GLuint};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Call {
  AliasArbBufferObjects,
  ActiveTexture(GLenum),
  GenTexture(GLuint),
  BindTexture(GLenum, GLuint),
  DeleteTexture(GLuint),
  TexParameteri(GLenum, GLenum, GLint),
  TexParameterf(GLenum, GLenum, GLfloat),
  TexImage2D {
    internal_format: GLint,
    width: GLsizei,
    height: GLsizei,
    format: GLenum,
    pixels: Vec<u8>,
  },
  VertexAttrib4f(GLuint, [GLfloat; 4]),
  Color4ub([u8; 4]),
  ClearColor([GLfloat; 4]),
  Viewport([GLint; 4]),
  Scissor([GLint; 4]),
  BlendEquation(GLenum),
  BlendEquationExt(GLenum),
  BlendFunc(GLenum, GLenum),
  BlendFuncSeparate([GLenum; 4]),
  BlendFuncSeparateExt([GLenum; 4]),
  PointSize(GLfloat),
  MatrixMode(GLenum),
  LoadMatrix([GLfloat; 16]),
  EnableVertexAttribArray(GLuint),
  DisableVertexAttribArray(GLuint),
  EnableClientState(GLenum),
  DisableClientState(GLenum),
  VertexAttribPointer(GLuint, GLint, GLenum, bool, GLsizei, usize),
  VertexPointer(GLint, GLenum, GLsizei, usize),
  TexCoordPointer(GLint, GLenum, GLsizei, usize),
  ColorPointer(GLint, GLenum, GLsizei, usize),
  DrawArrays(GLenum, GLint, GLsizei),
  DrawElements(GLenum, GLsizei, GLenum, usize),
  DrawElementsBaseVertex(GLenum, GLsizei, GLenum, usize, GLint),
}

#[derive(Debug)]
pub(crate) struct MockDriver {
  fail_load: bool,
  strings: HashMap<GLenum, String>,
  extensions: Vec<String>,
  integers: HashMap<GLenum, Vec<GLint>>,
  floats: HashMap<GLenum, Vec<GLfloat>>,
  current_color_attrib: [GLfloat; 4],
  active_texture: GLenum,
  texture_bindings: HashMap<GLenum, GLuint>,
  next_texture: GLuint,
  calls: Vec<Call>,
}

impl MockDriver {
  /// A desktop driver reporting `version` as its `GL_VERSION`.
  pub(crate) fn desktop(version: &str) -> Self {
    let mut driver = MockDriver {
      fail_load: false,
      strings: HashMap::new(),
      extensions: Vec::new(),
      integers: HashMap::new(),
      floats: HashMap::new(),
      current_color_attrib: [1., 1., 1., 1.],
      active_texture: gl::TEXTURE0,
      texture_bindings: HashMap::new(),
      next_texture: 1,
      calls: Vec::new(),
    };

    driver.strings.insert(gl::VERSION, version.to_owned());
    driver
      .strings
      .insert(gl::VENDOR, "NVIDIA Corporation".to_owned());

    driver
      .with_integers(gl::VIEWPORT, &[0, 0, 800, 600])
      .with_integers(gl::SCISSOR_BOX, &[0, 0, 800, 600])
      .with_integers(gl::MAX_TEXTURE_SIZE, &[8192])
      .with_integers(gl::MAX_COMBINED_TEXTURE_IMAGE_UNITS, &[8])
      .with_integers(gl::MAX_COLOR_ATTACHMENTS, &[8])
      .with_integers(gl::MAX_DRAW_BUFFERS, &[4])
      .with_integers(gl::DRAW_FRAMEBUFFER_BINDING, &[0])
      .with_floats(gl::CURRENT_COLOR, &[1., 1., 1., 1.])
      .with_floats(gl::COLOR_CLEAR_VALUE, &[0., 0., 0., 0.])
      .with_floats(gl::POINT_SIZE, &[1.])
      .with_floats(gl::MAX_TEXTURE_MAX_ANISOTROPY_EXT, &[16.])
  }

  /// An OpenGL ES 2 driver.
  pub(crate) fn gles2() -> Self {
    let mut driver = Self::desktop("");
    driver
      .strings
      .insert(gl::VERSION, "OpenGL ES 2.0 build 1.9@2291151".to_owned());
    driver
      .strings
      .insert(gl::VENDOR, "Imagination Technologies".to_owned());
    driver
  }

  pub(crate) fn failing_load(mut self) -> Self {
    self.fail_load = true;
    self
  }

  pub(crate) fn with_vendor(mut self, vendor: Option<&str>) -> Self {
    match vendor {
      Some(vendor) => self.strings.insert(gl::VENDOR, vendor.to_owned()),
      None => self.strings.remove(&gl::VENDOR),
    };

    self
  }

  pub(crate) fn with_extension(mut self, name: &str) -> Self {
    self.extensions.push(name.to_owned());
    self
  }

  pub(crate) fn with_integers(mut self, pname: GLenum, values: &[GLint]) -> Self {
    self.integers.insert(pname, values.to_vec());
    self
  }

  pub(crate) fn with_floats(mut self, pname: GLenum, values: &[GLfloat]) -> Self {
    self.floats.insert(pname, values.to_vec());
    self
  }

  pub(crate) fn with_current_color_attrib(mut self, rgba: [GLfloat; 4]) -> Self {
    self.current_color_attrib = rgba;
    self
  }

  /// Pretend `texture` was bound to `unit` by someone else before the state cache existed.
  pub(crate) fn with_bound_texture(mut self, unit: u32, texture: GLuint) -> Self {
    self.texture_bindings.insert(gl::TEXTURE0 + unit, texture);
    self
  }

  pub(crate) fn with_active_texture_unit(mut self, unit: u32) -> Self {
    self.active_texture = gl::TEXTURE0 + unit;
    self
  }

  pub(crate) fn calls(&self) -> &[Call] {
    &self.calls
  }

  pub(crate) fn clear_calls(&mut self) {
    self.calls.clear();
  }

  /// Texture the driver has bound to `unit`, as opposed to what any cache believes.
  pub(crate) fn bound_texture(&self, unit: u32) -> GLuint {
    self
      .texture_bindings
      .get(&(gl::TEXTURE0 + unit))
      .copied()
      .unwrap_or(0)
  }

  pub(crate) fn active_texture_unit(&self) -> u32 {
    self.active_texture - gl::TEXTURE0
  }
}

impl Driver for MockDriver {
  fn load(&mut self) -> Result<(), LoadError> {
    if self.fail_load {
      Err(LoadError::MissingEntryPoint("glGetString"))
    } else {
      Ok(())
    }
  }

  fn alias_arb_buffer_objects(&mut self) {
    self.calls.push(Call::AliasArbBufferObjects);
  }

  fn get_string(&mut self, name: GLenum) -> Option<String> {
    if name == gl::EXTENSIONS {
      Some(self.extensions.join(" "))
    } else {
      self.strings.get(&name).cloned()
    }
  }

  fn get_string_i(&mut self, name: GLenum, index: GLuint) -> Option<String> {
    if name == gl::EXTENSIONS {
      self.extensions.get(index as usize).cloned()
    } else {
      None
    }
  }

  fn get_integer_v(&mut self, pname: GLenum, params: &mut [GLint]) {
    match pname {
      gl::NUM_EXTENSIONS => params[0] = self.extensions.len() as GLint,
      gl::ACTIVE_TEXTURE => params[0] = self.active_texture as GLint,
      gl::TEXTURE_BINDING_2D => params[0] = self.bound_texture(self.active_texture_unit()) as GLint,
      _ => {
        if let Some(values) = self.integers.get(&pname) {
          params.copy_from_slice(&values[..params.len()]);
        }
      }
    }
  }

  fn get_float_v(&mut self, pname: GLenum, params: &mut [GLfloat]) {
    if let Some(values) = self.floats.get(&pname) {
      params.copy_from_slice(&values[..params.len()]);
    }
  }

  fn get_vertex_attrib_f_v(&mut self, _: GLuint, pname: GLenum, params: &mut [GLfloat; 4]) {
    if pname == gl::CURRENT_VERTEX_ATTRIB {
      *params = self.current_color_attrib;
    }
  }

  fn active_texture(&mut self, texture: GLenum) {
    self.active_texture = texture;
    self.calls.push(Call::ActiveTexture(texture));
  }

  fn gen_texture(&mut self) -> GLuint {
    let texture = self.next_texture;
    self.next_texture += 1;
    self.calls.push(Call::GenTexture(texture));
    texture
  }

  fn bind_texture(&mut self, target: GLenum, texture: GLuint) {
    self.texture_bindings.insert(self.active_texture, texture);
    self.calls.push(Call::BindTexture(target, texture));
  }

  fn delete_texture(&mut self, texture: GLuint) {
    for bound in self.texture_bindings.values_mut() {
      if *bound == texture {
        *bound = 0;
      }
    }

    self.calls.push(Call::DeleteTexture(texture));
  }

  fn tex_parameter_i(&mut self, target: GLenum, pname: GLenum, param: GLint) {
    self.calls.push(Call::TexParameteri(target, pname, param));
  }

  fn tex_parameter_f(&mut self, target: GLenum, pname: GLenum, param: GLfloat) {
    self.calls.push(Call::TexParameterf(target, pname, param));
  }

  fn tex_image_2d(
    &mut self,
    _: GLenum,
    _: GLint,
    internal_format: GLint,
    width: GLsizei,
    height: GLsizei,
    format: GLenum,
    _: GLenum,
    pixels: &[u8],
  ) {
    self.calls.push(Call::TexImage2D {
      internal_format,
      width,
      height,
      format,
      pixels: pixels.to_vec(),
    });
  }

  fn vertex_attrib_4f(&mut self, index: GLuint, x: GLfloat, y: GLfloat, z: GLfloat, w: GLfloat) {
    self.calls.push(Call::VertexAttrib4f(index, [x, y, z, w]));
  }

  fn color_4ub(&mut self, r: u8, g: u8, b: u8, a: u8) {
    self.calls.push(Call::Color4ub([r, g, b, a]));
  }

  fn clear_color(&mut self, r: GLfloat, g: GLfloat, b: GLfloat, a: GLfloat) {
    self.calls.push(Call::ClearColor([r, g, b, a]));
  }

  fn viewport(&mut self, x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
    self.calls.push(Call::Viewport([x, y, width, height]));
  }

  fn scissor(&mut self, x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
    self.calls.push(Call::Scissor([x, y, width, height]));
  }

  fn blend_equation(&mut self, mode: GLenum) {
    self.calls.push(Call::BlendEquation(mode));
  }

  fn blend_equation_ext(&mut self, mode: GLenum) {
    self.calls.push(Call::BlendEquationExt(mode));
  }

  fn blend_func(&mut self, src: GLenum, dst: GLenum) {
    self.calls.push(Call::BlendFunc(src, dst));
  }

  fn blend_func_separate(
    &mut self,
    src_rgb: GLenum,
    dst_rgb: GLenum,
    src_alpha: GLenum,
    dst_alpha: GLenum,
  ) {
    self.calls.push(Call::BlendFuncSeparate([
      src_rgb, dst_rgb, src_alpha, dst_alpha,
    ]));
  }

  fn blend_func_separate_ext(
    &mut self,
    src_rgb: GLenum,
    dst_rgb: GLenum,
    src_alpha: GLenum,
    dst_alpha: GLenum,
  ) {
    self.calls.push(Call::BlendFuncSeparateExt([
      src_rgb, dst_rgb, src_alpha, dst_alpha,
    ]));
  }

  fn point_size(&mut self, size: GLfloat) {
    self.calls.push(Call::PointSize(size));
  }

  fn matrix_mode(&mut self, mode: GLenum) {
    self.calls.push(Call::MatrixMode(mode));
  }

  fn load_matrix_f(&mut self, m: &[GLfloat; 16]) {
    self.calls.push(Call::LoadMatrix(*m));
  }

  fn enable_vertex_attrib_array(&mut self, index: GLuint) {
    self.calls.push(Call::EnableVertexAttribArray(index));
  }

  fn disable_vertex_attrib_array(&mut self, index: GLuint) {
    self.calls.push(Call::DisableVertexAttribArray(index));
  }

  fn enable_client_state(&mut self, array: GLenum) {
    self.calls.push(Call::EnableClientState(array));
  }

  fn disable_client_state(&mut self, array: GLenum) {
    self.calls.push(Call::DisableClientState(array));
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
    self.calls.push(Call::VertexAttribPointer(
      index,
      size,
      ty,
      normalized,
      stride,
      pointer as usize,
    ));
  }

  unsafe fn vertex_pointer(&mut self, size: GLint, ty: GLenum, stride: GLsizei, pointer: *const c_void) {
    self
      .calls
      .push(Call::VertexPointer(size, ty, stride, pointer as usize));
  }

  unsafe fn tex_coord_pointer(
    &mut self,
    size: GLint,
    ty: GLenum,
    stride: GLsizei,
    pointer: *const c_void,
  ) {
    self
      .calls
      .push(Call::TexCoordPointer(size, ty, stride, pointer as usize));
  }

  unsafe fn color_pointer(&mut self, size: GLint, ty: GLenum, stride: GLsizei, pointer: *const c_void) {
    self
      .calls
      .push(Call::ColorPointer(size, ty, stride, pointer as usize));
  }

  unsafe fn draw_arrays(&mut self, mode: GLenum, first: GLint, count: GLsizei) {
    self.calls.push(Call::DrawArrays(mode, first, count));
  }

  unsafe fn draw_elements(&mut self, mode: GLenum, count: GLsizei, ty: GLenum, indices: *const c_void) {
    self
      .calls
      .push(Call::DrawElements(mode, count, ty, indices as usize));
  }

  unsafe fn draw_elements_base_vertex(
    &mut self,
    mode: GLenum,
    count: GLsizei,
    ty: GLenum,
    indices: *const c_void,
    base_vertex: GLint,
  ) {
    self.calls.push(Call::DrawElementsBaseVertex(
      mode,
      count,
      ty,
      indices as usize,
      base_vertex,
    ));
  }
}
