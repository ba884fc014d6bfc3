//! 4×4 matrices.
//!
//! The engine only needs a handful of operations out of its matrices: composing them, building
//! the usual 2D projections and handing their elements to the driver. Anything fancier belongs to
//! a proper linear algebra crate.

use std::ops::Mul;

/// A column-major 4×4 floating matrix.
///
/// Elements are laid out the way OpenGL expects them: `elements[col * 4 + row]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix4 {
  elements: [f32; 16],
}

impl Matrix4 {
  /// The identity matrix.
  pub const IDENTITY: Matrix4 = Matrix4 {
    elements: [
      1., 0., 0., 0., //
      0., 1., 0., 0., //
      0., 0., 1., 0., //
      0., 0., 0., 1.,
    ],
  };

  /// Build a matrix from column-major elements.
  pub const fn from_elements(elements: [f32; 16]) -> Self {
    Matrix4 { elements }
  }

  /// Column-major elements.
  pub fn elements(&self) -> &[f32; 16] {
    &self.elements
  }

  /// A 2D translation.
  pub fn translation(x: f32, y: f32) -> Self {
    let mut m = Self::IDENTITY;
    m.elements[12] = x;
    m.elements[13] = y;
    m
  }

  /// A 2D scaling.
  pub fn scaling(sx: f32, sy: f32) -> Self {
    let mut m = Self::IDENTITY;
    m.elements[0] = sx;
    m.elements[5] = sy;
    m
  }

  /// An orthographic projection with a `[-1; 1]` depth range.
  ///
  /// Passing `bottom > top` yields the top-left origin projection the engine draws with.
  pub fn ortho(left: f32, right: f32, bottom: f32, top: f32) -> Self {
    let mut m = Self::IDENTITY;
    m.elements[0] = 2. / (right - left);
    m.elements[5] = 2. / (top - bottom);
    m.elements[10] = -1.;
    m.elements[12] = -(right + left) / (right - left);
    m.elements[13] = -(top + bottom) / (top - bottom);
    m
  }

  /// Raw bit patterns of the elements.
  ///
  /// Two matrices with the same bits are the same upload for the driver, which float equality
  /// doesn’t capture (`-0.0 == 0.0`, `NaN != NaN`).
  pub fn to_bits(&self) -> [u32; 16] {
    let mut bits = [0; 16];

    for (b, e) in bits.iter_mut().zip(self.elements.iter()) {
      *b = e.to_bits();
    }

    bits
  }
}

impl Default for Matrix4 {
  fn default() -> Self {
    Self::IDENTITY
  }
}

impl Mul for Matrix4 {
  type Output = Matrix4;

  fn mul(self, rhs: Matrix4) -> Self::Output {
    let a = &self.elements;
    let b = &rhs.elements;
    let mut elements = [0.; 16];

    for col in 0..4 {
      for row in 0..4 {
        elements[col * 4 + row] = (0..4).map(|k| a[k * 4 + row] * b[col * 4 + k]).sum();
      }
    }

    Matrix4 { elements }
  }
}
