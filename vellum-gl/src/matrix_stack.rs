//! Transform and projection stacks.

use vellum::matrix::Matrix4;

/// A stack of matrices that is never empty.
///
/// The top of the stack is the current matrix. Pushing saves a copy of it; popping restores the
/// last saved copy.
#[derive(Clone, Debug, PartialEq)]
pub struct MatrixStack {
  top: Matrix4,
  saved: Vec<Matrix4>,
}

impl MatrixStack {
  /// A stack holding only the identity, with room for `capacity` entries before reallocating.
  pub fn with_capacity(capacity: usize) -> Self {
    MatrixStack {
      top: Matrix4::IDENTITY,
      saved: Vec::with_capacity(capacity.saturating_sub(1)),
    }
  }

  /// Duplicate the current matrix on top of the stack.
  pub fn push(&mut self) {
    self.saved.push(self.top);
  }

  /// Remove the current matrix and return it.
  ///
  /// The base entry is never removed: popping it returns `None` and leaves the stack untouched.
  pub fn pop(&mut self) -> Option<Matrix4> {
    let restored = self.saved.pop()?;
    Some(std::mem::replace(&mut self.top, restored))
  }

  /// Current matrix.
  pub fn top(&self) -> &Matrix4 {
    &self.top
  }

  /// Current matrix, mutably.
  pub fn top_mut(&mut self) -> &mut Matrix4 {
    &mut self.top
  }

  /// Number of entries, always at least `1`.
  pub fn depth(&self) -> usize {
    self.saved.len() + 1
  }

  /// Drop every entry and start over with the identity.
  pub fn reset(&mut self) {
    self.saved.clear();
    self.top = Matrix4::IDENTITY;
  }
}

impl Default for MatrixStack {
  fn default() -> Self {
    MatrixStack::with_capacity(1)
  }
}

/// The two stacks a context keeps around.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrices {
  /// Model-view transforms.
  pub transform: MatrixStack,
  /// Projections.
  pub projection: MatrixStack,
}

impl Matrices {
  pub(crate) fn new() -> Self {
    Matrices {
      transform: MatrixStack::with_capacity(10),
      projection: MatrixStack::with_capacity(2),
    }
  }

  pub(crate) fn reset(&mut self) {
    self.transform.reset();
    self.projection.reset();
  }
}
