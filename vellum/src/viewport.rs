//! Rectangles in framebuffer space.
//!
//! Viewports and scissor regions share the same representation. The engine’s convention is a
//! top-left origin with the y axis going down; converting to whatever the driver expects is the
//! backend’s job.

/// A rectangle in framebuffer pixel space.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Viewport {
  /// Left edge.
  pub x: i32,
  /// Top edge.
  pub y: i32,
  /// Width in pixels.
  pub width: i32,
  /// Height in pixels.
  pub height: i32,
}

impl Viewport {
  /// Create a new rectangle.
  pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
    Viewport {
      x,
      y,
      width,
      height,
    }
  }

  /// Build a rectangle out of the `[x, y, width, height]` layout drivers use when queried.
  pub fn from_array(a: [i32; 4]) -> Self {
    Viewport::new(a[0], a[1], a[2], a[3])
  }

  /// Mirror the rectangle vertically inside a surface of height `surface_height`.
  ///
  /// This turns a top-left origin rectangle into a bottom-left origin one, and back.
  pub fn flip_y(self, surface_height: i32) -> Self {
    Viewport {
      y: surface_height - (self.y + self.height),
      ..self
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn flip_y_is_an_involution() {
    let r = Viewport::new(10, 20, 30, 40);

    assert_eq!(r.flip_y(600), Viewport::new(10, 540, 30, 40));
    assert_eq!(r.flip_y(600).flip_y(600), r);
  }
}
