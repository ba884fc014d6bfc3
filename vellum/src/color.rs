//! Colors.

/// An 8-bit per channel RGBA color.
///
/// Channels are stored as bytes in the `[0; 255]` range. Backends that need normalized floats use
/// [`Color::to_normalized`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Color {
  /// Red channel.
  pub r: u8,
  /// Green channel.
  pub g: u8,
  /// Blue channel.
  pub b: u8,
  /// Alpha channel.
  pub a: u8,
}

impl Color {
  /// Opaque white.
  pub const WHITE: Color = Color::new(255, 255, 255, 255);

  /// Fully transparent black.
  pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

  /// Create a new color out of its four channels.
  pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
    Color { r, g, b, a }
  }

  /// Channels as `[r, g, b, a]` floats in `[0; 1]`.
  pub fn to_normalized(self) -> [f32; 4] {
    [
      f32::from(self.r) / 255.,
      f32::from(self.g) / 255.,
      f32::from(self.b) / 255.,
      f32::from(self.a) / 255.,
    ]
  }

  /// Build a color from `[r, g, b, a]` floats in `[0; 1]`.
  ///
  /// Values are clamped and rounded to the nearest byte.
  pub fn from_normalized(rgba: [f32; 4]) -> Self {
    let channel = |x: f32| (x.max(0.).min(1.) * 255.).round() as u8;

    Color::new(
      channel(rgba[0]),
      channel(rgba[1]),
      channel(rgba[2]),
      channel(rgba[3]),
    )
  }

  /// Channels as `[r, g, b, a]` bytes.
  pub fn to_bytes(self) -> [u8; 4] {
    [self.r, self.g, self.b, self.a]
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn normalized_extremes() {
    assert_eq!(Color::WHITE.to_normalized(), [1., 1., 1., 1.]);
    assert_eq!(Color::TRANSPARENT.to_normalized(), [0., 0., 0., 0.]);
  }

  #[test]
  fn from_normalized_rounds_and_clamps() {
    assert_eq!(
      Color::from_normalized([0.2, 1.5, -0.3, 0.5]),
      Color::new(51, 255, 0, 128)
    );
  }

  #[test]
  fn driver_readback_survives_float_trip() {
    let c = Color::new(12, 200, 33, 254);
    assert_eq!(Color::from_normalized(c.to_normalized()), c);
  }
}
