//! Blending-related types.
//!
//! Given two pixels *src* and *dst* – source and destination, we associate each pixel a blending
//! factor – respectively, *srcK* and *dstK*. *src* is the pixel being computed, and *dst* is the
//! pixel that is already stored in the framebuffer.
//!
//! The pixels can be blended in several ways. See the documentation of [`Equation`] for further
//! details. The factors are encoded with [`Factor`] and both are gathered in a [`BlendState`].

/// Blending equation. Used to state how blending factors and pixel data should be blended.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Equation {
  /// `Additive` represents the following blending equation:
  ///
  /// > `blended = src * srcK + dst * dstK`
  Additive,
  /// `Subtract` represents the following blending equation:
  ///
  /// > `blended = src * srcK - dst * dstK`
  Subtract,
  /// Because subtracting is not commutative, `ReverseSubtract` represents the following additional
  /// blending equation:
  ///
  /// > `blended = dst * dstK - src * srcK`
  ReverseSubtract,
  /// `Min` represents the following blending equation:
  ///
  /// > `blended = min(src, dst)`
  Min,
  /// `Max` represents the following blending equation:
  ///
  /// > `blended = max(src, dst)`
  Max,
}

/// Blending factors. Pixel data are multiplied by these factors to achieve several effects driven
/// by *blending equations*.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Factor {
  /// `1 * color = factor`
  One,
  /// `0 * color = 0`
  Zero,
  /// `src * color`
  SrcColor,
  /// `(1 - src) * color`
  SrcColorComplement,
  /// `dst * color`
  DestColor,
  /// `(1 - dst) * color`
  DestColorComplement,
  /// `srcA * color`
  SrcAlpha,
  /// `(1 - srcA) * color`
  SrcAlphaComplement,
  /// `dstA * color`
  DstAlpha,
  /// `(1 - dstA) * color`
  DstAlphaComplement,
  /// `min(srcA, 1 - dstA) * color`
  SrcAlphaSaturate,
}

/// A complete blending configuration: one equation and a pair of factors per channel group.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct BlendState {
  /// Equation used for every channel.
  pub equation: Equation,
  /// Source factor of the RGB channels.
  pub src_rgb: Factor,
  /// Destination factor of the RGB channels.
  pub dst_rgb: Factor,
  /// Source factor of the alpha channel.
  pub src_alpha: Factor,
  /// Destination factor of the alpha channel.
  pub dst_alpha: Factor,
}

impl BlendState {
  /// Overwrite the destination with the source.
  ///
  /// This is what a context looks like before anyone touches blending.
  pub const REPLACE: BlendState = BlendState::new(Equation::Additive, Factor::One, Factor::Zero);

  /// Regular alpha blending of non-premultiplied colors.
  pub const ALPHA: BlendState = BlendState::separate(
    Equation::Additive,
    Factor::SrcAlpha,
    Factor::SrcAlphaComplement,
    Factor::One,
    Factor::SrcAlphaComplement,
  );

  /// Same factors for the RGB and alpha channels.
  pub const fn new(equation: Equation, src: Factor, dst: Factor) -> Self {
    BlendState {
      equation,
      src_rgb: src,
      dst_rgb: dst,
      src_alpha: src,
      dst_alpha: dst,
    }
  }

  /// Distinct factors for the RGB and alpha channels.
  pub const fn separate(
    equation: Equation,
    src_rgb: Factor,
    dst_rgb: Factor,
    src_alpha: Factor,
    dst_alpha: Factor,
  ) -> Self {
    BlendState {
      equation,
      src_rgb,
      dst_rgb,
      src_alpha,
      dst_alpha,
    }
  }

  /// Whether the RGB and alpha channels use different factors.
  pub fn is_separate(&self) -> bool {
    self.src_rgb != self.src_alpha || self.dst_rgb != self.dst_alpha
  }
}

impl Default for BlendState {
  fn default() -> Self {
    Self::REPLACE
  }
}
