//! Texture sampling parameters.

/// Interpolation used when sampling a texture.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FilterMode {
  /// Nearest interpolation.
  Nearest,
  /// Linear interpolation between surrounding texels.
  Linear,
}

/// Full filtering description of a texture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Filter {
  /// Filter used when the texture is minified.
  pub min: FilterMode,
  /// Filter used when the texture is magnified.
  pub mag: FilterMode,
  /// Filter used between mipmap levels, if mipmaps are sampled at all.
  pub mipmap: Option<FilterMode>,
  /// Requested anisotropy. `1.0` disables anisotropic filtering.
  pub anisotropy: f32,
}

impl Filter {
  /// Same filter for minification and magnification, no mipmapping, no anisotropy.
  pub fn new(mode: FilterMode) -> Self {
    Filter {
      min: mode,
      mag: mode,
      mipmap: None,
      anisotropy: 1.,
    }
  }
}

impl Default for Filter {
  fn default() -> Self {
    Filter::new(FilterMode::Linear)
  }
}

/// How to wrap texture coordinates while sampling textures?
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum WrapMode {
  /// If textures coordinates lay outside of *[0;1]*, they will be clamped to either *0* or *1* for
  /// every components.
  Clamp,
  /// Textures coordinates are repeated if they lay outside of *[0;1]*. Picture this as:
  ///
  /// ```ignore
  /// // given the frac function returning the fractional part of a floating number:
  /// coord_ith = frac(coord_ith); // always between [0;1]
  /// ```
  Repeat,
  /// Same as `Repeat` but it will alternatively repeat between *[0;1]* and *[1;0]*.
  MirroredRepeat,
}

impl WrapMode {
  /// Parse the name scripts use for a wrap mode.
  ///
  /// Unknown names fall back to [`WrapMode::Clamp`].
  pub fn from_name(name: &str) -> Self {
    match name {
      "repeat" => WrapMode::Repeat,
      "mirroredrepeat" => WrapMode::MirroredRepeat,
      _ => WrapMode::Clamp,
    }
  }

  /// Name scripts use for this wrap mode.
  pub fn name(self) -> &'static str {
    match self {
      WrapMode::Clamp => "clamp",
      WrapMode::Repeat => "repeat",
      WrapMode::MirroredRepeat => "mirroredrepeat",
    }
  }
}

impl Default for WrapMode {
  fn default() -> Self {
    WrapMode::Clamp
  }
}

/// Wrapping of both texture axes.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Wrap {
  /// Horizontal axis.
  pub s: WrapMode,
  /// Vertical axis.
  pub t: WrapMode,
}

impl Wrap {
  /// Same wrap mode on both axes.
  pub fn uniform(mode: WrapMode) -> Self {
    Wrap { s: mode, t: mode }
  }
}
