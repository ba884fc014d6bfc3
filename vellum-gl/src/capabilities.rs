//! Driver capabilities.
//!
//! Everything in here is queried once, when a context gets initialized, and never changes
//! afterwards. The rest of the crate branches on the derived flags of [`Capabilities`] instead of
//! re-checking versions and extension strings on every call.

use std::collections::HashSet;
use std::fmt;

use crate::driver::Driver;
use crate::gl;
use crate::gl::types::GLuint;

/// GPU vendor, as advertised by the driver.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Vendor {
  /// Unrecognized or unavailable vendor string.
  Unknown,
  /// AMD, formerly ATI.
  AtiAmd,
  /// NVIDIA.
  Nvidia,
  /// Intel.
  Intel,
  /// Mesa software renderers.
  MesaSoft,
  /// Apple.
  Apple,
  /// Microsoft (GDI generic, WARP…).
  Microsoft,
  /// Imagination Technologies (PowerVR).
  Imagination,
  /// ARM (Mali).
  Arm,
  /// Qualcomm (Adreno).
  Qualcomm,
  /// Broadcom (VideoCore).
  Broadcom,
  /// Vivante.
  Vivante,
}

// Checked in order; the first fragment found in the vendor string wins.
const VENDOR_FRAGMENTS: [(&str, Vendor); 12] = [
  ("ATI Technologies", Vendor::AtiAmd),
  ("AMD", Vendor::AtiAmd),
  ("NVIDIA", Vendor::Nvidia),
  ("Intel", Vendor::Intel),
  ("Mesa", Vendor::MesaSoft),
  ("Apple Computer", Vendor::Apple),
  ("Microsoft", Vendor::Microsoft),
  ("Imagination", Vendor::Imagination),
  ("ARM", Vendor::Arm),
  ("Qualcomm", Vendor::Qualcomm),
  ("Broadcom", Vendor::Broadcom),
  ("Vivante", Vendor::Vivante),
];

impl Vendor {
  /// Classify a `GL_VENDOR` string.
  ///
  /// Matching is case-sensitive. A missing string classifies as [`Vendor::Unknown`].
  pub fn from_vendor_string(vendor: Option<&str>) -> Self {
    vendor
      .and_then(|vendor| {
        VENDOR_FRAGMENTS
          .iter()
          .find(|(fragment, _)| vendor.contains(fragment))
          .map(|&(_, v)| v)
      })
      .unwrap_or(Vendor::Unknown)
  }

  /// Human-readable name of the vendor.
  pub fn name(self) -> &'static str {
    match self {
      Vendor::Unknown => "unknown",
      Vendor::AtiAmd => "AMD",
      Vendor::Nvidia => "NVIDIA",
      Vendor::Intel => "Intel",
      Vendor::MesaSoft => "Mesa",
      Vendor::Apple => "Apple",
      Vendor::Microsoft => "Microsoft",
      Vendor::Imagination => "Imagination",
      Vendor::Arm => "ARM",
      Vendor::Qualcomm => "Qualcomm",
      Vendor::Broadcom => "Broadcom",
      Vendor::Vivante => "Vivante",
    }
  }
}

impl Default for Vendor {
  fn default() -> Self {
    Vendor::Unknown
  }
}

impl fmt::Display for Vendor {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Flavor of the OpenGL API a context implements.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Api {
  /// Desktop OpenGL.
  Desktop,
  /// OpenGL ES.
  Es,
}

/// API flavor and version of a context.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct GLVersion {
  /// API flavor.
  pub api: Api,
  /// Major version.
  pub major: u32,
  /// Minor version.
  pub minor: u32,
}

impl GLVersion {
  /// Parse a `GL_VERSION` string.
  ///
  /// Desktop drivers report `"major.minor[.release] [vendor info]"`; ES drivers prefix it with
  /// `"OpenGL ES "` (ES 1 drivers with `"OpenGL ES-CM "` or `"OpenGL ES-CL "`). Anything
  /// unparsable is taken as desktop OpenGL 1.0.
  pub fn parse(version: &str) -> Self {
    let (api, rest) = match version.trim_start().strip_prefix("OpenGL ES") {
      Some(rest) => {
        let rest = rest
          .strip_prefix("-CM")
          .or_else(|| rest.strip_prefix("-CL"))
          .unwrap_or(rest);
        (Api::Es, rest.trim_start())
      }

      None => (Api::Desktop, version.trim_start()),
    };

    let number = rest.split_whitespace().next().unwrap_or("");
    let mut parts = number.split('.').map(|p| p.parse::<u32>().ok());

    match (parts.next().flatten(), parts.next().flatten()) {
      (Some(major), Some(minor)) => GLVersion { api, major, minor },
      _ => GLVersion {
        api: Api::Desktop,
        major: 1,
        minor: 0,
      },
    }
  }

  /// Whether this is desktop OpenGL at least `major.minor`.
  pub fn is_desktop_at_least(&self, major: u32, minor: u32) -> bool {
    self.api == Api::Desktop && (self.major, self.minor) >= (major, minor)
  }

  /// Whether this is OpenGL ES at least `major.minor`.
  pub fn is_es_at_least(&self, major: u32, minor: u32) -> bool {
    self.api == Api::Es && (self.major, self.minor) >= (major, minor)
  }
}

impl Default for GLVersion {
  fn default() -> Self {
    GLVersion {
      api: Api::Desktop,
      major: 1,
      minor: 0,
    }
  }
}

impl fmt::Display for GLVersion {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self.api {
      Api::Desktop => write!(f, "OpenGL {}.{}", self.major, self.minor),
      Api::Es => write!(f, "OpenGL ES {}.{}", self.major, self.minor),
    }
  }
}

/// How a feature is reached on the current driver.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Support {
  /// Through a core entry point.
  Core,
  /// Through an extension entry point.
  Extension,
  /// Not at all.
  Unsupported,
}

/// Capability table of a context.
#[derive(Clone, Debug)]
pub struct Capabilities {
  vendor: Vendor,
  version: GLVersion,
  extensions: HashSet<String>,
  max_texture_size: i32,
  max_render_targets: i32,
  max_anisotropy: f32,
  shaders: bool,
  offscreen: bool,
  multisample_resolve: bool,
  multiple_render_targets: bool,
  blend_equation: Support,
  blend_func_separate: Support,
  anisotropic_filtering: bool,
  arb_buffer_objects_only: bool,
}

impl Capabilities {
  /// Derive a capability table out of what the driver reported.
  ///
  /// Limits are left at their defaults until [`Capabilities::query_limits`] runs.
  pub fn new<I, S>(vendor: Vendor, version: GLVersion, extensions: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let extensions: HashSet<String> = extensions.into_iter().map(Into::into).collect();
    let has = |name: &str| extensions.contains(name);

    let es2 = version.is_es_at_least(2, 0);
    let core_blending = es2 || version.is_desktop_at_least(1, 4);

    let shaders = es2 || version.is_desktop_at_least(2, 0);
    let offscreen = es2
      || version.is_desktop_at_least(3, 0)
      || has("GL_ARB_framebuffer_object")
      || has("GL_EXT_framebuffer_object");
    let multisample_resolve = version.is_desktop_at_least(3, 0)
      || version.is_es_at_least(3, 0)
      || has("GL_ARB_framebuffer_object")
      || (has("GL_EXT_framebuffer_multisample") && has("GL_EXT_framebuffer_blit"));
    let multiple_render_targets =
      offscreen && (version.is_desktop_at_least(2, 0) || has("GL_ARB_draw_buffers"));

    let blend_equation = if core_blending {
      Support::Core
    } else if has("GL_EXT_blend_minmax") && has("GL_EXT_blend_subtract") {
      Support::Extension
    } else {
      Support::Unsupported
    };

    let blend_func_separate = if core_blending {
      Support::Core
    } else if has("GL_EXT_blend_func_separate") {
      Support::Extension
    } else {
      Support::Unsupported
    };

    let anisotropic_filtering = has("GL_EXT_texture_filter_anisotropic");
    let arb_buffer_objects_only = version.api == Api::Desktop
      && !version.is_desktop_at_least(1, 5)
      && has("GL_ARB_vertex_buffer_object");

    Capabilities {
      vendor,
      version,
      extensions,
      max_texture_size: 0,
      max_render_targets: 0,
      max_anisotropy: 1.,
      shaders,
      offscreen,
      multisample_resolve,
      multiple_render_targets,
      blend_equation,
      blend_func_separate,
      anisotropic_filtering,
      arb_buffer_objects_only,
    }
  }

  /// Read the version, extensions and vendor of the driver.
  pub(crate) fn detect<D>(driver: &mut D) -> Self
  where
    D: Driver,
  {
    let version = driver
      .get_string(gl::VERSION)
      .map(|v| GLVersion::parse(&v))
      .unwrap_or_default();
    let vendor = Vendor::from_vendor_string(driver.get_string(gl::VENDOR).as_deref());
    let extensions = read_extensions(driver, version);

    Capabilities::new(vendor, version, extensions)
  }

  /// Query the implementation limits.
  pub(crate) fn query_limits<D>(&mut self, driver: &mut D)
  where
    D: Driver,
  {
    self.max_anisotropy = if self.anisotropic_filtering {
      let mut max_anisotropy = [1.];
      driver.get_float_v(gl::MAX_TEXTURE_MAX_ANISOTROPY_EXT, &mut max_anisotropy);
      max_anisotropy[0]
    } else {
      1.
    };

    let mut max_texture_size = [0];
    driver.get_integer_v(gl::MAX_TEXTURE_SIZE, &mut max_texture_size);
    self.max_texture_size = max_texture_size[0];

    self.max_render_targets = if self.multiple_render_targets {
      let mut max_attachments = [0];
      driver.get_integer_v(gl::MAX_COLOR_ATTACHMENTS, &mut max_attachments);

      let mut max_draw_buffers = [0];
      driver.get_integer_v(gl::MAX_DRAW_BUFFERS, &mut max_draw_buffers);

      max_attachments[0].min(max_draw_buffers[0])
    } else {
      0
    };
  }

  /// GPU vendor.
  pub fn vendor(&self) -> Vendor {
    self.vendor
  }

  /// API flavor and version.
  pub fn version(&self) -> GLVersion {
    self.version
  }

  /// Whether the driver advertises `extension`.
  pub fn has_extension(&self, extension: &str) -> bool {
    self.extensions.contains(extension)
  }

  /// Largest width or height of a texture.
  pub fn max_texture_size(&self) -> i32 {
    self.max_texture_size
  }

  /// Amount of color targets that can be rendered to at once; `0` if multiple render targets are
  /// unsupported.
  pub fn max_render_targets(&self) -> i32 {
    self.max_render_targets
  }

  /// Highest anisotropy a texture filter accepts; `1.0` without anisotropic filtering.
  pub fn max_anisotropy(&self) -> f32 {
    self.max_anisotropy
  }

  /// Whether programmable shaders are available.
  pub fn supports_shaders(&self) -> bool {
    self.shaders
  }

  /// Whether rendering to off-screen targets is available.
  pub fn supports_offscreen(&self) -> bool {
    self.offscreen
  }

  /// Whether multisampled off-screen targets can be resolved.
  pub fn supports_multisample_resolve(&self) -> bool {
    self.multisample_resolve
  }

  /// How the blend equation can be changed.
  pub fn blend_equation(&self) -> Support {
    self.blend_equation
  }

  /// How separate RGB and alpha blend factors can be set.
  pub fn blend_func_separate(&self) -> Support {
    self.blend_func_separate
  }

  /// Whether anisotropic texture filtering is available.
  pub fn supports_anisotropic_filtering(&self) -> bool {
    self.anisotropic_filtering
  }

  /// Whether buffer objects are only reachable through `GL_ARB_vertex_buffer_object`.
  pub fn arb_buffer_objects_only(&self) -> bool {
    self.arb_buffer_objects_only
  }

  /// Whether the legacy fixed-function pipeline drives transforms and colors.
  ///
  /// This is the case of every desktop context; ES contexts feed everything through shaders.
  pub fn uses_fixed_function(&self) -> bool {
    self.version.api == Api::Desktop
  }

  /// Whether transforms and point size are sent to shaders as built-in uniforms.
  pub fn uses_builtin_uniforms(&self) -> bool {
    self.version.is_es_at_least(2, 0)
  }
}

impl Default for Capabilities {
  fn default() -> Self {
    Capabilities::new(Vendor::Unknown, GLVersion::default(), Vec::<String>::new())
  }
}

fn read_extensions<D>(driver: &mut D, version: GLVersion) -> Vec<String>
where
  D: Driver,
{
  // GL_EXTENSIONS isn’t a valid glGetString name anymore in core 3.x+ profiles
  if version.is_desktop_at_least(3, 0) {
    let mut count = [0];
    driver.get_integer_v(gl::NUM_EXTENSIONS, &mut count);

    (0..count[0].max(0) as GLuint)
      .filter_map(|i| driver.get_string_i(gl::EXTENSIONS, i))
      .collect()
  } else {
    driver
      .get_string(gl::EXTENSIONS)
      .map(|exts| exts.split_whitespace().map(str::to_owned).collect())
      .unwrap_or_default()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::driver::mock::MockDriver;

  #[test]
  fn vendor_classification() {
    let cases = [
      ("NVIDIA Corporation", Vendor::Nvidia),
      ("Intel Open Source Technology Center", Vendor::Intel),
      ("ATI Technologies Inc.", Vendor::AtiAmd),
      ("unknown vendor xyz", Vendor::Unknown),
      ("AMD", Vendor::AtiAmd),
      ("Mesa/X.org", Vendor::MesaSoft),
      ("Apple Computer, Inc.", Vendor::Apple),
      ("Imagination Technologies", Vendor::Imagination),
      ("ARM", Vendor::Arm),
      ("Qualcomm", Vendor::Qualcomm),
      ("Broadcom", Vendor::Broadcom),
      ("Vivante Corporation", Vendor::Vivante),
      ("Microsoft Corporation", Vendor::Microsoft),
    ];

    for &(s, vendor) in &cases {
      assert_eq!(Vendor::from_vendor_string(Some(s)), vendor, "{}", s);
    }
  }

  #[test]
  fn vendor_matching_is_case_sensitive_and_ordered() {
    assert_eq!(Vendor::from_vendor_string(Some("nvidia")), Vendor::Unknown);
    assert_eq!(Vendor::from_vendor_string(Some("arm")), Vendor::Unknown);
    // "Intel" comes before "Mesa" in the priority list
    assert_eq!(
      Vendor::from_vendor_string(Some("Mesa Intel(R) UHD Graphics")),
      Vendor::Intel
    );
    assert_eq!(Vendor::from_vendor_string(None), Vendor::Unknown);
  }

  #[test]
  fn version_strings() {
    assert_eq!(
      GLVersion::parse("4.6.0 NVIDIA 535.54.03"),
      GLVersion {
        api: Api::Desktop,
        major: 4,
        minor: 6
      }
    );
    assert_eq!(
      GLVersion::parse("2.1 Mesa 20.0.8"),
      GLVersion {
        api: Api::Desktop,
        major: 2,
        minor: 1
      }
    );
    assert_eq!(
      GLVersion::parse("OpenGL ES 3.2 v1.r32p1"),
      GLVersion {
        api: Api::Es,
        major: 3,
        minor: 2
      }
    );
    assert_eq!(
      GLVersion::parse("OpenGL ES-CM 1.1"),
      GLVersion {
        api: Api::Es,
        major: 1,
        minor: 1
      }
    );
    assert_eq!(GLVersion::parse("garbage"), GLVersion::default());
  }

  #[test]
  fn legacy_desktop_relies_on_extensions() {
    let caps = Capabilities::new(
      Vendor::Intel,
      GLVersion::parse("1.3"),
      vec![
        "GL_ARB_vertex_buffer_object",
        "GL_EXT_blend_minmax",
        "GL_EXT_blend_subtract",
        "GL_EXT_blend_func_separate",
      ],
    );

    assert!(caps.arb_buffer_objects_only());
    assert_eq!(caps.blend_equation(), Support::Extension);
    assert_eq!(caps.blend_func_separate(), Support::Extension);
    assert!(!caps.supports_shaders());
    assert!(!caps.supports_offscreen());
    assert!(caps.uses_fixed_function());
    assert!(!caps.uses_builtin_uniforms());
  }

  #[test]
  fn bare_desktop_supports_nothing_optional() {
    let caps = Capabilities::new(Vendor::Unknown, GLVersion::parse("1.1"), Vec::<String>::new());

    assert!(!caps.arb_buffer_objects_only());
    assert_eq!(caps.blend_equation(), Support::Unsupported);
    assert_eq!(caps.blend_func_separate(), Support::Unsupported);
    assert!(!caps.supports_anisotropic_filtering());
  }

  #[test]
  fn gles2_uses_builtin_uniforms() {
    let caps = Capabilities::new(
      Vendor::Arm,
      GLVersion::parse("OpenGL ES 2.0"),
      Vec::<String>::new(),
    );

    assert!(caps.supports_shaders());
    assert!(caps.supports_offscreen());
    assert!(!caps.supports_multisample_resolve());
    assert_eq!(caps.blend_equation(), Support::Core);
    assert!(!caps.uses_fixed_function());
    assert!(caps.uses_builtin_uniforms());
  }

  #[test]
  fn extensions_listed_per_index_on_gl3() {
    let mut driver = MockDriver::desktop("3.3.0 NVIDIA")
      .with_extension("GL_EXT_texture_filter_anisotropic")
      .with_extension("GL_KHR_debug");
    let caps = Capabilities::detect(&mut driver);

    assert_eq!(caps.vendor(), Vendor::Nvidia);
    assert!(caps.has_extension("GL_KHR_debug"));
    assert!(caps.supports_anisotropic_filtering());
    assert!(caps.supports_multisample_resolve());
  }

  #[test]
  fn extensions_from_string_on_legacy_drivers() {
    let mut driver = MockDriver::desktop("2.1 Mesa 10.1")
      .with_vendor(Some("Mesa project"))
      .with_extension("GL_EXT_framebuffer_object")
      .with_extension("GL_ARB_draw_buffers");
    let caps = Capabilities::detect(&mut driver);

    assert_eq!(caps.vendor(), Vendor::MesaSoft);
    assert!(caps.has_extension("GL_EXT_framebuffer_object"));
    assert!(caps.supports_offscreen());
  }

  #[test]
  fn limits() {
    let mut driver = MockDriver::desktop("3.3.0")
      .with_extension("GL_EXT_texture_filter_anisotropic")
      .with_integers(gl::MAX_COLOR_ATTACHMENTS, &[8])
      .with_integers(gl::MAX_DRAW_BUFFERS, &[4])
      .with_integers(gl::MAX_TEXTURE_SIZE, &[16384]);
    let mut caps = Capabilities::detect(&mut driver);
    caps.query_limits(&mut driver);

    assert_eq!(caps.max_texture_size(), 16384);
    assert_eq!(caps.max_render_targets(), 4);
    assert_eq!(caps.max_anisotropy(), 16.);
  }

  #[test]
  fn limits_without_optional_features() {
    let mut driver = MockDriver::desktop("1.4").with_vendor(None);
    let mut caps = Capabilities::detect(&mut driver);
    caps.query_limits(&mut driver);

    assert_eq!(caps.vendor(), Vendor::Unknown);
    assert_eq!(caps.max_texture_size(), 8192);
    assert_eq!(caps.max_render_targets(), 0);
    assert_eq!(caps.max_anisotropy(), 1.);
  }
}
