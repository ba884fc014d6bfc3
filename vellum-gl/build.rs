use gl_generator::{Api, Fallbacks, Profile, Registry, StructGenerator};
use std::env;
use std::fs::File;
use std::path::Path;

// Extensions the state cache falls back to when the core version doesn’t cover a feature.
const EXTENSIONS: [&str; 12] = [
  "GL_ARB_draw_buffers",
  "GL_ARB_draw_elements_base_vertex",
  "GL_ARB_framebuffer_object",
  "GL_ARB_vertex_buffer_object",
  "GL_EXT_blend_func_separate",
  "GL_EXT_blend_minmax",
  "GL_EXT_blend_subtract",
  "GL_EXT_framebuffer_blit",
  "GL_EXT_framebuffer_multisample",
  "GL_EXT_framebuffer_object",
  "GL_EXT_texture_filter_anisotropic",
  "GL_KHR_debug",
];

fn main() {
  println!("cargo:rerun-if-changed=build.rs");

  let dest = env::var("OUT_DIR").unwrap();
  let mut output = File::create(&Path::new(&dest).join("gl_bindings.rs")).unwrap();

  // compatibility profile: the fixed-function entry points are needed on legacy desktop drivers,
  // and fallbacks are resolved by hand once the driver version is known
  Registry::new(
    Api::Gl,
    (4, 6),
    Profile::Compatibility,
    Fallbacks::None,
    EXTENSIONS,
  )
  .write_bindings(StructGenerator, &mut output)
  .unwrap();
}
