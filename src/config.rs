use glutin::{Api, GlProfile, GlRequest};
use glutin::dpi::LogicalSize;

/// Settings for the window, its OpenGL context and the frame clear color.
///
/// Everything has a fixed default; the program itself always runs with
/// `Config::default()`. Override individual fields through the builder:
///
/// ```
/// use hello_triangle::ConfigBuilder;
///
/// let config = ConfigBuilder::default()
///     .window_title("Somewhere else")
///     .build()
///     .unwrap();
///
/// assert_eq!(config.window_title, "Somewhere else");
/// assert_eq!(config.window_size, (800, 600));
/// assert!(!config.resizable);
/// ```
#[derive(Builder, Clone, Debug, PartialEq)]
#[builder(default)]
pub struct Config {
    #[builder(setter(into))]
    pub window_title: String,
    /// Logical size of the window. The viewport starts out at the matching physical size.
    pub window_size: (u32, u32),
    /// Passed to the window as a hint. The viewport still follows the framebuffer if the window
    /// manager resizes the window anyway.
    pub resizable: bool,
    /// Requested OpenGL version, always with the core profile.
    pub gl_version: (u8, u8),
    pub clear_color: [f32; 4],
}

impl Default for Config {
    fn default() -> Self {
        Config {
            window_title: "KREWER TEST".to_string(),
            window_size: (800, 600),
            resizable: false,
            gl_version: (3, 3),
            clear_color: [101.0 / 255.0, 33.0 / 255.0, 189.0 / 255.0, 1.0],
        }
    }
}

impl Config {
    pub fn logical_size(&self) -> LogicalSize<u32> {
        LogicalSize::new(self.window_size.0, self.window_size.1)
    }

    pub fn gl_request(&self) -> GlRequest {
        GlRequest::Specific(Api::OpenGl, self.gl_version)
    }

    pub fn gl_profile(&self) -> GlProfile {
        GlProfile::Core
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_a_fixed_800_by_600_window() {
        let config = Config::default();
        assert_eq!(config.window_title, "KREWER TEST");
        assert_eq!(config.logical_size(), LogicalSize::new(800, 600));
        assert!(!config.resizable);
    }

    #[test]
    fn requests_gl_3_3_core() {
        let config = Config::default();
        assert!(matches!(config.gl_request(), GlRequest::Specific(Api::OpenGl, (3, 3))));
        assert!(matches!(config.gl_profile(), GlProfile::Core));
    }

    #[test]
    fn clear_color_is_opaque_purple() {
        let [r, g, b, a] = Config::default().clear_color;
        assert!((r - 0.396).abs() < 1e-3);
        assert!((g - 0.129).abs() < 1e-3);
        assert!((b - 0.741).abs() < 1e-3);
        assert_eq!(a, 1.0);
    }

    #[test]
    fn requested_version_follows_the_config() {
        let config = ConfigBuilder::default().gl_version((4, 1)).build().unwrap();
        assert!(matches!(config.gl_request(), GlRequest::Specific(Api::OpenGl, (4, 1))));
    }

    #[test]
    fn builder_falls_back_to_defaults() {
        let config = ConfigBuilder::default()
            .window_size((320, 240))
            .build()
            .unwrap();
        assert_eq!(config.window_size, (320, 240));
        assert_eq!(config.gl_version, (3, 3));
        assert_eq!(config.clear_color, Config::default().clear_color);
    }
}
