use super::logging::LoggingConfig;
use super::math::Vec4;
use std::ffi::CStr;

pub const VERTEX_SHADER_SOURCE: &CStr = c"#version 330 core
layout (location = 0) in vec3 aPos;
void main()
{
    gl_Position = vec4(aPos.x, aPos.y, aPos.z, 1.0);
}
";

pub const FRAGMENT_SHADER_SOURCE: &CStr = c"#version 330 core
out vec4 FragColor;
void main()
{
    FragColor = vec4(1.0f, 0.5f, 0.2f, 1.0f);
}
";

/// Window and context parameters, fixed before the window exists.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    /// Ignored in fullscreen, where the desktop mode decides the size.
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    /// Requested (major, minor) core profile version.
    pub gl_version: (u8, u8),
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "LearnOpenGL".to_string(),
            width: 800,
            height: 600,
            fullscreen: false,
            gl_version: (3, 3),
            vsync: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShaderSources {
    pub vertex: &'static CStr,
    pub fragment: &'static CStr,
}

impl Default for ShaderSources {
    fn default() -> Self {
        Self {
            vertex: VERTEX_SHADER_SOURCE,
            fragment: FRAGMENT_SHADER_SOURCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub clear_color: Vec4,
    pub shaders: ShaderSources,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_color: Vec4::new(0.2, 0.3, 0.3, 1.0),
            shaders: ShaderSources::default(),
        }
    }
}

/// Everything the entry routine needs, passed down explicitly.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub render: RenderConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Applies `QUAD_*` environment overrides on top of `self`.
    pub fn with_env_overrides(self) -> AppConfig {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Applies overrides from `lookup`. Unparsable values are logged and skipped.
    pub fn with_overrides<F>(mut self, lookup: F) -> AppConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("QUAD_FULLSCREEN") {
            match parse_flag(&v) {
                Some(b) => self.window.fullscreen = b,
                None => log::warn!("ignoring QUAD_FULLSCREEN={v:?}"),
            }
        }
        if let Some(v) = lookup("QUAD_VSYNC") {
            match parse_flag(&v) {
                Some(b) => self.window.vsync = b,
                None => log::warn!("ignoring QUAD_VSYNC={v:?}"),
            }
        }
        if let Some(v) = lookup("QUAD_WIDTH") {
            match v.parse::<u32>() {
                Ok(w) if w > 0 => self.window.width = w,
                _ => log::warn!("ignoring QUAD_WIDTH={v:?}"),
            }
        }
        if let Some(v) = lookup("QUAD_HEIGHT") {
            match v.parse::<u32>() {
                Ok(h) if h > 0 => self.window.height = h,
                _ => log::warn!("ignoring QUAD_HEIGHT={v:?}"),
            }
        }
        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
