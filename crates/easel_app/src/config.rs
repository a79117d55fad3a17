//! Canvas construction arguments.
//!
//! [`CanvasConfig`] is handed to the application when the canvas is realized
//! and dropped right after. It can be built in code or loaded from JSON:
//!
//! ```rust,ignore
//! let config = CanvasConfig::from_json_str(r#"{ "title": "Plot", "size": [640, 480] }"#)?;
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use easel_core::Result;

/// Settings used by a backend to create its native surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub title: String,
    /// Initial `(width, height)` in pixels.
    pub size: (u32, u32),
    /// Initial `(x, y)`; `None` lets the toolkit decide.
    pub position: Option<(i32, i32)>,
    /// Show the surface as soon as it is created.
    pub show: bool,
    pub resizable: bool,
    pub decorate: bool,
    pub vsync: bool,
    /// Backend-specific options, passed through untouched.
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            title: "Easel canvas".into(),
            size: (800, 600),
            position: None,
            show: false,
            resizable: true,
            decorate: true,
            vsync: false,
            extra: BTreeMap::new(),
        }
    }
}

impl CanvasConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    #[must_use]
    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.position = Some((x, y));
        self
    }

    #[must_use]
    pub fn with_visible(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    #[must_use]
    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    #[must_use]
    pub fn with_decorations(mut self, decorate: bool) -> Self {
        self.decorate = decorate;
        self
    }

    #[must_use]
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Reads a boolean backend option, `false` when absent.
    #[must_use]
    pub fn extra_flag(&self, key: &str) -> bool {
        self.extra
            .get(key)
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false)
    }
}
