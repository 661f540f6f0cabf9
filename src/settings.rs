//! Game settings
//!
//! Cosmetic only; nothing here changes gameplay. Read from a JSON
//! `<script id="settings">` block in the page, falling back to defaults.

use serde::{Deserialize, Serialize};

/// Page background treatment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    #[default]
    None,
    Image1,
    Image2,
    Image3,
}

impl Background {
    /// Selector option value
    pub fn as_str(&self) -> &'static str {
        match self {
            Background::None => "none",
            Background::Image1 => "image1",
            Background::Image2 => "image2",
            Background::Image3 => "image3",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" => Some(Background::None),
            "image1" => Some(Background::Image1),
            "image2" => Some(Background::Image2),
            "image3" => Some(Background::Image3),
            _ => None,
        }
    }

    /// Value for `background-image`
    pub fn css_image(&self) -> &'static str {
        match self {
            Background::None => "none",
            Background::Image1 => "url('photo/japan.jpg')",
            Background::Image2 => "url('photo/korean.jpg')",
            Background::Image3 => "url('photo/taiwan.jpg')",
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub background: Background,
    /// Fading ball trail
    pub trails: bool,
    /// Expanding markers on brick hits
    pub explosions: bool,
    /// Fixed RNG seed for reproducible layouts (otherwise time-based)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            background: Background::None,
            trails: true,
            explosions: true,
            seed: None,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse, logging and falling back to defaults on bad input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings");
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings ({}), using defaults", e);
                Self::default()
            }
        }
    }
}
