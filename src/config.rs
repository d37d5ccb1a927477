//! Engine configuration: presets for the two cloud variants, JSON overrides
//! and validation.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CloudError, Result};
use crate::layout::galaxy::GalaxyConfig;
use crate::layout::sphere::SphereConfig;
use crate::layout::style::StyleConfig;
use crate::motion::scheduler::MotionConfig;
use crate::motion::showcase::ShowcaseConfig;
use crate::render::CloudVariant;

pub const DEFAULT_EMPTY_MESSAGE: &str = "No items found.";

/// Upper bound for any configured delay, interval or hold.
pub const MAX_DURATION_SECS: f32 = 3600.0;

fn check_duration(name: &str, secs: f32) -> std::result::Result<(), String> {
    if !secs.is_finite() || !(0.0..=MAX_DURATION_SECS).contains(&secs) {
        return Err(format!(
            "{} must be between 0 and {} seconds (got {})",
            name, MAX_DURATION_SECS, secs
        ));
    }
    Ok(())
}

/// Everything the engine needs besides the labels.
///
/// Deserializes with `#[serde(default)]`, so a partial JSON document only
/// overrides the fields it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    pub variant: CloudVariant,
    pub style: StyleConfig,
    pub sphere: SphereConfig,
    pub galaxy: GalaxyConfig,
    pub motion: MotionConfig,
    pub showcase: ShowcaseConfig,
    /// First route segment, e.g. `keywords` → `/keywords/<slug>`
    pub category: String,
    pub empty_message: String,
}

impl CloudConfig {
    /// Rotating 3D keyword globe.
    pub fn keyword_sphere() -> Self {
        Self {
            variant: CloudVariant::Sphere,
            style: StyleConfig::keyword(),
            sphere: SphereConfig::default(),
            galaxy: GalaxyConfig::default(),
            motion: MotionConfig::default(),
            showcase: ShowcaseConfig::default(),
            category: "keywords".into(),
            empty_message: DEFAULT_EMPTY_MESSAGE.into(),
        }
    }

    /// Flat tag galaxy with the periodic showcase spotlight.
    pub fn tag_galaxy() -> Self {
        Self {
            variant: CloudVariant::Galaxy,
            style: StyleConfig::tag(),
            showcase: ShowcaseConfig {
                enabled: true,
                ..ShowcaseConfig::default()
            },
            category: "tags".into(),
            ..Self::keyword_sphere()
        }
    }

    /// Preset for `variant`.
    pub fn for_variant(variant: CloudVariant) -> Self {
        match variant {
            CloudVariant::Sphere => Self::keyword_sphere(),
            CloudVariant::Galaxy => Self::tag_galaxy(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CloudError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loading cloud config from {}", path.display());
        Self::from_json_str(&json)
    }

    /// Reject values the layout or scheduler cannot work with.
    pub fn validate(&self) -> Result<()> {
        self.check().map_err(|reason| {
            log::warn!("rejected cloud config: {}", reason);
            CloudError::InvalidConfig(reason)
        })
    }

    fn check(&self) -> std::result::Result<(), String> {
        if self.style.palette.is_empty() {
            return Err("palette must not be empty".into());
        }
        let s = &self.sphere;
        if !s.radius_min.is_finite() || !s.radius_max.is_finite() {
            return Err("sphere radii must be finite".into());
        }
        if s.radius_min <= 0.0 || s.radius_max <= 0.0 {
            return Err(format!(
                "sphere radii must be positive (min {}, max {})",
                s.radius_min, s.radius_max
            ));
        }
        if s.radius_min > s.radius_max {
            return Err(format!(
                "radius_min {} exceeds radius_max {}",
                s.radius_min, s.radius_max
            ));
        }
        let m = &self.motion;
        if !m.speed_x.is_finite() || !m.speed_y.is_finite() {
            return Err("rotation speeds must be finite".into());
        }
        if m.speed_x < 0.0 || m.speed_y < 0.0 {
            return Err("rotation speeds must not be negative".into());
        }
        check_duration("resume_delay_secs", m.resume_delay_secs)?;
        check_duration("first_frame_dt", m.first_frame_dt)?;
        let sc = &self.showcase;
        check_duration("interval_secs", sc.interval_secs)?;
        check_duration("hold_secs", sc.hold_secs)?;
        if sc.enabled && sc.top_k == 0 {
            return Err("showcase top_k must be at least 1".into());
        }
        let width = self.galaxy.container_width_px;
        if !width.is_finite() || width <= 0.0 {
            return Err("galaxy container width must be positive".into());
        }
        if self.category.trim().is_empty() {
            return Err("category must not be empty".into());
        }
        Ok(())
    }
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self::keyword_sphere()
    }
}
