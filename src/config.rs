//! Tunable simulation parameters.
//!
//! Every field has a default, so a configuration file only needs to name the
//! values it overrides.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::category::Team;
use crate::{GRAVITY_PULL, MAX_FRAME_SECONDS, MIN_HEIGHT, NOMINAL_FRAME_SECONDS};

/// Errors raised while loading a [`WorldConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration `{path}`")]
    Read {
        /// Path as given by the caller.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The document is not valid JSON for [`WorldConfig`].
    #[error("failed to parse configuration")]
    Parse(#[from] serde_json::Error),
    /// `nominal_frame_seconds` is zero, negative, or not finite.
    #[error("nominal frame duration must be positive, got {0}")]
    NonPositiveFrame(f32),
    /// `max_frame_seconds` lies outside `(0, MAX_FRAME_SECONDS_LIMIT]`.
    #[error("maximum frame duration must lie in (0, {limit}], got {0}", limit = MAX_FRAME_SECONDS_LIMIT)]
    FrameBound(f32),
    /// The named field overflowed to infinity or NaN.
    #[error("`{0}` must be finite")]
    NonFinite(&'static str),
}

/// Largest `max_frame_seconds` a configuration may request.
pub const MAX_FRAME_SECONDS_LIMIT: f32 = 10.0;

/// World-level physics and timing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Characters falling below this height are killed outright.
    pub min_height: f32,
    /// Gravity handed to newly created walking characters.
    pub gravity: Vec3,
    /// Frame duration at which contact damage is applied unweighted.
    pub nominal_frame_seconds: f32,
    /// Upper bound on a single frame delta.
    pub max_frame_seconds: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            min_height: MIN_HEIGHT,
            gravity: Vec3::new(0.0, GRAVITY_PULL, 0.0),
            nominal_frame_seconds: NOMINAL_FRAME_SECONDS,
            max_frame_seconds: MAX_FRAME_SECONDS,
        }
    }
}

impl WorldConfig {
    /// Parses a JSON configuration document.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON,
    /// [`ConfigError::NonFinite`] for an infinite height or gravity,
    /// [`ConfigError::NonPositiveFrame`] for a non-positive nominal frame and
    /// [`ConfigError::FrameBound`] for a maximum frame outside
    /// `(0, MAX_FRAME_SECONDS_LIMIT]`.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validated()
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    /// Returns [`ConfigError::Read`] when the file cannot be read, otherwise
    /// as [`WorldConfig::from_json_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = path.as_ref();
        let json = std::fs::read_to_string(file).map_err(|source| ConfigError::Read {
            path: file.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Character parameters using this world's gravity.
    #[must_use]
    pub fn character(&self, id: impl Into<String>, team: Team, position: Vec3) -> CharacterParams {
        CharacterParams {
            id: id.into(),
            team,
            position,
            gravity: self.gravity,
            ..CharacterParams::default()
        }
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if !self.min_height.is_finite() {
            return Err(ConfigError::NonFinite("min_height"));
        }
        if !self.gravity.is_finite() {
            return Err(ConfigError::NonFinite("gravity"));
        }
        if !(self.nominal_frame_seconds.is_finite() && self.nominal_frame_seconds > 0.0) {
            return Err(ConfigError::NonPositiveFrame(self.nominal_frame_seconds));
        }
        if !(self.max_frame_seconds > 0.0 && self.max_frame_seconds <= MAX_FRAME_SECONDS_LIMIT) {
            return Err(ConfigError::FrameBound(self.max_frame_seconds));
        }
        Ok(self)
    }
}

/// Construction parameters of a [`Character`](crate::entity::Character).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterParams {
    /// Unique entity identifier.
    pub id: String,
    /// Allegiance used for damage filtering.
    pub team: Team,
    /// Spawn position of the body centre.
    pub position: Vec3,
    /// Pitch, yaw, and roll in degrees.
    pub angles: Vec3,
    /// Maximum and starting life.
    pub life: f32,
    /// Contact damage per nominal frame.
    pub damage: f32,
    /// Walking speed in units per second.
    pub speed: f32,
    /// Radius of the collision sphere.
    pub radius: f32,
    /// Constant acceleration applied while airborne.
    pub gravity: Vec3,
    /// Time spent DYING before the death side effects fire.
    pub dying_period_ms: f32,
    /// Blood decals kept before the oldest is reused.
    pub decal_pool_size: usize,
    /// Keyframes in the character's model.
    pub frame_count: usize,
    /// Keyframes advanced per second.
    pub animation_speed: f32,
}

impl Default for CharacterParams {
    fn default() -> Self {
        Self {
            id: "character".to_owned(),
            team: Team::NEUTRAL,
            position: Vec3::ZERO,
            angles: Vec3::ZERO,
            life: 10.0,
            damage: 0.0,
            speed: 120.0,
            radius: 16.0,
            gravity: Vec3::new(0.0, GRAVITY_PULL, 0.0),
            dying_period_ms: 0.0,
            decal_pool_size: 3,
            frame_count: 1,
            animation_speed: 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    fn partial_documents_keep_defaults() {
        let config = WorldConfig::from_json_str(r#"{"min_height": -50.0}"#)
            .unwrap_or_else(|err| panic!("valid config rejected: {err}"));
        assert_relative_eq!(config.min_height, -50.0);
        assert_relative_eq!(config.nominal_frame_seconds, NOMINAL_FRAME_SECONDS);
    }

    #[rstest]
    #[case::malformed("{min_height")]
    #[case::zero_frame(r#"{"nominal_frame_seconds": 0.0}"#)]
    #[case::huge_max_frame(r#"{"max_frame_seconds": 1e30}"#)]
    #[case::negative_max_frame(r#"{"max_frame_seconds": -1.0}"#)]
    #[case::zero_max_frame(r#"{"max_frame_seconds": 0.0}"#)]
    #[case::overflowing_height(r#"{"min_height": -1e39}"#)]
    #[case::overflowing_gravity(r#"{"gravity": [0.0, 1e39, 0.0]}"#)]
    fn bad_documents_are_rejected(#[case] json: &str) {
        assert!(WorldConfig::from_json_str(json).is_err());
    }

    #[rstest]
    fn rejected_frame_bounds_name_the_value() {
        let err = WorldConfig::from_json_str(r#"{"max_frame_seconds": -1.0}"#)
            .err()
            .map(|err| err.to_string());
        assert_eq!(
            err.as_deref(),
            Some("maximum frame duration must lie in (0, 10], got -1")
        );
    }

    #[rstest]
    fn missing_files_report_their_path() {
        let err = WorldConfig::from_path("/definitely/not/here.json")
            .err()
            .map(|err| err.to_string());
        assert_eq!(
            err.as_deref(),
            Some("failed to read configuration `/definitely/not/here.json`")
        );
    }

    #[rstest]
    fn character_params_inherit_world_gravity() {
        let config = WorldConfig {
            gravity: Vec3::new(0.0, -10.0, 0.0),
            ..WorldConfig::default()
        };
        let params = config.character("scout", Team(1), Vec3::ONE);
        assert_eq!(params.gravity, Vec3::new(0.0, -10.0, 0.0));
        assert_eq!(params.team, Team(1));
    }
}
