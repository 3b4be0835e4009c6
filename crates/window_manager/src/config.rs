//! Window manager tunables and their TOML representation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Size, Viewport};

/// Strategy used to hand out stacking values from the shared counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum ZIndexPolicy {
    /// Values stop growing at `ceiling`; windows raised after saturation share it.
    Saturating {
        /// Highest value the counter hands out.
        ceiling: u32,
    },
    /// Values keep growing, so every raise is strictly above the previous one.
    Unbounded,
}

impl Default for ZIndexPolicy {
    fn default() -> Self {
        Self::Saturating { ceiling: 99 }
    }
}

impl ZIndexPolicy {
    /// Value handed to a window drawn from `next`.
    pub fn assign(self, next: u32) -> u32 {
        match self {
            Self::Saturating { ceiling } => next.min(ceiling),
            Self::Unbounded => next,
        }
    }

    /// Counter value after handing out `next`.
    pub fn advance(self, next: u32) -> u32 {
        match self {
            Self::Saturating { ceiling } => next.saturating_add(1).min(ceiling),
            Self::Unbounded => next.saturating_add(1),
        }
    }
}

#[derive(Debug, Error)]
/// Configuration loading and validation failures.
pub enum ConfigError {
    /// The TOML document could not be parsed into a config.
    #[error("failed to parse window manager config: {0}")]
    Parse(#[from] toml::de::Error),
    /// Minimum window dimensions must be positive.
    #[error("minimum window size must be positive, got {width}x{height}")]
    NonPositiveMinimum {
        /// Configured minimum width.
        width: i32,
        /// Configured minimum height.
        height: i32,
    },
    /// The default size is smaller than the minimum.
    #[error("default window size {default_width}x{default_height} is below the minimum")]
    DefaultBelowMinimum {
        /// Configured default width.
        default_width: i32,
        /// Configured default height.
        default_height: i32,
    },
    /// A pixel reservation is negative.
    #[error("`{field}` must not be negative, got {value}")]
    NegativeReservation {
        /// Offending key.
        field: &'static str,
        /// Offending value.
        value: i32,
    },
    /// Lifecycle timers must have a duration.
    #[error("transition duration must be greater than zero")]
    ZeroTransition,
    /// The saturation ceiling cannot be below the first handed-out value.
    #[error("z-index ceiling {ceiling} is below the initial z-index {initial}")]
    CeilingBelowInitial {
        /// Configured ceiling.
        ceiling: u32,
        /// Configured initial value.
        initial: u32,
    },
    /// Transient elevation must stay above every committed value.
    #[error("interaction z-index {interaction} must exceed the z-index ceiling {ceiling}")]
    InteractionBelowCeiling {
        /// Configured elevation.
        interaction: u32,
        /// Configured ceiling.
        ceiling: u32,
    },
}

/// Tunables for placement, stacking and lifecycle timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowManagerConfig {
    /// Smallest size a window can take at any time.
    pub min_size: Size,
    /// Size used when an open request does not supply one.
    pub default_size: Size,
    /// Height of the strip reserved for the taskbar at the bottom of the surface.
    pub taskbar_height: i32,
    /// Margin kept on the top, left and right edges.
    pub edge_margin: i32,
    /// Cascade offset of the first window.
    pub cascade_origin: i32,
    /// Cascade offset added per open window.
    pub cascade_step: i32,
    /// First value handed out by the stacking counter.
    pub initial_z_index: u32,
    /// Stacking counter policy.
    pub z_index: ZIndexPolicy,
    /// Transient stacking value while a window is dragged or resized.
    pub interaction_z_index: u32,
    /// Duration of every lifecycle transition.
    pub transition_ms: u64,
    /// Whether restoring a minimized window also focuses it.
    pub restore_focuses: bool,
    /// Surface assumed until the host reports one.
    pub default_viewport: Viewport,
}

impl Default for WindowManagerConfig {
    fn default() -> Self {
        Self {
            min_size: Size::new(300, 300),
            default_size: Size::new(640, 480),
            taskbar_height: 48,
            edge_margin: 20,
            cascade_origin: 100,
            cascade_step: 30,
            initial_z_index: 1,
            z_index: ZIndexPolicy::default(),
            interaction_z_index: 999,
            transition_ms: 300,
            restore_focuses: false,
            default_viewport: Viewport::new(1280, 800),
        }
    }
}

impl WindowManagerConfig {
    /// Parses and validates a TOML document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed documents or unknown keys, and the matching
    /// validation error when a value is out of range.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_size.width <= 0 || self.min_size.height <= 0 {
            return Err(ConfigError::NonPositiveMinimum {
                width: self.min_size.width,
                height: self.min_size.height,
            });
        }
        if self.default_size.width < self.min_size.width
            || self.default_size.height < self.min_size.height
        {
            return Err(ConfigError::DefaultBelowMinimum {
                default_width: self.default_size.width,
                default_height: self.default_size.height,
            });
        }
        for (field, value) in [
            ("taskbar_height", self.taskbar_height),
            ("edge_margin", self.edge_margin),
        ] {
            if value < 0 {
                return Err(ConfigError::NegativeReservation { field, value });
            }
        }
        if self.transition_ms == 0 {
            return Err(ConfigError::ZeroTransition);
        }
        if let ZIndexPolicy::Saturating { ceiling } = self.z_index {
            if ceiling < self.initial_z_index {
                return Err(ConfigError::CeilingBelowInitial {
                    ceiling,
                    initial: self.initial_z_index,
                });
            }
            if self.interaction_z_index <= ceiling {
                return Err(ConfigError::InteractionBelowCeiling {
                    interaction: self.interaction_z_index,
                    ceiling,
                });
            }
        }
        Ok(())
    }
}
