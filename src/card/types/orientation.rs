//! Orientation-driven tilt
//!
//! Orientation samples (`alpha`, `beta`, `gamma`, in degrees) come from an
//! [`crate::card::sources::OrientationSource`]. They are mapped to a bounded
//! card rotation and a matching drop shadow. A [`TiltBlend`] eases the live
//! tilt in and out so the card never snaps when edit mode or the gyroscope
//! toggle changes.

use std::f32::consts::PI;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// One orientation reading. Any component may be missing.
#[derive(Message, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OrientationSample {
    #[serde(default)]
    pub alpha: Option<f32>,
    #[serde(default)]
    pub beta: Option<f32>,
    #[serde(default)]
    pub gamma: Option<f32>,
}

impl OrientationSample {
    pub fn new(alpha: f32, beta: f32, gamma: f32) -> Self {
        Self {
            alpha: Some(alpha),
            beta: Some(beta),
            gamma: Some(gamma),
        }
    }

    /// `beta` and `gamma` when both are present.
    pub fn tilt(&self) -> Option<(f32, f32)> {
        Some((self.beta?, self.gamma?))
    }
}

/// Outcome of asking the platform for sensor access.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    #[default]
    Unknown,
    Granted,
    Denied,
}

/// Orientation adapter state.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GyroscopeState {
    pub latest: OrientationSample,
    pub is_supported: bool,
    pub permission: PermissionState,
    /// User toggle.
    pub enabled: bool,
}

impl Default for GyroscopeState {
    fn default() -> Self {
        Self {
            latest: OrientationSample::default(),
            is_supported: false,
            permission: PermissionState::Unknown,
            enabled: true,
        }
    }
}

impl GyroscopeState {
    /// Whether samples should be read this frame.
    pub fn should_poll(&self, is_editing: bool) -> bool {
        self.enabled
            && self.is_supported
            && self.permission == PermissionState::Granted
            && !is_editing
    }

    /// Whether the card should be tilting toward the latest sample.
    pub fn tilt_active(&self, is_editing: bool) -> bool {
        self.enabled && !is_editing
    }
}

/// Divisor applied to raw sensor degrees.
pub const TILT_SENSITIVITY: f32 = 6.0;

/// Largest flat-card rotation in degrees.
pub const MAX_TILT_DEGREES: f32 = 15.0;

/// Largest 3D card rotation in radians.
pub const MAX_TILT_RADIANS: f32 = PI / 12.0;

/// Card rotation in degrees (X from beta, Y from gamma).
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct TiltAngles {
    pub x_deg: f32,
    pub y_deg: f32,
}

impl TiltAngles {
    pub fn from_sample(sample: &OrientationSample) -> Option<Self> {
        let (beta, gamma) = sample.tilt()?;
        Some(Self {
            x_deg: (beta / TILT_SENSITIVITY).clamp(-MAX_TILT_DEGREES, MAX_TILT_DEGREES),
            y_deg: (-gamma / TILT_SENSITIVITY).clamp(-MAX_TILT_DEGREES, MAX_TILT_DEGREES),
        })
    }

    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            x_deg: self.x_deg * factor,
            y_deg: self.y_deg * factor,
        }
    }

    pub fn to_rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.x_deg.to_radians(),
            self.y_deg.to_radians(),
            0.0,
        )
    }
}

/// 3D card rotation in radians, `(x, y)`.
pub fn tilt_radians_3d(sample: &OrientationSample) -> Option<Vec2> {
    let (beta, gamma) = sample.tilt()?;
    Some(Vec2::new(
        (beta.to_radians() / TILT_SENSITIVITY).clamp(-MAX_TILT_RADIANS, MAX_TILT_RADIANS),
        (-gamma.to_radians() / TILT_SENSITIVITY).clamp(-MAX_TILT_RADIANS, MAX_TILT_RADIANS),
    ))
}

/// Drop shadow under the flat card, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardShadow {
    pub offset_x: f32,
    pub offset_y: f32,
    pub blur: f32,
    pub opacity: f32,
}

impl CardShadow {
    pub const RESTING: CardShadow = CardShadow {
        offset_x: 0.0,
        offset_y: 8.0,
        blur: 32.0,
        opacity: 0.1,
    };

    pub fn from_sample(sample: &OrientationSample) -> Option<Self> {
        let (beta, gamma) = sample.tilt()?;
        let tilt_x = beta / TILT_SENSITIVITY;
        let tilt_y = gamma / TILT_SENSITIVITY;
        Some(Self {
            offset_x: -tilt_y * 2.0,
            offset_y: tilt_x * 1.5 + 8.0,
            blur: tilt_x.abs() + tilt_y.abs() + 32.0,
            opacity: (0.1 + (tilt_x.abs() + tilt_y.abs()) / 60.0).min(0.3),
        })
    }

    pub fn lerp(&self, other: &CardShadow, t: f32) -> Self {
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Self {
            offset_x: mix(self.offset_x, other.offset_x),
            offset_y: mix(self.offset_y, other.offset_y),
            blur: mix(self.blur, other.blur),
            opacity: mix(self.opacity, other.opacity),
        }
    }
}

impl Default for CardShadow {
    fn default() -> Self {
        Self::RESTING
    }
}

pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Eased factor in `[0, 1]` scaling the live tilt.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct TiltBlend {
    pub value: f32,
    pub from: f32,
    pub to: f32,
    pub elapsed: f32,
    pub duration: f32,
}

impl TiltBlend {
    pub const DURATION: f32 = 0.8;

    pub fn at(value: f32) -> Self {
        let value = value.clamp(0.0, 1.0);
        Self {
            value,
            from: value,
            to: value,
            elapsed: Self::DURATION,
            duration: Self::DURATION,
        }
    }

    /// Start easing toward live tilt (`true`) or rest (`false`).
    pub fn retarget(&mut self, active: bool) {
        let target = if active { 1.0 } else { 0.0 };
        if self.to == target {
            return;
        }
        self.from = self.value;
        self.to = target;
        self.elapsed = 0.0;
    }

    pub fn tick(&mut self, dt: f32) {
        if self.is_settled() {
            return;
        }
        self.elapsed = (self.elapsed + dt).min(self.duration);
        let t = if self.duration > 0.0 {
            self.elapsed / self.duration
        } else {
            1.0
        };
        self.value = self.from + (self.to - self.from) * ease_out_cubic(t);
    }

    pub fn is_settled(&self) -> bool {
        self.elapsed >= self.duration
    }
}

impl Default for TiltBlend {
    fn default() -> Self {
        Self::at(1.0)
    }
}
