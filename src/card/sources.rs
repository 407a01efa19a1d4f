//! Orientation sources
//!
//! Desktop machines have no orientation sensor, so the card can be driven by
//! one of several stand-ins selected at startup:
//!
//! - [`NoSensor`]: reports unsupported; the gyroscope toggle stays hidden
//! - [`PointerTilt`]: the cursor position relative to the window center
//! - [`SimulatedSway`]: a slow sinusoidal drift with a little random jitter
//! - [`ReplayOrientation`]: recorded samples loaded from a RON file, looped

use std::path::Path;

use bevy::log::{info, warn};
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::types::{OrientationSample, OrientationSetting, PermissionState};

/// Per-frame input handed to a source.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SourceInput {
    /// Seconds since startup.
    pub elapsed: f32,
    /// Seconds since the previous frame.
    pub delta: f32,
    /// Pointer position in `[-1, 1]` on both axes (window center is zero,
    /// +Y down), if the pointer is over the window.
    pub pointer: Option<Vec2>,
}

pub trait OrientationSource: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    fn is_supported(&self) -> bool;

    /// Ask for sensor access. Called once when the gyroscope is enabled.
    fn request_permission(&mut self) -> PermissionState;

    /// Latest reading, if one is available this frame.
    fn poll(&mut self, input: &SourceInput) -> Option<OrientationSample>;
}

/// No orientation hardware.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSensor;

impl OrientationSource for NoSensor {
    fn name(&self) -> &'static str {
        "none"
    }

    fn is_supported(&self) -> bool {
        false
    }

    fn request_permission(&mut self) -> PermissionState {
        PermissionState::Denied
    }

    fn poll(&mut self, _input: &SourceInput) -> Option<OrientationSample> {
        None
    }
}

/// Maps the pointer to a device tilt. The window edges correspond to
/// `±max_degrees` of beta (vertical) and gamma (horizontal).
#[derive(Debug, Clone, Copy)]
pub struct PointerTilt {
    pub max_degrees: f32,
}

impl Default for PointerTilt {
    fn default() -> Self {
        Self { max_degrees: 90.0 }
    }
}

impl OrientationSource for PointerTilt {
    fn name(&self) -> &'static str {
        "pointer"
    }

    fn is_supported(&self) -> bool {
        true
    }

    fn request_permission(&mut self) -> PermissionState {
        PermissionState::Granted
    }

    fn poll(&mut self, input: &SourceInput) -> Option<OrientationSample> {
        let pointer = input.pointer?.clamp(Vec2::splat(-1.0), Vec2::splat(1.0));
        Some(OrientationSample::new(
            0.0,
            pointer.y * self.max_degrees,
            pointer.x * self.max_degrees,
        ))
    }
}

/// Sinusoidal drift around the resting pose.
#[derive(Debug, Clone)]
pub struct SimulatedSway {
    pub amplitude: f32,
    pub jitter: f32,
    rng: StdRng,
}

impl SimulatedSway {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            amplitude: 40.0,
            jitter: 1.5,
            rng,
        }
    }
}

impl Default for SimulatedSway {
    fn default() -> Self {
        Self::new()
    }
}

impl OrientationSource for SimulatedSway {
    fn name(&self) -> &'static str {
        "sway"
    }

    fn is_supported(&self) -> bool {
        true
    }

    fn request_permission(&mut self) -> PermissionState {
        PermissionState::Granted
    }

    fn poll(&mut self, input: &SourceInput) -> Option<OrientationSample> {
        let t = input.elapsed;
        let jitter = self.jitter.max(0.0);
        let (jb, jg) = if jitter > 0.0 {
            (
                self.rng.gen_range(-jitter..=jitter),
                self.rng.gen_range(-jitter..=jitter),
            )
        } else {
            (0.0, 0.0)
        };
        Some(OrientationSample::new(
            (t * 10.0) % 360.0,
            (t * 0.7).sin() * self.amplitude + jb,
            (t * 0.5).cos() * self.amplitude + jg,
        ))
    }
}

/// Recorded samples, as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayFile {
    /// Seconds between consecutive samples.
    #[serde(default = "default_replay_interval")]
    pub interval: f32,
    #[serde(default)]
    pub samples: Vec<OrientationSample>,
}

fn default_replay_interval() -> f32 {
    1.0 / 30.0
}

/// Plays back recorded samples in a loop.
#[derive(Debug, Clone)]
pub struct ReplayOrientation {
    interval: f32,
    samples: Vec<OrientationSample>,
    clock: f32,
}

impl ReplayOrientation {
    /// Fails unless the sample interval is a positive, finite number of seconds.
    pub fn new(file: ReplayFile) -> Result<Self, String> {
        if !file.interval.is_finite() || file.interval <= 0.0 {
            return Err(format!(
                "Invalid replay interval {}; must be positive",
                file.interval
            ));
        }
        Ok(Self {
            interval: file.interval,
            samples: file.samples,
            clock: 0.0,
        })
    }

    pub fn parse(text: &str) -> Result<Self, String> {
        let file: ReplayFile =
            ron::from_str(text).map_err(|e| format!("Invalid replay file: {}", e))?;
        Self::new(file)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        let replay = Self::parse(&text)?;
        info!(
            "Loaded {} orientation samples from {}",
            replay.samples.len(),
            path.display()
        );
        Ok(replay)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    fn current_index(&self) -> usize {
        let step = (self.clock / self.interval).floor() as usize;
        step % self.samples.len()
    }
}

impl OrientationSource for ReplayOrientation {
    fn name(&self) -> &'static str {
        "replay"
    }

    fn is_supported(&self) -> bool {
        !self.samples.is_empty()
    }

    fn request_permission(&mut self) -> PermissionState {
        if self.is_supported() {
            PermissionState::Granted
        } else {
            PermissionState::Denied
        }
    }

    fn poll(&mut self, input: &SourceInput) -> Option<OrientationSample> {
        if self.samples.is_empty() {
            return None;
        }
        let sample = self.samples[self.current_index()];
        // The clock wraps once per loop.
        let period = self.interval * self.samples.len() as f32;
        self.clock = (self.clock + input.delta.max(0.0)) % period;
        Some(sample)
    }
}

/// The source selected at startup.
#[derive(Resource, Deref, DerefMut)]
pub struct ActiveOrientationSource(pub Box<dyn OrientationSource>);

impl Default for ActiveOrientationSource {
    fn default() -> Self {
        Self(Box::new(NoSensor))
    }
}

/// Build the source named by `setting`. A replay file that cannot be loaded
/// falls back to [`NoSensor`].
pub fn build_source(setting: &OrientationSetting) -> ActiveOrientationSource {
    let source: Box<dyn OrientationSource> = match setting {
        OrientationSetting::None => Box::new(NoSensor),
        OrientationSetting::Pointer => Box::new(PointerTilt::default()),
        OrientationSetting::Sway => Box::new(SimulatedSway::new()),
        OrientationSetting::Replay(path) => {
            match ReplayOrientation::load_from_file(Path::new(path)) {
                Ok(replay) => Box::new(replay),
                Err(e) => {
                    warn!("{}; orientation disabled", e);
                    Box::new(NoSensor)
                }
            }
        }
    };
    info!("Orientation source: {}", source.name());
    ActiveOrientationSource(source)
}
