use cgmath::{Point3, Vector3};

use crate::primitives::hit::VolumeHit;

/// Hard iteration ceiling; past this the march reports a miss.
pub const MAX_STEPS: usize = 1000;

/// Sphere-tracing tunables. The step clamps are deliberately public: a plain
/// height field is fine at full step length, but steep distance fields (wave
/// crests, cliffs) need a conservative fraction to avoid overshoot.
#[derive(Copy, Clone, Debug)]
pub struct RaymarchConfig {
    /// |d| below this counts as a surface hit.
    pub min_distance: f32,
    /// Accumulated travel beyond this is a miss.
    pub max_distance: f32,
    /// Fraction of the distance estimate actually stepped.
    pub step_scale: f32,
    /// Absolute per-step bound.
    pub max_step: f32,
}

impl RaymarchConfig {
    pub fn new(min_distance: f32, max_distance: f32) -> Self {
        Self {
            min_distance,
            max_distance,
            step_scale: 1.0,
            max_step: f32::MAX,
        }
    }

    pub fn with_step_scale(mut self, step_scale: f32) -> Self {
        self.step_scale = step_scale;
        self
    }

    pub fn with_max_step(mut self, max_step: f32) -> Self {
        self.max_step = max_step;
        self
    }
}

/// Generic sphere trace of `distance` (signed, negative below the surface)
/// from `origin` along the unit `direction`. Purely functional; the returned
/// hit carries no normal, callers derive one from their own gradient.
pub fn raymarch<F>(
    origin: Point3<f32>,
    direction: Vector3<f32>,
    time: f32,
    config: &RaymarchConfig,
    distance: F,
) -> VolumeHit
where
    F: Fn(Point3<f32>, f32) -> f32,
{
    let mut position = origin;
    let mut traveled = 0.0f32;

    for _ in 0..MAX_STEPS {
        let d = distance(position, time);
        if d.abs() < config.min_distance {
            return VolumeHit::surface(position, traveled);
        }

        let step = (d * config.step_scale).min(config.max_step);
        traveled += step;
        if traveled > config.max_distance {
            return VolumeHit::miss(config.max_distance);
        }
        position = position + direction * step;
    }

    VolumeHit::miss(traveled)
}
