use cgmath::{InnerSpace, Point3, Vector2, Vector3};

use crate::primitives::spectrum::WaveSpectrum;

// Normal smoothing: 4-tap rotated gradient average blended at 20%, plus a
// crest-gated micro perturbation at 8% so only bright highlights see it.
const SMOOTH_RADIUS: f32 = 0.18;
const SMOOTH_WEIGHT: f32 = 0.2;
const MICRO_WEIGHT: f32 = 0.08;
const MICRO_POS_SCALE: f32 = 2.6;
const MICRO_TIME_SCALE: f32 = 1.31;
/// Number of highest-frequency components feeding the micro perturbation.
const MICRO_COMPONENTS: usize = 3;

/// Height and spatial gradient of the surface at one (position, time) pair.
#[derive(Copy, Clone, Debug)]
pub struct SurfaceSample {
    pub height: f32,
    pub gradient: Vector2<f32>,
}

/// Analytic multi-component traveling-wave height field. Stateless between
/// queries; time is always an explicit input.
#[derive(Clone, Debug)]
pub struct WaveField {
    spectrum: WaveSpectrum,
}

impl WaveField {
    pub fn new(spectrum: WaveSpectrum) -> Self {
        Self { spectrum }
    }

    pub fn spectrum(&self) -> &WaveSpectrum {
        &self.spectrum
    }

    /// Sum of A * sin(k * (dir . pos) + omega * t) over the spectrum.
    pub fn height(&self, pos: Vector2<f32>, time: f32) -> f32 {
        let mut h = 0.0;
        for c in self.spectrum.components.iter() {
            let phase = c.wavenumber * c.direction.dot(pos)
                + c.angular_frequency(self.spectrum.time_scale) * time;
            h += c.amplitude * phase.sin();
        }
        h
    }

    /// Height and gradient in a single pass so the per-component phase is
    /// evaluated once when a caller needs both.
    pub fn height_and_gradient(&self, pos: Vector2<f32>, time: f32) -> SurfaceSample {
        let mut height = 0.0;
        let mut gradient = Vector2::new(0.0, 0.0);
        for c in self.spectrum.components.iter() {
            let phase = c.wavenumber * c.direction.dot(pos)
                + c.angular_frequency(self.spectrum.time_scale) * time;
            height += c.amplitude * phase.sin();
            gradient += c.direction * (c.amplitude * c.wavenumber * phase.cos());
        }
        SurfaceSample { height, gradient }
    }

    /// Gradient-only fast path; agrees pointwise with `height_and_gradient`.
    pub fn gradient(&self, pos: Vector2<f32>, time: f32) -> Vector2<f32> {
        let mut gradient = Vector2::new(0.0, 0.0);
        for c in self.spectrum.components.iter() {
            let phase = c.wavenumber * c.direction.dot(pos)
                + c.angular_frequency(self.spectrum.time_scale) * time;
            gradient += c.direction * (c.amplitude * c.wavenumber * phase.cos());
        }
        gradient
    }

    /// Gradient of only the highest-frequency tail of the spectrum, used for
    /// the crest micro perturbation.
    fn detail_gradient(&self, pos: Vector2<f32>, time: f32) -> Vector2<f32> {
        let start = self.spectrum.components.len() - MICRO_COMPONENTS;
        let mut gradient = Vector2::new(0.0, 0.0);
        for c in self.spectrum.components[start..].iter() {
            let phase = c.wavenumber * c.direction.dot(pos)
                + c.angular_frequency(self.spectrum.time_scale) * time;
            gradient += c.direction * (c.amplitude * c.wavenumber * phase.cos());
        }
        gradient
    }

    /// Unit surface normal plus the raw (pre-smoothing) gradient.
    ///
    /// Two smoothing passes sit between the analytic gradient and the normal:
    /// a 4-tap average of the gradient at small rotated offsets, and a
    /// crest-gated high-frequency perturbation. The tap rotation angle is a
    /// smooth function of (pos, time), never a random jitter, so the normal
    /// cannot flicker frame to frame.
    pub fn normal(&self, pos: Vector2<f32>, time: f32) -> (Vector3<f32>, Vector2<f32>) {
        let sample = self.height_and_gradient(pos, time);
        let raw = sample.gradient;

        let theta = 0.6 * (0.37 * pos.x - 0.29 * pos.y + 0.17 * time).sin();
        let mut averaged = Vector2::new(0.0, 0.0);
        for i in 0..4 {
            let a = theta + i as f32 * std::f32::consts::FRAC_PI_2;
            let offset = Vector2::new(a.cos(), a.sin()) * SMOOTH_RADIUS;
            averaged += self.gradient(pos + offset, time);
        }
        averaged /= 4.0;
        let mut g = raw + (averaged - raw) * SMOOTH_WEIGHT;

        let crest_start = 0.35 * self.spectrum.max_height();
        let crest_end = 0.75 * self.spectrum.max_height();
        let gate = crate::process::math::smoothstep(crest_start, crest_end, sample.height);
        if gate > 0.0 {
            let micro =
                self.detail_gradient(pos * MICRO_POS_SCALE, time * MICRO_TIME_SCALE);
            g += micro * (MICRO_WEIGHT * gate);
        }

        let normal = Vector3::new(-g.x, 1.0, -g.y).normalize();
        (normal, raw)
    }

    /// Signed distance adapter for the raymarcher: positive above the
    /// surface, negative below.
    pub fn signed_distance(&self, pos: Point3<f32>, time: f32) -> f32 {
        pos.y - self.height(Vector2::new(pos.x, pos.z), time)
    }
}
