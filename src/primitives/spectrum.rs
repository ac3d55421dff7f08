use cgmath::{InnerSpace, Vector2};

pub const GRAVITY: f32 = 9.81;

/// One sinusoidal traveling-wave term. The temporal angular frequency is
/// never stored: it is always recomputed from the wavenumber through the
/// deep-water dispersion relation so height and speed cannot drift apart.
#[derive(Copy, Clone, Debug)]
pub struct WaveComponent {
    pub direction: Vector2<f32>,
    pub wavenumber: f32,
    pub amplitude: f32,
}

impl WaveComponent {
    pub fn new(direction: Vector2<f32>, wavenumber: f32, amplitude: f32) -> Self {
        Self {
            direction: direction.normalize(),
            wavenumber,
            amplitude,
        }
    }

    fn from_angle(angle_deg: f32, wavenumber: f32, amplitude: f32) -> Self {
        let a = angle_deg.to_radians();
        Self::new(Vector2::new(a.cos(), a.sin()), wavenumber, amplitude)
    }

    /// omega = sqrt(g * k) * time_scale
    pub fn angular_frequency(&self, time_scale: f32) -> f32 {
        (GRAVITY * self.wavenumber).sqrt() * time_scale
    }
}

pub const SPECTRUM_SIZE: usize = 10;

/// Fixed, ordered superposition table. Order never changes between calls so
/// evaluation is reproducible; the sum itself is commutative.
#[derive(Copy, Clone, Debug)]
pub struct WaveSpectrum {
    pub components: [WaveComponent; SPECTRUM_SIZE],
    pub time_scale: f32,
}

impl WaveSpectrum {
    pub fn new(components: [WaveComponent; SPECTRUM_SIZE], time_scale: f32) -> Self {
        Self {
            components,
            time_scale,
        }
    }

    /// Long swell down to centimeter chop, amplitudes roughly following a
    /// decaying spectrum, headings fanned around +x.
    pub fn open_ocean() -> Self {
        Self::new(
            [
                WaveComponent::from_angle(5.0, 0.11, 0.90),
                WaveComponent::from_angle(-12.0, 0.16, 0.60),
                WaveComponent::from_angle(23.0, 0.24, 0.45),
                WaveComponent::from_angle(-31.0, 0.35, 0.30),
                WaveComponent::from_angle(44.0, 0.52, 0.20),
                WaveComponent::from_angle(-56.0, 0.78, 0.13),
                WaveComponent::from_angle(12.0, 1.15, 0.080),
                WaveComponent::from_angle(-72.0, 1.70, 0.050),
                WaveComponent::from_angle(64.0, 2.50, 0.030),
                WaveComponent::from_angle(-40.0, 3.60, 0.018),
            ],
            0.6,
        )
    }

    /// Sum of amplitudes; the height field can never leave +- this bound.
    pub fn max_height(&self) -> f32 {
        self.components.iter().map(|c| c.amplitude).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispersion_is_derived_and_stable() {
        let spectrum = WaveSpectrum::open_ocean();
        for c in spectrum.components.iter() {
            let expected = (GRAVITY * c.wavenumber).sqrt() * spectrum.time_scale;
            let a = c.angular_frequency(spectrum.time_scale);
            let b = c.angular_frequency(spectrum.time_scale);
            assert_eq!(a.to_bits(), b.to_bits());
            assert_eq!(a.to_bits(), expected.to_bits());
        }
    }

    #[test]
    fn directions_are_unit() {
        for c in WaveSpectrum::open_ocean().components.iter() {
            assert!((c.direction.magnitude() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn spectrum_is_physical() {
        let spectrum = WaveSpectrum::open_ocean();
        for c in spectrum.components.iter() {
            assert!(c.wavenumber > 0.0);
            assert!(c.amplitude >= 0.0);
            // steepness below breaking
            assert!(c.amplitude * c.wavenumber < 1.0);
        }
        assert!(spectrum.max_height() > 0.0);
    }
}
