use cgmath::{InnerSpace, Vector3};


/// Directional sun sample. `direction` points from the surface toward the sun.
#[derive(Copy, Clone, Debug)]
pub struct SunLight {
    pub direction: Vector3<f32>,
    pub color: Vector3<f32>,
    pub intensity: f32,
}

impl SunLight {
    pub fn new(direction: Vector3<f32>, color: Vector3<f32>, intensity: f32) -> Self {
        Self {
            direction: direction.normalize(),
            color,
            intensity,
        }
    }

    pub fn radiance(&self) -> Vector3<f32> {
        self.color * self.intensity
    }
}
