use cgmath::{Point3, Vector3};


/// Result of one raymarch invocation. Owned by the caller; the marcher fills
/// position and distance, the caller derives the normal from its own gradient.
#[derive(Copy, Clone, Debug)]
pub struct VolumeHit {
    pub hit: bool,
    pub valid: bool,
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
    pub distance: f32,
}

impl VolumeHit {
    pub fn surface(position: Point3<f32>, distance: f32) -> Self {
        Self {
            hit: true,
            valid: true,
            position,
            normal: Vector3::unit_y(),
            distance,
        }
    }

    pub fn miss(distance: f32) -> Self {
        Self {
            hit: false,
            valid: false,
            position: Point3::new(0.0, 0.0, 0.0),
            normal: Vector3::unit_y(),
            distance,
        }
    }
}
