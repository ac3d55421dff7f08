use cgmath::{Point3, Vector2, Vector3};

use crate::primitives::lights::SunLight;


/// Floor height-field collaborator. The water pipeline only ever queries it;
/// terrain shaping and its shading live outside this crate's core.
pub trait FloorQuery {
    fn floor_height(&self, pos: Vector2<f32>) -> f32;
    fn floor_signed_distance(&self, pos: Point3<f32>) -> f32;
    fn floor_normal(&self, pos: Point3<f32>) -> Vector3<f32>;
    fn shade_floor(
        &self,
        pos: Point3<f32>,
        view: Vector3<f32>,
        normal: Vector3<f32>,
        time: f32,
        light: &SunLight,
    ) -> Vector3<f32>;
}

/// Sky/atmosphere collaborator providing radiance lookups for reflection and
/// a cheap hemispherical ambient term.
pub trait SkyQuery {
    fn sky_color(&self, direction: Vector3<f32>, time: f32) -> Vector3<f32>;
    fn ambient_light(&self, normal: Vector3<f32>) -> Vector3<f32>;
}
