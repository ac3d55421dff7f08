use cgmath::{ElementWise, InnerSpace, Point3, Vector2, Vector3};

use crate::primitives::lights::SunLight;
use crate::primitives::material::WaterMaterial;
use crate::primitives::scene::{FloorQuery, SkyQuery};
use crate::process::brdf;
use crate::process::optics::WaterOptics;

const AMBIENT_BASE: f32 = 0.02;
const AMBIENT_ROUGH: f32 = 0.1;

/// Composes depth, refraction, reflection, specular and scattering into one
/// linear radiance value per surface sample. Tone mapping and gamma happen
/// downstream.
#[derive(Copy, Clone, Debug)]
pub struct WaterShader {
    optics: WaterOptics,
}

impl WaterShader {
    pub fn new(material: WaterMaterial) -> Self {
        Self {
            optics: WaterOptics::new(material),
        }
    }

    pub fn optics(&self) -> &WaterOptics {
        &self.optics
    }

    /// `pos` lies on the wave surface (so `pos.y` is the wave height there),
    /// `view` points from the surface toward the camera, `gradient` is the
    /// raw surface gradient from the wave field.
    pub fn shade<F: FloorQuery, S: SkyQuery>(
        &self,
        pos: Point3<f32>,
        normal: Vector3<f32>,
        view: Vector3<f32>,
        time: f32,
        gradient: Vector2<f32>,
        light: &SunLight,
        sky: &S,
        floor: &F,
    ) -> Vector3<f32> {
        let material = self.optics.material();

        let depth_info = self.optics.depth_and_color(pos, normal, view, floor);
        let roughness = self.optics.dynamic_roughness(gradient, pos.y);

        let refracted =
            self.optics
                .refracted_color(pos, normal, view, &depth_info, time, light, floor, sky);
        let reflected =
            self.optics
                .reflected_color(pos, normal, view, time, gradient, roughness, sky);

        // Fresnel-weighted split between what enters and what bounces off
        let f = brdf::fresnel(view, normal, material.f0);
        let one = Vector3::new(1.0, 1.0, 1.0);
        let mut color = refracted.mul_element_wise(one - f) + reflected.mul_element_wise(f);

        color += brdf::specular_brdf(
            normal,
            view,
            light.direction,
            light.radiance(),
            roughness,
            material.f0,
            reflected,
        );

        // rough-surface ambient: hemispherical term plus two fixed sky
        // samples around the normal
        let up_biased = (normal + Vector3::unit_y()).normalize();
        let ambient = (sky.ambient_light(normal)
            + sky.sky_color(normal, time)
            + sky.sky_color(up_biased, time))
            * ((AMBIENT_BASE + AMBIENT_ROUGH * roughness) / 3.0);
        color += ambient;

        color += self
            .optics
            .subsurface_scattering(normal, view, light, depth_info.depth);

        color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FlatFloor;

    impl FloorQuery for FlatFloor {
        fn floor_height(&self, _pos: Vector2<f32>) -> f32 {
            -4.0
        }
        fn floor_signed_distance(&self, pos: Point3<f32>) -> f32 {
            pos.y + 4.0
        }
        fn floor_normal(&self, _pos: Point3<f32>) -> Vector3<f32> {
            Vector3::unit_y()
        }
        fn shade_floor(
            &self,
            _pos: Point3<f32>,
            _view: Vector3<f32>,
            normal: Vector3<f32>,
            _time: f32,
            light: &SunLight,
        ) -> Vector3<f32> {
            Vector3::new(0.75, 0.68, 0.5) * normal.dot(light.direction).max(0.0)
        }
    }

    struct BlueSky;

    impl SkyQuery for BlueSky {
        fn sky_color(&self, direction: Vector3<f32>, _time: f32) -> Vector3<f32> {
            let t = direction.y.max(0.0);
            Vector3::new(0.6 - 0.3 * t, 0.7 - 0.2 * t, 0.9)
        }
        fn ambient_light(&self, _normal: Vector3<f32>) -> Vector3<f32> {
            Vector3::new(0.2, 0.25, 0.35)
        }
    }

    fn shader() -> WaterShader {
        WaterShader::new(WaterMaterial::open_ocean())
    }

    fn sun() -> SunLight {
        SunLight::new(Vector3::new(0.2, 0.9, 0.3), Vector3::new(1.0, 0.96, 0.9), 3.0)
    }

    #[test]
    fn shade_produces_finite_non_negative_radiance() {
        let s = shader();
        let color = s.shade(
            Point3::new(1.0, 0.3, -2.0),
            Vector3::new(0.05, 1.0, -0.08).normalize(),
            Vector3::new(0.2, 0.7, 0.1).normalize(),
            2.5,
            Vector2::new(0.05, -0.08),
            &sun(),
            &BlueSky,
            &FlatFloor,
        );
        for v in &[color.x, color.y, color.z] {
            assert!(v.is_finite());
            assert!(*v >= 0.0);
        }
    }

    #[test]
    fn grazing_view_leans_on_reflection() {
        let s = shader();
        let n = Vector3::unit_y();
        let overhead = s.shade(
            Point3::new(0.0, 0.1, 0.0),
            n,
            Vector3::unit_y(),
            0.0,
            Vector2::new(0.0, 0.0),
            &sun(),
            &BlueSky,
            &FlatFloor,
        );
        let grazing = s.shade(
            Point3::new(0.0, 0.1, 0.0),
            n,
            Vector3::new(1.0, 0.05, 0.0).normalize(),
            0.0,
            Vector2::new(0.0, 0.0),
            &sun(),
            &BlueSky,
            &FlatFloor,
        );
        // Fresnel pushes the grazing sample toward the bright sky blue;
        // overhead the darker refracted column dominates
        assert!(grazing.z > overhead.z);
    }

    #[test]
    fn shade_is_deterministic() {
        let s = shader();
        let args = (
            Point3::new(3.0, 0.2, 7.0),
            Vector3::new(-0.1, 1.0, 0.04).normalize(),
            Vector3::new(0.3, 0.6, -0.2).normalize(),
            11.25,
            Vector2::new(-0.1, 0.04),
        );
        let a = s.shade(args.0, args.1, args.2, args.3, args.4, &sun(), &BlueSky, &FlatFloor);
        let b = s.shade(args.0, args.1, args.2, args.3, args.4, &sun(), &BlueSky, &FlatFloor);
        assert_eq!(a, b);
    }
}
