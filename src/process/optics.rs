use cgmath::{ElementWise, InnerSpace, Point3, Vector2, Vector3};

use crate::primitives::lights::SunLight;
use crate::primitives::material::WaterMaterial;
use crate::primitives::scene::{FloorQuery, SkyQuery};
use crate::process::math::{exp_v3, mix_v3, reflect, refract_or_reflect, saturate, smoothstep};
use crate::process::raymarch::{raymarch, RaymarchConfig};

/// Transmittance below this skips the floor raymarch; the marched branch has
/// already converged to the base color at that point.
const TRANSMITTANCE_CUTOFF: f32 = 0.004;
/// Offset along the refracted ray before marching, to leave the surface band.
const REFRACTION_BIAS: f32 = 0.05;
const REFLECT_DISTORT: f32 = 0.35;
const REFLECT_BLUR: f32 = 0.22;
/// Reflection rays dipping under this elevation blend toward the horizon.
const HORIZON_BAND: f32 = 0.12;
const VIEW_TINT: Vector3<f32> = Vector3::new(0.015, 0.045, 0.04);
const SSS_STRENGTH: f32 = 0.35;
const ROUGHNESS_STEEPNESS_GAIN: f32 = 0.6;
const ROUGHNESS_HEIGHT_GAIN: f32 = 0.12;

/// Per-sample depth summary, derived from the floor query and consumed within
/// a single shading call.
#[derive(Copy, Clone, Debug)]
pub struct WaterDepthInfo {
    pub depth: f32,
    pub depth_factor: f32,
    pub base_color: Vector3<f32>,
}

/// Depth, refraction, reflection and scattering terms of the water shading
/// pipeline. Pure per-sample math over immutable material constants.
#[derive(Copy, Clone, Debug)]
pub struct WaterOptics {
    material: WaterMaterial,
    floor_march: RaymarchConfig,
}

impl WaterOptics {
    pub fn new(material: WaterMaterial) -> Self {
        let floor_march = RaymarchConfig::new(1e-2, material.max_water_path).with_step_scale(0.9);
        Self {
            material,
            floor_march,
        }
    }

    pub fn material(&self) -> &WaterMaterial {
        &self.material
    }

    /// Depth below the surface point, its exponential falloff factor, and the
    /// shallow/deep base color with a small view-angle tint.
    pub fn depth_and_color<F: FloorQuery>(
        &self,
        pos: Point3<f32>,
        normal: Vector3<f32>,
        view: Vector3<f32>,
        floor: &F,
    ) -> WaterDepthInfo {
        let floor_height = floor.floor_height(Vector2::new(pos.x, pos.z));
        let depth = (pos.y - floor_height).max(0.0);
        let depth_factor = 1.0 - (-depth / self.material.depth_reference).exp();

        let mut base_color = mix_v3(
            self.material.deep_color,
            self.material.shallow_color,
            1.0 - depth_factor,
        );
        let facing = 1.0 - saturate(view.dot(normal));
        base_color += VIEW_TINT * facing;

        WaterDepthInfo {
            depth,
            depth_factor,
            base_color,
        }
    }

    /// Beer-Lambert transmittance over a path length, per channel.
    pub fn transmittance(&self, path_length: f32) -> Vector3<f32> {
        exp_v3(-self.material.absorption * path_length.max(0.0))
    }

    /// Light entering the water: refract at the surface, march down to the
    /// floor, shade it and absorb over the traveled path. Misses and very
    /// deep water converge to the absorption-saturated base color.
    pub fn refracted_color<F: FloorQuery, S: SkyQuery>(
        &self,
        pos: Point3<f32>,
        normal: Vector3<f32>,
        view: Vector3<f32>,
        depth_info: &WaterDepthInfo,
        time: f32,
        light: &SunLight,
        floor: &F,
        _sky: &S,
    ) -> Vector3<f32> {
        // translucency negligible: the marched branch would return base color
        let t_straight = self.transmittance(depth_info.depth);
        if t_straight.x.max(t_straight.y).max(t_straight.z) < TRANSMITTANCE_CUTOFF {
            return depth_info.base_color;
        }

        let eta = 1.0 / self.material.ior;
        let refracted = refract_or_reflect(-view, normal, eta);

        let start = pos + refracted * REFRACTION_BIAS;
        let hit = raymarch(start, refracted, time, &self.floor_march, |p, _| {
            floor.floor_signed_distance(p)
        });

        if hit.valid {
            let path = hit.distance + REFRACTION_BIAS;
            let t = self.transmittance(path);
            let floor_normal = floor.floor_normal(hit.position);
            let floor_color = floor.shade_floor(hit.position, -refracted, floor_normal, time, light);
            floor_color.mul_element_wise(t)
                + depth_info
                    .base_color
                    .mul_element_wise(Vector3::new(1.0 - t.x, 1.0 - t.y, 1.0 - t.z))
        } else {
            // no floor within the path budget: pure-absorption deep water
            depth_info.base_color
        }
    }

    /// Sky reflection with a wave-gradient distortion and a fixed two-sample
    /// blur. Sample count is deliberately constant so roughness changes can
    /// never cause temporal flicker.
    pub fn reflected_color<S: SkyQuery>(
        &self,
        _pos: Point3<f32>,
        normal: Vector3<f32>,
        view: Vector3<f32>,
        time: f32,
        gradient: Vector2<f32>,
        roughness: f32,
        sky: &S,
    ) -> Vector3<f32> {
        let base = reflect(-view, normal);

        // tangent basis; fall back to another axis when the cross product
        // degenerates with a near-vertical normal
        let mut tangent = normal.cross(Vector3::unit_x());
        if tangent.magnitude2() < 1e-8 {
            tangent = normal.cross(Vector3::unit_z());
        }
        let tangent = tangent.normalize();
        let bitangent = normal.cross(tangent);

        let distort = REFLECT_DISTORT * (0.4 + roughness);
        let distorted =
            (base + tangent * (gradient.x * distort) + bitangent * (gradient.y * distort))
                .normalize();

        let blur = REFLECT_BLUR * roughness;
        let d0 = (distorted + tangent * blur).normalize();
        let d1 = (distorted - tangent * blur).normalize();
        (self.sample_sky(d0, time, sky) + self.sample_sky(d1, time, sky)) * 0.5
    }

    fn sample_sky<S: SkyQuery>(&self, dir: Vector3<f32>, time: f32, sky: &S) -> Vector3<f32> {
        let sample = sky.sky_color(dir, time);
        if dir.y < HORIZON_BAND {
            // near-grazing: pull toward the horizon color so rays dipping
            // below the skyline stay plausible
            let flat = Vector3::new(dir.x, 0.02, dir.z).normalize();
            let horizon = sky.sky_color(flat, time);
            let w = smoothstep(-0.02, HORIZON_BAND, dir.y);
            return mix_v3(horizon, sample, w);
        }
        sample
    }

    /// Back-scatter glow through thin water: shallow color lit from behind,
    /// vanishing beyond the configured scatter depth.
    pub fn subsurface_scattering(
        &self,
        normal: Vector3<f32>,
        _view: Vector3<f32>,
        light: &SunLight,
        depth: f32,
    ) -> Vector3<f32> {
        if depth >= self.material.scatter_depth {
            return Vector3::new(0.0, 0.0, 0.0);
        }
        let back = normal.dot(-light.direction).max(0.0);
        let falloff = 1.0 - smoothstep(0.0, self.material.scatter_depth, depth);
        self.material.shallow_color * (SSS_STRENGTH * back * falloff)
    }

    /// Perceptual roughness driven up by wave steepness and positive crest
    /// height, clamped to the material's range.
    pub fn dynamic_roughness(&self, gradient: Vector2<f32>, wave_height: f32) -> f32 {
        let r = self.material.base_roughness
            + ROUGHNESS_STEEPNESS_GAIN * gradient.magnitude()
            + ROUGHNESS_HEIGHT_GAIN * wave_height.max(0.0);
        r.max(self.material.base_roughness)
            .min(self.material.max_roughness)
    }
}
