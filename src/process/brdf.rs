use cgmath::{ElementWise, InnerSpace, Vector3};

use crate::process::math::saturate;

const PI: f32 = std::f32::consts::PI;
/// Floor for the specular denominator so grazing angles fade out instead of
/// dividing by zero.
const MIN_DENOM: f32 = 1e-4;

/// F0 + (1 - F0) * (1 - cos)^5, componentwise.
pub fn schlick_fresnel(cos_theta: f32, f0: Vector3<f32>) -> Vector3<f32> {
    let c = saturate(cos_theta);
    let one = Vector3::new(1.0, 1.0, 1.0);
    f0 + (one - f0) * (1.0 - c).powi(5)
}

/// Fresnel reflectance for a view direction pointing from the surface toward
/// the camera.
pub fn fresnel(view: Vector3<f32>, normal: Vector3<f32>, f0: Vector3<f32>) -> Vector3<f32> {
    schlick_fresnel(view.dot(normal), f0)
}

/// Trowbridge-Reitz normal distribution. Takes perceptual roughness and
/// squares it internally (alpha = roughness^2).
pub fn ggx_distribution(n_dot_h: f32, roughness: f32) -> f32 {
    let a = roughness * roughness;
    let a2 = a * a;
    let ndh = saturate(n_dot_h);
    let denom = ndh * ndh * (a2 - 1.0) + 1.0;
    a2 / (PI * denom * denom).max(MIN_DENOM)
}

fn schlick_ggx(n_dot_x: f32, k: f32) -> f32 {
    let n = saturate(n_dot_x);
    n / (n * (1.0 - k) + k).max(MIN_DENOM)
}

/// Smith geometry term, one Schlick-GGX factor per direction.
pub fn smith_geometry(n_dot_v: f32, n_dot_l: f32, roughness: f32) -> f32 {
    let r = roughness + 1.0;
    let k = r * r / 8.0;
    schlick_ggx(n_dot_v, k) * schlick_ggx(n_dot_l, k)
}

/// Cook-Torrance specular lobe for a single directional light, plus a cheap
/// multi-scatter compensation that feeds the sky reflection back in as the
/// surface roughens (single-scatter GGX loses energy there).
pub fn specular_brdf(
    normal: Vector3<f32>,
    view: Vector3<f32>,
    light_dir: Vector3<f32>,
    light_color: Vector3<f32>,
    roughness: f32,
    f0: Vector3<f32>,
    sky_reflection: Vector3<f32>,
) -> Vector3<f32> {
    let n_dot_v = saturate(normal.dot(view));
    let n_dot_l = saturate(normal.dot(light_dir));
    if n_dot_l <= 0.0 {
        return Vector3::new(0.0, 0.0, 0.0);
    }

    let half = (view + light_dir).normalize();
    let n_dot_h = saturate(normal.dot(half));
    let h_dot_v = saturate(half.dot(view));

    let d = ggx_distribution(n_dot_h, roughness);
    let g = smith_geometry(n_dot_v, n_dot_l, roughness);
    let f = schlick_fresnel(h_dot_v, f0);

    let denom = (4.0 * n_dot_v * n_dot_l).max(MIN_DENOM);
    let single = f * (d * g / denom);

    let multi = sky_reflection.mul_element_wise(f0) * (roughness * n_dot_l);

    single.mul_element_wise(light_color) * n_dot_l + multi
}
