use cgmath::Vector3;


/// Immutable optical constants for a body of water. Built once at startup and
/// shared by reference into the shading pipeline; never mutated per sample.
#[derive(Copy, Clone, Debug)]
pub struct WaterMaterial {
    /// Beer-Lambert absorption per channel, m^-1.
    pub absorption: Vector3<f32>,
    pub shallow_color: Vector3<f32>,
    pub deep_color: Vector3<f32>,
    pub base_roughness: f32,
    pub max_roughness: f32,
    /// Reflectance at normal incidence, derived from the index of refraction.
    pub f0: Vector3<f32>,
    pub ior: f32,
    /// Reference depth for the exponential depth-factor falloff, meters.
    pub depth_reference: f32,
    /// Depth beyond which subsurface scattering vanishes, meters.
    pub scatter_depth: f32,
    /// Longest refracted path the floor raymarch will consider, meters.
    pub max_water_path: f32,
}

impl WaterMaterial {
    pub fn new(
        absorption: Vector3<f32>,
        shallow_color: Vector3<f32>,
        deep_color: Vector3<f32>,
        base_roughness: f32,
        max_roughness: f32,
        ior: f32,
        depth_reference: f32,
        scatter_depth: f32,
        max_water_path: f32,
    ) -> Self {
        Self {
            absorption,
            shallow_color,
            deep_color,
            base_roughness,
            max_roughness,
            f0: Self::f0_from_ior(ior),
            ior,
            depth_reference,
            scatter_depth,
            max_water_path,
        }
    }

    /// Schlick F0 for an interface between air (n=1.0) and a medium of the
    /// given index of refraction.
    pub fn f0_from_ior(ior: f32) -> Vector3<f32> {
        let r = ((ior - 1.0) / (ior + 1.0)).powi(2);
        Vector3::new(r, r, r)
    }

    pub fn open_ocean() -> Self {
        Self::new(
            Vector3::new(0.45, 0.09, 0.06), // red dies first
            Vector3::new(0.22, 0.58, 0.56),
            Vector3::new(0.01, 0.06, 0.10),
            0.08,
            0.5,
            1.33,
            6.0,
            2.5,
            40.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f0_matches_water_air_interface() {
        // ((1.33 - 1) / (1.33 + 1))^2 ~= 0.0201
        let f0 = WaterMaterial::f0_from_ior(1.33);
        assert!((f0.x - 0.0201).abs() < 1e-3);
        assert!((f0.x - f0.y).abs() < 1e-7);
        assert!((f0.x - f0.z).abs() < 1e-7);
    }

    #[test]
    fn ocean_preset_is_consistent() {
        let m = WaterMaterial::open_ocean();
        assert!(m.base_roughness < m.max_roughness);
        assert!(m.absorption.x > 0.0 && m.absorption.y > 0.0 && m.absorption.z > 0.0);
        assert!((m.f0.x - WaterMaterial::f0_from_ior(m.ior).x).abs() < 1e-7);
    }
}
