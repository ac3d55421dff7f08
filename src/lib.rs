pub mod primitives;
pub mod process;

pub use primitives::hit::VolumeHit;
pub use primitives::lights::SunLight;
pub use primitives::material::WaterMaterial;
pub use primitives::ray::Ray;
pub use primitives::scene::{FloorQuery, SkyQuery};
pub use primitives::spectrum::{WaveComponent, WaveSpectrum, GRAVITY, SPECTRUM_SIZE};
pub use process::optics::{WaterDepthInfo, WaterOptics};
pub use process::raymarch::{raymarch, RaymarchConfig, MAX_STEPS};
pub use process::shading::WaterShader;
pub use process::waves::{SurfaceSample, WaveField};
