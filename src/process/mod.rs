pub mod brdf;
pub mod math;
pub mod optics;
pub mod raymarch;
pub mod shading;
pub mod waves;
