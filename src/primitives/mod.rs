pub mod hit;
pub mod lights;
pub mod material;
pub mod ray;
pub mod scene;
pub mod spectrum;
