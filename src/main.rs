use anyhow::{Context, Result};
use cgmath::{ElementWise, InnerSpace, Point3, Vector2, Vector3};
use rayon::prelude::*;

use brine::{
    raymarch, FloorQuery, RaymarchConfig, Ray, SkyQuery, SunLight, WaterMaterial, WaterShader,
    WaveField, WaveSpectrum,
};

pub const RENDER_SIZE: [u32; 2] = [960, 540];
const EXPOSURE: f32 = 1.15;
const GAMMA: f32 = 1.0 / 2.2;


// CAMERA
//
//
//
struct Camera {
    origin: Point3<f32>,
    focus: Point3<f32>,
    fovy: f32,
    aspect: f32,
}

impl Camera {
    fn new(origin: Point3<f32>, focus: Point3<f32>, fovy: f32, aspect: f32) -> Self {
        Self {
            origin,
            focus,
            fovy,
            aspect,
        }
    }

    /// Pinhole ray through the pixel at normalized (u, v) in [-1, 1].
    fn ray(&self, u: f32, v: f32) -> Ray {
        let forward = (self.focus - self.origin).normalize();
        let right = forward.cross(Vector3::unit_y()).normalize();
        let up = right.cross(forward);

        let half_h = (self.fovy.to_radians() * 0.5).tan();
        let half_w = half_h * self.aspect;
        let dir = forward + right * (u * half_w) + up * (v * half_h);
        Ray::new(self.origin, dir)
    }
}


// SKY
//
//
//
struct GradientSky {
    sun: SunLight,
    zenith: Vector3<f32>,
    horizon: Vector3<f32>,
}

impl GradientSky {
    fn new(sun: SunLight) -> Self {
        Self {
            sun,
            zenith: Vector3::new(0.25, 0.45, 0.85),
            horizon: Vector3::new(0.75, 0.8, 0.88),
        }
    }
}

impl SkyQuery for GradientSky {
    fn sky_color(&self, direction: Vector3<f32>, _time: f32) -> Vector3<f32> {
        let t = direction.y.max(0.0).powf(0.55);
        let mut color = self.horizon + (self.zenith - self.horizon) * t;

        let toward_sun = direction.dot(self.sun.direction).max(0.0);
        // hard disk plus a soft halo
        color += self.sun.radiance() * toward_sun.powf(1800.0) * 40.0;
        color += self.sun.color * toward_sun.powf(10.0) * 0.25;
        color
    }

    fn ambient_light(&self, normal: Vector3<f32>) -> Vector3<f32> {
        let t = normal.y.max(0.0);
        (self.horizon + (self.zenith - self.horizon) * t) * 0.35
    }
}


// TERRAIN
//
//
//
struct SandFloor {
    level: f32,
    amplitude: f32,
    albedo: Vector3<f32>,
}

impl SandFloor {
    fn new(level: f32, amplitude: f32) -> Self {
        Self {
            level,
            amplitude,
            albedo: Vector3::new(0.76, 0.68, 0.5),
        }
    }
}

impl FloorQuery for SandFloor {
    fn floor_height(&self, pos: Vector2<f32>) -> f32 {
        self.level + self.amplitude * (0.05 * pos.x).sin() * (0.07 * pos.y).cos()
    }

    fn floor_signed_distance(&self, pos: Point3<f32>) -> f32 {
        // slopes are shallow, 0.8 keeps the height difference a safe bound
        (pos.y - self.floor_height(Vector2::new(pos.x, pos.z))) * 0.8
    }

    fn floor_normal(&self, pos: Point3<f32>) -> Vector3<f32> {
        let eps = 0.05;
        let p = Vector2::new(pos.x, pos.z);
        let dx = self.floor_height(p + Vector2::unit_x() * eps)
            - self.floor_height(p - Vector2::unit_x() * eps);
        let dz = self.floor_height(p + Vector2::unit_y() * eps)
            - self.floor_height(p - Vector2::unit_y() * eps);
        Vector3::new(-dx, 2.0 * eps, -dz).normalize()
    }

    fn shade_floor(
        &self,
        pos: Point3<f32>,
        _view: Vector3<f32>,
        normal: Vector3<f32>,
        _time: f32,
        light: &SunLight,
    ) -> Vector3<f32> {
        let ndl = normal.dot(light.direction).max(0.0);
        // faint caustic-like ripple so the floor is not flat shaded
        let ripple = 0.85 + 0.15 * (1.3 * pos.x).sin() * (1.7 * pos.z).sin();
        self.albedo.mul_element_wise(light.radiance()) * (0.1 + 0.25 * ndl) * ripple
    }
}


// POST PROCESS (outside the shading core: exposure, tone map, gamma)
//
//
//
fn post_process(radiance: Vector3<f32>) -> [u8; 3] {
    let exposed = radiance * EXPOSURE;
    let mapped = Vector3::new(
        exposed.x / (1.0 + exposed.x),
        exposed.y / (1.0 + exposed.y),
        exposed.z / (1.0 + exposed.z),
    );
    let to_byte = |v: f32| (v.max(0.0).powf(GAMMA) * 255.0).min(255.0) as u8;
    [to_byte(mapped.x), to_byte(mapped.y), to_byte(mapped.z)]
}

fn render_pixel(
    camera: &Camera,
    u: f32,
    v: f32,
    time: f32,
    field: &WaveField,
    shader: &WaterShader,
    config: &RaymarchConfig,
    sky: &GradientSky,
    floor: &SandFloor,
) -> Vector3<f32> {
    let ray = camera.ray(u, v);
    let hit = raymarch(ray.origin, ray.direction, time, config, |p, t| {
        field.signed_distance(p, t)
    });

    if hit.valid {
        let (normal, gradient) = field.normal(Vector2::new(hit.position.x, hit.position.z), time);
        shader.shade(
            hit.position,
            normal,
            -ray.direction,
            time,
            gradient,
            &sky.sun,
            sky,
            floor,
        )
    } else {
        sky.sky_color(ray.direction, time)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let time: f32 = std::env::args()
        .nth(1)
        .map(|s| s.parse())
        .transpose()
        .context("time argument must be a number of seconds")?
        .unwrap_or(13.7);

    // SCENE SETUP
    //
    //
    //
    let width = RENDER_SIZE[0];
    let height = RENDER_SIZE[1];
    let camera = Camera::new(
        Point3::new(0.0, 4.0, -14.0),
        Point3::new(0.0, 0.5, 10.0),
        52.0,
        width as f32 / height as f32,
    );
    let sun = SunLight::new(
        Vector3::new(-0.45, 0.35, 0.82),
        Vector3::new(1.0, 0.94, 0.82),
        3.5,
    );
    let sky = GradientSky::new(sun);
    let floor = SandFloor::new(-5.0, 1.2);

    let field = WaveField::new(WaveSpectrum::open_ocean());
    let shader = WaterShader::new(WaterMaterial::open_ocean());
    // wave crests are steep relative to the SDF bound, so step conservatively
    let march = RaymarchConfig::new(2e-3, 250.0)
        .with_step_scale(0.55)
        .with_max_step(6.0);

    log::info!("rendering {}x{} frame at t = {}", width, height, time);
    let start = std::time::Instant::now();

    let rows: Vec<Vec<[u8; 3]>> = (0..height)
        .into_par_iter()
        .map(|y| {
            (0..width)
                .map(|x| {
                    let u = (x as f32 + 0.5) / width as f32 * 2.0 - 1.0;
                    let v = 1.0 - (y as f32 + 0.5) / height as f32 * 2.0;
                    let radiance = render_pixel(
                        &camera, u, v, time, &field, &shader, &march, &sky, &floor,
                    );
                    post_process(radiance)
                })
                .collect()
        })
        .collect();

    let mut img = image::RgbImage::new(width, height);
    for (y, row) in rows.iter().enumerate() {
        for (x, px) in row.iter().enumerate() {
            img.put_pixel(x as u32, y as u32, image::Rgb(*px));
        }
    }
    img.save("ocean.png").context("writing ocean.png")?;

    log::info!("done in {:.2?}", start.elapsed());
    Ok(())
}
