// End-to-end: march a camera ray onto the animated wave surface and run the
// full shading pipeline over it with simple stand-in collaborators.

use cgmath::{InnerSpace, Point3, Vector2, Vector3};

use brine::{
    raymarch, FloorQuery, RaymarchConfig, SkyQuery, SunLight, WaterMaterial, WaterShader,
    WaveField, WaveSpectrum,
};

struct TestFloor;

impl FloorQuery for TestFloor {
    fn floor_height(&self, _pos: Vector2<f32>) -> f32 {
        -5.0
    }
    fn floor_signed_distance(&self, pos: Point3<f32>) -> f32 {
        pos.y + 5.0
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
        Vector3::new(0.7, 0.65, 0.5) * normal.dot(light.direction).max(0.0)
    }
}

struct TestSky;

impl SkyQuery for TestSky {
    fn sky_color(&self, direction: Vector3<f32>, _time: f32) -> Vector3<f32> {
        let t = direction.y.max(0.0);
        Vector3::new(0.7 - 0.4 * t, 0.75 - 0.25 * t, 0.9)
    }
    fn ambient_light(&self, _normal: Vector3<f32>) -> Vector3<f32> {
        Vector3::new(0.2, 0.25, 0.3)
    }
}

fn sun() -> SunLight {
    SunLight::new(Vector3::new(-0.3, 0.5, 0.8), Vector3::new(1.0, 0.95, 0.85), 3.0)
}

fn march_to_surface(field: &WaveField, time: f32) -> brine::VolumeHit {
    let origin = Point3::new(0.0, 6.0, -10.0);
    let direction = Vector3::new(0.05, -0.45, 1.0).normalize();
    let config = RaymarchConfig::new(1e-3, 300.0)
        .with_step_scale(0.55)
        .with_max_step(6.0);
    raymarch(origin, direction, time, &config, |p, t| {
        field.signed_distance(p, t)
    })
}

#[test]
fn camera_ray_lands_on_the_surface() {
    let field = WaveField::new(WaveSpectrum::open_ocean());
    let time = 7.3;
    let hit = march_to_surface(&field, time);
    assert!(hit.hit && hit.valid);
    // the reported point sits within the hit threshold of the height field
    let sd = field.signed_distance(hit.position, time);
    assert!(sd.abs() < 5e-3, "signed distance at hit was {}", sd);
    // and inside the reachable band of the spectrum
    assert!(hit.position.y.abs() <= field.spectrum().max_height() + 1e-3);
}

#[test]
fn surface_hit_shades_to_finite_radiance() {
    let field = WaveField::new(WaveSpectrum::open_ocean());
    let shader = WaterShader::new(WaterMaterial::open_ocean());
    let time = 7.3;

    let hit = march_to_surface(&field, time);
    assert!(hit.valid);
    let (normal, gradient) = field.normal(Vector2::new(hit.position.x, hit.position.z), time);
    assert!((normal.magnitude() - 1.0).abs() < 1e-4);

    let view = (Point3::new(0.0, 6.0, -10.0) - hit.position).normalize();
    let color = shader.shade(
        hit.position,
        normal,
        view,
        time,
        gradient,
        &sun(),
        &TestSky,
        &TestFloor,
    );
    for v in &[color.x, color.y, color.z] {
        assert!(v.is_finite());
        assert!(*v >= 0.0);
        // unclamped linear radiance, but a sane scene stays bounded
        assert!(*v < 50.0);
    }
}

#[test]
fn whole_pipeline_is_reproducible() {
    let time = 3.21;
    let run = || {
        let field = WaveField::new(WaveSpectrum::open_ocean());
        let shader = WaterShader::new(WaterMaterial::open_ocean());
        let hit = march_to_surface(&field, time);
        let (normal, gradient) =
            field.normal(Vector2::new(hit.position.x, hit.position.z), time);
        let view = (Point3::new(0.0, 6.0, -10.0) - hit.position).normalize();
        shader.shade(
            hit.position,
            normal,
            view,
            time,
            gradient,
            &sun(),
            &TestSky,
            &TestFloor,
        )
    };
    assert_eq!(run(), run());
}

#[test]
fn missing_the_water_reports_no_hit() {
    let field = WaveField::new(WaveSpectrum::open_ocean());
    // a ray fired upward can never meet the surface
    let config = RaymarchConfig::new(1e-3, 100.0);
    let hit = raymarch(
        Point3::new(0.0, 5.0, 0.0),
        Vector3::unit_y(),
        0.0,
        &config,
        |p, t| field.signed_distance(p, t),
    );
    assert!(!hit.hit && !hit.valid);
}
