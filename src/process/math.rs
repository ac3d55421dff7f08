use cgmath::{InnerSpace, Vector3};


pub fn saturate(x: f32) -> f32 {
    x.max(0.0).min(1.0)
}

pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

pub fn mix_v3(a: Vector3<f32>, b: Vector3<f32>, t: f32) -> Vector3<f32> {
    a + (b - a) * t
}

pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = saturate((x - edge0) / (edge1 - edge0));
    t * t * (3.0 - 2.0 * t)
}

pub fn exp_v3(v: Vector3<f32>) -> Vector3<f32> {
    Vector3::new(v.x.exp(), v.y.exp(), v.z.exp())
}

/// Mirror `incident` about the unit normal. `incident` points into the
/// surface; the result points away from it.
pub fn reflect(incident: Vector3<f32>, normal: Vector3<f32>) -> Vector3<f32> {
    incident - normal * (2.0 * incident.dot(normal))
}

/// Snell refraction of a unit incident ray entering a medium with relative
/// index `eta` (n_from / n_to). Past the critical angle the discriminant goes
/// negative and the ray is reflected instead, keeping grazing exits
/// continuous rather than returning a degenerate direction.
pub fn refract_or_reflect(incident: Vector3<f32>, normal: Vector3<f32>, eta: f32) -> Vector3<f32> {
    let cos_i = (-incident.dot(normal)).max(-1.0).min(1.0);
    let sin_t2 = eta * eta * (1.0 - cos_i * cos_i);
    if sin_t2 > 1.0 {
        return reflect(incident, normal);
    }
    let cos_t = (1.0 - sin_t2).sqrt();
    incident * eta + normal * (eta * cos_i - cos_t)
}
