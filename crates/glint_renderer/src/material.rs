//! Material trait for surface scattering.

use std::sync::Arc;

use glint_math::Vec3;
use rand::RngCore;

use crate::sampling::{gen_f32, random_unit_vector};
use crate::texture::{SolidColor, Texture};
use crate::{hittable::HitRecord, Ray};

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Outcome of a successful scatter.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Fraction of the scattered radiance carried back along the incoming ray
    pub attenuation: Color,
    /// The continuation ray
    pub scattered: Ray,
}

impl ScatterResult {
    pub fn new(attenuation: Color, scattered: Ray) -> Self {
        Self {
            attenuation,
            scattered,
        }
    }
}

/// Trait for materials that describe how light interacts with surfaces.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed.
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult>;

    /// Get emitted light from this material.
    ///
    /// Most materials return black (no emission).
    fn emitted(&self, _u: f32, _v: f32, _p: Vec3) -> Color {
        Color::ZERO
    }
}

/// Lambertian (diffuse) material.
pub struct Lambertian {
    albedo: Arc<dyn Texture>,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self::from_texture(Arc::new(SolidColor::new(albedo)))
    }

    pub fn from_texture(albedo: Arc<dyn Texture>) -> Self {
        Self { albedo }
    }
}

impl Material for Lambertian {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let mut scatter_direction = rec.normal + random_unit_vector(rng);

        // Catch degenerate scatter direction
        if near_zero(scatter_direction) {
            scatter_direction = rec.normal;
        }

        let scattered = Ray::new(rec.p, scatter_direction, ray_in.time());
        Some(ScatterResult::new(self.albedo.value(rec.u, rec.v, rec.p), scattered))
    }
}

/// Metal (specular) material.
pub struct Metal {
    albedo: Arc<dyn Texture>,
    fuzz: f32,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self::from_texture(Arc::new(SolidColor::new(albedo)), fuzz)
    }

    pub fn from_texture(albedo: Arc<dyn Texture>, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.min(1.0),
        }
    }

    pub fn fuzz(&self) -> f32 {
        self.fuzz
    }
}

impl Material for Metal {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction(), rec.normal).normalize();
        // Directions that dip below the surface are kept
        let scattered_dir = reflected + self.fuzz * random_unit_vector(rng);

        let scattered = Ray::new(rec.p, scattered_dir, ray_in.time());
        Some(ScatterResult::new(self.albedo.value(rec.u, rec.v, rec.p), scattered))
    }
}

/// Dielectric (glass) material.
pub struct Dielectric {
    /// Index of refraction
    ior: f32,
    tint: Color,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ior: f32) -> Self {
        Self::with_tint(ior, Color::ONE)
    }

    /// A dielectric that filters transmitted and reflected light by `tint`.
    pub fn with_tint(ior: f32, tint: Color) -> Self {
        Self { ior, tint }
    }

    /// Schlick's approximation for reflectance
    fn reflectance(cosine: f32, ior: f32) -> f32 {
        let r0 = ((1.0 - ior) / (1.0 + ior)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }
}

impl Material for Dielectric {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let refraction_ratio = if rec.front_face { 1.0 / self.ior } else { self.ior };

        let unit_direction = ray_in.direction().normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        // Total internal reflection
        let cannot_refract = refraction_ratio * sin_theta > 1.0;

        let direction =
            if cannot_refract || Self::reflectance(cos_theta, refraction_ratio) > gen_f32(rng) {
                reflect(unit_direction, rec.normal)
            } else {
                refract(unit_direction, rec.normal, refraction_ratio)
            };

        let scattered = Ray::new(rec.p, direction, ray_in.time());
        Some(ScatterResult::new(self.tint, scattered))
    }
}

/// Diffuse light emitter.
pub struct DiffuseLight {
    emit: Arc<dyn Texture>,
}

impl DiffuseLight {
    /// Create a new diffuse light with the given emission color.
    pub fn new(emit: Color) -> Self {
        Self::from_texture(Arc::new(SolidColor::new(emit)))
    }

    pub fn from_texture(emit: Arc<dyn Texture>) -> Self {
        Self { emit }
    }
}

impl Material for DiffuseLight {
    fn scatter(&self, _ray_in: &Ray, _rec: &HitRecord, _rng: &mut dyn RngCore) -> Option<ScatterResult> {
        // Lights don't scatter rays
        None
    }

    fn emitted(&self, u: f32, v: f32, p: Vec3) -> Color {
        self.emit.value(u, v, p)
    }
}

/// Phase function for participating media: scatters uniformly in all
/// directions.
pub struct Isotropic {
    albedo: Arc<dyn Texture>,
}

impl Isotropic {
    pub fn new(albedo: Color) -> Self {
        Self::from_texture(Arc::new(SolidColor::new(albedo)))
    }

    pub fn from_texture(albedo: Arc<dyn Texture>) -> Self {
        Self { albedo }
    }
}

impl Material for Isotropic {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let scattered = Ray::new(rec.p, random_unit_vector(rng), ray_in.time());
        Some(ScatterResult::new(self.albedo.value(rec.u, rec.v, rec.p), scattered))
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// True if every component is within 1e-8 of zero.
#[inline]
fn near_zero(v: Vec3) -> bool {
    const S: f32 = 1e-8;
    v.x.abs() < S && v.y.abs() < S && v.z.abs() < S
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface with unit normal `n`.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn record<'a>(ray: &Ray, normal: Vec3, material: &'a dyn Material) -> HitRecord<'a> {
        HitRecord::new(ray, 1.0, normal, 0.0, 0.0, material)
    }

    #[test]
    fn test_reflect() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        let n = Vec3::Y;
        assert_eq!(reflect(v, n), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_refract_straight_through() {
        let uv = Vec3::NEG_Z;
        let out = refract(uv, Vec3::Z, 1.0 / 1.5);
        assert!((out - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_lambertian_scatters_into_hemisphere() {
        let mat = Lambertian::new(Color::new(0.8, 0.3, 0.3));
        let ray = Ray::new(Vec3::new(0.0, 0.0, 2.0), Vec3::NEG_Z, 0.25);
        let rec = record(&ray, Vec3::Z, &mat);
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..200 {
            let s = mat.scatter(&ray, &rec, &mut rng).expect("lambertian always scatters");
            assert_eq!(s.attenuation, Color::new(0.8, 0.3, 0.3));
            assert!(s.scattered.direction().dot(rec.normal) >= 0.0);
            assert_eq!(s.scattered.origin(), rec.p);
            assert_eq!(s.scattered.time(), 0.25);
        }
    }

    #[test]
    fn test_near_zero() {
        assert!(near_zero(Vec3::splat(1e-9)));
        assert!(!near_zero(Vec3::new(0.0, 0.0, 1e-3)));
    }

    #[test]
    fn test_mirror_metal_reflects_exactly() {
        let mat = Metal::new(Color::ONE, 0.0);
        let ray = Ray::new_simple(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let rec = record(&ray, Vec3::Y, &mat);
        let mut rng = StdRng::seed_from_u64(2);

        let s = mat.scatter(&ray, &rec, &mut rng).expect("metal always scatters");
        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!((s.scattered.direction() - expected).length() < 1e-6);
    }

    #[test]
    fn test_metal_fuzz_is_capped() {
        assert_eq!(Metal::new(Color::ONE, 3.0).fuzz(), 1.0);
        assert_eq!(Metal::new(Color::ONE, 0.3).fuzz(), 0.3);
    }

    #[test]
    fn test_fuzzy_metal_never_absorbs() {
        // Grazing reflection with maximum fuzz still scatters every time
        let mat = Metal::new(Color::ONE, 1.0);
        let ray = Ray::new_simple(Vec3::new(-1.0, 0.01, 0.0), Vec3::new(1.0, -0.01, 0.0));
        let rec = record(&ray, Vec3::Y, &mat);
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..200 {
            assert!(mat.scatter(&ray, &rec, &mut rng).is_some());
        }
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        // Exiting glass at a grazing angle past the critical angle
        let mat = Dielectric::new(1.5);
        let dir = Vec3::new(1.0, 0.1, 0.0).normalize();
        let ray = Ray::new_simple(Vec3::ZERO, dir);
        // Outward normal along the ray: back face hit, inside the glass
        let rec = record(&ray, Vec3::Y, &mat);
        assert!(!rec.front_face);

        let expected = reflect(dir, rec.normal);
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let s = mat.scatter(&ray, &rec, &mut rng).expect("dielectric always scatters");
            assert!((s.scattered.direction() - expected).length() < 1e-6);
            assert_eq!(s.attenuation, Color::ONE);
        }
    }

    #[test]
    fn test_dielectric_tint() {
        let tint = Color::new(0.9, 0.7, 0.5);
        let mat = Dielectric::with_tint(1.5, tint);
        let ray = Ray::new_simple(Vec3::new(0.0, 0.0, 2.0), Vec3::NEG_Z);
        let rec = record(&ray, Vec3::Z, &mat);
        let mut rng = StdRng::seed_from_u64(4);

        let s = mat.scatter(&ray, &rec, &mut rng).expect("dielectric always scatters");
        assert_eq!(s.attenuation, tint);
    }

    #[test]
    fn test_diffuse_light() {
        let mat = DiffuseLight::new(Color::splat(4.0));
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::NEG_Z);
        let rec = record(&ray, Vec3::Z, &mat);
        let mut rng = StdRng::seed_from_u64(5);

        assert!(mat.scatter(&ray, &rec, &mut rng).is_none());
        assert_eq!(mat.emitted(0.0, 0.0, Vec3::ZERO), Color::splat(4.0));
        assert_eq!(Lambertian::new(Color::ONE).emitted(0.0, 0.0, Vec3::ZERO), Color::ZERO);
    }

    #[test]
    fn test_isotropic_scatters_unit_directions() {
        let mat = Isotropic::new(Color::splat(0.5));
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::NEG_Z);
        let rec = record(&ray, Vec3::X, &mat);
        let mut rng = StdRng::seed_from_u64(6);

        for _ in 0..100 {
            let s = mat.scatter(&ray, &rec, &mut rng).expect("isotropic always scatters");
            assert!((s.scattered.direction().length() - 1.0).abs() < 1e-4);
            assert_eq!(s.attenuation, Color::splat(0.5));
        }
    }
}
