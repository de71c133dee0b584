//! Built-in scenes.
//!
//! Each preset returns its world (already behind a BVH where it pays off)
//! together with an uninitialized camera.

use std::sync::Arc;

use clap::ValueEnum;
use glint_core::ImageCache;
use glint_math::Vec3;
use glint_renderer::{
    make_box, BvhNode, Camera, CheckerTexture, Color, ConstantMedium, Dielectric, DiffuseLight,
    Hittable, HittableList, ImageTexture, Lambertian, Material, Metal, NoiseTexture, Quad, RotateY,
    Sphere, Texture, Translate, Triangle,
};
use rand::{Rng, RngCore};

/// Sky colour used by the outdoor scenes.
const SKY: Color = Color::new(0.75, 0.8, 1.0);

/// A world and the camera that frames it.
pub struct Scene {
    pub world: Arc<dyn Hittable>,
    pub camera: Camera,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScenePreset {
    /// Ground, three large spheres and a field of small random ones
    Book1,
    /// Glass, gold and mirror spheres on a checkered floor
    Experimental,
    /// Two checkered spheres
    Checkered,
    /// Image-textured globe
    Earth,
    /// Perlin-noise metal spheres
    Perlin,
    /// Five coloured quads
    Quads,
    /// Five coloured triangles
    Triangles,
    /// Noise-textured sphere lit by emitters
    SimpleLight,
    /// Cornell box with two rotated boxes
    Cornell,
    /// Cornell box with smoke and fog blocks
    CornellSmoke,
    /// Field of moving spheres for motion blur
    Bouncing,
}

impl ScenePreset {
    /// Build the preset.
    ///
    /// `images` resolves texture files; `rng` drives random layouts, noise
    /// tables and BVH construction.
    pub fn build(self, images: &mut ImageCache, rng: &mut dyn RngCore) -> Scene {
        log::info!("Building scene {:?}", self);
        match self {
            ScenePreset::Book1 => book1(rng),
            ScenePreset::Experimental => experimental(rng),
            ScenePreset::Checkered => checkered(rng),
            ScenePreset::Earth => earth(images),
            ScenePreset::Perlin => perlin(rng),
            ScenePreset::Quads => quads(rng),
            ScenePreset::Triangles => triangles(rng),
            ScenePreset::SimpleLight => simple_light(rng),
            ScenePreset::Cornell => cornell(rng),
            ScenePreset::CornellSmoke => cornell_smoke(),
            ScenePreset::Bouncing => bouncing(rng),
        }
    }
}

fn lambertian(albedo: Color) -> Arc<dyn Material> {
    Arc::new(Lambertian::new(albedo))
}

fn random_color(rng: &mut dyn RngCore, min: f32, max: f32) -> Color {
    Color::new(
        rng.gen_range(min..max),
        rng.gen_range(min..max),
        rng.gen_range(min..max),
    )
}

fn into_bvh(world: HittableList, rng: &mut dyn RngCore) -> Arc<dyn Hittable> {
    Arc::new(BvhNode::from_list(world, rng))
}

fn book1(rng: &mut dyn RngCore) -> Scene {
    let mut world = HittableList::new();

    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
    let bubble: Arc<dyn Material> = Arc::new(Dielectric::new(1.0 / 1.5));

    world.add(Arc::new(Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 1000.0, lambertian(Color::splat(0.4)))));
    world.add(Arc::new(Sphere::new(
        Vec3::new(-3.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::splat(0.8), 0.05)),
    )));
    world.add(Arc::new(Sphere::new(Vec3::new(3.0, 1.0, 0.0), 1.0, glass.clone())));
    world.add(Arc::new(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0, glass)));
    world.add(Arc::new(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 0.8, bubble)));

    let grid = 10;
    for x in 0..grid {
        for z in 0..grid {
            let choose_mat: f32 = rng.gen();
            let center = Vec3::new(
                1.25 * ((x - grid / 2) as f32 + 0.75 * rng.gen::<f32>()),
                0.25,
                1.25 * ((z - grid / 2) as f32 + 0.75 * rng.gen::<f32>()),
            );

            let material: Arc<dyn Material> = if choose_mat < 0.5 {
                let albedo = random_color(rng, 0.0, 1.0) * random_color(rng, 0.0, 1.0);
                lambertian(albedo)
            } else if choose_mat < 0.8 {
                let albedo = random_color(rng, 0.5, 1.0);
                Arc::new(Metal::new(albedo, rng.gen_range(0.0..0.5)))
            } else {
                Arc::new(Dielectric::new(1.5))
            };

            world.add(Arc::new(Sphere::new(center, 0.25, material)));
        }
    }

    let camera = Camera::new()
        .with_image(16.0 / 9.0, 320)
        .with_quality(200, 20)
        .with_position(Vec3::new(5.0, 6.0, 0.0), Vec3::new(0.0, 1.0, 0.0), Vec3::Y)
        .with_lens(40.0, 0.0, 15.0)
        .with_background(SKY);

    Scene {
        world: into_bvh(world, rng),
        camera,
    }
}

fn experimental(rng: &mut dyn RngCore) -> Scene {
    let mut world = HittableList::new();

    let checker: Arc<dyn Texture> = Arc::new(CheckerTexture::from_colors(0.75, Color::splat(0.1), Color::splat(0.9)));
    let gold: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.85, 0.6, 0.2), 0.05));
    let mirror: Arc<dyn Material> = Arc::new(Metal::new(Color::splat(0.6), 0.01));
    let blue_glass: Arc<dyn Material> = Arc::new(Dielectric::with_tint(1.5, Color::new(0.7, 0.95, 1.0)));
    let orange_glass: Arc<dyn Material> = Arc::new(Dielectric::with_tint(1.5, Color::new(1.0, 0.8, 0.65)));
    let bubble: Arc<dyn Material> = Arc::new(Dielectric::new(1.0 / 1.5));

    world.add(Arc::new(Sphere::new(Vec3::new(0.0, 0.0, -1.25), 0.5, gold)));
    world.add(Arc::new(Sphere::new(Vec3::ZERO, 0.5, blue_glass)));
    world.add(Arc::new(Sphere::new(Vec3::ZERO, 0.45, bubble)));
    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, -250.5, -1.0),
        250.0,
        Arc::new(Lambertian::from_texture(checker)),
    )));
    world.add(Arc::new(Sphere::new(Vec3::new(-1.0, 0.0, -1.0), 0.5, mirror)));
    world.add(Arc::new(Sphere::new(Vec3::new(1.0, 0.0, -1.0), 0.5, orange_glass)));

    let look_from = Vec3::new(3.0, 2.25, 6.0);
    let look_at = Vec3::new(0.0, 0.0, -1.0);
    let camera = Camera::new()
        .with_image(16.0 / 9.0, 640)
        .with_quality(300, 50)
        .with_position(look_from, look_at, Vec3::Y)
        .with_lens(21.25, 0.0, (look_from - look_at).length() + 0.25)
        .with_background(SKY);

    Scene {
        world: into_bvh(world, rng),
        camera,
    }
}

fn checkered(rng: &mut dyn RngCore) -> Scene {
    let mut world = HittableList::new();

    let checker: Arc<dyn Texture> = Arc::new(CheckerTexture::from_colors(0.5, Color::splat(0.1), Color::splat(0.9)));
    let material: Arc<dyn Material> = Arc::new(Lambertian::from_texture(checker));

    world.add(Arc::new(Sphere::new(Vec3::new(0.0, -10.0, 0.0), 10.0, material.clone())));
    world.add(Arc::new(Sphere::new(Vec3::new(0.0, 10.0, 0.0), 10.0, material)));

    let camera = Camera::new()
        .with_image(16.0 / 9.0, 320)
        .with_quality(100, 50)
        .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.0, 10.0)
        .with_background(SKY);

    Scene {
        world: into_bvh(world, rng),
        camera,
    }
}

fn earth(images: &mut ImageCache) -> Scene {
    let earth_texture: Arc<dyn Texture> = Arc::new(ImageTexture::new(images.load_or_missing("EarthUV.png")));
    let surface: Arc<dyn Material> = Arc::new(Lambertian::from_texture(earth_texture));
    let globe: Arc<dyn Hittable> = Arc::new(Sphere::new(Vec3::ZERO, 2.0, surface));

    let camera = Camera::new()
        .with_image(16.0 / 9.0, 640)
        .with_quality(100, 50)
        .with_position(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::Y)
        .with_lens(25.0, 0.0, 10.0)
        .with_background(SKY);

    Scene { world: globe, camera }
}

fn perlin(rng: &mut dyn RngCore) -> Scene {
    let mut world = HittableList::new();

    let noise: Arc<dyn Texture> = Arc::new(NoiseTexture::new(5.0, 7, rng));
    let material: Arc<dyn Material> = Arc::new(Metal::from_texture(noise, 0.35));

    world.add(Arc::new(Sphere::new(Vec3::new(0.0, -250.0, 0.0), 250.0, material.clone())));
    world.add(Arc::new(Sphere::new(Vec3::new(0.0, 2.0, 0.0), 2.0, material)));

    let camera = Camera::new()
        .with_image(16.0 / 9.0, 640)
        .with_quality(200, 50)
        .with_position(Vec3::new(13.0, 4.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_lens(30.0, 0.0, 10.0)
        .with_background(SKY);

    Scene {
        world: into_bvh(world, rng),
        camera,
    }
}

/// The five panels shared by the quad and triangle scenes:
/// corner, two edges and material.
fn panels() -> Vec<(Vec3, Vec3, Vec3, Arc<dyn Material>)> {
    vec![
        (
            Vec3::new(-3.0, -2.0, 5.0),
            Vec3::new(0.0, 0.0, -4.0),
            Vec3::new(0.0, 4.0, 0.0),
            lambertian(Color::new(1.0, 0.3, 0.3)),
        ),
        (
            Vec3::new(-2.0, -2.0, 0.0),
            Vec3::new(4.0, 0.0, 0.0),
            Vec3::new(0.0, 4.0, 0.0),
            Arc::new(Metal::new(Color::ONE, 0.2)),
        ),
        (
            Vec3::new(3.0, -2.0, 1.0),
            Vec3::new(0.0, 0.0, 4.0),
            Vec3::new(0.0, 4.0, 0.0),
            lambertian(Color::new(0.3, 1.0, 0.3)),
        ),
        (
            Vec3::new(-2.0, 3.0, 1.0),
            Vec3::new(4.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 4.0),
            lambertian(Color::new(0.8, 0.8, 0.4)),
        ),
        (
            Vec3::new(-2.0, -3.0, 5.0),
            Vec3::new(4.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -4.0),
            lambertian(Color::new(0.2, 0.2, 1.0)),
        ),
    ]
}

fn panel_camera() -> Camera {
    Camera::new()
        .with_image(16.0 / 9.0, 320)
        .with_quality(300, 50)
        .with_position(Vec3::new(0.0, 0.0, 9.0), Vec3::ZERO, Vec3::Y)
        .with_lens(80.0, 0.0, 10.0)
        .with_background(SKY)
}

fn quads(rng: &mut dyn RngCore) -> Scene {
    let mut world = HittableList::new();
    for (q, u, v, material) in panels() {
        world.add(Arc::new(Quad::new(q, u, v, material)));
    }

    Scene {
        world: into_bvh(world, rng),
        camera: panel_camera(),
    }
}

fn triangles(rng: &mut dyn RngCore) -> Scene {
    let mut world = HittableList::new();
    for (q, u, v, material) in panels() {
        world.add(Arc::new(Triangle::new(q, u, v, material)));
    }

    Scene {
        world: into_bvh(world, rng),
        camera: panel_camera(),
    }
}

fn simple_light(rng: &mut dyn RngCore) -> Scene {
    let mut world = HittableList::new();

    let noise: Arc<dyn Texture> = Arc::new(NoiseTexture::new(4.0, 5, rng));
    let marble: Arc<dyn Material> = Arc::new(Lambertian::from_texture(noise));

    world.add(Arc::new(Sphere::new(Vec3::new(0.0, 2.0, 0.0), 2.0, marble.clone())));
    world.add(Arc::new(Quad::new(
        Vec3::new(-200.0, 0.0, -200.0),
        Vec3::new(400.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 400.0),
        marble,
    )));

    let orange: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::new(2.0, 1.0, 0.5)));
    let purple: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::new(1.5, 0.5, 1.5)));
    let blue: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::new(0.5, 1.0, 2.0)));

    world.add(Arc::new(Quad::new(Vec3::new(3.0, 1.0, -5.0), Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 2.0, 0.0), orange)));
    world.add(Arc::new(Quad::new(Vec3::new(3.0, 1.0, 5.0), Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 2.0, 0.0), purple)));
    world.add(Arc::new(Sphere::new(Vec3::new(0.0, 7.0, 0.0), 2.0, blue)));

    let camera = Camera::new()
        .with_image(16.0 / 9.0, 640)
        .with_quality(400, 50)
        .with_position(Vec3::new(26.0, 3.0, 0.0), Vec3::new(0.0, 2.0, 0.0), Vec3::Y)
        .with_lens(20.0, 0.0, 10.0)
        .with_background(Color::ZERO);

    Scene {
        world: into_bvh(world, rng),
        camera,
    }
}

/// Box walls of side `size` with the light panel, shared by both Cornell
/// variants.
fn cornell_walls(
    world: &mut HittableList,
    size: f32,
    red: Arc<dyn Material>,
    green: Arc<dyn Material>,
    white: Arc<dyn Material>,
) {
    world.add(Arc::new(Quad::new(Vec3::new(size, 0.0, 0.0), Vec3::new(0.0, size, 0.0), Vec3::new(0.0, 0.0, size), green)));
    world.add(Arc::new(Quad::new(Vec3::ZERO, Vec3::new(0.0, size, 0.0), Vec3::new(0.0, 0.0, size), red)));
    world.add(Arc::new(Quad::new(Vec3::ZERO, Vec3::new(size, 0.0, 0.0), Vec3::new(0.0, 0.0, size), white.clone())));
    world.add(Arc::new(Quad::new(Vec3::splat(size), Vec3::new(-size, 0.0, 0.0), Vec3::new(0.0, 0.0, -size), white.clone())));
    world.add(Arc::new(Quad::new(Vec3::new(0.0, 0.0, size), Vec3::new(size, 0.0, 0.0), Vec3::new(0.0, size, 0.0), white)));
}

/// Axis-aligned box from the origin to `extent`, turned about Y and moved.
fn placed_box(extent: Vec3, angle: f32, offset: Vec3, material: Arc<dyn Material>) -> Arc<dyn Hittable> {
    let shape: Arc<dyn Hittable> = Arc::new(make_box(Vec3::ZERO, extent, material));
    let shape: Arc<dyn Hittable> = Arc::new(RotateY::new(shape, angle));
    Arc::new(Translate::new(shape, offset))
}

fn cornell(rng: &mut dyn RngCore) -> Scene {
    let mut world = HittableList::new();

    let white = lambertian(Color::splat(0.75));
    cornell_walls(
        &mut world,
        55.5,
        lambertian(Color::new(0.75, 0.05, 0.05)),
        lambertian(Color::new(0.05, 0.75, 0.05)),
        white.clone(),
    );
    world.add(Arc::new(Quad::new(
        Vec3::new(34.3, 55.4, 34.3),
        Vec3::new(-13.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -10.5),
        Arc::new(DiffuseLight::new(Color::splat(10.0))),
    )));

    world.add(placed_box(Vec3::new(16.5, 33.0, 16.5), 15.0, Vec3::new(26.5, 0.0, 29.5), white.clone()));
    world.add(placed_box(Vec3::splat(16.5), -20.0, Vec3::new(13.0, 0.0, 6.5), white));

    let camera = Camera::new()
        .with_image(1.0, 400)
        .with_quality(200, 100)
        .with_position(Vec3::new(27.8, 27.8, -80.0), Vec3::new(27.8, 27.8, 0.0), Vec3::Y)
        .with_lens(40.0, 0.0, 10.0)
        .with_background(Color::ZERO);

    Scene {
        world: into_bvh(world, rng),
        camera,
    }
}

fn cornell_smoke() -> Scene {
    let mut world = HittableList::new();

    let white = lambertian(Color::splat(0.73));
    cornell_walls(
        &mut world,
        555.0,
        lambertian(Color::new(0.65, 0.05, 0.05)),
        lambertian(Color::new(0.12, 0.45, 0.15)),
        white.clone(),
    );
    world.add(Arc::new(Quad::new(
        Vec3::new(113.0, 554.0, 127.0),
        Vec3::new(330.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 305.0),
        Arc::new(DiffuseLight::new(Color::splat(7.0))),
    )));

    let tall = placed_box(Vec3::new(165.0, 330.0, 165.0), 15.0, Vec3::new(265.0, 0.0, 295.0), white.clone());
    let short = placed_box(Vec3::splat(165.0), -18.0, Vec3::new(130.0, 0.0, 65.0), white);

    world.add(Arc::new(ConstantMedium::new(tall, 0.01, Color::ZERO)));
    world.add(Arc::new(ConstantMedium::new(short, 0.01, Color::ONE)));

    let camera = Camera::new()
        .with_image(1.0, 320)
        .with_quality(1000, 50)
        .with_position(Vec3::new(278.0, 278.0, -800.0), Vec3::new(278.0, 278.0, 0.0), Vec3::Y)
        .with_lens(40.0, 0.0, 10.0)
        .with_background(Color::ZERO);

    // Few enough objects that a flat list is fine
    Scene {
        world: Arc::new(world),
        camera,
    }
}

fn bouncing(rng: &mut dyn RngCore) -> Scene {
    let mut world = HittableList::new();

    let checker: Arc<dyn Texture> = Arc::new(CheckerTexture::from_colors(
        0.32,
        Color::new(0.2, 0.3, 0.1),
        Color::splat(0.9),
    ));
    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::from_texture(checker)),
    )));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat: f32 = rng.gen();
            let center = Vec3::new(
                a as f32 + 0.9 * rng.gen::<f32>(),
                0.2,
                b as f32 + 0.9 * rng.gen::<f32>(),
            );

            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            if choose_mat < 0.8 {
                let albedo = random_color(rng, 0.0, 1.0) * random_color(rng, 0.0, 1.0);
                let end = center + Vec3::new(0.0, rng.gen_range(0.0..0.5), 0.0);
                world.add(Arc::new(Sphere::moving(center, end, 0.2, lambertian(albedo))));
            } else if choose_mat < 0.95 {
                let albedo = random_color(rng, 0.5, 1.0);
                let fuzz = rng.gen_range(0.0..0.5);
                world.add(Arc::new(Sphere::new(center, 0.2, Arc::new(Metal::new(albedo, fuzz)))));
            } else {
                world.add(Arc::new(Sphere::new(center, 0.2, Arc::new(Dielectric::new(1.5)))));
            }
        }
    }

    world.add(Arc::new(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0, Arc::new(Dielectric::new(1.5)))));
    world.add(Arc::new(Sphere::new(Vec3::new(-4.0, 1.0, 0.0), 1.0, lambertian(Color::new(0.4, 0.2, 0.1)))));
    world.add(Arc::new(Sphere::new(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    )));

    let camera = Camera::new()
        .with_image(16.0 / 9.0, 400)
        .with_quality(100, 50)
        .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.6, 10.0)
        .with_background(Color::new(0.7, 0.8, 1.0));

    Scene {
        world: into_bvh(world, rng),
        camera,
    }
}
