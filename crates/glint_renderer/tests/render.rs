//! End-to-end checks across the renderer's public API.

use std::sync::Arc;

use glint_renderer::{
    make_box, render, BvhNode, Camera, Color, ConstantMedium, Dielectric, DiffuseLight, Hittable,
    HittableList, Interval, Lambertian, Material, Metal, Quad, RenderConfig, Ray, RotateY, Sphere,
    Translate, Triangle, Vec3,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn front() -> Interval {
    Interval::new(0.0001, f32::INFINITY)
}

/// A cluttered scene mixing every primitive kind.
fn mixed_scene(rng: &mut StdRng) -> HittableList {
    let diffuse: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.4, 0.2, 0.1)));
    let metal: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.1));
    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));

    let mut world = HittableList::new();
    for _ in 0..60 {
        let center = Vec3::new(
            rng.gen_range(-8.0..8.0),
            rng.gen_range(-3.0..3.0),
            rng.gen_range(-20.0..-2.0),
        );
        let material = match rng.gen_range(0..3) {
            0 => diffuse.clone(),
            1 => metal.clone(),
            _ => glass.clone(),
        };
        world.add(Arc::new(Sphere::new(center, rng.gen_range(0.1..0.8), material)));
    }

    world.add(Arc::new(Quad::new(
        Vec3::new(-10.0, -4.0, -25.0),
        Vec3::new(20.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 24.0),
        diffuse.clone(),
    )));
    world.add(Arc::new(Triangle::from_vertices(
        Vec3::new(-2.0, 3.0, -6.0),
        Vec3::new(2.0, 3.0, -6.0),
        Vec3::new(0.0, 5.0, -7.0),
        metal.clone(),
    )));

    let cube: Arc<dyn Hittable> = Arc::new(make_box(Vec3::ZERO, Vec3::splat(1.5), diffuse.clone()));
    let cube: Arc<dyn Hittable> = Arc::new(RotateY::new(cube, 30.0));
    world.add(Arc::new(Translate::new(cube, Vec3::new(3.0, -1.0, -9.0))));

    world
}

#[test]
fn bvh_and_list_agree_on_closest_hit() {
    let mut rng = StdRng::seed_from_u64(2024);
    let list = mixed_scene(&mut rng);
    let bvh = BvhNode::new(list.objects().to_vec(), &mut rng);

    let mut rays = StdRng::seed_from_u64(7);
    let mut hits = 0;
    for _ in 0..2000 {
        let dir = Vec3::new(
            rays.gen_range(-0.6..0.6),
            rays.gen_range(-0.4..0.4),
            -1.0,
        );
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), dir, rays.gen_range(0.0..1.0));

        // Surfaces only; the generator is unused by every hit here
        let mut scratch = StdRng::seed_from_u64(0);
        let from_list = list.hit(&ray, front(), &mut scratch);
        let from_bvh = bvh.hit(&ray, front(), &mut scratch);

        match (from_list, from_bvh) {
            (Some(a), Some(b)) => {
                hits += 1;
                assert!((a.t - b.t).abs() < 1e-4, "list t = {}, bvh t = {}", a.t, b.t);
                assert!((a.normal - b.normal).length() < 1e-4);
            }
            (None, None) => {}
            (a, b) => panic!(
                "list and bvh disagree: list hit = {}, bvh hit = {}",
                a.is_some(),
                b.is_some()
            ),
        }
    }
    assert!(hits > 100, "scene too sparse to be meaningful: {} hits", hits);
}

#[test]
fn bvh_never_misses_closer_of_tangent_spheres() {
    let material: Arc<dyn Material> = Arc::new(Lambertian::new(Color::splat(0.5)));
    // Two unit spheres touching at the origin, with filler so the tree splits them
    let mut objects: Vec<Arc<dyn Hittable>> = vec![
        Arc::new(Sphere::new(Vec3::new(-1.0, 0.0, -5.0), 1.0, material.clone())),
        Arc::new(Sphere::new(Vec3::new(1.0, 0.0, -5.0), 1.0, material.clone())),
    ];
    for i in 0..6 {
        objects.push(Arc::new(Sphere::new(
            Vec3::new(i as f32 * 4.0 - 12.0, 6.0, -30.0),
            0.5,
            material.clone(),
        )));
    }

    for seed in 0..16 {
        let mut rng = StdRng::seed_from_u64(seed);
        let bvh = BvhNode::new(objects.clone(), &mut rng);
        let list = HittableList::from_objects(objects.clone());

        // Rays grazing the contact point from either side
        for k in -20..=20 {
            let x = k as f32 * 0.005;
            let ray = Ray::new_simple(Vec3::new(x, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
            let expected = list.hit(&ray, front(), &mut rng).map(|r| r.t);
            let actual = bvh.hit(&ray, front(), &mut rng).map(|r| r.t);
            match (expected, actual) {
                (Some(e), Some(a)) => assert!((e - a).abs() < 1e-5),
                (e, a) => assert_eq!(e.is_some(), a.is_some(), "x = {}", x),
            }
        }
    }
}

#[test]
fn axis_ray_hits_unit_sphere_at_half() {
    let mut camera = Camera::new()
        .with_image(1.0, 2)
        .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
        .with_lens(90.0, 0.0, 1.0);
    camera.initialize();

    let material: Arc<dyn Material> = Arc::new(Lambertian::new(Color::splat(0.5)));
    let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, material);
    let ray = Ray::new_simple(camera.look_from(), camera.look_at() - camera.look_from());
    let mut rng = StdRng::seed_from_u64(0);

    let rec = sphere.hit(&ray, front(), &mut rng).expect("axis ray should hit");
    assert!((rec.t - 0.5).abs() < 1e-6);
    assert!((rec.normal - Vec3::Z).length() < 1e-6);
}

#[test]
fn grazing_ray_inside_glass_always_reflects() {
    let glass = Dielectric::new(1.5);
    let sphere = Sphere::new(Vec3::ZERO, 1.0, Arc::new(Dielectric::new(1.5)));

    // A chord close to the rim, travelling inside the sphere
    let origin = Vec3::new(-0.9, 0.0, 0.0);
    let dir = Vec3::Y;
    let inside = Ray::new_simple(origin, dir);

    for seed in 0..100 {
        let mut rng = StdRng::seed_from_u64(seed);
        let rec = sphere.hit(&inside, front(), &mut rng).expect("chord exits the sphere");
        assert!(!rec.front_face);

        let cos_theta = (-dir).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();
        assert!(1.5 * sin_theta > 1.0, "geometry must exceed the critical angle");

        let scattered = glass
            .scatter(&inside, &rec, &mut rng)
            .expect("glass always scatters")
            .scattered;
        // Reflection stays inside the sphere
        assert!(scattered.direction().dot(rec.normal) > 0.0);
    }
}

#[test]
fn render_is_reproducible_and_lit() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut rng = StdRng::seed_from_u64(3);
    let mut world = HittableList::new();
    let white: Arc<dyn Material> = Arc::new(Lambertian::new(Color::splat(0.73)));
    let light: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::splat(7.0)));

    world.add(Arc::new(Quad::new(
        Vec3::new(-5.0, -1.0, -5.0),
        Vec3::new(10.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 10.0),
        white.clone(),
    )));
    world.add(Arc::new(Quad::new(
        Vec3::new(-1.0, 3.0, -3.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 2.0),
        light,
    )));
    let fog_boundary: Arc<dyn Hittable> = Arc::new(Sphere::new(Vec3::new(0.0, 0.0, -2.0), 0.6, white));
    world.add(Arc::new(ConstantMedium::new(fog_boundary, 0.5, Color::splat(0.9))));

    let world = BvhNode::from_list(world, &mut rng);

    let mut camera = Camera::new()
        .with_image(1.5, 24)
        .with_quality(8, 6)
        .with_position(Vec3::new(0.0, 0.5, 2.0), Vec3::new(0.0, 0.0, -2.0), Vec3::Y)
        .with_lens(60.0, 0.0, 4.0);
    camera.initialize();

    let config = RenderConfig {
        seed: 11,
        bucket_size: 8,
        threads: Some(2),
    };

    let first = render(&camera, &world, &config).expect("render");
    let second = render(&camera, &world, &config).expect("render");

    assert_eq!(first.width, 24);
    assert_eq!(first.height, 16);
    assert_eq!(first.pixels, second.pixels);

    let bytes = first.to_rgb8();
    assert_eq!(bytes.len(), 24 * 16);
    assert!(bytes.iter().any(|p| p.iter().any(|&c| c > 0)), "image is entirely black");
}
