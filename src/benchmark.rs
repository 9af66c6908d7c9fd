//! Offline benchmark that fires random rays at procedural scenes and
//! reports per-case timings through [`crate::stats`].

use std::path::PathBuf;

use cgmath::prelude::*;
use cgmath::{Matrix4, Point3, Vector3};

use chrono::Local;

use rand::Rng;

use crate::color::Color;
use crate::consts;
use crate::float::{Float, ToFloat};
use crate::group::Group;
use crate::index_ptr::IndexPtr;
use crate::intersect::{Hit, Intersect, Ray};
use crate::material::Material;
use crate::plane::Plane;
use crate::sphere::Sphere;
use crate::stats;
use crate::transform::Transform;
use crate::triangle::TriangleBuilder;

const N_RAYS: usize = 1_000_000;
const GRID: usize = 10;

fn default_materials() -> Vec<Material> {
    vec![
        Material::matte(Color::new(0.8, 0.2, 0.2)),
        Material::matte(Color::new(0.2, 0.2, 0.8)),
        Material::new(Color::white(), Color::new(5.0, 5.0, 5.0)),
    ]
}

/// Unit vector with a forward (negative z) component
fn random_direction<R: Rng>(rng: &mut R) -> Vector3<Float> {
    loop {
        let v = Vector3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..0.0),
        );
        let len2 = v.magnitude2();
        if len2 > 1e-4 && len2 <= 1.0 {
            return v.normalize();
        }
    }
}

#[allow(clippy::ptr_arg)]
fn sphere_grid(materials: &Vec<Material>) -> Group {
    let mut group = Group::new();
    let half = (GRID / 2).to_float();
    for i in 0..GRID {
        for j in 0..GRID {
            let center = Point3::new(i.to_float() - half, j.to_float() - half, -10.0);
            let material = IndexPtr::new(materials, (i + j) % 2);
            group.add_object(Box::new(Sphere::new(center, 0.4, material)));
        }
    }
    group
}

#[allow(clippy::ptr_arg)]
fn triangle_sheet(materials: &Vec<Material>) -> Group {
    let mut group = Group::new();
    let half = (GRID / 2).to_float();
    let normal = Vector3::unit_z();
    for i in 0..GRID {
        for j in 0..GRID {
            let x = i.to_float() - half;
            let y = j.to_float() - half;
            let corners = [
                Point3::new(x, y, -10.0),
                Point3::new(x + 1.0, y, -10.0),
                Point3::new(x + 1.0, y + 1.0, -10.0),
                Point3::new(x, y + 1.0, -10.0),
            ];
            for tri in &[[0usize, 1, 2], [0, 2, 3]] {
                let mut builder = TriangleBuilder::new();
                for &corner in tri {
                    builder.add_vertex(corners[corner], normal);
                }
                let material = IndexPtr::new(materials, (i + j) % 2);
                let triangle = builder.build(material).expect("Failed to build tri!");
                group.add_object(Box::new(triangle));
            }
        }
    }
    group
}

#[allow(clippy::ptr_arg)]
fn mixed_scene(materials: &Vec<Material>) -> Group {
    let mut group = Group::new();
    // Backdrop at z = -20
    group.add_object(Box::new(Plane::new(
        Vector3::unit_z(),
        20.0,
        IndexPtr::new(materials, 1),
    )));
    group.add_object(Box::new(Sphere::new(
        Point3::new(0.0, 0.0, -8.0),
        2.0,
        IndexPtr::new(materials, 0),
    )));
    group.add_object(Box::new(Sphere::new(
        Point3::new(-4.0, 1.0, -12.0),
        1.0,
        IndexPtr::new(materials, 2),
    )));
    let mut builder = TriangleBuilder::new();
    builder.add_vertex(Point3::new(2.0, -2.0, -9.0), Vector3::unit_z());
    builder.add_vertex(Point3::new(5.0, -2.0, -9.0), Vector3::unit_z());
    builder.add_vertex(Point3::new(3.5, 2.0, -9.0), Vector3::unit_z());
    let triangle = builder
        .build(IndexPtr::new(materials, 1))
        .expect("Failed to build tri!");
    group.add_object(Box::new(triangle));
    // Placeholder transform wrapper, reports no hits for now
    group.add_object(Box::new(Transform::new(
        Matrix4::from_translation(Vector3::new(4.0, 4.0, 0.0)),
        Box::new(Sphere::new(
            Point3::new(0.0, 0.0, -10.0),
            1.0,
            IndexPtr::new(materials, 0),
        )),
    )));
    group
}

fn trace_rays(group: &Group) -> usize {
    let mut rng = rand::thread_rng();
    let mut n_hits = 0;
    for _ in 0..N_RAYS {
        let orig = Point3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            0.0,
        );
        let ray = Ray::new(orig, random_direction(&mut rng));
        let mut hit = Hit::new();
        if group.intersect(&ray, consts::EPSILON, &mut hit) {
            n_hits += 1;
        }
    }
    n_hits
}

pub fn benchmark_intersections() {
    let root_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let materials = default_materials();

    type CaseFn = fn(&Vec<Material>) -> Group;
    let cases: [(&str, CaseFn); 3] = [
        ("spheres", sphere_grid),
        ("triangles", triangle_sheet),
        ("mixed", mixed_scene),
    ];
    for (name, build) in &cases {
        println!("{}...", name);
        stats::new_case(name);
        let mut build_timer = stats::time("Build");
        let group = build(&materials);
        build_timer.stop();

        stats::start_trace();
        let n_hits = trace_rays(&group);
        stats::stop_trace(group.len());
        println!("{} / {} rays hit", n_hits, N_RAYS);
    }

    let save_path = root_path.join("results");
    if !save_path.exists() {
        std::fs::create_dir_all(save_path.clone()).unwrap();
    }
    let stats_path = save_path.join(Local::now().format("intersect_%F_%H%M%S.txt").to_string());
    stats::print_and_save(&stats_path);
}
