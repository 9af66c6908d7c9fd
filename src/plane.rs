use cgmath::prelude::*;
use cgmath::{Point3, Vector3};

use crate::index_ptr::IndexPtr;
use crate::intersect::{Hit, Intersect, Ray};
use crate::material::Material;
use crate::Float;

/// Unbounded plane in the implicit form `dot(normal, P) + offset = 0`.
#[derive(Clone, Debug)]
pub struct Plane {
    pub normal: Vector3<Float>,
    pub offset: Float,
    /// Sample point satisfying the plane equation per axis, kept for
    /// diagnostics only
    point: Point3<Float>,
    pub material: IndexPtr<Material>,
}

impl Plane {
    pub fn new(normal: Vector3<Float>, offset: Float, material: IndexPtr<Material>) -> Plane {
        let component = |n: Float| if n == 0.0 { 0.0 } else { -offset / n };
        let point = Point3::new(
            component(normal.x),
            component(normal.y),
            component(normal.z),
        );
        Plane {
            normal,
            offset,
            point,
            material,
        }
    }

    pub fn point_on_plane(&self) -> Point3<Float> {
        self.point
    }
}

impl Intersect for Plane {
    /// The recorded hit normal is the normalized hit position, not the
    /// stored plane normal.
    fn intersect(&self, ray: &Ray, t_min: Float, hit: &mut Hit) -> bool {
        let numerator = -(self.offset + self.normal.dot(ray.orig.to_vec()));
        let denominator = self.normal.dot(ray.dir);

        if denominator == 0.0 {
            // Parallel ray: a hit only when the origin already satisfies
            // the plane equation exactly. The record is left alone.
            return numerator == 0.0;
        }

        let t = numerator / denominator;
        if t > t_min && t < hit.t {
            let normal = ray.point_at_parameter(t).to_vec().normalize();
            hit.set(t, self.material.clone(), normal);
            return true;
        }
        false
    }
}
