use std::sync::atomic::{AtomicUsize, Ordering};

use cgmath::prelude::*;
use cgmath::{Point3, Vector3};

use crate::consts;
use crate::index_ptr::IndexPtr;
use crate::material::Material;
use crate::Float;

static RAY_COUNT: AtomicUsize = AtomicUsize::new(0);

/// Capability shared by every primitive: improve `hit` with the closest
/// intersection whose ray parameter exceeds `t_min`.
///
/// Returns true only when the call updated `hit`. A geometrically valid
/// intersection that is not closer than the current record reports false.
pub trait Intersect {
    fn intersect(&self, ray: &Ray, t_min: Float, hit: &mut Hit) -> bool;
}

#[derive(Clone, Debug)]
pub struct Ray {
    pub orig: Point3<Float>,
    /// Not necessarily normalized
    pub dir: Vector3<Float>,
}

impl Ray {
    pub fn new(orig: Point3<Float>, dir: Vector3<Float>) -> Ray {
        RAY_COUNT.fetch_add(1, Ordering::Relaxed);
        Ray { orig, dir }
    }

    /// Ray from origin towards another point with a unit direction
    pub fn from_point(orig: Point3<Float>, to: Point3<Float>) -> Ray {
        Ray::new(orig, (to - orig).normalize())
    }

    pub fn point_at_parameter(&self, t: Float) -> Point3<Float> {
        self.orig + t * self.dir
    }

    pub fn count() -> usize {
        RAY_COUNT.load(Ordering::Relaxed)
    }

    pub fn reset_count() {
        RAY_COUNT.store(0, Ordering::Relaxed);
    }
}

/// Closest accepted intersection along a ray.
///
/// Primitives mutate the record in place so an arbitrary sequence of
/// intersection tests can share it. `t` only ever decreases via [`Hit::set`];
/// callers check `t < hit.t` before calling it.
#[derive(Clone, Debug)]
pub struct Hit {
    pub t: Float,
    pub material: Option<IndexPtr<Material>>,
    pub normal: Vector3<Float>,
}

impl Hit {
    pub fn new() -> Hit {
        Hit {
            t: consts::INFINITY,
            material: None,
            normal: Vector3::zero(),
        }
    }

    pub fn set(&mut self, t: Float, material: IndexPtr<Material>, normal: Vector3<Float>) {
        self.t = t;
        self.material = Some(material);
        self.normal = normal;
    }
}

impl Default for Hit {
    fn default() -> Hit {
        Hit::new()
    }
}
