use cgmath::prelude::*;
use cgmath::Point3;

use crate::index_ptr::IndexPtr;
use crate::intersect::{Hit, Intersect, Ray};
use crate::material::Material;
use crate::Float;

#[derive(Clone, Debug)]
pub struct Sphere {
    pub center: Point3<Float>,
    pub radius: Float,
    pub material: IndexPtr<Material>,
}

impl Sphere {
    pub fn new(center: Point3<Float>, radius: Float, material: IndexPtr<Material>) -> Sphere {
        Sphere {
            center,
            radius,
            material,
        }
    }
}

impl Intersect for Sphere {
    fn intersect(&self, ray: &Ray, t_min: Float, hit: &mut Hit) -> bool {
        // Quadratic |o + t*d|^2 = r^2 with the origin in sphere coordinates
        let origin = ray.orig - self.center;

        let a = ray.dir.magnitude2();
        let b = 2.0 * ray.dir.dot(origin);
        let c = origin.magnitude2() - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return false;
        }
        let d = discriminant.sqrt();

        let t_plus = (-b + d) / (2.0 * a);
        let t_minus = (-b - d) / (2.0 * a);

        // Both intersections behind the cutoff
        if t_plus <= t_min && t_minus <= t_min {
            return false;
        }

        // The near root when it is past the cutoff,
        // otherwise the far root (origin inside the sphere)
        let t = if t_minus > t_min { t_minus } else { t_plus };

        if t < hit.t {
            let normal = (ray.point_at_parameter(t) - self.center).normalize();
            hit.set(t, self.material.clone(), normal);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_float_eq::*;
    use cgmath::Vector3;

    use crate::color::Color;
    use crate::consts;

    fn materials() -> Vec<Material> {
        vec![Material::matte(Color::white())]
    }

    #[test]
    fn entering_hit_through_the_center() {
        let materials = materials();
        let sphere = Sphere::new(Point3::new(0.0, 0.0, -5.0), 1.0, IndexPtr::new(&materials, 0));
        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, -1.0));
        let mut hit = Hit::new();

        assert!(sphere.intersect(&ray, consts::EPSILON, &mut hit));
        // Distance to the center minus the radius
        assert_float_absolute_eq!(hit.t, 4.0, 1e-9);
        assert_float_absolute_eq!(hit.normal.z, 1.0, 1e-9);
    }

    #[test]
    fn origin_inside_yields_the_exit_point() {
        let materials = materials();
        let sphere = Sphere::new(Point3::new(0.0, 0.0, -5.0), 1.0, IndexPtr::new(&materials, 0));
        let ray = Ray::new(Point3::new(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, -1.0));
        let mut hit = Hit::new();

        assert!(sphere.intersect(&ray, consts::EPSILON, &mut hit));
        assert_float_absolute_eq!(hit.t, 1.0, 1e-9);
        // Outward normal at the exit point
        assert_float_absolute_eq!(hit.normal.z, -1.0, 1e-9);
    }

    #[test]
    fn miss_leaves_the_record_untouched() {
        let materials = materials();
        let sphere = Sphere::new(Point3::new(0.0, 0.0, -5.0), 1.0, IndexPtr::new(&materials, 0));
        let ray = Ray::new(Point3::new(0.0, 2.0, 0.0), Vector3::new(0.0, 0.0, -1.0));
        let mut hit = Hit::new();

        assert!(!sphere.intersect(&ray, consts::EPSILON, &mut hit));
        assert_eq!(hit.t, consts::INFINITY);
        assert!(hit.material.is_none());
    }

    #[test]
    fn behind_the_cutoff_is_rejected() {
        let materials = materials();
        let sphere = Sphere::new(Point3::new(0.0, 0.0, 5.0), 1.0, IndexPtr::new(&materials, 0));
        // Sphere is behind the ray
        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, -1.0));
        let mut hit = Hit::new();

        assert!(!sphere.intersect(&ray, consts::EPSILON, &mut hit));
        assert_eq!(hit.t, consts::INFINITY);
    }

    #[test]
    fn farther_than_the_current_best_reports_false() {
        let materials = materials();
        let sphere = Sphere::new(Point3::new(0.0, 0.0, -5.0), 1.0, IndexPtr::new(&materials, 0));
        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, -1.0));
        let mut hit = Hit::new();
        hit.set(2.0, IndexPtr::new(&materials, 0), Vector3::unit_z());

        assert!(!sphere.intersect(&ray, consts::EPSILON, &mut hit));
        assert_float_absolute_eq!(hit.t, 2.0, 1e-12);
    }

    #[test]
    fn accepted_parameter_lies_on_the_surface() {
        let materials = materials();
        let sphere = Sphere::new(Point3::new(1.0, 2.0, -6.0), 1.5, IndexPtr::new(&materials, 0));
        let ray = Ray::from_point(Point3::new(0.3, -0.2, 0.0), Point3::new(1.0, 2.0, -6.0));
        let mut hit = Hit::new();

        assert!(sphere.intersect(&ray, consts::EPSILON, &mut hit));
        let p = ray.point_at_parameter(hit.t);
        assert_float_absolute_eq!((p - sphere.center).magnitude(), sphere.radius, 1e-9);
    }
}
