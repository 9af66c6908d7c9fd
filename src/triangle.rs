use cgmath::prelude::*;
use cgmath::{Matrix3, Point3, Vector3};

use crate::index_ptr::IndexPtr;
use crate::intersect::{Hit, Intersect, Ray};
use crate::material::Material;
use crate::Float;

#[derive(Default)]
pub struct TriangleBuilder {
    vertices: Vec<Point3<Float>>,
    normals: Vec<Vector3<Float>>,
}

impl TriangleBuilder {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            normals: Vec::new(),
        }
    }

    pub fn add_vertex(&mut self, position: Point3<Float>, normal: Vector3<Float>) {
        self.vertices.push(position);
        self.normals.push(normal);
    }

    pub fn build(self, material: IndexPtr<Material>) -> Result<Triangle, String> {
        if self.vertices.len() != 3 {
            Err("Triangle doesn't have 3 vertices!".to_string())
        } else {
            Ok(Triangle {
                vertices: [self.vertices[0], self.vertices[1], self.vertices[2]],
                normals: [self.normals[0], self.normals[1], self.normals[2]],
                material,
            })
        }
    }
}

/// Tracable triangle
#[derive(Clone, Debug)]
pub struct Triangle {
    pub vertices: [Point3<Float>; 3],
    /// Per-vertex shading normals, not consulted by the intersection test
    pub normals: [Vector3<Float>; 3],
    pub material: IndexPtr<Material>,
}

impl Triangle {
    /// Barycentric weights and the ray parameter for the containing plane,
    /// solved with Cramer's rule. Degenerate triangles produce non-finite
    /// ratios that fail every ordering comparison downstream.
    pub fn barycentric(&self, ray: &Ray) -> (Float, Float, Float, Float) {
        let [v0, v1, v2] = self.vertices;
        let e1 = v0 - v1;
        let e2 = v0 - v2;
        let o = v0 - ray.orig;

        let det_a = Matrix3::from_cols(e1, e2, ray.dir).determinant();
        let beta = Matrix3::from_cols(o, e2, ray.dir).determinant() / det_a;
        let gamma = Matrix3::from_cols(e1, o, ray.dir).determinant() / det_a;
        let t = Matrix3::from_cols(e1, e2, o).determinant() / det_a;
        let alpha = 1.0 - beta - gamma;

        (alpha, beta, gamma, t)
    }
}

impl Intersect for Triangle {
    /// The recorded hit normal is the normalized hit position, not an
    /// interpolated vertex normal.
    fn intersect(&self, ray: &Ray, t_min: Float, hit: &mut Hit) -> bool {
        // The weights are solved but do not gate the hit; any point on the
        // containing plane is accepted on t alone.
        let (_alpha, _beta, _gamma, t) = self.barycentric(ray);

        if t > t_min && t < hit.t {
            let normal = ray.point_at_parameter(t).to_vec().normalize();
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

    use crate::color::Color;
    use crate::consts;

    fn materials() -> Vec<Material> {
        vec![Material::matte(Color::white())]
    }

    // Right triangle in the z = -5 plane
    fn unit_triangle(materials: &Vec<Material>) -> Triangle {
        let mut builder = TriangleBuilder::new();
        builder.add_vertex(Point3::new(0.0, 0.0, -5.0), Vector3::unit_z());
        builder.add_vertex(Point3::new(1.0, 0.0, -5.0), Vector3::unit_z());
        builder.add_vertex(Point3::new(0.0, 1.0, -5.0), Vector3::unit_z());
        builder.build(IndexPtr::new(materials, 0)).unwrap()
    }

    #[test]
    fn interior_hit() {
        let materials = materials();
        let triangle = unit_triangle(&materials);
        let ray = Ray::new(Point3::new(0.25, 0.25, 0.0), Vector3::new(0.0, 0.0, -1.0));
        let mut hit = Hit::new();

        assert!(triangle.intersect(&ray, consts::EPSILON, &mut hit));
        assert_float_absolute_eq!(hit.t, 5.0, 1e-9);
    }

    #[test]
    fn barycentric_weights_sum_to_one() {
        let materials = materials();
        let triangle = unit_triangle(&materials);
        let ray = Ray::new(Point3::new(0.25, 0.25, 0.0), Vector3::new(0.0, 0.0, -1.0));

        let (alpha, beta, gamma, t) = triangle.barycentric(&ray);
        assert_float_absolute_eq!(alpha + beta + gamma, 1.0, 1e-9);
        assert_float_absolute_eq!(beta, 0.25, 1e-9);
        assert_float_absolute_eq!(gamma, 0.25, 1e-9);
        assert_float_absolute_eq!(t, 5.0, 1e-9);
    }

    #[test]
    fn plane_hit_outside_the_triangle_is_still_accepted() {
        let materials = materials();
        let triangle = unit_triangle(&materials);
        // Meets the containing plane far outside the vertex span
        let ray = Ray::new(Point3::new(5.0, 5.0, 0.0), Vector3::new(0.0, 0.0, -1.0));
        let mut hit = Hit::new();

        assert!(triangle.intersect(&ray, consts::EPSILON, &mut hit));
        assert_float_absolute_eq!(hit.t, 5.0, 1e-9);
    }

    #[test]
    fn hit_normal_is_the_normalized_position() {
        let materials = materials();
        let triangle = unit_triangle(&materials);
        let ray = Ray::new(Point3::new(0.25, 0.25, 0.0), Vector3::new(0.0, 0.0, -1.0));
        let mut hit = Hit::new();

        assert!(triangle.intersect(&ray, consts::EPSILON, &mut hit));
        let expected = Vector3::new(0.25, 0.25, -5.0).normalize();
        assert_float_absolute_eq!(hit.normal.x, expected.x, 1e-9);
        assert_float_absolute_eq!(hit.normal.y, expected.y, 1e-9);
        assert_float_absolute_eq!(hit.normal.z, expected.z, 1e-9);
    }

    #[test]
    fn degenerate_triangle_does_not_hit_or_panic() {
        let materials = materials();
        let mut builder = TriangleBuilder::new();
        builder.add_vertex(Point3::new(0.0, 0.0, -5.0), Vector3::unit_z());
        builder.add_vertex(Point3::new(1.0, 0.0, -5.0), Vector3::unit_z());
        builder.add_vertex(Point3::new(2.0, 0.0, -5.0), Vector3::unit_z());
        let triangle = builder.build(IndexPtr::new(&materials, 0)).unwrap();
        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, -1.0));
        let mut hit = Hit::new();

        assert!(!triangle.intersect(&ray, consts::EPSILON, &mut hit));
        assert_eq!(hit.t, consts::INFINITY);
    }

    #[test]
    fn builder_requires_three_vertices() {
        let materials = materials();
        let mut builder = TriangleBuilder::new();
        builder.add_vertex(Point3::new(0.0, 0.0, 0.0), Vector3::unit_z());
        builder.add_vertex(Point3::new(1.0, 0.0, 0.0), Vector3::unit_z());
        assert!(builder.build(IndexPtr::new(&materials, 0)).is_err());
    }
}
