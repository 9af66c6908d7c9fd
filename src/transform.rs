use cgmath::Matrix4;

use crate::intersect::{Hit, Intersect, Ray};
use crate::Float;

/// Wraps a child object with an affine transform.
///
/// The intersection side is an unfinished extension point: a complete
/// implementation transforms the ray into the child's local space with the
/// inverse of the matrix, delegates to the child, and maps the hit normal
/// back to world space with the inverse transpose of the linear part so the
/// recorded position stays consistent. Until then every query reports no hit
/// and the record is never touched.
pub struct Transform {
    matrix: Matrix4<Float>,
    object: Box<dyn Intersect>,
}

impl Transform {
    pub fn new(matrix: Matrix4<Float>, object: Box<dyn Intersect>) -> Transform {
        Transform { matrix, object }
    }

    pub fn matrix(&self) -> Matrix4<Float> {
        self.matrix
    }

    pub fn object(&self) -> &dyn Intersect {
        &*self.object
    }
}

impl Intersect for Transform {
    fn intersect(&self, _ray: &Ray, _t_min: Float, _hit: &mut Hit) -> bool {
        // TODO: transform the ray with the matrix inverse and delegate to
        // the child
        false
    }
}
