use cgmath::prelude::*;
use cgmath::Vector3;

use crate::Float;

/// Linear RGB color
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    color: Vector3<Float>,
}

impl Color {
    pub fn new(r: Float, g: Float, b: Float) -> Self {
        Self {
            color: Vector3::new(r, g, b),
        }
    }

    pub fn black() -> Self {
        Self {
            color: Vector3::zero(),
        }
    }

    pub fn white() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    pub fn is_black(&self) -> bool {
        self.color == Vector3::zero()
    }

    pub fn r(&self) -> Float {
        self.color.x
    }

    pub fn g(&self) -> Float {
        self.color.y
    }

    pub fn b(&self) -> Float {
        self.color.z
    }
}
