use crate::color::Color;

/// Shading parameters referenced by the primitives. The intersection
/// routines store and forward materials without interpreting them.
#[derive(Clone, Debug)]
pub struct Material {
    pub diffuse: Color,
    pub emissive: Option<Color>,
}

impl Material {
    pub fn new(diffuse: Color, emissive: Color) -> Material {
        let emissive = if emissive.is_black() {
            None
        } else {
            Some(emissive)
        };
        Material { diffuse, emissive }
    }

    pub fn matte(diffuse: Color) -> Material {
        Material {
            diffuse,
            emissive: None,
        }
    }
}
