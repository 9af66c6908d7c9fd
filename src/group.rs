use crate::intersect::{Hit, Intersect, Ray};
use crate::Float;

/// Aggregate primitive that tests its members in insertion order.
#[derive(Default)]
pub struct Group {
    members: Vec<Box<dyn Intersect>>,
}

impl Group {
    pub fn new() -> Group {
        Group {
            members: Vec::new(),
        }
    }

    pub fn add_object(&mut self, object: Box<dyn Intersect>) {
        self.members.push(object);
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl Intersect for Group {
    /// Every member sees the same record, so each can only improve on the
    /// best found so far. Reports true if any member reported a hit.
    fn intersect(&self, ray: &Ray, t_min: Float, hit: &mut Hit) -> bool {
        let mut found = false;
        for object in &self.members {
            if object.intersect(ray, t_min, hit) {
                found = true;
            }
        }
        found
    }
}
