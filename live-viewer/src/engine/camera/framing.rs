use bevy::prelude::*;
use bevy::render::primitives::Aabb;
use constants::camera::{FRAMING_DIRECTION, FRAMING_MARGIN};

/// Axis-aligned box in world space, grown one point or mesh bound at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl BoundingBox {
    pub const EMPTY: Self = Self {
        min: Vec3::INFINITY,
        max: Vec3::NEG_INFINITY,
    };

    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn is_empty(&self) -> bool {
        self.max.x < self.min.x || self.max.y < self.min.y || self.max.z < self.min.z
    }

    pub fn expand_to_point(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Grow to contain a mesh's local bounds placed by its global transform.
    /// All eight corners are transformed so rotated meshes stay enclosed.
    pub fn expand_to_aabb(&mut self, aabb: &Aabb, transform: &GlobalTransform) {
        let center = Vec3::from(aabb.center);
        let half = Vec3::from(aabb.half_extents);

        for corner in 0..8u8 {
            let sign = Vec3::new(
                if corner & 1 == 0 { -1.0 } else { 1.0 },
                if corner & 2 == 0 { -1.0 } else { 1.0 },
                if corner & 4 == 0 { -1.0 } else { 1.0 },
            );
            self.expand_to_point(transform.transform_point(center + half * sign));
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Where the camera and orbit target go to fit a model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Framing {
    pub target: Vec3,
    pub eye: Vec3,
    /// Scale applied to `FRAMING_DIRECTION`; `FRAMING_MARGIN * max(extent)`.
    pub distance: f32,
}

impl Framing {
    /// Returns `None` for an empty box; a model without geometry keeps the
    /// current camera.
    pub fn for_bounds(bounds: &BoundingBox) -> Option<Self> {
        if bounds.is_empty() {
            return None;
        }

        let target = bounds.center();
        let distance = bounds.size().max_element() * FRAMING_MARGIN;

        Some(Self {
            target,
            eye: target + FRAMING_DIRECTION * distance,
            distance,
        })
    }

    pub fn camera_transform(&self) -> Transform {
        Transform::from_translation(self.eye).looking_at(self.target, Vec3::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_box_has_no_framing() {
        assert!(BoundingBox::EMPTY.is_empty());
        assert_eq!(Framing::for_bounds(&BoundingBox::EMPTY), None);
    }

    #[test]
    fn framing_uses_largest_extent() {
        let bounds = BoundingBox::from_min_max(Vec3::new(-1.0, 0.0, -2.0), Vec3::new(1.0, 6.0, 2.0));
        let framing = Framing::for_bounds(&bounds).expect("non-empty bounds");

        assert_eq!(framing.target, Vec3::new(0.0, 3.0, 0.0));
        assert_eq!(framing.distance, 9.0);
        assert!((framing.eye - Vec3::new(9.0, 6.6, 9.0)).length() < 1e-5);
    }

    #[test]
    fn aabb_follows_global_transform() {
        let aabb = Aabb::from_min_max(Vec3::splat(-0.5), Vec3::splat(0.5));
        let transform = GlobalTransform::from(
            Transform::from_xyz(10.0, 0.0, 0.0).with_scale(Vec3::new(2.0, 1.0, 1.0)),
        );

        let mut bounds = BoundingBox::EMPTY;
        bounds.expand_to_aabb(&aabb, &transform);

        assert!((bounds.min - Vec3::new(9.0, -0.5, -0.5)).length() < 1e-5);
        assert!((bounds.max - Vec3::new(11.0, 0.5, 0.5)).length() < 1e-5);
    }

    #[test]
    fn rotated_mesh_stays_enclosed() {
        let aabb = Aabb::from_min_max(Vec3::new(-2.0, -0.1, -0.1), Vec3::new(2.0, 0.1, 0.1));
        let transform = GlobalTransform::from(Transform::from_rotation(Quat::from_rotation_z(
            std::f32::consts::FRAC_PI_2,
        )));

        let mut bounds = BoundingBox::EMPTY;
        bounds.expand_to_aabb(&aabb, &transform);

        assert!((bounds.size().y - 4.0).abs() < 1e-4);
        assert!((bounds.size().x - 0.2).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn camera_sits_on_fixed_direction(
            min in prop::array::uniform3(-500.0f32..500.0),
            size in prop::array::uniform3(0.0f32..200.0),
        ) {
            let min = Vec3::from(min);
            let bounds = BoundingBox::from_min_max(min, min + Vec3::from(size));
            let framing = Framing::for_bounds(&bounds).expect("non-empty bounds");

            let expected_distance = FRAMING_MARGIN * size[0].max(size[1]).max(size[2]);
            prop_assert!((framing.distance - expected_distance).abs() < 1e-3);
            prop_assert!((framing.target - bounds.center()).length() < 1e-3);

            let offset = framing.eye - framing.target;
            prop_assert!((offset - FRAMING_DIRECTION * expected_distance).length() < 1e-2);
        }
    }
}
