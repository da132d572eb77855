use bevy::prelude::*;
use bevy::render::primitives::Aabb;

/// Eight world-space corners of a mesh-local AABB.
pub fn world_corners(transform: &GlobalTransform, aabb: &Aabb) -> [Vec3; 8] {
    let center = Vec3::from(aabb.center);
    let half = Vec3::from(aabb.half_extents);
    let mut corners = [Vec3::ZERO; 8];
    for (i, corner) in corners.iter_mut().enumerate() {
        let sign = Vec3::new(
            if i & 1 == 0 { -1.0 } else { 1.0 },
            if i & 2 == 0 { -1.0 } else { 1.0 },
            if i & 4 == 0 { -1.0 } else { 1.0 },
        );
        *corner = transform.transform_point(center + half * sign);
    }
    corners
}

/// Axis-aligned world-space bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldAabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl WorldAabb {
    pub fn from_center_half(center: Vec3, half: Vec3) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Grow the box by an empty seed that extends over points as they are fed
    /// in. Start from the first point to avoid a bogus origin-anchored box.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut aabb = Self {
            min: first,
            max: first,
        };
        for p in iter {
            aabb.min = aabb.min.min(p);
            aabb.max = aabb.max.max(p);
        }
        Some(aabb)
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn expanded(&self, margin: f32) -> Self {
        Self {
            min: self.min - Vec3::splat(margin),
            max: self.max + Vec3::splat(margin),
        }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Cheap broad-phase check: does the segment's own bounding box overlap
    /// this box at all. Rejects most particles before the slab test runs.
    pub fn overlaps_segment(&self, from: Vec3, to: Vec3) -> bool {
        let seg_min = from.min(to);
        let seg_max = from.max(to);
        seg_min.cmple(self.max).all() && seg_max.cmpge(self.min).all()
    }

    /// Narrow-phase swept test: intersect the segment with the box slabs and
    /// return the entry point plus the outward normal of the entered face.
    pub fn segment_hit(&self, from: Vec3, to: Vec3) -> Option<(Vec3, Vec3)> {
        let dir = to - from;
        let mut t_enter = 0.0_f32;
        let mut t_exit = 1.0_f32;
        let mut entry_axis = 0;
        let mut entry_sign = 1.0_f32;

        for axis in 0..3 {
            let d = dir[axis];
            let (near, far) = (self.min[axis], self.max[axis]);

            if d.abs() < f32::EPSILON {
                if from[axis] < near || from[axis] > far {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let mut t0 = (near - from[axis]) * inv;
            let mut t1 = (far - from[axis]) * inv;
            let mut sign = -1.0;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
                sign = 1.0;
            }

            if t0 > t_enter {
                t_enter = t0;
                entry_axis = axis;
                entry_sign = sign;
            }
            t_exit = t_exit.min(t1);

            if t_enter > t_exit {
                return None;
            }
        }

        // A segment starting inside the box has no entry face; treat it as a
        // miss and let the particle fly on.
        if t_enter <= 0.0 {
            return None;
        }

        let mut normal = Vec3::ZERO;
        normal[entry_axis] = entry_sign;
        Some((from + dir * t_enter, normal))
    }
}
