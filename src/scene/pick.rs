use glam::Vec3;

#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub t_min: f32,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
            t_min: 0.0001,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    /// Distance along the ray.
    pub t: f32,
}

/// Axis-aligned pick volume.
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        let half_extents = half_extents.abs();
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Slab test; a ray starting inside reports the exit face.
    pub fn ray_intersect(&self, ray: &Ray) -> Option<RayHit> {
        let inv = |d: f32| if d.abs() > 0.0001 { 1.0 / d } else { f32::MAX };
        let inv_dir = Vec3::new(inv(ray.direction.x), inv(ray.direction.y), inv(ray.direction.z));

        let t1 = (self.min - ray.origin) * inv_dir;
        let t2 = (self.max - ray.origin) * inv_dir;

        let t_near = t1.min(t2).max_element();
        let t_far = t1.max(t2).min_element();

        if t_near > t_far || t_far < ray.t_min {
            return None;
        }

        let t = if t_near > ray.t_min { t_near } else { t_far };
        Some(RayHit { t })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_front_face() {
        let bounds = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::splat(0.5));
        let hit = bounds
            .ray_intersect(&Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z))
            .unwrap();
        assert!((hit.t - 4.5).abs() < 1e-5);
    }

    #[test]
    fn misses_when_offset() {
        let bounds = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::splat(0.5));
        assert!(bounds
            .ray_intersect(&Ray::new(Vec3::new(2.0, 0.0, 5.0), Vec3::NEG_Z))
            .is_none());
    }

    #[test]
    fn box_behind_the_origin_is_ignored() {
        let bounds = Aabb::from_center_half_extents(Vec3::new(0.0, 0.0, 3.0), Vec3::splat(0.5));
        assert!(bounds
            .ray_intersect(&Ray::new(Vec3::ZERO, Vec3::NEG_Z))
            .is_none());
    }

    #[test]
    fn ray_starting_inside_reports_the_exit() {
        let bounds = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::splat(0.5));
        let hit = bounds.ray_intersect(&Ray::new(Vec3::ZERO, Vec3::X)).unwrap();
        assert!((hit.t - 0.5).abs() < 1e-5);
    }
}
