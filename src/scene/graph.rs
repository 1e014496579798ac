use super::pick::{Aabb, Ray, RayHit};
use crate::ik::KinematicChain;
use crate::math::Transform;
use glam::Vec3;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Owner of an object's transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parent {
    Root,
    Effector,
}

#[derive(Debug, Clone)]
pub struct SceneObject {
    pub id: ObjectId,
    /// Content key the presentation layer resolves (e.g. `box1`).
    pub label: String,
    /// Transform relative to `parent`.
    pub local: Transform,
    pub parent: Parent,
    /// Pick volume in the object's own units.
    pub half_extents: Vec3,
    /// Set once the object has been put down on the drop point.
    pub placed: bool,
    spawn: Transform,
}

impl SceneObject {
    pub fn spawn_transform(&self) -> Transform {
        self.spawn
    }

    pub fn is_selectable(&self) -> bool {
        self.parent == Parent::Root && !self.placed
    }
}

/// The arm plus the loose objects around it.
///
/// Object transforms are always stored relative to their parent; the
/// effector frame comes from the chain's forward kinematics, so attached
/// objects follow the arm without any per-frame copying.
#[derive(Debug, Clone)]
pub struct Scene {
    chain: KinematicChain,
    objects: Vec<SceneObject>,
    next_id: u32,
}

impl Scene {
    pub fn new(chain: KinematicChain) -> Self {
        Self {
            chain,
            objects: Vec::new(),
            next_id: 1,
        }
    }

    pub fn chain(&self) -> &KinematicChain {
        &self.chain
    }

    pub fn chain_mut(&mut self) -> &mut KinematicChain {
        &mut self.chain
    }

    pub fn spawn(&mut self, label: impl Into<String>, world: Transform, half_extents: Vec3) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.push(SceneObject {
            id,
            label: label.into(),
            local: world,
            parent: Parent::Root,
            half_extents,
            placed: false,
            spawn: world,
        });
        id
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn object_by_label(&self, label: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.label == label)
    }

    fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    pub fn effector_transform(&self) -> Transform {
        self.chain.effector_transform()
    }

    pub fn world_transform(&self, id: ObjectId) -> Option<Transform> {
        let object = self.object(id)?;
        Some(match object.parent {
            Parent::Root => object.local,
            Parent::Effector => self.effector_transform().mul_transform(&object.local),
        })
    }

    pub fn world_position(&self, id: ObjectId) -> Option<Vec3> {
        self.world_transform(id).map(|t| t.position)
    }

    /// Hands the object to a new owner with the given local transform.
    /// Parent and local transform change together.
    pub fn reparent(&mut self, id: ObjectId, parent: Parent, local: Transform) -> bool {
        match self.object_mut(id) {
            Some(object) => {
                object.parent = parent;
                object.local = local;
                true
            }
            None => false,
        }
    }

    /// Moves the object under the effector at `grasp_offset` (effector-local),
    /// keeping its world orientation and world scale.
    pub fn attach_to_effector(&mut self, id: ObjectId, grasp_offset: Vec3) -> bool {
        let Some(world) = self.world_transform(id) else {
            return false;
        };
        let mut local = self.effector_transform().relative(&world);
        local.position = grasp_offset;
        self.reparent(id, Parent::Effector, local)
    }

    /// Returns the object to the scene root at an explicit world transform.
    pub fn release_to_root(&mut self, id: ObjectId, world: Transform) -> bool {
        self.reparent(id, Parent::Root, world)
    }

    pub fn set_placed(&mut self, id: ObjectId, placed: bool) -> bool {
        match self.object_mut(id) {
            Some(object) => {
                object.placed = placed;
                true
            }
            None => false,
        }
    }

    /// Puts an object back where it was spawned and makes it selectable again.
    pub fn reset_object(&mut self, id: ObjectId) -> bool {
        match self.object_mut(id) {
            Some(object) => {
                object.parent = Parent::Root;
                object.local = object.spawn;
                object.placed = false;
                true
            }
            None => false,
        }
    }

    /// Nearest selectable object hit by `ray`.
    pub fn pick(&self, ray: &Ray) -> Option<(ObjectId, RayHit)> {
        let mut closest: Option<(ObjectId, RayHit)> = None;

        for object in self.objects.iter().filter(|o| o.is_selectable()) {
            let world = object.local;
            let bounds = Aabb::from_center_half_extents(world.position, object.half_extents * world.scale);

            if let Some(hit) = bounds.ray_intersect(ray) {
                match &closest {
                    None => closest = Some((object.id, hit)),
                    Some((_, prev_hit)) if hit.t < prev_hit.t => {
                        closest = Some((object.id, hit));
                    }
                    _ => {}
                }
            }
        }

        closest
    }
}
