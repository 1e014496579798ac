//! Scene graph: the arm, the loose objects, and who owns whose transform.

mod graph;
mod pick;

pub use graph::{ObjectId, Parent, Scene, SceneObject};
pub use pick::{Aabb, Ray, RayHit};
