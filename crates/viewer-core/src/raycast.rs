//! Ray casting against scene-graph meshes.

use crate::scene::{NodeId, SceneGraph, Shape};
use glam::{Mat4, Vec3};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray; `direction` is normalised.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    pub node: NodeId,
    pub distance: f32,
    pub point: Vec3,
}

#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Slab test against the axis-aligned cube `[-0.5, 0.5]^3`.
///
/// `ray_dir` need not be normalised; the returned parameter is in units of
/// `ray_dir`. Rays starting inside the cube report no hit.
#[inline]
pub fn ray_unit_box(ray_origin: Vec3, ray_dir: Vec3) -> Option<f32> {
    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;
    for axis in 0..3 {
        let o = ray_origin[axis];
        let d = ray_dir[axis];
        if d.abs() < 1e-12 {
            if !(-0.5..=0.5).contains(&o) {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let mut t0 = (-0.5 - o) * inv;
        let mut t1 = (0.5 - o) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_near = t_near.max(t0);
        t_far = t_far.min(t1);
        if t_near > t_far {
            return None;
        }
    }
    (t_near >= 0.0).then_some(t_near)
}

/// Intersect the unit primitive of `shape` after `to_world`, returning the
/// world-space distance along `ray`.
fn intersect_shape(ray: &Ray, shape: &Shape, to_world: Mat4) -> Option<f32> {
    let to_local = to_world.inverse();
    if !to_local.is_finite() {
        return None;
    }
    // The ray parameter survives the affine map, so `t` is already a world
    // distance because `ray.direction` is unit length.
    let o = to_local.transform_point3(ray.origin);
    let d = to_local.transform_vector3(ray.direction);
    match shape {
        Shape::Cuboid { .. } => ray_unit_box(o, d),
        Shape::Sphere { .. } => {
            let len = d.length();
            if len <= f32::EPSILON {
                return None;
            }
            ray_sphere(o, d / len, Vec3::ZERO, 1.0).map(|t| t / len)
        }
    }
}

/// Cast `ray` against the meshes under `roots`, nearest hit first.
///
/// With `recursive` set, every descendant of each root is tested as well,
/// otherwise only the roots themselves.
pub fn intersect_objects(
    scene: &SceneGraph,
    ray: &Ray,
    roots: &[NodeId],
    recursive: bool,
) -> Vec<Intersection> {
    let mut hits = Vec::new();
    for &root in roots {
        let candidates: SmallVec<[NodeId; 16]> = if recursive {
            scene.descendants(root).collect()
        } else {
            SmallVec::from_slice(&[root])
        };
        for id in candidates {
            if let Some(hit) = intersect_node(scene, ray, id) {
                hits.push(hit);
            }
        }
    }
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

fn intersect_node(scene: &SceneGraph, ray: &Ray, id: NodeId) -> Option<Intersection> {
    let mesh = scene.get(id)?.mesh?;
    let world = scene.world_matrix(id)? * mesh.shape.local_matrix();
    let distance = intersect_shape(ray, &mesh.shape, world)?;
    Some(Intersection {
        node: id,
        distance,
        point: ray.at(distance),
    })
}
