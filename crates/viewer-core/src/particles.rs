use crate::constants::*;
use crate::error::SceneError;
use crate::scene::{Mesh, Node, NodeId, SceneGraph, Transform};
use glam::Vec3;
use rand::prelude::*;

/// Slowly rising pink motes floating around the desk.
#[derive(Clone, Debug)]
pub struct HeartParticles {
    group: NodeId,
    motes: Vec<(NodeId, f32)>,
}

impl HeartParticles {
    /// Scatter `count` particles through the room under a new group node.
    /// The same seed always yields the same layout.
    pub fn spawn(scene: &mut SceneGraph, count: usize, seed: u64) -> Result<Self, SceneError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let group = scene.add(Node::new("hearts"));
        let mesh = Mesh::sphere(HEART_RADIUS, rgba_from_hex(HEART_COLOR, HEART_OPACITY));
        let mut motes = Vec::with_capacity(count);
        for i in 0..count {
            let position = Vec3::new(
                (rng.gen::<f32>() - 0.5) * HEART_SPREAD,
                rng.gen::<f32>() * HEART_CEILING,
                (rng.gen::<f32>() - 0.5) * HEART_SPREAD,
            );
            let speed = HEART_MIN_SPEED + rng.gen::<f32>() * HEART_SPEED_SPAN;
            let id = scene.add_child(
                group,
                Node::new(format!("heart-{i}"))
                    .with_transform(Transform::from_position(position))
                    .with_mesh(mesh),
            )?;
            motes.push((id, speed));
        }
        Ok(Self { group, motes })
    }

    pub fn group(&self) -> NodeId {
        self.group
    }

    pub fn len(&self) -> usize {
        self.motes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.motes.is_empty()
    }

    pub fn speeds(&self) -> impl Iterator<Item = f32> + '_ {
        self.motes.iter().map(|&(_, s)| s)
    }

    /// Raise every particle by its speed; those above the ceiling restart at
    /// floor level.
    pub fn drift(&self, scene: &mut SceneGraph) {
        for &(id, speed) in &self.motes {
            if let Some(t) = scene.transform_mut(id) {
                t.position.y += speed;
                if t.position.y > HEART_CEILING {
                    t.position.y = 0.0;
                }
            }
        }
    }
}
