//! Minimal scene graph used by the viewer.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. Each node carries a
//! local [`Transform`], an optional [`Mesh`], and parent/child links. World
//! matrices are composed by walking the parent chain, which is cheap for the
//! handful of nodes a desk scene holds.

use crate::error::SceneError;
use fnv::FnvHashMap;
use glam::{EulerRot, Mat4, Quat, Vec3};
use smallvec::SmallVec;

/// Stable handle to a node in a [`SceneGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Local position, XYZ-order Euler rotation (radians) and per-axis scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Local-to-parent matrix (scale, then rotate, then translate).
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.orientation(), self.position)
    }
}

/// Renderable and ray-testable primitive, centred on the node origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Cuboid { size: Vec3 },
    Sphere { radius: f32 },
}

impl Shape {
    /// Matrix taking the unit primitive (unit cube of edge 1, unit sphere of
    /// radius 1) to this shape's extent in node space.
    pub fn local_matrix(&self) -> Mat4 {
        match *self {
            Shape::Cuboid { size } => Mat4::from_scale(size),
            Shape::Sphere { radius } => Mat4::from_scale(Vec3::splat(radius)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mesh {
    pub shape: Shape,
    pub color: [f32; 4],
}

impl Mesh {
    pub fn cuboid(size: Vec3, color: [f32; 4]) -> Self {
        Self {
            shape: Shape::Cuboid { size },
            color,
        }
    }

    pub fn sphere(radius: f32, color: [f32; 4]) -> Self {
        Self {
            shape: Shape::Sphere { radius },
            color,
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.color[3] < 1.0
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub mesh: Option<Mesh>,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::IDENTITY,
            mesh: None,
            parent: None,
            children: SmallVec::new(),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_mesh(mut self, mesh: Mesh) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
    by_name: FnvHashMap<String, NodeId>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a top-level node.
    pub fn add(&mut self, node: Node) -> NodeId {
        self.insert(node, None)
    }

    /// Add `node` beneath `parent`.
    pub fn add_child(&mut self, parent: NodeId, node: Node) -> Result<NodeId, SceneError> {
        if parent.0 >= self.nodes.len() {
            return Err(SceneError::UnknownNode(parent));
        }
        let id = self.insert(node, Some(parent));
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    fn insert(&mut self, mut node: Node, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = parent;
        node.children.clear();
        // later nodes shadow earlier ones with the same name
        self.by_name.insert(node.name.clone(), id);
        self.nodes.push(node);
        id
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    pub fn transform(&self, id: NodeId) -> Option<&Transform> {
        self.get(id).map(|n| &n.transform)
    }

    pub fn transform_mut(&mut self, id: NodeId) -> Option<&mut Transform> {
        self.get_mut(id).map(|n| &mut n.transform)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children()).unwrap_or(&[])
    }

    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    /// Node-to-world matrix composed through every ancestor.
    pub fn world_matrix(&self, id: NodeId) -> Option<Mat4> {
        let mut node = self.get(id)?;
        let mut world = node.transform.matrix();
        while let Some(parent) = node.parent {
            node = self.get(parent)?;
            world = node.transform.matrix() * world;
        }
        Some(world)
    }

    /// Depth-first walk of `root` and everything beneath it (root first).
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        let mut stack = SmallVec::new();
        if self.contains(root) {
            stack.push(root);
        }
        Descendants { scene: self, stack }
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Every node carrying a mesh, paired with the matrix taking the unit
    /// primitive to world space.
    pub fn meshes(&self) -> impl Iterator<Item = (NodeId, Mesh, Mat4)> + '_ {
        self.iter().filter_map(move |(id, node)| {
            let mesh = node.mesh?;
            let world = self.world_matrix(id)?;
            Some((id, mesh, world * mesh.shape.local_matrix()))
        })
    }
}

pub struct Descendants<'a> {
    scene: &'a SceneGraph,
    stack: SmallVec<[NodeId; 16]>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        // push in reverse so children come out in insertion order
        for &child in self.scene.children(id).iter().rev() {
            self.stack.push(child);
        }
        Some(id)
    }
}
