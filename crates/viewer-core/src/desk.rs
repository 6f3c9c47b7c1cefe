//! Default date-space layout: a lowered table holding a picture frame and a
//! folded card, over a dark floor slab.
//!
//! Furniture is built from primitive placeholders grouped under one node per
//! item, so a click on any part resolves to the whole item.

use crate::constants::*;
use crate::error::SceneError;
use crate::scene::{Mesh, Node, NodeId, SceneGraph, Transform};
use glam::Vec3;
use std::f32::consts::PI;

const WOOD: u32 = 0x5c3a21;
const FRAME_GILT: u32 = 0xb08d57;
const PHOTO_PAPER: u32 = 0xf3e9dc;
const CARD_STOCK: u32 = 0xfff4f7;

pub struct DeskScene {
    pub scene: SceneGraph,
    pub floor: NodeId,
    pub table: NodeId,
    pub frame: NodeId,
    pub card: NodeId,
}

impl DeskScene {
    /// Items a visitor can pick up and inspect.
    pub fn interactables(&self) -> [NodeId; 2] {
        [self.frame, self.card]
    }
}

pub fn build_desk_scene() -> Result<DeskScene, SceneError> {
    let mut scene = SceneGraph::new();

    let floor = scene.add(
        Node::new("floor")
            .with_transform(Transform::from_position(Vec3::new(0.0, FLOOR_Y, 0.0)))
            .with_mesh(Mesh::cuboid(
                Vec3::new(FLOOR_SIZE, 0.02, FLOOR_SIZE),
                rgba_from_hex(FOG_COLOR, 1.0),
            )),
    );

    let table = add_table(&mut scene)?;
    let frame = add_picture_frame(&mut scene)?;
    let card = add_card(&mut scene)?;

    log::info!("[scene] desk built with {} nodes", scene.len());
    Ok(DeskScene {
        scene,
        floor,
        table,
        frame,
        card,
    })
}

fn add_table(scene: &mut SceneGraph) -> Result<NodeId, SceneError> {
    let wood = rgba_from_hex(WOOD, 1.0);
    let table = scene.add(
        Node::new("table").with_transform(
            Transform::from_position(TABLE_POSITION).with_uniform_scale(FURNITURE_SCALE),
        ),
    );
    // top surface sits 2.5 local units up, i.e. world y = 0 after scaling
    scene.add_child(
        table,
        Node::new("table-top")
            .with_transform(Transform::from_position(Vec3::new(0.0, 2.35, 0.0)))
            .with_mesh(Mesh::cuboid(Vec3::new(6.0, 0.3, 4.0), wood)),
    )?;
    for (i, (x, z)) in [(-2.6, -1.6), (2.6, -1.6), (-2.6, 1.6), (2.6, 1.6)]
        .into_iter()
        .enumerate()
    {
        scene.add_child(
            table,
            Node::new(format!("table-leg-{i}"))
                .with_transform(Transform::from_position(Vec3::new(x, 1.1, z)))
                .with_mesh(Mesh::cuboid(Vec3::new(0.3, 2.2, 0.3), wood)),
        )?;
    }
    Ok(table)
}

fn add_picture_frame(scene: &mut SceneGraph) -> Result<NodeId, SceneError> {
    let frame = scene.add(
        Node::new("picture-frame").with_transform(
            Transform::from_position(FRAME_POSITION)
                .with_rotation(Vec3::new(0.0, -PI / 6.0, 0.0))
                .with_uniform_scale(FURNITURE_SCALE),
        ),
    );
    scene.add_child(
        frame,
        Node::new("frame-border")
            .with_transform(Transform::from_position(Vec3::new(0.0, 1.3, 0.0)))
            .with_mesh(Mesh::cuboid(
                Vec3::new(2.0, 2.6, 0.15),
                rgba_from_hex(FRAME_GILT, 1.0),
            )),
    )?;
    scene.add_child(
        frame,
        Node::new("frame-photo")
            .with_transform(Transform::from_position(Vec3::new(0.0, 1.3, 0.085)))
            .with_mesh(Mesh::cuboid(
                Vec3::new(1.6, 2.2, 0.02),
                rgba_from_hex(PHOTO_PAPER, 1.0),
            )),
    )?;
    Ok(frame)
}

fn add_card(scene: &mut SceneGraph) -> Result<NodeId, SceneError> {
    let stock = rgba_from_hex(CARD_STOCK, 1.0);
    let card = scene.add(
        Node::new("card").with_transform(
            Transform::from_position(CARD_POSITION)
                .with_rotation(Vec3::new(0.0, PI / 8.0, 0.0))
                .with_uniform_scale(FURNITURE_SCALE),
        ),
    );
    // two panels standing half open about the fold
    for (name, x, yaw) in [("card-front", -0.35, 0.5), ("card-back", 0.35, -0.5)] {
        scene.add_child(
            card,
            Node::new(name)
                .with_transform(
                    Transform::from_position(Vec3::new(x, 1.0, 0.0))
                        .with_rotation(Vec3::new(0.0, yaw, 0.0)),
                )
                .with_mesh(Mesh::cuboid(Vec3::new(0.75, 2.0, 0.02), stock)),
        )?;
    }
    Ok(card)
}
