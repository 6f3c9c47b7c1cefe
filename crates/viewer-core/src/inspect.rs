//! Click-to-inspect interaction for registered scene items.
//!
//! A click on a registered item (or any mesh beneath it) flies the item to a
//! fixed pose just in front of the camera, scaled up, where pointer drags tilt
//! and turn it. A second click anywhere, or Escape, flies it back and restores
//! its original transform exactly.
//!
//! The engine never keeps a reference into the scene: the graph is lent to
//! [`ItemInteraction::update`] each frame, and only the focused item's
//! transform is written while a session exists.

use crate::camera::ViewCamera;
use crate::constants::*;
use crate::gesture::{GestureEnd, PointerGesture, SurfaceRect};
use crate::orbit::CameraControls;
use crate::raycast::intersect_objects;
use crate::scene::{NodeId, SceneGraph, Transform};
use glam::{Vec2, Vec3};

/// Host hook for showing and hiding inspect-mode chrome.
pub trait InspectPresenter {
    fn on_focus_changed(&mut self, focused: bool);
}

impl<F: FnMut(bool)> InspectPresenter for F {
    fn on_focus_changed(&mut self, focused: bool) {
        self(focused)
    }
}

/// Presenter for hosts without any inspect chrome.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPresenter;

impl InspectPresenter for NoPresenter {
    fn on_focus_changed(&mut self, _focused: bool) {}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InspectConfig {
    pub drag_threshold_px: f32,
    pub rotate_sensitivity: f32,
    pub pitch_limit: f32,
    pub inspect_distance: f32,
    pub inspect_scale: f32,
    pub rest_scale: f32,
    pub animate_lerp: f32,
    pub inspect_lerp: f32,
    pub settle_epsilon: f32,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            drag_threshold_px: DRAG_THRESHOLD_PX,
            rotate_sensitivity: INSPECT_ROTATE_SENSITIVITY,
            pitch_limit: INSPECT_PITCH_LIMIT,
            inspect_distance: INSPECT_DISTANCE,
            inspect_scale: INSPECT_SCALE,
            rest_scale: REST_SCALE,
            animate_lerp: ANIMATE_LERP,
            inspect_lerp: INSPECT_LERP,
            settle_epsilon: SETTLE_EPSILON,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// Flying toward the inspect pose.
    Entering,
    /// Settled in front of the camera; drags rotate it.
    Inspecting,
    /// Flying back to the snapshot.
    Leaving,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocusSession {
    pub item: NodeId,
    pub original: Transform,
    pub target_position: Vec3,
    pub base_rotation: Vec3,
    pub target_scale: f32,
    pub phase: SessionPhase,
}

/// What a pointer release turned out to be.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The pointer travelled past the drag threshold; no click.
    Dragged,
    /// Nothing registered under the pointer.
    Missed,
    Focused(NodeId),
    Unfocused,
    /// A registered item was hit but an animation is still in flight.
    Ignored,
}

pub struct ItemInteraction<P: InspectPresenter> {
    config: InspectConfig,
    presenter: P,
    interactables: Vec<NodeId>,
    gesture: PointerGesture,
    inspect_rotation: Vec2,
    session: Option<FocusSession>,
}

impl<P: InspectPresenter> ItemInteraction<P> {
    pub fn new(config: InspectConfig, presenter: P) -> Self {
        Self {
            config,
            presenter,
            interactables: Vec::new(),
            gesture: PointerGesture::new(config.drag_threshold_px),
            inspect_rotation: Vec2::ZERO,
            session: None,
        }
    }

    pub fn config(&self) -> &InspectConfig {
        &self.config
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn register_interactable(&mut self, item: NodeId) {
        self.interactables.push(item);
    }

    /// Drop every registration of `item`. A session already showing it
    /// plays out normally.
    pub fn unregister_interactable(&mut self, item: NodeId) {
        self.interactables.retain(|&i| i != item);
    }

    pub fn interactables(&self) -> &[NodeId] {
        &self.interactables
    }

    pub fn session(&self) -> Option<&FocusSession> {
        self.session.as_ref()
    }

    pub fn focused_item(&self) -> Option<NodeId> {
        self.session.map(|s| s.item)
    }

    pub fn is_focused(&self) -> bool {
        matches!(
            self.session.map(|s| s.phase),
            Some(SessionPhase::Entering | SessionPhase::Inspecting)
        )
    }

    pub fn is_animating(&self) -> bool {
        matches!(
            self.session.map(|s| s.phase),
            Some(SessionPhase::Entering | SessionPhase::Leaving)
        )
    }

    /// Accumulated drag tilt: x is pitch, y is yaw.
    pub fn inspect_rotation(&self) -> Vec2 {
        self.inspect_rotation
    }

    pub fn gesture(&self) -> &PointerGesture {
        &self.gesture
    }

    pub fn pointer_down(&mut self, pos: Vec2) {
        self.gesture.press(pos);
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        let Some(mv) = self.gesture.move_to(pos) else {
            return;
        };
        if self.is_focused() && mv.dragging {
            self.inspect_rotation.y += mv.delta.x * self.config.rotate_sensitivity;
            self.inspect_rotation.x += mv.delta.y * self.config.rotate_sensitivity;
            self.inspect_rotation.x = self
                .inspect_rotation
                .x
                .clamp(-self.config.pitch_limit, self.config.pitch_limit);
        }
    }

    pub fn pointer_up(
        &mut self,
        pos: Vec2,
        surface: &SurfaceRect,
        scene: &SceneGraph,
        camera: &dyn ViewCamera,
        controls: &mut dyn CameraControls,
    ) -> ClickOutcome {
        match self.gesture.release() {
            GestureEnd::Drag => ClickOutcome::Dragged,
            GestureEnd::Click => self.handle_click(pos, surface, scene, camera, controls),
        }
    }

    /// Escape dismisses an inspected item. Returns true if the key was used.
    pub fn key_down(&mut self, key: &str) -> bool {
        if key == "Escape" && self.is_focused() {
            return self.unfocus_item();
        }
        false
    }

    fn handle_click(
        &mut self,
        pos: Vec2,
        surface: &SurfaceRect,
        scene: &SceneGraph,
        camera: &dyn ViewCamera,
        controls: &mut dyn CameraControls,
    ) -> ClickOutcome {
        let ndc = surface.to_ndc(pos);

        if self.is_focused() {
            self.unfocus_item();
            return ClickOutcome::Unfocused;
        }

        let Some(ndc) = ndc else {
            return ClickOutcome::Missed;
        };
        let ray = camera.ray_from_ndc(ndc);
        let hits = intersect_objects(scene, &ray, &self.interactables, true);
        let Some(nearest) = hits.first() else {
            return ClickOutcome::Missed;
        };
        let Some(item) = self.registered_ancestor(scene, nearest.node) else {
            return ClickOutcome::Missed;
        };
        if self.focus_item(item, scene, camera, controls) {
            ClickOutcome::Focused(item)
        } else {
            ClickOutcome::Ignored
        }
    }

    /// Walk from `node` up through its parents to the first registered item.
    pub fn registered_ancestor(&self, scene: &SceneGraph, node: NodeId) -> Option<NodeId> {
        let mut cur = Some(node);
        while let Some(id) = cur {
            if self.interactables.contains(&id) {
                return Some(id);
            }
            cur = scene.parent(id);
        }
        None
    }

    /// Start flying `item` to the inspect pose. Ignored while any session
    /// exists or if `item` is not in `scene`.
    pub fn focus_item(
        &mut self,
        item: NodeId,
        scene: &SceneGraph,
        camera: &dyn ViewCamera,
        controls: &mut dyn CameraControls,
    ) -> bool {
        if self.session.is_some() {
            return false;
        }
        let Some(original) = scene.transform(item).copied() else {
            return false;
        };

        let target_position =
            camera.world_position() + camera.world_direction() * self.config.inspect_distance;
        self.inspect_rotation = Vec2::ZERO;
        // Upright in world axes; the camera's current heading is not applied.
        self.session = Some(FocusSession {
            item,
            original,
            target_position,
            base_rotation: Vec3::ZERO,
            target_scale: self.config.inspect_scale,
            phase: SessionPhase::Entering,
        });

        controls.set_enabled(false);
        self.presenter.on_focus_changed(true);
        log::debug!("[inspect] focus node={}", item.index());
        true
    }

    /// Start flying the focused item home. Ignored unless an item is focused.
    pub fn unfocus_item(&mut self) -> bool {
        if !self.is_focused() {
            return false;
        }
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        session.target_position = session.original.position;
        session.base_rotation = session.original.rotation;
        session.target_scale = self.config.rest_scale;
        session.phase = SessionPhase::Leaving;
        self.inspect_rotation = Vec2::ZERO;

        self.presenter.on_focus_changed(false);
        log::debug!("[inspect] unfocus node={}", session.item.index());
        true
    }

    /// Advance the focus animation by one frame.
    pub fn update(&mut self, scene: &mut SceneGraph, controls: &mut dyn CameraControls) {
        let Some(session) = self.session else {
            return;
        };
        let Some(t) = scene.transform_mut(session.item) else {
            // item vanished from the graph; nothing left to animate
            self.session = None;
            controls.set_enabled(true);
            if session.phase != SessionPhase::Leaving {
                self.presenter.on_focus_changed(false);
            }
            log::debug!("[inspect] node={} vanished", session.item.index());
            return;
        };

        let offset = self.inspect_rotation;
        let base = session.base_rotation;

        if session.phase == SessionPhase::Inspecting {
            let f = self.config.inspect_lerp;
            t.rotation.x = approach(t.rotation.x, base.x + offset.x, f);
            t.rotation.y = approach(t.rotation.y, base.y + offset.y, f);
            return;
        }

        let f = self.config.animate_lerp;
        t.position += (session.target_position - t.position) * f;
        t.rotation.x = approach(t.rotation.x, base.x + offset.x, f);
        t.rotation.y = approach(t.rotation.y, base.y + offset.y, f);
        t.rotation.z = approach(t.rotation.z, base.z, f);
        let s = approach(t.scale.x, session.target_scale, f);
        t.scale = Vec3::splat(s);

        if t.position.distance(session.target_position) >= self.config.settle_epsilon {
            return;
        }

        match session.phase {
            SessionPhase::Entering => {
                if let Some(s) = self.session.as_mut() {
                    s.phase = SessionPhase::Inspecting;
                }
            }
            SessionPhase::Leaving => {
                *t = session.original;
                self.session = None;
                controls.set_enabled(true);
                log::debug!("[inspect] restored node={}", session.item.index());
            }
            SessionPhase::Inspecting => {}
        }
    }
}

#[inline]
fn approach(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}
