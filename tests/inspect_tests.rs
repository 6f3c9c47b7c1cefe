// Host-side tests for the click-to-inspect state machine.

use glam::{Vec2, Vec3};
use viewer_core::{
    CameraControls, ClickOutcome, InspectConfig, InspectPresenter, ItemInteraction, Mesh, Node,
    NodeId, PerspectiveCamera, SceneGraph, SessionPhase, SurfaceRect, Transform,
};

const CENTER: Vec2 = Vec2::new(400.0, 300.0);

#[derive(Default)]
struct Recorder {
    calls: Vec<bool>,
}

impl InspectPresenter for Recorder {
    fn on_focus_changed(&mut self, focused: bool) {
        self.calls.push(focused);
    }
}

struct FakeControls {
    enabled: bool,
    toggles: Vec<bool>,
}

impl FakeControls {
    fn new() -> Self {
        Self {
            enabled: true,
            toggles: Vec::new(),
        }
    }
}

impl CameraControls for FakeControls {
    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.toggles.push(enabled);
        self.enabled = enabled;
    }
}

struct Rig {
    scene: SceneGraph,
    item: NodeId,
    camera: PerspectiveCamera,
    surface: SurfaceRect,
    controls: FakeControls,
    engine: ItemInteraction<Recorder>,
}

impl Rig {
    fn with_item(transform: Transform) -> Self {
        let mut scene = SceneGraph::new();
        let item = scene.add(Node::new("item").with_transform(transform));
        scene
            .add_child(
                item,
                Node::new("item-mesh").with_mesh(Mesh::cuboid(Vec3::ONE, [1.0, 1.0, 1.0, 1.0])),
            )
            .unwrap();
        let camera = PerspectiveCamera {
            eye: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            aspect: 800.0 / 600.0,
            ..PerspectiveCamera::default()
        };
        let mut engine = ItemInteraction::new(InspectConfig::default(), Recorder::default());
        engine.register_interactable(item);
        Self {
            scene,
            item,
            camera,
            surface: SurfaceRect::new(0.0, 0.0, 800.0, 600.0),
            controls: FakeControls::new(),
            engine,
        }
    }

    fn new() -> Self {
        Self::with_item(Transform::IDENTITY)
    }

    fn release(&mut self, pos: Vec2) -> ClickOutcome {
        self.engine.pointer_up(
            pos,
            &self.surface,
            &self.scene,
            &self.camera,
            &mut self.controls,
        )
    }

    fn click(&mut self, pos: Vec2) -> ClickOutcome {
        self.engine.pointer_down(pos);
        self.release(pos)
    }

    fn step(&mut self, frames: usize) {
        for _ in 0..frames {
            self.engine.update(&mut self.scene, &mut self.controls);
        }
    }

    /// Run frames until the current animation finishes; returns how many ran.
    fn settle(&mut self) -> usize {
        for n in 1..=1000 {
            self.engine.update(&mut self.scene, &mut self.controls);
            if !self.engine.is_animating() {
                return n;
            }
        }
        panic!("animation never settled");
    }

    fn item_transform(&self) -> Transform {
        *self.scene.transform(self.item).unwrap()
    }
}

#[test]
fn click_on_child_mesh_focuses_registered_group() {
    let mut rig = Rig::new();
    let outcome = rig.click(CENTER);
    assert_eq!(outcome, ClickOutcome::Focused(rig.item));
    assert_eq!(rig.engine.focused_item(), Some(rig.item));
    assert!(rig.engine.is_focused());
    assert!(rig.engine.is_animating());
    assert!(!rig.controls.enabled);
    assert_eq!(rig.engine.presenter().calls, vec![true]);
}

#[test]
fn concrete_focus_scenario_reaches_inspect_pose() {
    let mut rig = Rig::new();
    rig.click(CENTER);

    let session = *rig.engine.session().unwrap();
    assert!(session.target_position.distance(Vec3::new(0.0, 0.0, 3.8)) < 1e-4);
    assert_eq!(session.target_scale, 1.5);
    assert_eq!(session.base_rotation, Vec3::ZERO);
    assert_eq!(session.original, Transform::IDENTITY);

    rig.step(60);
    let t = rig.item_transform();
    assert!(t.position.distance(Vec3::new(0.0, 0.0, 3.8)) < 0.01);
    assert!(!rig.engine.is_animating());
    assert!(rig.engine.is_focused());
    assert_eq!(rig.engine.session().unwrap().phase, SessionPhase::Inspecting);
    assert!((t.scale.x - 1.5).abs() < 0.01);
    assert_eq!(t.scale.x, t.scale.y);
    assert_eq!(t.scale.y, t.scale.z);
}

#[test]
fn first_frame_closes_a_tenth_of_the_gap() {
    let mut rig = Rig::new();
    rig.click(CENTER);
    rig.step(1);
    let t = rig.item_transform();
    assert!((t.position.z - 0.38).abs() < 1e-4);
    assert!((t.scale.x - 1.05).abs() < 1e-5);
}

#[test]
fn click_on_empty_space_is_a_no_op() {
    let mut rig = Rig::new();
    let outcome = rig.click(Vec2::new(5.0, 5.0));
    assert_eq!(outcome, ClickOutcome::Missed);
    assert!(rig.engine.session().is_none());
    assert!(rig.controls.enabled);
    assert!(rig.controls.toggles.is_empty());
    assert!(rig.engine.presenter().calls.is_empty());
}

#[test]
fn unregistered_item_cannot_be_focused() {
    let mut rig = Rig::new();
    let item = rig.item;
    rig.engine.unregister_interactable(item);
    assert!(rig.engine.interactables().is_empty());
    assert_eq!(rig.click(CENTER), ClickOutcome::Missed);
    assert!(rig.engine.session().is_none());
}

#[test]
fn movement_under_threshold_is_still_a_click() {
    let mut rig = Rig::new();
    rig.engine.pointer_down(CENTER);
    let p = CENTER + Vec2::new(3.0, 2.0);
    rig.engine.pointer_move(p);
    assert_eq!(rig.release(p), ClickOutcome::Focused(rig.item));
}

#[test]
fn movement_at_threshold_is_a_drag() {
    let mut rig = Rig::new();
    rig.engine.pointer_down(CENTER);
    let p = CENTER + Vec2::new(5.0, 0.0);
    rig.engine.pointer_move(p);
    assert_eq!(rig.release(p), ClickOutcome::Dragged);
    assert!(rig.engine.session().is_none());
    assert!(rig.controls.enabled);
}

#[test]
fn drag_mark_is_sticky_until_next_press() {
    let mut rig = Rig::new();
    rig.engine.pointer_down(CENTER);
    rig.engine.pointer_move(CENTER + Vec2::new(20.0, 0.0));
    // back to where it started
    rig.engine.pointer_move(CENTER);
    assert_eq!(rig.release(CENTER), ClickOutcome::Dragged);

    assert_eq!(rig.click(CENTER), ClickOutcome::Focused(rig.item));
}

#[test]
fn drag_without_focus_leaves_rotation_alone() {
    let mut rig = Rig::new();
    rig.engine.pointer_down(CENTER);
    rig.engine.pointer_move(CENTER + Vec2::new(100.0, 40.0));
    rig.release(CENTER + Vec2::new(100.0, 40.0));
    assert_eq!(rig.engine.inspect_rotation(), Vec2::ZERO);
}

#[test]
fn moves_without_a_press_are_ignored() {
    let mut rig = Rig::new();
    rig.click(CENTER);
    rig.settle();
    rig.engine.pointer_move(CENTER + Vec2::new(200.0, 0.0));
    assert_eq!(rig.engine.inspect_rotation(), Vec2::ZERO);
}

#[test]
fn drag_while_inspecting_turns_the_item() {
    let mut rig = Rig::new();
    rig.click(CENTER);
    rig.settle();

    rig.engine.pointer_down(CENTER);
    rig.engine.pointer_move(CENTER + Vec2::new(30.0, 0.0));
    let rot = rig.engine.inspect_rotation();
    assert!((rot.y - 0.3).abs() < 1e-5);
    assert_eq!(rot.x, 0.0);

    rig.engine.pointer_move(CENTER + Vec2::new(30.0, 20.0));
    let rot = rig.engine.inspect_rotation();
    assert!((rot.x - 0.2).abs() < 1e-5);

    // dragging is not a click, so the item stays
    assert_eq!(
        rig.release(CENTER + Vec2::new(30.0, 20.0)),
        ClickOutcome::Dragged
    );
    assert!(rig.engine.is_focused());

    rig.step(1);
    let t = rig.item_transform();
    assert!((t.rotation.y - 0.3 * 0.15).abs() < 1e-5);
    assert!((t.rotation.x - 0.2 * 0.15).abs() < 1e-5);

    rig.step(200);
    let t = rig.item_transform();
    assert!((t.rotation.y - 0.3).abs() < 1e-3);
    assert!((t.rotation.x - 0.2).abs() < 1e-3);
    // steady inspection never moves or rescales the item
    assert!(t.position.distance(Vec3::new(0.0, 0.0, 3.8)) < 0.01);
    assert!((t.scale.x - 1.5).abs() < 0.01);
}

#[test]
fn pitch_stays_clamped_for_any_drag() {
    let mut rig = Rig::new();
    rig.click(CENTER);
    rig.settle();

    rig.engine.pointer_down(CENTER);
    let mut y = CENTER.y;
    for dy in [120.0, 90.0, -400.0, 35.0, 500.0, -20.0, -999.0] {
        y += dy;
        rig.engine.pointer_move(Vec2::new(CENTER.x, y));
        let pitch = rig.engine.inspect_rotation().x;
        assert!((-0.5..=0.5).contains(&pitch), "pitch {pitch} escaped");
    }
    assert_eq!(rig.engine.inspect_rotation().x, -0.5);
}

#[test]
fn click_while_focused_unfocuses_and_hides_overlay_at_once() {
    let mut rig = Rig::new();
    rig.click(CENTER);
    rig.settle();

    // anywhere counts, even empty space
    let outcome = rig.click(Vec2::new(5.0, 5.0));
    assert_eq!(outcome, ClickOutcome::Unfocused);
    assert_eq!(rig.engine.presenter().calls, vec![true, false]);
    assert!(!rig.engine.is_focused());
    assert!(rig.engine.is_animating());
    // the item is still on its way home
    assert!(rig.item_transform().position.z > 3.0);
    assert!(!rig.controls.enabled);
}

#[test]
fn round_trip_restores_transform_exactly() {
    let original = Transform {
        position: Vec3::new(0.3, -0.2, 0.1),
        rotation: Vec3::new(0.2, -0.4, 0.3),
        scale: Vec3::splat(2.0),
    };
    let mut rig = Rig::with_item(original);
    assert_eq!(rig.click(CENTER), ClickOutcome::Focused(rig.item));
    rig.settle();

    rig.engine.pointer_down(CENTER);
    rig.engine.pointer_move(CENTER + Vec2::new(40.0, 15.0));
    rig.release(CENTER + Vec2::new(40.0, 15.0));
    rig.step(10);

    assert_eq!(rig.click(CENTER), ClickOutcome::Unfocused);
    assert_eq!(rig.engine.inspect_rotation(), Vec2::ZERO);
    rig.settle();

    assert_eq!(rig.item_transform(), original);
    assert!(rig.engine.session().is_none());
    assert!(rig.controls.enabled);
}

#[test]
fn focus_then_immediate_escape_restores_transform() {
    let original = Transform {
        position: Vec3::new(-0.1, 0.25, 0.0),
        rotation: Vec3::new(0.0, 1.1, -0.2),
        scale: Vec3::splat(0.8),
    };
    let mut rig = Rig::with_item(original);
    rig.click(CENTER);
    assert!(rig.engine.key_down("Escape"));
    rig.settle();

    assert_eq!(rig.item_transform(), original);
    assert!(rig.engine.session().is_none());
}

#[test]
fn controls_are_disabled_exactly_for_the_session() {
    let mut rig = Rig::new();
    rig.click(CENTER);
    rig.settle();
    assert!(!rig.controls.enabled);
    rig.click(CENTER);
    rig.step(5);
    assert!(!rig.controls.enabled);
    rig.settle();
    assert!(rig.controls.enabled);
    assert_eq!(rig.controls.toggles, vec![false, true]);
}

#[test]
fn click_during_return_animation_is_ignored() {
    let mut rig = Rig::new();
    rig.click(CENTER);
    rig.settle();
    rig.click(CENTER);
    rig.step(3);

    let before = *rig.engine.session().unwrap();
    assert_eq!(rig.click(CENTER), ClickOutcome::Ignored);
    let after = *rig.engine.session().unwrap();
    assert_eq!(before, after);
    assert_eq!(after.phase, SessionPhase::Leaving);
    assert_eq!(rig.engine.presenter().calls, vec![true, false]);
}

#[test]
fn direct_focus_is_refused_while_a_session_exists() {
    let mut rig = Rig::new();
    rig.click(CENTER);
    let item = rig.item;
    assert!(!rig
        .engine
        .focus_item(item, &rig.scene, &rig.camera, &mut rig.controls));
    assert_eq!(rig.controls.toggles, vec![false]);
}

#[test]
fn escape_only_acts_when_focused() {
    let mut rig = Rig::new();
    assert!(!rig.engine.key_down("Escape"));
    assert!(rig.engine.presenter().calls.is_empty());
    assert!(rig.controls.toggles.is_empty());

    rig.click(CENTER);
    assert!(!rig.engine.key_down("Enter"));
    assert!(rig.engine.is_focused());

    assert!(rig.engine.key_down("Escape"));
    // already on the way back
    assert!(!rig.engine.key_down("Escape"));
    assert_eq!(rig.engine.presenter().calls, vec![true, false]);
}

#[test]
fn unfocus_with_nothing_focused_is_a_no_op() {
    let mut rig = Rig::new();
    assert!(!rig.engine.unfocus_item());
    rig.step(3);
    assert_eq!(rig.item_transform(), Transform::IDENTITY);
    assert!(rig.engine.presenter().calls.is_empty());
}

#[test]
fn empty_surface_rect_never_focuses() {
    let mut rig = Rig::new();
    rig.surface = SurfaceRect::new(0.0, 0.0, 0.0, 0.0);
    assert_eq!(rig.click(CENTER), ClickOutcome::Missed);
    assert!(rig.engine.session().is_none());
}

#[test]
fn vanished_item_ends_the_session() {
    let mut rig = Rig::new();
    rig.click(CENTER);
    let mut empty = SceneGraph::new();
    rig.engine.update(&mut empty, &mut rig.controls);
    assert!(rig.engine.session().is_none());
    assert!(rig.controls.enabled);
    // overlay comes down with the session
    assert_eq!(rig.engine.presenter().calls, vec![true, false]);
}

#[test]
fn item_vanishing_on_the_way_home_hides_the_overlay_once() {
    let mut rig = Rig::new();
    rig.click(CENTER);
    rig.settle();
    assert!(rig.engine.unfocus_item());
    let mut empty = SceneGraph::new();
    rig.engine.update(&mut empty, &mut rig.controls);
    assert!(rig.engine.session().is_none());
    assert!(rig.controls.enabled);
    assert_eq!(rig.engine.presenter().calls, vec![true, false]);
}

#[test]
fn closure_presenter_sees_focus_changes() {
    let mut seen = Vec::new();
    {
        let mut scene = SceneGraph::new();
        let item = scene.add(
            Node::new("ball").with_mesh(Mesh::sphere(0.5, [1.0, 0.0, 0.0, 1.0])),
        );
        let camera = PerspectiveCamera {
            eye: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            ..PerspectiveCamera::default()
        };
        let mut controls = FakeControls::new();
        let mut engine =
            ItemInteraction::new(InspectConfig::default(), |f: bool| seen.push(f));
        engine.register_interactable(item);
        assert!(engine.focus_item(item, &scene, &camera, &mut controls));
        assert!(engine.unfocus_item());
    }
    assert_eq!(seen, vec![true, false]);
}
