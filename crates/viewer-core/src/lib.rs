//! Platform-independent core of the Our3DDate viewer.
//!
//! Nothing in here touches web APIs: the scene graph, ray casting, camera and
//! orbit rig, pointer gesture classification and the item-inspection engine
//! are plain Rust so they can be exercised by host-side tests and driven by
//! any frontend.

pub mod camera;
pub mod constants;
pub mod desk;
pub mod error;
pub mod gesture;
pub mod inspect;
pub mod lighting;
pub mod orbit;
pub mod particles;
pub mod raycast;
pub mod scene;

pub use camera::{PerspectiveCamera, ViewCamera};
pub use constants::*;
pub use desk::{build_desk_scene, DeskScene};
pub use error::{ConfigError, SceneError};
pub use gesture::{GestureEnd, GestureMove, PointerGesture, SurfaceRect};
pub use inspect::{
    ClickOutcome, FocusSession, InspectConfig, InspectPresenter, ItemInteraction, NoPresenter,
    SessionPhase,
};
pub use lighting::{DirectionalLight, LightRig, PointLight};
pub use orbit::{CameraControls, OrbitConfig, OrbitControls, Spherical};
pub use particles::HeartParticles;
pub use raycast::{intersect_objects, Intersection, Ray};
pub use scene::{Mesh, Node, NodeId, SceneGraph, Shape, Transform};
