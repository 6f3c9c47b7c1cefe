//! Everything the event handlers and the frame loop share.

use crate::overlay::DomInspectOverlay;
use viewer_core::{
    build_desk_scene, DeskScene, HeartParticles, InspectConfig, ItemInteraction, LightRig,
    OrbitConfig, OrbitControls, PerspectiveCamera, FLICKER_TIME_STEP, HEART_COUNT,
};
use web_sys as web;

pub struct ViewerState {
    pub desk: DeskScene,
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub inspect: ItemInteraction<DomInspectOverlay>,
    pub lights: LightRig,
    pub hearts: HeartParticles,
    pub clock: f32,
}

impl ViewerState {
    pub fn new(document: web::Document, particle_seed: u64) -> anyhow::Result<Self> {
        let mut desk = build_desk_scene()?;
        let hearts = HeartParticles::spawn(&mut desk.scene, HEART_COUNT, particle_seed)?;
        let controls = OrbitControls::new(OrbitConfig::default())?;

        let mut inspect =
            ItemInteraction::new(InspectConfig::default(), DomInspectOverlay::new(document));
        for item in desk.interactables() {
            inspect.register_interactable(item);
        }
        log::info!(
            "[scene] {} interactable items, {} particles",
            inspect.interactables().len(),
            hearts.len()
        );

        Ok(Self {
            desk,
            camera: PerspectiveCamera::default(),
            controls,
            inspect,
            lights: LightRig::default(),
            hearts,
            clock: 0.0,
        })
    }

    /// One animation step: ambient motion, then the camera rig, then the
    /// inspected item, so the item targets the camera's latest pose.
    pub fn advance(&mut self, width: f32, height: f32) {
        self.clock += FLICKER_TIME_STEP;
        self.lights.flicker(self.clock);
        self.hearts.drift(&mut self.desk.scene);

        self.camera.set_aspect(width, height);
        self.controls.update(&mut self.camera);
        self.inspect.update(&mut self.desk.scene, &mut self.controls);
    }
}
