//! Map/globe viewport for `OrbitrApp`.

use eframe::egui;

use super::OrbitrApp;

/// Largest animation step taken in one frame, in seconds.
const MAX_FRAME_DT: f32 = 0.1;

impl OrbitrApp {
    /// Advance animations, paint the scene, and turn entity clicks into
    /// selections.
    pub fn draw_content(&mut self, ui: &mut egui::Ui) {
        let dt = ui.input(|i| i.stable_dt).min(MAX_FRAME_DT);
        let Some(scene) = self.view.renderer_mut() else {
            ui.centered_and_justified(|ui| ui.weak("No renderer attached"));
            return;
        };
        scene.tick(dt);
        let clicked = scene.show(ui);
        let animating = scene.is_animating();

        if let Some(handle) = clicked {
            let id = self
                .view
                .record_for_handle(handle)
                .map(|r| r.satcat_number.clone());
            if let Some(id) = id {
                if let Err(e) = self.view.select(&id) {
                    log::warn!("{}", e);
                }
            }
        }

        if animating {
            ui.ctx().request_repaint();
        }
    }
}
