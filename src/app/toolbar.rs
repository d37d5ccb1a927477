//! Toolbar for `CloudApp`: variant selector, scheduler readout, label totals,
//! status line.

use eframe::egui;

use orbit_cloud::motion::scheduler::RotationPhase;
use orbit_cloud::render::{CloudVariant, RenderState};

use super::CloudApp;

impl CloudApp {
    pub fn draw_toolbar(&mut self, ui: &mut egui::Ui, state: &RenderState) {
        ui.horizontal(|ui| {
            ui.add_space(4.0);

            let mut variant = state.variant;
            egui::ComboBox::from_id_salt("variant")
                .selected_text(match variant {
                    CloudVariant::Sphere => "Sphere",
                    CloudVariant::Galaxy => "Galaxy",
                })
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut variant, CloudVariant::Sphere, "Sphere");
                    ui.selectable_value(&mut variant, CloudVariant::Galaxy, "Galaxy");
                });
            if variant != state.variant {
                self.switch_variant(variant);
            }

            ui.separator();

            let phase = match state.phase {
                RotationPhase::IdleRotating => "rotating",
                RotationPhase::FocusedPaused => "paused",
                RotationPhase::CooldownBeforeResume => "cooldown",
            };
            ui.monospace(format!(
                "{} | x {:.2} y {:.2}",
                phase, state.rotation.angle_x, state.rotation.angle_y
            ));
            ui.separator();
            ui.label(self.labels.summary(&self.engine.config().category, "posts"));

            if let Some(label) = &state.focused {
                ui.separator();
                ui.label(egui::RichText::new(label).strong());
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let dark_label = if self.dark_mode { "Light" } else { "Dark" };
                if ui.button(dark_label).clicked() {
                    self.dark_mode = !self.dark_mode;
                }
                if !self.status.is_empty() {
                    ui.monospace(self.status.as_str());
                }
            });
        });
    }
}
