//! Cloud canvas: paints one `RenderState` and routes pointer input back into
//! the engine.

use eframe::egui;

use orbit_cloud::fast_math::{deg_to_rad, rem_to_px};
use orbit_cloud::render::{CloudVariant, RenderItem, RenderState};

use super::CloudApp;

/// Count badge: faded, a quarter rem after the label.
const BADGE_ALPHA: f32 = 0.7;
const BADGE_GAP_REM: f32 = 0.25;

/// Painted chip, kept for hit testing.
struct Chip {
    label: String,
    center: egui::Pos2,
    half: egui::Vec2,
    angle: f32,
}

impl Chip {
    fn contains(&self, p: egui::Pos2) -> bool {
        // Undo the chip's rotation, then test the axis-aligned box
        let d = p - self.center;
        let (sin, cos) = (-self.angle).sin_cos();
        let local = egui::vec2(d.x * cos - d.y * sin, d.x * sin + d.y * cos);
        local.x.abs() <= self.half.x && local.y.abs() <= self.half.y
    }
}

fn rotate(v: egui::Vec2, angle: f32) -> egui::Vec2 {
    let (sin, cos) = angle.sin_cos();
    egui::vec2(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

fn rgba(c: [f32; 4], alpha: f32) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(
        (c[0] * 255.0) as u8,
        (c[1] * 255.0) as u8,
        (c[2] * 255.0) as u8,
        (c[3] * alpha.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

impl CloudApp {
    pub fn draw_canvas(&mut self, ui: &mut egui::Ui, state: &RenderState) {
        let response = ui.allocate_response(
            ui.available_size(),
            egui::Sense::click().union(egui::Sense::hover()),
        );
        let rect = response.rect;
        let painter = ui.painter_at(rect);

        if let Some(message) = &state.empty_message {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                message,
                egui::FontId::proportional(16.0),
                ui.visuals().weak_text_color(),
            );
            return;
        }

        // Galaxy chips carry their count after the label
        let badges = state.variant == CloudVariant::Galaxy;
        let chips: Vec<Chip> = state
            .items
            .iter()
            .map(|item| self.paint_item(&painter, rect.center(), item, badges))
            .collect();

        // Topmost chip wins; items are in back-to-front order
        let hit = |pos: egui::Pos2| {
            chips
                .iter()
                .rev()
                .find(|c| c.contains(pos))
                .map(|c| c.label.clone())
        };

        let now = self.now();
        match response.hover_pos() {
            Some(pos) => {
                if let Some(label) = hit(pos) {
                    if self.hovered.as_deref() != Some(label.as_str()) {
                        self.engine.pointer_enter(&label, now);
                        self.hovered = Some(label);
                    }
                }
            }
            None => {
                if self.hovered.take().is_some() {
                    self.engine.pointer_leave(now);
                }
            }
        }

        if response.clicked() {
            if let Some(label) = response.interact_pointer_pos().and_then(hit) {
                self.activate(&label);
            }
        }
    }

    fn paint_item(
        &self,
        painter: &egui::Painter,
        origin: egui::Pos2,
        item: &RenderItem,
        badge: bool,
    ) -> Chip {
        let p = &item.position;
        let scale = p.scale.max(0.01);
        let font_px = rem_to_px(item.font_size_rem) * scale;
        let pad = egui::vec2(
            rem_to_px(item.padding.horizontal_rem),
            rem_to_px(item.padding.vertical_rem),
        ) * scale;

        let text_alpha = p.opacity;
        let fill_alpha = if self.dark_mode { p.opacity * 0.4 } else { p.opacity };
        let text_color = rgba(item.color.text_rgba(), text_alpha);
        let galley = painter.layout_no_wrap(
            item.label.clone(),
            egui::FontId::proportional(font_px),
            text_color,
        );
        let badge = badge.then(|| {
            let color = rgba(item.color.text_rgba(), text_alpha * BADGE_ALPHA);
            let galley = painter.layout_no_wrap(
                item.weight_badge(),
                egui::FontId::proportional(font_px),
                color,
            );
            (galley, color)
        });
        let gap = if badge.is_some() { rem_to_px(BADGE_GAP_REM) * scale } else { 0.0 };
        let badge_size = badge.as_ref().map_or(egui::Vec2::ZERO, |(g, _)| g.size());
        let text_size = egui::vec2(
            galley.size().x + gap + badge_size.x,
            galley.size().y.max(badge_size.y),
        );

        let center = origin + egui::vec2(p.screen_x, p.screen_y);
        let half = text_size * 0.5 + pad;
        let angle = deg_to_rad(p.rotate_z_deg);

        let corners = [
            egui::vec2(-half.x, -half.y),
            egui::vec2(half.x, -half.y),
            egui::vec2(half.x, half.y),
            egui::vec2(-half.x, half.y),
        ]
        .map(|c| center + rotate(c, angle))
        .to_vec();
        painter.add(egui::Shape::convex_polygon(
            corners,
            rgba(item.color.fill_rgba(), fill_alpha),
            egui::Stroke::NONE,
        ));

        let label_width = galley.size().x;
        let text_origin = center + rotate(-text_size * 0.5, angle);
        painter.add(
            egui::epaint::TextShape::new(text_origin, galley, text_color)
                .with_angle(angle),
        );
        if let Some((badge_galley, badge_color)) = badge {
            let offset = egui::vec2(label_width + gap, 0.0) - text_size * 0.5;
            painter.add(
                egui::epaint::TextShape::new(center + rotate(offset, angle), badge_galley, badge_color)
                    .with_angle(angle),
            );
        }

        Chip {
            label: item.label.clone(),
            center,
            half,
            angle,
        }
    }
}
