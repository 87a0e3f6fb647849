// crates/pitchreel-ui/src/modules/preview_module.rs
//
// PreviewModule: the right-hand panel. Shows a placeholder until a trailer
// resolves, then a 16:9 "monitor" canvas with a painted play/pause overlay
// (the whole canvas is the toggle), a transport readout, and the download
// action with its progress and banners.
//
// There is no decoded video anywhere in PitchReel — the canvas is an honest
// fake: black surface, genre caption, playhead clock.

use super::PanelModule;
use crate::helpers::format::fit_label;
use crate::theme::{
    ACCENT, DARK_BG_2, DARK_BG_3, DARK_BORDER, DARK_TEXT_DIM,
    GREEN_DIM, RED_DIM, TRACK_BG,
};
use egui::{Color32, Margin, Pos2, Rect, RichText, Sense, Stroke, Ui, Vec2};
use pitchreel_core::commands::AppCommand;
use pitchreel_core::helpers::time::{format_duration, format_time};
use pitchreel_core::helpers::url::strip_freshness_token;
use pitchreel_core::session::{Phase, Playback, ResolvedClip, SessionState};

// ── Layout constants ─────────────────────────────────────────────────────────

const TRANSPORT_H: f32 = 34.0;
/// Half-size of the painted play/pause glyph.
const ICON_SZ: f32 = 26.0;

pub struct PreviewModule;

impl PanelModule for PreviewModule {
    fn name(&self) -> &str { "Preview" }

    fn ui(&mut self, ui: &mut Ui, state: &SessionState, cmd: &mut Vec<AppCommand>) {
        ui.vertical(|ui| {
            // ── Header ────────────────────────────────────────────────────────
            egui::Frame::new()
                .fill(DARK_BG_2)
                .inner_margin(Margin { left: 8, right: 8, top: 6, bottom: 6 })
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("📺 Preview").size(12.0).strong());
                    });
                });

            ui.separator();
            ui.add_space(4.0);

            // ── Error banner ──────────────────────────────────────────────────
            if let Some(msg) = &state.error {
                self.show_error_banner(ui, msg, cmd);
                ui.add_space(6.0);
            }

            // ── Saved banner / download progress ──────────────────────────────
            if let Some(path) = &state.save_done {
                let name = path.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "trailer".into());
                self.show_saved_banner(ui, &name, cmd);
                ui.add_space(6.0);
            } else if state.save_job.is_some() {
                self.show_save_progress(ui, state.save_progress);
                ui.add_space(6.0);
            }

            // ── Player or placeholder ─────────────────────────────────────────
            match &state.phase {
                Phase::Ready { clip, playback } => {
                    self.show_player(ui, clip, *playback, state, cmd);
                }
                _ => self.show_placeholder(ui),
            }
        });
    }
}

// ── Private helpers ───────────────────────────────────────────────────────────

impl PreviewModule {
    fn show_error_banner(&self, ui: &mut Ui, msg: &str, cmd: &mut Vec<AppCommand>) {
        egui::Frame::new()
            .fill(Color32::from_rgb(60, 25, 25))
            .stroke(Stroke::new(1.0, RED_DIM))
            .corner_radius(egui::CornerRadius::same(4))
            .inner_margin(Margin::same(8))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(RichText::new(format!("💥 {msg}")).size(11.0).color(RED_DIM));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let dismiss = egui::Button::new(
                            RichText::new("Dismiss").size(10.0).color(DARK_TEXT_DIM),
                        )
                        .fill(DARK_BG_2)
                        .stroke(Stroke::new(1.0, DARK_BORDER));
                        if ui.add(dismiss).clicked() {
                            cmd.push(AppCommand::DismissError);
                        }
                    });
                });
            });
    }

    fn show_saved_banner(&self, ui: &mut Ui, name: &str, cmd: &mut Vec<AppCommand>) {
        egui::Frame::new()
            .fill(Color32::from_rgb(30, 60, 40))
            .stroke(Stroke::new(1.0, GREEN_DIM))
            .corner_radius(egui::CornerRadius::same(4))
            .inner_margin(Margin::same(8))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(format!("🎉 Saved: {}", fit_label(name, 240.0)))
                            .size(11.0)
                            .color(GREEN_DIM),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let dismiss = egui::Button::new(
                            RichText::new("Dismiss").size(10.0).color(DARK_TEXT_DIM),
                        )
                        .fill(DARK_BG_2)
                        .stroke(Stroke::new(1.0, DARK_BORDER));
                        if ui.add(dismiss).clicked() {
                            cmd.push(AppCommand::ClearSaveStatus);
                        }
                    });
                });
            });
    }

    fn show_save_progress(&self, ui: &mut Ui, progress: Option<(u64, u64)>) {
        egui::Frame::new()
            .fill(DARK_BG_2)
            .stroke(Stroke::new(1.0, DARK_BORDER))
            .corner_radius(egui::CornerRadius::same(4))
            .inner_margin(Margin::same(8))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                let (written, total) = progress.unwrap_or((0, 0));
                let mb = written as f32 / 1_000_000.0;

                ui.horizontal(|ui| {
                    ui.label(RichText::new("Downloading trailer…").size(11.0));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let readout = if total > 0 {
                            format!("{mb:.1} / {:.1} MB", total as f32 / 1_000_000.0)
                        } else {
                            format!("{mb:.1} MB")
                        };
                        ui.label(RichText::new(readout).size(10.0).color(DARK_TEXT_DIM));
                    });
                });
                ui.add_space(4.0);

                let fraction = if total > 0 {
                    (written as f32 / total as f32).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let (bar_rect, _) = ui.allocate_exact_size(
                    egui::vec2(ui.available_width(), 6.0),
                    Sense::hover(),
                );
                let p = ui.painter();
                p.rect_filled(bar_rect, 3.0, TRACK_BG);
                if fraction > 0.0 {
                    let mut fill = bar_rect;
                    fill.max.x = bar_rect.min.x + bar_rect.width() * fraction;
                    p.rect_filled(fill, 3.0, ACCENT);
                }
                ui.ctx().request_repaint_after(std::time::Duration::from_millis(100));
            });
    }

    fn show_placeholder(&self, ui: &mut Ui) {
        let (canvas, _) = self.allocate_canvas(ui, Sense::hover());
        let painter = ui.painter();

        painter.rect_stroke(canvas.expand(1.0), 4,
            Stroke::new(1.0, DARK_BORDER), egui::StrokeKind::Outside);
        painter.rect_filled(canvas, 3.0, Color32::BLACK);

        painter.text(
            canvas.center(),
            egui::Align2::CENTER_CENTER,
            "Generated trailer will appear here",
            egui::FontId::proportional(13.0),
            Color32::from_gray(70),
        );
        // Faint scanlines so the dead monitor reads as a screen, not a hole.
        let mut y = canvas.min.y;
        while y < canvas.max.y {
            painter.line_segment(
                [Pos2::new(canvas.min.x, y), Pos2::new(canvas.max.x, y)],
                Stroke::new(0.5, Color32::from_rgba_unmultiplied(255, 255, 255, 3)),
            );
            y += 4.0;
        }
    }

    fn show_player(
        &self,
        ui:       &mut Ui,
        clip:     &ResolvedClip,
        playback: Playback,
        state:    &SessionState,
        cmd:      &mut Vec<AppCommand>,
    ) {
        // ── Canvas (the whole surface toggles play/pause) ─────────────────────
        let (canvas, resp) = self.allocate_canvas(ui, Sense::click());
        if resp.clicked() {
            cmd.push(AppCommand::TogglePlayback);
        }

        let painter = ui.painter();
        if playback.is_playing() {
            painter.rect_stroke(canvas.expand(2.0), 4,
                Stroke::new(1.5, ACCENT.gamma_multiply(0.55)),
                egui::StrokeKind::Outside);
        } else {
            painter.rect_stroke(canvas.expand(1.0), 4,
                Stroke::new(1.0, DARK_BORDER),
                egui::StrokeKind::Outside);
        }
        painter.rect_filled(canvas, 3.0, Color32::BLACK);

        // Caption: genre + sample file, bottom-left.
        let sample = strip_freshness_token(&clip.url)
            .rsplit('/')
            .next()
            .unwrap_or("sample");
        painter.text(
            Pos2::new(canvas.min.x + 10.0, canvas.max.y - 14.0),
            egui::Align2::LEFT_CENTER,
            fit_label(&format!("{} • {}", clip.genre.label(), sample), canvas.width() - 20.0),
            egui::FontId::monospace(10.0),
            Color32::from_gray(110),
        );

        // Center glyph: triangle when paused, two bars when playing. Hovering
        // or pausing brightens it; during playback it fades to stay out of
        // the way.
        let c = canvas.center();
        let col = if resp.hovered() {
            ACCENT
        } else if playback.is_playing() {
            Color32::from_rgba_unmultiplied(255, 255, 255, 40)
        } else {
            Color32::from_gray(200)
        };
        if playback.is_playing() {
            for dx in [-0.55_f32, 0.35] {
                painter.rect_filled(
                    Rect::from_min_size(
                        Pos2::new(c.x + dx * ICON_SZ, c.y - ICON_SZ),
                        Vec2::new(ICON_SZ * 0.45, ICON_SZ * 2.0),
                    ),
                    2.0,
                    col,
                );
            }
        } else {
            painter.add(egui::Shape::convex_polygon(
                vec![
                    Pos2::new(c.x - ICON_SZ * 0.6, c.y - ICON_SZ),
                    Pos2::new(c.x + ICON_SZ,       c.y),
                    Pos2::new(c.x - ICON_SZ * 0.6, c.y + ICON_SZ),
                ],
                col,
                Stroke::NONE,
            ));
        }

        ui.add_space(6.0);

        // ── Transport readout + download ──────────────────────────────────────
        egui::Frame::new()
            .fill(DARK_BG_3)
            .stroke(Stroke::new(1.0, DARK_BORDER))
            .corner_radius(egui::CornerRadius::same(4))
            .inner_margin(Margin { left: 10, right: 10, top: 5, bottom: 5 })
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.set_height(TRANSPORT_H - 10.0);
                ui.horizontal_centered(|ui| {
                    ui.label(
                        RichText::new(format!(
                            "{} / {}",
                            format_time(playback.position()),
                            format_duration(clip.duration),
                        ))
                        .size(11.0)
                        .monospace(),
                    );
                    ui.separator();
                    ui.label(
                        RichText::new(if playback.is_playing() { "▶ playing" } else { "⏸ paused" })
                            .size(10.0)
                            .color(DARK_TEXT_DIM),
                    );
                });
            });

        ui.add_space(8.0);

        let saving = state.save_job.is_some();
        let download_btn = egui::Button::new(
            RichText::new(if saving { "Downloading…" } else { "⬇ Download Trailer" })
                .size(12.0)
                .strong()
                .color(if saving { Color32::DARK_GRAY } else { Color32::BLACK }),
        )
        .fill(if saving { DARK_BG_3 } else { ACCENT })
        .stroke(Stroke::NONE)
        .min_size(egui::vec2(ui.available_width(), 30.0));

        if ui.add_enabled(!saving, download_btn).clicked() {
            cmd.push(AppCommand::SaveTrailer);
        }
    }

    /// Full panel_w allocated, a 16:9 canvas centered inside it.
    fn allocate_canvas(&self, ui: &mut Ui, sense: Sense) -> (Rect, egui::Response) {
        let ratio   = 16.0 / 9.0;
        let panel_w = ui.available_width();
        let panel_h = (ui.available_height() - TRANSPORT_H - 60.0).max(120.0);

        let (canvas_w, canvas_h) = {
            let h = panel_w / ratio;
            if h <= panel_h { (panel_w, h) } else { (panel_h * ratio, panel_h) }
        };

        let (outer_rect, resp) = ui.allocate_exact_size(
            Vec2::new(panel_w, canvas_h), sense);
        let canvas = Rect::from_center_size(
            outer_rect.center(), Vec2::new(canvas_w, canvas_h));
        (canvas, resp)
    }
}
