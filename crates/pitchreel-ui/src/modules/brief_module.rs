// crates/pitchreel-ui/src/modules/brief_module.rs
//
// BriefModule: left-panel UI for the movie brief and the generate action.
//
// State machine (driven by SessionState::phase, set by app.rs / AppContext):
//
//   Idle       → user edits title/description (SetTitle / SetDescription),
//                clicks "Generate Trailer" → app.rs validates and starts a run
//
//   Generating → Progress results arrive over the worker channel
//                → UI shows the percentage card; the generate button is
//                  disabled, so no second run can start
//
//   Ready      → handled by preview_module; this panel just re-enables
//                the generate button for the next run
//
// The "Upload Clips" control is deliberately inert: it opens the native
// picker and discards the selection. Nothing in the app consumes uploaded
// clips — the hover text says so rather than pretending otherwise.

use super::PanelModule;
use crate::pitchreel_log;
use crate::theme::{ACCENT, DARK_BG_2, DARK_BG_3, DARK_BORDER, DARK_TEXT_DIM, TRACK_BG};
use egui::{Color32, Margin, RichText, Stroke, Ui};
use pitchreel_core::commands::AppCommand;
use pitchreel_core::session::SessionState;
use rfd::FileDialog;

pub struct BriefModule;

impl PanelModule for BriefModule {
    fn name(&self) -> &str { "Brief" }

    fn ui(&mut self, ui: &mut Ui, state: &SessionState, cmd: &mut Vec<AppCommand>) {
        ui.vertical(|ui| {
            // ── Header ────────────────────────────────────────────────────────
            egui::Frame::new()
                .fill(DARK_BG_2)
                .inner_margin(Margin { left: 8, right: 8, top: 6, bottom: 6 })
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("🎥 Movie Details").size(12.0).strong());
                    });
                });

            ui.separator();
            ui.add_space(4.0);

            // ── Title ─────────────────────────────────────────────────────────
            ui.label(RichText::new("Movie Title").size(11.0).color(DARK_TEXT_DIM));
            ui.add_space(2.0);
            let mut title = state.brief.title.clone();
            let title_resp = ui.add(
                egui::TextEdit::singleline(&mut title)
                    .desired_width(f32::INFINITY)
                    .hint_text("Enter movie title (e.g., 'Epic Action Adventure')"),
            );
            if title_resp.changed() {
                cmd.push(AppCommand::SetTitle(title));
            }

            ui.add_space(8.0);

            // ── Description ───────────────────────────────────────────────────
            ui.label(RichText::new("Description").size(11.0).color(DARK_TEXT_DIM));
            ui.add_space(2.0);
            let mut description = state.brief.description.clone();
            let desc_resp = ui.add(
                egui::TextEdit::multiline(&mut description)
                    .desired_width(f32::INFINITY)
                    .desired_rows(6)
                    .hint_text("Enter movie description (e.g., 'An action-packed thriller with dramatic twists')"),
            );
            if desc_resp.changed() {
                cmd.push(AppCommand::SetDescription(description));
            }

            ui.add_space(8.0);

            // ── Upload (inert affordance) ─────────────────────────────────────
            let upload_btn = egui::Button::new(
                RichText::new("📂 Upload Clips").size(11.0).color(DARK_TEXT_DIM),
            )
            .fill(DARK_BG_3)
            .stroke(Stroke::new(1.0, DARK_BORDER));

            if ui.add(upload_btn)
                .on_hover_text("Clip upload is not wired up yet — selected files are ignored")
                .clicked()
            {
                let picked = FileDialog::new()
                    .add_filter("Video", &["mp4", "mov", "mkv", "webm", "avi"])
                    .pick_files();
                // Selection deliberately discarded — no handler consumes it.
                let n = picked.map(|f| f.len()).unwrap_or(0);
                pitchreel_log!("[brief] upload picker closed, {n} file(s) ignored");
            }

            ui.add_space(12.0);

            // ── Generate button ───────────────────────────────────────────────
            // Disabled while a run is in flight — the guarantee that no two
            // generation runs ever overlap.
            let generating = state.is_generating();
            let label = if generating { "Generating…" } else { "⚡ Generate Trailer" };
            let generate_btn = egui::Button::new(
                RichText::new(label)
                    .size(13.0)
                    .strong()
                    .color(if generating { Color32::DARK_GRAY } else { Color32::BLACK }),
            )
            .fill(if generating { DARK_BG_3 } else { ACCENT })
            .stroke(Stroke::NONE)
            .min_size(egui::vec2(ui.available_width(), 34.0));

            if ui.add_enabled(!generating, generate_btn).clicked() {
                cmd.push(AppCommand::Generate);
            }

            // ── Progress card (only while generating) ─────────────────────────
            if let Some(pct) = state.progress() {
                ui.add_space(10.0);
                self.show_progress_card(ui, pct);
                // The ramp advances on worker time, not input events.
                ui.ctx().request_repaint_after(std::time::Duration::from_millis(100));
            }
        });
    }
}

impl BriefModule {
    fn show_progress_card(&self, ui: &mut Ui, pct: u8) {
        egui::Frame::new()
            .fill(DARK_BG_2)
            .stroke(Stroke::new(1.0, DARK_BORDER))
            .corner_radius(egui::CornerRadius::same(4))
            .inner_margin(Margin::same(10))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());

                ui.horizontal(|ui| {
                    ui.label(RichText::new("Generating trailer…").size(11.0));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(format!("{pct}%"))
                                .size(11.0)
                                .strong()
                                .color(ACCENT),
                        );
                    });
                });
                ui.add_space(4.0);

                // Raw-painter bar: two filled rects, no widget chrome.
                let fraction = f32::from(pct) / 100.0;
                let (bar_rect, _) = ui.allocate_exact_size(
                    egui::vec2(ui.available_width(), 8.0),
                    egui::Sense::hover(),
                );
                let p = ui.painter();
                p.rect_filled(bar_rect, 4.0, TRACK_BG);
                if fraction > 0.0 {
                    let mut fill = bar_rect;
                    fill.max.x = bar_rect.min.x + bar_rect.width() * fraction;
                    p.rect_filled(fill, 4.0, ACCENT);
                }
            });
    }
}
