// src/app.rs (pitchreel-ui)
use crate::context::AppContext;
use crate::modules::{
    PanelModule,
    brief_module::BriefModule,
    preview_module::PreviewModule,
};
use crate::pitchreel_log;
use crate::theme::configure_style;
use eframe::egui;
use pitchreel_core::commands::AppCommand;
use pitchreel_core::helpers::url::{strip_freshness_token, trailer_file_name};
use pitchreel_core::session::{Phase, SessionState};
use pitchreel_gen::StudioWorker;
use rfd::FileDialog;
use uuid::Uuid;

// ── App ───────────────────────────────────────────────────────────────────────

pub struct PitchReelApp {
    state:   SessionState,
    context: AppContext,
    // Panel modules as concrete types — a typo'd module is a compile error
    // instead of a silently blank panel.
    brief:        BriefModule,
    preview:      PreviewModule,
    /// Commands emitted by modules each frame, processed after the UI pass.
    pending_cmds: Vec<AppCommand>,
}

impl PitchReelApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        configure_style(&cc.egui_ctx);
        // Pin to dark mode — prevents egui overwriting the theme on OS
        // light/dark changes.
        cc.egui_ctx.options_mut(|o| {
            o.theme_preference = egui::ThemePreference::Dark;
        });

        Self {
            state:        SessionState::default(),
            context:      AppContext::new(StudioWorker::new()),
            brief:        BriefModule,
            preview:      PreviewModule,
            pending_cmds: Vec::new(),
        }
    }

    fn process_command(&mut self, cmd: AppCommand) {
        match cmd {
            // ── Brief input ──────────────────────────────────────────────────
            AppCommand::SetTitle(title) => {
                self.state.brief.title = title;
            }
            AppCommand::SetDescription(description) => {
                self.state.brief.description = description;
            }

            // ── Generation ───────────────────────────────────────────────────
            AppCommand::Generate => {
                let job = Uuid::new_v4();
                if self.state.begin_generation(job) {
                    pitchreel_log!("[app] generation started job={job}");
                    self.context.worker.start_generation(job, self.state.brief.clone());
                }
            }

            // ── Playback ─────────────────────────────────────────────────────
            AppCommand::TogglePlayback => {
                if self.state.toggle_playback() == Some(true) {
                    // First play of a freshly resolved clip: probe its URL
                    // once. Replays of the same clip skip the probe.
                    if let Some(url) = self.state.preview_url() {
                        if self.context.preview.verify_requested.as_deref() != Some(url) {
                            self.context.preview.verify_requested = Some(url.to_string());
                            self.context.worker.verify_preview(url.to_string());
                        }
                    }
                }
            }

            // ── Download ─────────────────────────────────────────────────────
            AppCommand::SaveTrailer => {
                // One download at a time — don't even open the dialog if a
                // transfer is already running.
                if self.state.save_job.is_some() {
                    return;
                }
                if let Phase::Ready { clip, .. } = &self.state.phase {
                    // Fetch the canonical asset, not the tokened preview URL.
                    let url  = strip_freshness_token(&clip.url).to_string();
                    let name = trailer_file_name(&self.state.brief.title);

                    if let Some(dest) = FileDialog::new()
                        .set_file_name(&name)
                        .add_filter("MP4", &["mp4"])
                        .save_file()
                    {
                        let job = Uuid::new_v4();
                        if self.state.begin_save(job) {
                            self.context.worker.save_trailer(job, url, dest);
                        }
                    }
                }
            }
            AppCommand::ClearSaveStatus => {
                self.state.save_done = None;
            }

            // ── Errors ───────────────────────────────────────────────────────
            AppCommand::DismissError => {
                self.state.error = None;
            }
        }
    }
}

// ── eframe::App ───────────────────────────────────────────────────────────────

impl eframe::App for PitchReelApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.context.worker.shutdown();
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Dispatch all queued StudioWorker results into state first, so the
        // panels below draw this frame's truth, not last frame's.
        self.context.ingest_studio_results(&mut self.state, ctx);

        egui::TopBottomPanel::top("top_panel")
            .exact_height(36.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new("⚡ PitchReel")
                            .strong().size(15.0).color(crate::theme::ACCENT),
                    );
                    ui.separator();
                    ui.label(
                        egui::RichText::new("Describe your movie, get a trailer")
                            .size(12.0).weak(),
                    );
                });
            });

        egui::SidePanel::left("brief_panel")
            .resizable(true)
            .default_width(360.0)
            .min_width(280.0)
            .show(ctx, |ui| {
                self.brief.ui(ui, &self.state, &mut self.pending_cmds);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.preview.ui(ui, &self.state, &mut self.pending_cmds);
        });

        // ── Process commands emitted by modules this frame ────────────────────
        let cmds: Vec<AppCommand> = self.pending_cmds.drain(..).collect();
        for cmd in cmds {
            self.process_command(cmd);
        }

        // ── Playhead clock ────────────────────────────────────────────────────
        let dt = ctx.input(|i| i.stable_dt as f64);
        if self.state.advance_playhead(dt) {
            ctx.request_repaint();
        }
    }
}
