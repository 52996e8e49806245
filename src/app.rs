use std::time::Duration;

use crate::config::SketchConfig;
use crate::export::ExportJob;
use crate::input::InputHandler;
use crate::panels::{central_panel, tools_panel};
use crate::session::DrawingSession;

pub const APP_NAME: &str = "DecoDoodle";

pub struct PaintApp {
    config: SketchConfig,
    session: DrawingSession,
    input: InputHandler,
    // Text buffer of the custom sticker prompt while it is open
    sticker_prompt: Option<String>,
    export_job: Option<ExportJob>,
    status: Option<String>,
}

impl Default for PaintApp {
    fn default() -> Self {
        Self::with_config(SketchConfig::default())
    }
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::with_config(SketchConfig::from_env())
    }

    pub fn with_config(config: SketchConfig) -> Self {
        Self {
            session: DrawingSession::new(&config),
            input: InputHandler::new(egui::Rect::NOTHING),
            sticker_prompt: None,
            export_job: None,
            status: None,
            config,
        }
    }

    pub fn session(&self) -> &DrawingSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut DrawingSession {
        &mut self.session
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Feed this frame's pointer input on the canvas into the session.
    ///
    /// `pointer_on_canvas` is false when another layer sits between the
    /// pointer and the canvas.
    pub fn handle_input(&mut self, ctx: &egui::Context, canvas_rect: egui::Rect, pointer_on_canvas: bool) {
        self.input.set_canvas_rect(canvas_rect);
        self.input.set_blocked(!pointer_on_canvas || self.canvas_blocked());
        for event in self.input.process_input(ctx) {
            event.apply(&mut self.session);
        }
    }

    pub fn open_sticker_prompt(&mut self) {
        self.sticker_prompt.get_or_insert_with(String::new);
    }

    /// The sticker prompt is modal: the canvas takes no input while it is open
    pub fn canvas_blocked(&self) -> bool {
        self.sticker_prompt.is_some()
    }

    pub fn is_exporting(&self) -> bool {
        self.export_job.is_some()
    }

    /// Snapshot the canvas and write the PNG on a worker thread
    pub fn start_export(&mut self) {
        if self.export_job.is_some() {
            log::warn!("Export already running");
            return;
        }
        log::info!(
            "Exporting {}x{} to {}",
            self.config.export_size,
            self.config.export_size,
            self.config.export_path.display()
        );
        self.status = Some("Exporting…".to_owned());
        self.export_job = Some(ExportJob::spawn(
            self.session.snapshot(),
            self.config.export_path.clone(),
            self.config.export_size,
        ));
    }

    fn poll_export(&mut self, ctx: &egui::Context) {
        let Some(job) = &mut self.export_job else {
            return;
        };
        match job.poll() {
            Some(Ok(path)) => {
                log::info!("Exported {}", path.display());
                self.status = Some(format!("Saved {}", path.display()));
                self.export_job = None;
            }
            Some(Err(err)) => {
                log::error!("Export failed: {err}");
                self.status = Some(format!("Export failed: {err}"));
                self.export_job = None;
            }
            None => ctx.request_repaint_after(Duration::from_millis(100)),
        }
    }

    fn sticker_prompt_window(&mut self, ctx: &egui::Context) {
        let Some(text) = &mut self.sticker_prompt else {
            return;
        };
        // Some(Some(text)) = confirmed, Some(None) = cancelled
        let mut outcome: Option<Option<String>> = None;
        egui::Window::new("Custom sticker text")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                let edit = ui.text_edit_singleline(text);
                edit.request_focus();
                let submitted = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() || submitted {
                        outcome = Some(Some(text.clone()));
                    }
                    if ui.button("Cancel").clicked() {
                        outcome = Some(None);
                    }
                });
            });

        if let Some(entered) = outcome {
            self.close_sticker_prompt(entered.as_deref());
        }
    }

    /// `None` means the prompt was cancelled
    pub fn close_sticker_prompt(&mut self, entered: Option<&str>) {
        self.session.add_custom_sticker(entered);
        self.sticker_prompt = None;
    }
}

impl eframe::App for PaintApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_export(ctx);

        tools_panel(self, ctx);
        central_panel(self, ctx);
        self.sticker_prompt_window(ctx);

        if self.session.take_redraw_request() {
            ctx.request_repaint();
        }
    }
}
