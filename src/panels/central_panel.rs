use crate::PaintApp;
use crate::app::APP_NAME;
use crate::renderer::PainterSurface;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading(APP_NAME);

        // Fixed-size canvas; strokes are stored at this resolution
        let size = app.session().canvas_size();
        let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());
        let canvas_rect = response.rect;

        // contains_pointer is false when a window is on top of the canvas
        app.handle_input(ctx, canvas_rect, response.contains_pointer());

        // The tool preview replaces the system cursor over the canvas
        if response.hovered() {
            ctx.set_cursor_icon(egui::CursorIcon::None);
        }

        let painter = painter.with_clip_rect(canvas_rect);
        let mut surface = PainterSurface::new(&painter, canvas_rect);
        app.session().render(&mut surface);
    });
}
