use crate::PaintApp;
use crate::stroke::Glyph;

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::right("tools_panel")
        .resizable(false)
        .default_width(180.0)
        .show(ctx, |ui| {
            commands_section(app, ui);
            ui.separator();
            markers_section(app, ui);
            ui.separator();
            stickers_section(app, ui);

            if let Some(status) = app.status() {
                ui.separator();
                ui.label(status);
            }
        });
}

fn commands_section(app: &mut PaintApp, ui: &mut egui::Ui) {
    ui.heading("Commands");
    ui.horizontal_wrapped(|ui| {
        if ui.button("Clear").clicked() {
            app.session_mut().clear();
        }

        let history = app.session().history();
        let (can_undo, can_redo) = (history.can_undo(), history.can_redo());
        if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
            app.session_mut().undo();
        }
        if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
            app.session_mut().redo();
        }

        let exporting = app.is_exporting();
        if ui.add_enabled(!exporting, egui::Button::new("Export")).clicked() {
            app.start_export();
        }
    });

    let history = app.session().history();
    ui.label(format!(
        "Strokes: {}  Redo: {}",
        history.committed().len(),
        history.redo_stack().len()
    ));
}

fn markers_section(app: &mut PaintApp, ui: &mut egui::Ui) {
    ui.heading("Markers");
    let tool = app.session().tool();
    let marker_active = *tool.selected_glyph() == Glyph::Marker;
    let (color, color_name) = (tool.color(), tool.color_name());
    let (thickness, rotation) = (tool.thickness(), tool.rotation_degrees());

    ui.horizontal_wrapped(|ui| {
        if ui.selectable_label(marker_active, "Marker").clicked() {
            app.session_mut().select_marker();
        }
        if ui.button("Thin").clicked() {
            app.session_mut().decrease_thickness();
        }
        if ui.button("Thick").clicked() {
            app.session_mut().increase_thickness();
        }
    });

    ui.horizontal(|ui| {
        let (swatch, _) = ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
        ui.painter().rect_filled(swatch, 2.0, color);
        if ui.button(color_name).on_hover_text("Next color").clicked() {
            app.session_mut().cycle_color();
        }
        if ui.button(format!("{rotation}°")).on_hover_text("Rotate sticker").clicked() {
            app.session_mut().cycle_rotation();
        }
    });
    ui.label(format!("Thickness: {thickness}"));
}

fn stickers_section(app: &mut PaintApp, ui: &mut egui::Ui) {
    ui.heading("Stickers");

    // Collect first to avoid borrowing the session across the clicks
    let selected = app.session().tool().selected_glyph().clone();
    let glyphs: Vec<String> = app.session().stickers().glyphs().to_vec();

    ui.horizontal_wrapped(|ui| {
        for glyph in &glyphs {
            let is_selected = matches!(&selected, Glyph::Sticker(g) if g == glyph);
            if ui.selectable_label(is_selected, glyph.as_str()).clicked() {
                app.session_mut().select_sticker(glyph);
            }
        }
    });

    if ui.button("Custom Sticker").clicked() {
        app.open_sticker_prompt();
    }
}
