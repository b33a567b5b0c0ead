use egui::Sense;

use crate::PaintApp;
use crate::tools::Tool;

/// Backdrop with the drawing overlay. Pointer drags on it draw strokes.
pub fn canvas_panel(app: &mut PaintApp, ctx: &egui::Context) {
    // Route last frame's gestures before painting so the preview is current
    for event in app.input.process_input(ctx) {
        app.editor.handle_input(&event);
    }

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            let (response, painter) = ui.allocate_painter(app.config.canvas_size(), Sense::drag());
            let rect = response.rect;

            let preview = app.editor.preview();
            app.renderer
                .render_canvas(&painter, rect, app.editor.document(), preview.as_ref());

            if response.hovered() || app.editor.tool().is_active() {
                ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
            }

            // The measured rect is only applied once this layout pass is over
            if app.view.canvas_rect != Some(rect) {
                app.deferred.defer(move |view| view.canvas_rect = Some(rect));
            }
        });
    });
}
