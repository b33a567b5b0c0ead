use egui::{Color32, Key, Rect, Sense};

use crate::PaintApp;

/// Full-bleed display of the captured image as a card that flips on tap.
pub fn present_panel(app: &mut PaintApp, ctx: &egui::Context) {
    let mut close = ctx.input(|input| input.key_pressed(Key::Escape));

    egui::CentralPanel::default()
        .frame(egui::Frame::none().fill(Color32::from_gray(24)))
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Close").clicked() {
                    close = true;
                }
                ui.label(egui::RichText::new("Tap the card to flip it").color(Color32::LIGHT_GRAY));
            });

            let card_rect = Rect::from_center_size(ui.max_rect().center(), app.config.canvas_size());
            let response = ui.allocate_rect(card_rect, Sense::click());

            let Some(card) = app.view.card.as_mut() else {
                return;
            };
            if response.clicked() {
                card.flip();
            }

            let id = egui::Id::new(("flip_angle", app.view.presentations));
            let angle = ctx.animate_value_with_time(id, card.target_angle(), app.config.flip_duration_secs);

            let depths = app.renderer.render_flip_card(ui.painter(), card_rect, angle);
            app.deferred.defer(move |view| {
                if let Some(card) = view.card.as_mut() {
                    card.set_depths(depths);
                }
            });
        });

    if close {
        app.dismiss();
    }
}
