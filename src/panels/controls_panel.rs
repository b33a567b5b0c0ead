use egui::{Button, Color32, DragValue, RichText, Sense, Slider};

use crate::PaintApp;
use crate::command::Command;
use crate::style::Variant;

const SWATCH_SIZE: f32 = 28.0;

pub fn controls_panel(app: &mut PaintApp, ctx: &egui::Context) {
    let mut commands = Vec::new();
    let mut present = false;

    egui::TopBottomPanel::bottom("controls_panel")
        .resizable(false)
        .show(ctx, |ui| {
            let editor = &app.editor;
            let style = editor.style();
            let limits = editor.limits();

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                for variant in [Variant::Overlay, Variant::FlipCard] {
                    if ui
                        .selectable_label(editor.variant() == variant, variant.label())
                        .clicked()
                    {
                        commands.push(Command::SetVariant(variant));
                    }
                }
            });
            ui.separator();

            ui.horizontal(|ui| {
                ui.label(RichText::new(format!("Thickness: {}", style.thickness() as i32)).color(Color32::GRAY));
                match editor.variant() {
                    Variant::Overlay => {
                        let mut thickness = style.thickness();
                        let slider = Slider::new(&mut thickness, limits.thickness.clone()).show_value(false);
                        if ui.add(slider).changed() {
                            commands.push(Command::SetThickness(thickness));
                        }
                    }
                    Variant::FlipCard => {
                        if ui.button("−").clicked() {
                            commands.push(Command::StepThickness(-1));
                        }
                        let mut thickness = style.thickness();
                        let stepper = DragValue::new(&mut thickness)
                            .range(limits.thickness.clone())
                            .speed(1.0)
                            .fixed_decimals(0);
                        if ui.add(stepper).changed() {
                            commands.push(Command::SetThickness(thickness));
                        }
                        if ui.button("+").clicked() {
                            commands.push(Command::StepThickness(1));
                        }
                    }
                }
            });

            if let Some(range) = limits.opacity.clone() {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(format!("Opacity: {:.1}", style.opacity())).color(Color32::GRAY));
                    let mut opacity = style.opacity();
                    if ui.add(Slider::new(&mut opacity, range).show_value(false)).changed() {
                        commands.push(Command::SetOpacity(opacity));
                    }
                });
            }

            ui.horizontal(|ui| {
                let color_index = style.color_index();
                if ui
                    .button(RichText::new(format!("Color: {}", color_index.name())).color(Color32::GRAY))
                    .clicked()
                {
                    commands.push(Command::CycleColor);
                }
                let (swatch, _) = ui.allocate_exact_size(egui::vec2(SWATCH_SIZE, SWATCH_SIZE), Sense::hover());
                ui.painter().rect_filled(swatch, 4.0, color_index.color());
                ui.painter()
                    .rect_stroke(swatch, 4.0, egui::Stroke::new(1.0, Color32::DARK_GRAY));
            });

            ui.horizontal(|ui| {
                let can_undo = !editor.document().is_empty();
                if ui.add_enabled(can_undo, Button::new("⟲ Undo Drawing")).clicked() {
                    commands.push(Command::Undo);
                }
                ui.label(format!("Strokes: {}", editor.document().len()));
            });

            if editor.variant().can_capture() && ui.button("Present").clicked() {
                present = true;
            }

            if let Some(status) = &app.status {
                ui.colored_label(Color32::RED, status);
            }
            ui.add_space(6.0);
        });

    for command in commands {
        log::debug!("UI command: {}", command.name());
        app.execute(command);
    }
    if present {
        app.present(ctx);
    }
}
