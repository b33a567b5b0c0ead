use egui::{Context, Key, Modifiers, PointerButton, Pos2, Rect};

/// Represents the location where an input event occurred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// The position relative to the canvas' top-left corner
    pub canvas_position: Pos2,
}

/// Input events relevant to the drawing canvas
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed inside the canvas: a gesture begins
    PointerDown { location: InputLocation },
    /// Pointer moved while a gesture is in progress
    PointerMove { location: InputLocation },
    /// Primary button released: the gesture ends
    PointerUp { location: InputLocation },
    /// Key was pressed
    KeyDown { key: Key, modifiers: Modifiers },
}

impl InputEvent {
    /// Ctrl+Z (Cmd+Z on mac)
    pub fn is_undo_shortcut(&self) -> bool {
        matches!(
            self,
            InputEvent::KeyDown { key: Key::Z, modifiers } if modifiers.command && !modifiers.shift
        )
    }
}

/// Converts raw egui input into canvas gestures.
///
/// A gesture starts only when the press lands inside the canvas, and keeps
/// tracking the pointer outside it until release.
#[derive(Debug, Clone)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Rect,
    gesture_active: bool,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            canvas_rect,
            gesture_active: false,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    pub fn canvas_rect(&self) -> Rect {
        self.canvas_rect
    }

    pub fn is_gesture_active(&self) -> bool {
        self.gesture_active
    }

    fn make_location(&self, pos: Pos2) -> InputLocation {
        InputLocation {
            canvas_position: (pos - self.canvas_rect.min).to_pos2(),
        }
    }

    /// Process raw egui input and generate our InputEvents
    ///
    /// Raw events are walked in order, so every pointer sample of the frame
    /// becomes its own move.
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            for event in &input.raw.events {
                match event {
                    egui::Event::PointerButton {
                        pos,
                        button: PointerButton::Primary,
                        pressed: true,
                        ..
                    } if !self.gesture_active && self.canvas_rect.contains(*pos) => {
                        self.gesture_active = true;
                        self.last_pointer_pos = Some(*pos);
                        events.push(InputEvent::PointerDown {
                            location: self.make_location(*pos),
                        });
                    }
                    egui::Event::PointerMoved(pos) if self.gesture_active => {
                        self.last_pointer_pos = Some(*pos);
                        events.push(InputEvent::PointerMove {
                            location: self.make_location(*pos),
                        });
                    }
                    egui::Event::PointerButton {
                        pos,
                        button: PointerButton::Primary,
                        pressed: false,
                        ..
                    } if self.gesture_active => {
                        self.gesture_active = false;
                        self.last_pointer_pos = None;
                        events.push(InputEvent::PointerUp {
                            location: self.make_location(*pos),
                        });
                    }
                    egui::Event::Key {
                        key,
                        pressed: true,
                        modifiers,
                        ..
                    } => {
                        events.push(InputEvent::KeyDown {
                            key: *key,
                            modifiers: *modifiers,
                        });
                    }
                    _ => {}
                }
            }

            // Release lost outside the window: end the gesture where it was last seen
            if self.gesture_active && !input.pointer.any_down() && !has_primary_press(&input.raw.events) {
                if let Some(pos) = self.last_pointer_pos.take() {
                    events.push(InputEvent::PointerUp {
                        location: self.make_location(pos),
                    });
                }
                self.gesture_active = false;
            }
        });

        events
    }
}

fn has_primary_press(events: &[egui::Event]) -> bool {
    events.iter().any(|event| {
        matches!(
            event,
            egui::Event::PointerButton {
                button: PointerButton::Primary,
                pressed: true,
                ..
            }
        )
    })
}
