mod canvas_panel;
mod controls_panel;
mod present_panel;

pub use canvas_panel::canvas_panel;
pub use controls_panel::controls_panel;
pub use present_panel::present_panel;
