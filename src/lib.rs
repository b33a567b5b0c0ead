#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod assets;
pub mod capture;
pub mod command;
pub mod config;
pub mod deferred;
pub mod document;
pub mod editor;
pub mod error;
pub mod flip;
pub mod input;
pub mod palette;
mod panels;
pub mod renderer;
pub mod stroke;
pub mod style;
pub mod tools;

pub use app::PaintApp;
pub use command::Command;
pub use document::Document;
pub use editor::Editor;
pub use input::{InputEvent, InputLocation};
pub use renderer::Renderer;
pub use stroke::Stroke;
pub use tools::{DrawStrokeTool, Tool};
