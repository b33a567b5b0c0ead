use egui::epaint::Vertex;
use egui::{Color32, Context, Mesh, Painter, Pos2, Rect, Shape, TextureHandle, TextureId, TextureOptions};
use image::RgbaImage;

use crate::assets;
use crate::capture::{CapturedImage, StrokeLayer};
use crate::document::Document;
use crate::flip::{self, Face};
use crate::stroke::Stroke;

/// Holds GPU textures and paints the canvas and the flip card.
pub struct Renderer {
    backdrop: TextureHandle,
    card_back: TextureHandle,
    captured: Option<TextureHandle>,
    /// Completed strokes, rasterized the same way a capture is
    stroke_layer: StrokeLayer,
    stroke_texture: Option<TextureHandle>,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("backdrop", &self.backdrop.id())
            .field("card_back", &self.card_back.id())
            .field("captured", &self.captured.as_ref().map(TextureHandle::id))
            .finish()
    }
}

impl Renderer {
    pub fn new(ctx: &Context, backdrop: &RgbaImage, card_back: &RgbaImage) -> Self {
        Self {
            backdrop: Self::create_texture(ctx, backdrop, "backdrop"),
            card_back: Self::create_texture(ctx, card_back, "card_back"),
            captured: None,
            stroke_layer: StrokeLayer::default(),
            stroke_texture: None,
        }
    }

    fn create_texture(ctx: &Context, image: &RgbaImage, name: &str) -> TextureHandle {
        ctx.load_texture(name, assets::to_color_image(image), TextureOptions::LINEAR)
    }

    /// Upload a fresh capture, replacing the previous one.
    pub fn set_captured(&mut self, ctx: &Context, captured: &CapturedImage) {
        self.captured = Some(Self::create_texture(ctx, captured.image(), "captured"));
    }

    /// Free the captured texture once its display is closed.
    pub fn clear_captured(&mut self) {
        self.captured = None;
    }

    /// Paint backdrop, completed strokes, then the in-progress stroke.
    ///
    /// Completed strokes come from the rasterized stroke layer; only the
    /// in-progress stroke is tessellated live.
    pub fn render_canvas(
        &mut self,
        painter: &Painter,
        rect: Rect,
        document: &Document,
        preview: Option<&Stroke>,
    ) {
        let painter = painter.with_clip_rect(rect);
        painter.image(self.backdrop.id(), rect, full_uv(), Color32::WHITE);

        let pixels_per_point = painter.ctx().pixels_per_point();
        if self
            .stroke_layer
            .sync(document.strokes(), rect.size(), pixels_per_point)
        {
            self.upload_stroke_layer(painter.ctx());
        }
        if let Some(texture) = &self.stroke_texture {
            painter.image(texture.id(), rect, full_uv(), Color32::WHITE);
        }

        if let Some(stroke) = preview {
            paint_stroke(&painter, rect.min, stroke);
        }
    }

    fn upload_stroke_layer(&mut self, ctx: &Context) {
        let image = self.stroke_layer.image();
        if image.width() == 0 || image.height() == 0 {
            self.stroke_texture = None;
            return;
        }
        let color_image = assets::to_color_image(image);
        match &mut self.stroke_texture {
            Some(texture) => texture.set(color_image, TextureOptions::LINEAR),
            None => {
                self.stroke_texture =
                    Some(ctx.load_texture("strokes", color_image, TextureOptions::LINEAR));
            }
        }
    }

    /// Paint both card faces at `angle`, farthest first.
    ///
    /// Returns the face depths used for ordering.
    pub fn render_flip_card(&self, painter: &Painter, rect: Rect, angle: f32) -> [f32; 2] {
        for face in flip::draw_order(angle) {
            let (texture, face_rect) = match face {
                Face::Front => match &self.captured {
                    Some(texture) => (texture.id(), rect.shrink2(rect.size() * 0.005)),
                    None => continue,
                },
                Face::Back => (self.card_back.id(), rect),
            };
            let corners = flip::project_face(face_rect, angle, face);
            painter.add(Shape::mesh(textured_quad(texture, corners)));
        }
        Face::ALL.map(|face| flip::face_depth(angle, face))
    }
}

fn paint_stroke(painter: &Painter, origin: Pos2, stroke: &Stroke) {
    // A path needs at least two points
    if stroke.is_degenerate() {
        return;
    }
    let points: Vec<Pos2> = stroke.points().iter().map(|p| origin + p.to_vec2()).collect();
    let style = stroke.style();
    painter.add(Shape::line(
        points,
        egui::Stroke::new(style.thickness, style.paint_color()),
    ));
}

fn full_uv() -> Rect {
    Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0))
}

fn textured_quad(texture: TextureId, corners: [Pos2; 4]) -> Mesh {
    let uvs = [
        Pos2::new(0.0, 0.0),
        Pos2::new(1.0, 0.0),
        Pos2::new(1.0, 1.0),
        Pos2::new(0.0, 1.0),
    ];
    let mut mesh = Mesh::with_texture(texture);
    for (pos, uv) in corners.into_iter().zip(uvs) {
        mesh.vertices.push(Vertex {
            pos,
            uv,
            color: Color32::WHITE,
        });
    }
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    mesh
}
