//! Software rasterization of the canvas into a bitmap.
//!
//! The scene is described in screen points: the backdrop fills `canvas_rect`
//! and stroke points are canvas-local, offset by `canvas_rect.min`. A capture
//! rasterizes one screen-space region of that scene. The same stroke
//! rasterizer backs the on-screen [`StrokeLayer`], so what is presented
//! matches what was drawn.

use egui::{Pos2, Rect, Vec2};
use image::{Rgba, RgbaImage};
use uuid::Uuid;

use crate::error::CaptureError;
use crate::stroke::{Stroke, StrokeRef};

/// Everything visible inside the canvas.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub canvas_rect: Rect,
    pub backdrop: &'a RgbaImage,
    pub strokes: &'a [StrokeRef],
}

/// A bitmap taken from the canvas. Read-only once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedImage {
    image: RgbaImage,
    region: Rect,
}

impl CapturedImage {
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Screen-space region the bitmap was taken from.
    pub fn region(&self) -> Rect {
        self.region
    }

    pub fn size(&self) -> [u32; 2] {
        [self.image.width(), self.image.height()]
    }
}

/// Rasterize `region` of `scene` at `pixels_per_point`.
pub fn capture(
    region: Rect,
    scene: &Scene<'_>,
    pixels_per_point: f32,
) -> Result<CapturedImage, CaptureError> {
    let Some([width, height]) = pixel_size(region.size(), pixels_per_point) else {
        return Err(CaptureError::EmptyRegion {
            width: region.width(),
            height: region.height(),
        });
    };

    let mut image = RgbaImage::new(width, height);
    draw_backdrop(&mut image, region, scene, pixels_per_point);

    let offset = (scene.canvas_rect.min - region.min) * pixels_per_point;
    for stroke in scene.strokes {
        draw_stroke(&mut image, stroke, offset, pixels_per_point);
    }

    log::info!(
        "Captured {}x{} pixels from region {:?}",
        image.width(),
        image.height(),
        region
    );
    Ok(CapturedImage { image, region })
}

/// Transparent bitmap of the completed strokes, kept in sync with the
/// document. Appends are drawn incrementally, anything else redraws.
#[derive(Debug, Clone)]
pub struct StrokeLayer {
    image: RgbaImage,
    pixels_per_point: f32,
    drawn: Vec<Uuid>,
}

impl Default for StrokeLayer {
    fn default() -> Self {
        Self {
            image: RgbaImage::new(0, 0),
            pixels_per_point: 1.0,
            drawn: Vec::new(),
        }
    }
}

impl StrokeLayer {
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Bring the layer up to date. Returns true when pixels changed.
    pub fn sync(&mut self, strokes: &[StrokeRef], size: Vec2, pixels_per_point: f32) -> bool {
        let [width, height] = pixel_size(size, pixels_per_point).unwrap_or([0, 0]);
        let same_target =
            self.image.dimensions() == (width, height) && self.pixels_per_point == pixels_per_point;
        let appended_only = same_target
            && self.drawn.len() <= strokes.len()
            && self.drawn.iter().zip(strokes).all(|(id, stroke)| *id == stroke.id());

        if appended_only && self.drawn.len() == strokes.len() {
            return false;
        }
        if !appended_only {
            self.image = RgbaImage::new(width, height);
            self.pixels_per_point = pixels_per_point;
            self.drawn.clear();
        }

        for stroke in &strokes[self.drawn.len()..] {
            draw_stroke(&mut self.image, stroke, Vec2::ZERO, pixels_per_point);
            self.drawn.push(stroke.id());
        }
        true
    }
}

fn pixel_size(size: Vec2, pixels_per_point: f32) -> Option<[u32; 2]> {
    let width = (size.x * pixels_per_point).round();
    let height = (size.y * pixels_per_point).round();
    // Also rejects NaN
    (width >= 1.0 && height >= 1.0).then_some([width as u32, height as u32])
}

fn draw_backdrop(image: &mut RgbaImage, region: Rect, scene: &Scene<'_>, pixels_per_point: f32) {
    let canvas = scene.canvas_rect;
    let (bw, bh) = scene.backdrop.dimensions();
    if canvas.width() <= 0.0 || canvas.height() <= 0.0 || bw == 0 || bh == 0 {
        return;
    }

    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let screen = region.min + Vec2::new(x as f32 + 0.5, y as f32 + 0.5) / pixels_per_point;
        if !canvas.contains(screen) {
            continue;
        }
        let u = ((screen.x - canvas.min.x) / canvas.width() * bw as f32) as u32;
        let v = ((screen.y - canvas.min.y) / canvas.height() * bh as f32) as u32;
        *pixel = *scene.backdrop.get_pixel(u.min(bw - 1), v.min(bh - 1));
    }
}

/// Round-capped, round-joined polyline, blended once per pixel so
/// overlapping segments of a translucent stroke do not darken.
///
/// `offset` is the canvas origin in pixels.
fn draw_stroke(image: &mut RgbaImage, stroke: &Stroke, offset: Vec2, pixels_per_point: f32) {
    // A path needs at least two points
    if stroke.is_degenerate() {
        return;
    }
    let points: Vec<Pos2> = stroke
        .points()
        .iter()
        .map(|p| (p.to_vec2() * pixels_per_point + offset).to_pos2())
        .collect();
    let radius = stroke.thickness() * pixels_per_point / 2.0;
    let color = stroke.style().paint_color().to_srgba_unmultiplied();

    // Pixel window touched by the stroke, clipped to the image
    let reach = radius + 1.0;
    let (lo, hi) = points.iter().fold(
        (Pos2::new(f32::INFINITY, f32::INFINITY), Pos2::new(f32::NEG_INFINITY, f32::NEG_INFINITY)),
        |(lo, hi), p| (lo.min(*p), hi.max(*p)),
    );
    let x0 = (lo.x - reach).floor().max(0.0) as u32;
    let y0 = (lo.y - reach).floor().max(0.0) as u32;
    let x1 = ((hi.x + reach).ceil().max(0.0) as u32).min(image.width());
    let y1 = ((hi.y + reach).ceil().max(0.0) as u32).min(image.height());

    for y in y0..y1 {
        for x in x0..x1 {
            let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
            let distance = points
                .windows(2)
                .map(|pair| segment_distance(center, pair[0], pair[1]))
                .fold(f32::INFINITY, f32::min);
            let coverage = (radius + 0.5 - distance).clamp(0.0, 1.0);
            if coverage > 0.0 {
                blend(image.get_pixel_mut(x, y), color, coverage);
            }
        }
    }
}

/// Distance from `p` to the closest point of segment `a..b`.
fn segment_distance(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    let t = if len_sq > 0.0 {
        ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    p.distance(a + ab * t)
}

// Source-over on unmultiplied RGBA
fn blend(dst: &mut Rgba<u8>, src: [u8; 4], coverage: f32) {
    let sa = src[3] as f32 / 255.0 * coverage;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return;
    }
    for c in 0..3 {
        let value = (src[c] as f32 * sa + dst[c] as f32 * da * (1.0 - sa)) / out_a;
        dst[c] = value.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round() as u8;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PaletteIndex;
    use crate::stroke::StrokeStyle;

    fn translucent(points: Vec<Pos2>) -> StrokeRef {
        let style = StrokeStyle {
            color_index: PaletteIndex::new(7),
            thickness: 4.0,
            opacity: Some(0.5),
        };
        Stroke::new_ref(style, points)
    }

    #[test]
    fn test_segment_distance() {
        let a = Pos2::new(0.0, 0.0);
        let b = Pos2::new(10.0, 0.0);
        assert_eq!(segment_distance(Pos2::new(5.0, 3.0), a, b), 3.0);
        assert_eq!(segment_distance(Pos2::new(14.0, 3.0), a, b), 5.0);
        assert_eq!(segment_distance(Pos2::new(3.0, 4.0), a, a), 5.0);
    }

    #[test]
    fn test_blend_opaque_replaces() {
        let mut pixel = Rgba([10, 20, 30, 255]);
        blend(&mut pixel, [200, 100, 50, 255], 1.0);
        assert_eq!(pixel, Rgba([200, 100, 50, 255]));
    }

    #[test]
    fn test_blend_half_over_transparent() {
        let mut pixel = Rgba([0, 0, 0, 0]);
        blend(&mut pixel, [255, 0, 0, 255], 0.5);
        assert_eq!(pixel, Rgba([255, 0, 0, 128]));
    }

    #[test]
    fn test_blend_zero_coverage_keeps_pixel() {
        let mut pixel = Rgba([1, 2, 3, 255]);
        blend(&mut pixel, [255, 255, 255, 255], 0.0);
        assert_eq!(pixel, Rgba([1, 2, 3, 255]));
    }

    #[test]
    fn test_self_crossing_stroke_blends_once() {
        // An X drawn as one stroke: the crossing must not be darker than an arm
        let stroke = translucent(vec![
            Pos2::new(10.0, 10.0),
            Pos2::new(50.0, 50.0),
            Pos2::new(50.0, 10.0),
            Pos2::new(10.0, 50.0),
        ]);
        let mut layer = StrokeLayer::default();
        layer.sync(&[stroke], Vec2::new(60.0, 60.0), 1.0);

        let crossing = layer.image().get_pixel(30, 30);
        let arm = layer.image().get_pixel(20, 20);
        assert_eq!(crossing, arm);
        assert!(arm[3] > 100 && arm[3] < 160);
    }

    #[test]
    fn test_layer_appends_match_full_redraw() {
        let a = translucent(vec![Pos2::new(5.0, 5.0), Pos2::new(40.0, 20.0)]);
        let b = translucent(vec![Pos2::new(5.0, 20.0), Pos2::new(40.0, 5.0)]);
        let size = Vec2::new(50.0, 30.0);

        let mut incremental = StrokeLayer::default();
        assert!(incremental.sync(&[a.clone()], size, 1.0));
        assert!(incremental.sync(&[a.clone(), b.clone()], size, 1.0));
        assert!(!incremental.sync(&[a.clone(), b.clone()], size, 1.0));

        let mut full = StrokeLayer::default();
        full.sync(&[a.clone(), b], size, 1.0);
        assert_eq!(incremental.image(), full.image());

        // Undo redraws from scratch
        let mut single = StrokeLayer::default();
        single.sync(&[a.clone()], size, 1.0);
        assert!(incremental.sync(&[a], size, 1.0));
        assert_eq!(incremental.image(), single.image());
    }

    #[test]
    fn test_layer_resizes_with_scale() {
        let mut layer = StrokeLayer::default();
        layer.sync(&[], Vec2::new(20.0, 10.0), 1.0);
        assert_eq!(layer.image().dimensions(), (20, 10));
        assert!(layer.sync(&[], Vec2::new(20.0, 10.0), 2.0));
        assert_eq!(layer.image().dimensions(), (40, 20));
    }
}
