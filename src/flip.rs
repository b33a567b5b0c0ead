//! Flip-card geometry: two faces rotated about a shared tilted axis and
//! projected with a simple perspective.

use std::f32::consts::PI;

use egui::{Pos2, Rect, Vec2};

/// Rotation axis, before normalization.
const AXIS: [f32; 3] = [1.0, 5.0, 0.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    /// The captured image
    Front,
    /// The fixed card back
    Back,
}

impl Face {
    pub const ALL: [Face; 2] = [Face::Front, Face::Back];

    /// Extra rotation so the back starts turned away from the viewer.
    fn phase(self) -> f32 {
        match self {
            Face::Front => 0.0,
            Face::Back => PI,
        }
    }
}

/// How much `face` points toward the viewer at `angle`, in [-1, 1].
///
/// The axis lies in the screen plane, so the z part of the rotated face
/// normal is just the cosine of the rotation.
pub fn face_depth(angle: f32, face: Face) -> f32 {
    (angle + face.phase()).cos()
}

/// Faces ordered back-to-front, i.e. in painting order.
pub fn draw_order(angle: f32) -> [Face; 2] {
    if face_depth(angle, Face::Front) >= face_depth(angle, Face::Back) {
        [Face::Back, Face::Front]
    } else {
        [Face::Front, Face::Back]
    }
}

/// Screen positions of the corners of `rect` (top-left, top-right,
/// bottom-right, bottom-left) after rotating `face` by `angle` about the
/// rect's center.
pub fn project_face(rect: Rect, angle: f32, face: Face) -> [Pos2; 4] {
    let center = rect.center();
    let distance = rect.width().max(rect.height()).max(1.0);
    let phi = angle + face.phase();
    let corners = [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
    ];
    corners.map(|corner| {
        let local = corner - center;
        let [x, y, z] = rotate([local.x, local.y, 0.0], phi);
        let w = (1.0 - z / distance).max(0.05);
        center + Vec2::new(x / w, y / w)
    })
}

// Rodrigues' rotation about AXIS
fn rotate(p: [f32; 3], phi: f32) -> [f32; 3] {
    let len = (AXIS[0] * AXIS[0] + AXIS[1] * AXIS[1] + AXIS[2] * AXIS[2]).sqrt();
    let k = [AXIS[0] / len, AXIS[1] / len, AXIS[2] / len];
    let (sin, cos) = phi.sin_cos();
    let dot = k[0] * p[0] + k[1] * p[1] + k[2] * p[2];
    let cross = [
        k[1] * p[2] - k[2] * p[1],
        k[2] * p[0] - k[0] * p[2],
        k[0] * p[1] - k[1] * p[0],
    ];
    [0, 1, 2].map(|i| p[i] * cos + cross[i] * sin + k[i] * dot * (1.0 - cos))
}

/// Tap-driven flip state. The displayed angle animates toward `target_angle`.
#[derive(Debug, Clone, Default)]
pub struct FlipCard {
    target_angle: f32,
    /// Depths from the last rendered frame, applied through the deferred queue
    depths: [f32; 2],
}

impl FlipCard {
    pub fn new() -> Self {
        Self {
            target_angle: 0.0,
            depths: [face_depth(0.0, Face::Front), face_depth(0.0, Face::Back)],
        }
    }

    /// Queue another half turn.
    pub fn flip(&mut self) {
        self.target_angle += PI;
    }

    pub fn target_angle(&self) -> f32 {
        self.target_angle
    }

    pub fn set_depths(&mut self, depths: [f32; 2]) {
        if depths != self.depths {
            log::trace!("Flip depths: front {:.3}, back {:.3}", depths[0], depths[1]);
        }
        self.depths = depths;
    }
}
