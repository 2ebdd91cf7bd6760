//! Cell images: the rotate/flip transform applied to them and the built-in
//! sprite set the planner ships with.

use image::{imageops, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

pub const SPRITE_SIZE: u32 = 32;

/// The eight distinct rotate/flip transforms a cell image can carry:
/// a quarter-turn rotation, optionally followed by a horizontal flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RotateFlip {
    #[default]
    None,
    Rotate90,
    Rotate180,
    Rotate270,
    FlipX,
    Rotate90FlipX,
    Rotate180FlipX,
    Rotate270FlipX,
}

impl RotateFlip {
    /// Produces the transformed copy of `source`.
    pub fn apply(self, source: &RgbaImage) -> RgbaImage {
        let rotated = match self {
            RotateFlip::None | RotateFlip::FlipX => source.clone(),
            RotateFlip::Rotate90 | RotateFlip::Rotate90FlipX => imageops::rotate90(source),
            RotateFlip::Rotate180 | RotateFlip::Rotate180FlipX => imageops::rotate180(source),
            RotateFlip::Rotate270 | RotateFlip::Rotate270FlipX => imageops::rotate270(source),
        };

        if self.flips() {
            imageops::flip_horizontal(&rotated)
        } else {
            rotated
        }
    }

    fn flips(self) -> bool {
        matches!(
            self,
            RotateFlip::FlipX
                | RotateFlip::Rotate90FlipX
                | RotateFlip::Rotate180FlipX
                | RotateFlip::Rotate270FlipX
        )
    }

    /// The next transform in the cycle the rotate key steps through.
    pub fn next(self) -> Self {
        match self {
            RotateFlip::None => RotateFlip::Rotate90,
            RotateFlip::Rotate90 => RotateFlip::Rotate180,
            RotateFlip::Rotate180 => RotateFlip::Rotate270,
            RotateFlip::Rotate270 => RotateFlip::FlipX,
            RotateFlip::FlipX => RotateFlip::Rotate90FlipX,
            RotateFlip::Rotate90FlipX => RotateFlip::Rotate180FlipX,
            RotateFlip::Rotate180FlipX => RotateFlip::Rotate270FlipX,
            RotateFlip::Rotate270FlipX => RotateFlip::None,
        }
    }
}

/// Sprite ids the plan format may reference, in the order the sprite key
/// cycles through them.
pub const SPRITE_IDS: &[&str] = &["tile", "ladder", "wire", "door"];

/// Looks up a built-in sprite by id. Unknown ids return `None`.
pub fn sprite_by_id(id: &str) -> Option<RgbaImage> {
    match id {
        "tile" => Some(tile_sprite()),
        "ladder" => Some(ladder_sprite()),
        "wire" => Some(wire_sprite()),
        "door" => Some(door_sprite()),
        _ => None,
    }
}

/// The id after `current` in the sprite cycle; starts at the beginning when
/// no sprite is placed.
pub fn next_sprite_id(current: Option<&str>) -> &'static str {
    match current {
        None => SPRITE_IDS[0],
        Some(id) => {
            let at = SPRITE_IDS.iter().position(|s| *s == id).unwrap_or(SPRITE_IDS.len() - 1);
            SPRITE_IDS[(at + 1) % SPRITE_IDS.len()]
        }
    }
}

fn blank() -> RgbaImage {
    RgbaImage::from_pixel(SPRITE_SIZE, SPRITE_SIZE, Rgba([0, 0, 0, 0]))
}

// Solid floor tile with a lighter top face so rotations are visible.
fn tile_sprite() -> RgbaImage {
    let mut img = RgbaImage::from_pixel(SPRITE_SIZE, SPRITE_SIZE, Rgba([110, 92, 66, 255]));
    for x in 0..SPRITE_SIZE {
        for y in 0..4 {
            img.put_pixel(x, y, Rgba([156, 132, 96, 255]));
        }
    }
    img
}

// Two rails plus rungs every fourth row.
fn ladder_sprite() -> RgbaImage {
    let mut img = blank();
    let rail = Rgba([196, 164, 90, 255]);
    for y in 0..SPRITE_SIZE {
        for x in [4, 5, SPRITE_SIZE - 6, SPRITE_SIZE - 5] {
            img.put_pixel(x, y, rail);
        }
        if y % 4 == 1 {
            for x in 6..SPRITE_SIZE - 6 {
                img.put_pixel(x, y, rail);
            }
        }
    }
    img
}

// A horizontal run with a drop at the right end; asymmetric on purpose so
// every rotate/flip state looks different.
fn wire_sprite() -> RgbaImage {
    let mut img = blank();
    let copper = Rgba([204, 112, 60, 255]);
    let mid = SPRITE_SIZE / 2;
    for x in 0..SPRITE_SIZE {
        img.put_pixel(x, mid, copper);
        img.put_pixel(x, mid + 1, copper);
    }
    for y in mid..SPRITE_SIZE {
        img.put_pixel(SPRITE_SIZE - 2, y, copper);
        img.put_pixel(SPRITE_SIZE - 1, y, copper);
    }
    img
}

// Door frame with an off-centre handle.
fn door_sprite() -> RgbaImage {
    let mut img = RgbaImage::from_pixel(SPRITE_SIZE, SPRITE_SIZE, Rgba([84, 96, 112, 255]));
    let frame = Rgba([140, 152, 168, 255]);
    for i in 0..SPRITE_SIZE {
        img.put_pixel(i, 0, frame);
        img.put_pixel(i, SPRITE_SIZE - 1, frame);
        img.put_pixel(0, i, frame);
        img.put_pixel(SPRITE_SIZE - 1, i, frame);
    }
    for y in 14..18 {
        for x in 24..28 {
            img.put_pixel(x, y, frame);
        }
    }
    img
}
