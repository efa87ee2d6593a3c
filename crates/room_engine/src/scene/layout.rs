//! Static room layout
//!
//! Named model matrices for the wall segments, the floor and the anchors of
//! the two models. Built once and only read afterwards.

use std::collections::HashMap;

use crate::foundation::math::{Mat4, Mat4Ext};

/// Floor entry
pub const FLOOR: &str = "Floor";
/// Torus anchor entry
pub const TORUS: &str = "Torus";
/// Cube anchor entry
pub const CUBE: &str = "Cube";

/// Distance from the room centre to each wall
pub const ROOM_HALF_EXTENT: f32 = 3.0;

/// One side of the room: name prefix, yaw that turns the +Z-facing quad
/// inwards, and where segment offsets go
struct WallSide {
    prefix: &'static str,
    yaw_degrees: f32,
    place: fn(offset: f32, height: f32) -> (f32, f32, f32),
}

fn back(offset: f32, height: f32) -> (f32, f32, f32) {
    (offset, height, -ROOM_HALF_EXTENT)
}

fn front(offset: f32, height: f32) -> (f32, f32, f32) {
    (offset, height, ROOM_HALF_EXTENT)
}

fn left(offset: f32, height: f32) -> (f32, f32, f32) {
    (-ROOM_HALF_EXTENT, height, offset)
}

fn right(offset: f32, height: f32) -> (f32, f32, f32) {
    (ROOM_HALF_EXTENT, height, offset)
}

const WALL_SIDES: [WallSide; 4] = [
    WallSide { prefix: "BackWall", yaw_degrees: 0.0, place: back },
    WallSide { prefix: "FrontWall", yaw_degrees: 180.0, place: front },
    WallSide { prefix: "LeftWall", yaw_degrees: 90.0, place: left },
    WallSide { prefix: "RightWall", yaw_degrees: -90.0, place: right },
];

/// Segment rows, bottom then top
const ROW_HEIGHTS: [f32; 2] = [0.0, 2.0];

/// Segment offsets along each wall
const COLUMN_OFFSETS: [f32; 3] = [-2.0, 0.0, 2.0];

/// Segments per wall
pub const SEGMENTS_PER_WALL: usize = ROW_HEIGHTS.len() * COLUMN_OFFSETS.len();

/// Name → model matrix table for the room
#[derive(Debug, Clone, PartialEq)]
pub struct RoomLayout {
    transforms: HashMap<String, Mat4>,
    wall_names: Vec<String>,
}

impl RoomLayout {
    /// Build the 4×6 wall grid plus floor and model anchors
    ///
    /// Segments are numbered 1..=6 per side, left to right along the bottom
    /// row, then the top row.
    pub fn new() -> Self {
        let mut transforms = HashMap::new();
        let mut wall_names = Vec::with_capacity(WALL_SIDES.len() * SEGMENTS_PER_WALL);

        for side in &WALL_SIDES {
            let rotation = if side.yaw_degrees == 0.0 {
                Mat4::identity()
            } else {
                Mat4::rotation_y_deg(side.yaw_degrees)
            };

            let positions = ROW_HEIGHTS
                .iter()
                .flat_map(|&height| COLUMN_OFFSETS.iter().map(move |&offset| (offset, height)));
            for (index, (offset, height)) in positions.enumerate() {
                let (x, y, z) = (side.place)(offset, height);
                let name = format!("{}{}", side.prefix, index + 1);
                transforms.insert(name.clone(), Mat4::translation(x, y, z) * rotation);
                wall_names.push(name);
            }
        }

        transforms.insert(
            FLOOR.to_string(),
            Mat4::translation(0.0, -0.5, 0.0) * Mat4::rotation_x_deg(-90.0) * Mat4::scaling(3.0, 3.0, 1.0),
        );
        transforms.insert(TORUS.to_string(), Mat4::translation(-1.0, 0.0, -1.0));
        transforms.insert(CUBE.to_string(), Mat4::translation(1.0, 0.0, 1.0));

        log::debug!("Room layout built with {} entries", transforms.len());
        Self { transforms, wall_names }
    }

    /// Model matrix for `name`
    pub fn get(&self, name: &str) -> Option<&Mat4> {
        self.transforms.get(name)
    }

    /// Model matrix for `name`, identity when missing
    pub fn transform(&self, name: &str) -> Mat4 {
        self.get(name).copied().unwrap_or_else(|| {
            log::warn!("No layout entry named {name}");
            Mat4::identity()
        })
    }

    /// Wall segment names in draw order: back, front, left, right
    pub fn wall_names(&self) -> &[String] {
        &self.wall_names
    }

    /// Wall segment matrices in draw order
    pub fn walls(&self) -> impl Iterator<Item = &Mat4> + '_ {
        self.wall_names.iter().filter_map(|name| self.transforms.get(name))
    }

    /// Total number of entries
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

impl Default for RoomLayout {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Vec3, Vec4};
    use approx::assert_relative_eq;

    fn translation_of(m: &Mat4) -> Vec3 {
        Vec3::new(m[(0, 3)], m[(1, 3)], m[(2, 3)])
    }

    #[test]
    fn test_entry_counts() {
        let layout = RoomLayout::new();
        assert_eq!(layout.wall_names().len(), 24);
        assert_eq!(layout.walls().count(), 24);
        assert_eq!(layout.len(), 27);
        for name in [FLOOR, TORUS, CUBE] {
            assert!(layout.get(name).is_some(), "missing {name}");
        }
    }

    #[test]
    fn test_back_wall_segments() {
        let layout = RoomLayout::new();
        assert_relative_eq!(layout.transform("BackWall1"), Mat4::translation(-2.0, 0.0, -3.0));
        assert_relative_eq!(layout.transform("BackWall6"), Mat4::translation(2.0, 2.0, -3.0));
        assert_eq!(layout.wall_names()[0], "BackWall1");
        assert_eq!(layout.wall_names()[23], "RightWall6");
    }

    #[test]
    fn test_side_walls_face_inwards() {
        let layout = RoomLayout::new();
        let normal = Vec4::new(0.0, 0.0, 1.0, 0.0);

        let left = layout.transform("LeftWall1");
        assert_relative_eq!((left * normal).xyz(), Vec3::x(), epsilon = 1e-6);
        assert_relative_eq!(translation_of(&left), Vec3::new(-3.0, 0.0, -2.0), epsilon = 1e-6);

        let right = layout.transform("RightWall5");
        assert_relative_eq!((right * normal).xyz(), -Vec3::x(), epsilon = 1e-6);
        assert_relative_eq!(translation_of(&right), Vec3::new(3.0, 2.0, 0.0), epsilon = 1e-6);

        let front = layout.transform("FrontWall2");
        assert_relative_eq!((front * normal).xyz(), -Vec3::z(), epsilon = 1e-6);
    }

    #[test]
    fn test_floor_faces_up_below_origin() {
        let layout = RoomLayout::new();
        let floor = layout.transform(FLOOR);
        let corner = floor * Vec4::new(1.0, 1.0, 0.0, 1.0);
        assert_relative_eq!(corner.xyz(), Vec3::new(3.0, -0.5, -3.0), epsilon = 1e-5);
        assert_relative_eq!((floor * Vec4::new(0.0, 0.0, 1.0, 0.0)).xyz(), Vec3::y(), epsilon = 1e-6);
    }

    #[test]
    fn test_unknown_name_is_identity() {
        assert_eq!(RoomLayout::new().transform("Ceiling"), Mat4::identity());
    }
}
