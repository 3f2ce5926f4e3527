//! Face directions and the per-direction geometry table.
//!
//! Every direction-dependent constant lives in [`FACES`]: the outward normal,
//! the static brightness, which chunk axes play the `u`/`v`/`w` roles, how far
//! each role sweeps, and the corner order of an emitted quad. The mesher never
//! branches on a direction anywhere else.

use crate::types::{CHUNK_HEIGHT, CHUNK_SIZE};
use serde::{Deserialize, Serialize};

/// The six axis-aligned face directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    North,
    South,
    East,
    West,
}

/// The three chunk axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Component index of this axis in an `[x, y, z]` triple.
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Number of voxels a chunk spans along this axis.
    pub const fn extent(self) -> usize {
        match self {
            Axis::Y => CHUNK_HEIGHT,
            Axis::X | Axis::Z => CHUNK_SIZE,
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

/// Constant geometry for one face direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceSpec {
    /// Outward unit normal.
    pub normal: [f32; 3],
    /// Static light multiplier applied to vertex colors.
    pub brightness: f32,
    /// Chunk axis mapped to the `u` role.
    pub u_axis: Axis,
    /// Chunk axis mapped to the `v` role.
    pub v_axis: Axis,
    /// Chunk axis swept slice by slice.
    pub w_axis: Axis,
    /// `+1` if the face looks at `w + 1`, `-1` if it looks at `w - 1`.
    pub step: i32,
    /// Quad corners as `(du, dv)` unit offsets, ordered so that triangles
    /// `(0, 1, 2)` and `(0, 2, 3)` are counter-clockwise seen from outside.
    pub corners: [(u8, u8); 4],
}

/// Geometry table, indexed by [`Direction::index`].
pub const FACES: [FaceSpec; 6] = [
    // Up: plane y = w + 1, u = x, v = z
    FaceSpec {
        normal: [0.0, 1.0, 0.0],
        brightness: 1.0,
        u_axis: Axis::X,
        v_axis: Axis::Z,
        w_axis: Axis::Y,
        step: 1,
        corners: [(0, 0), (0, 1), (1, 1), (1, 0)],
    },
    // Down: plane y = w, u = x, v = z
    FaceSpec {
        normal: [0.0, -1.0, 0.0],
        brightness: 0.5,
        u_axis: Axis::X,
        v_axis: Axis::Z,
        w_axis: Axis::Y,
        step: -1,
        corners: [(0, 0), (1, 0), (1, 1), (0, 1)],
    },
    // North: plane z = w, u = x, v = y
    FaceSpec {
        normal: [0.0, 0.0, -1.0],
        brightness: 0.8,
        u_axis: Axis::X,
        v_axis: Axis::Y,
        w_axis: Axis::Z,
        step: -1,
        corners: [(1, 0), (0, 0), (0, 1), (1, 1)],
    },
    // South: plane z = w + 1, u = x, v = y
    FaceSpec {
        normal: [0.0, 0.0, 1.0],
        brightness: 0.8,
        u_axis: Axis::X,
        v_axis: Axis::Y,
        w_axis: Axis::Z,
        step: 1,
        corners: [(0, 0), (1, 0), (1, 1), (0, 1)],
    },
    // East: plane x = w + 1, u = z, v = y
    FaceSpec {
        normal: [1.0, 0.0, 0.0],
        brightness: 0.6,
        u_axis: Axis::Z,
        v_axis: Axis::Y,
        w_axis: Axis::X,
        step: 1,
        corners: [(1, 0), (0, 0), (0, 1), (1, 1)],
    },
    // West: plane x = w, u = z, v = y
    FaceSpec {
        normal: [-1.0, 0.0, 0.0],
        brightness: 0.6,
        u_axis: Axis::Z,
        v_axis: Axis::Y,
        w_axis: Axis::X,
        step: -1,
        corners: [(0, 0), (1, 0), (1, 1), (0, 1)],
    },
];

impl Direction {
    /// All six directions in meshing order.
    pub const ALL: [Direction; 6] = [
        Direction::Up,
        Direction::Down,
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Position of this direction in [`Direction::ALL`] and [`FACES`].
    pub const fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::North => 2,
            Direction::South => 3,
            Direction::East => 4,
            Direction::West => 5,
        }
    }

    /// The geometry table entry for this direction.
    pub fn spec(self) -> &'static FaceSpec {
        &FACES[self.index()]
    }

    /// Get the normal vector for this direction.
    pub fn normal(self) -> [f32; 3] {
        self.spec().normal
    }

    /// Static light multiplier (faux ambient occlusion, not real lighting).
    pub fn brightness(self) -> f32 {
        self.spec().brightness
    }

    /// Chunk axes playing the `(u, v, w)` roles.
    pub fn axis_roles(self) -> (Axis, Axis, Axis) {
        let spec = self.spec();
        (spec.u_axis, spec.v_axis, spec.w_axis)
    }

    /// Inclusive maxima `(w_max, u_max, v_max)` of the sweep.
    ///
    /// Vertical faces sweep 256 slices of a 16x16 plane, horizontal faces
    /// sweep 16 slices of a 16x256 plane.
    pub fn sweep_range(self) -> (usize, usize, usize) {
        let spec = self.spec();
        (
            spec.w_axis.extent() - 1,
            spec.u_axis.extent() - 1,
            spec.v_axis.extent() - 1,
        )
    }

    /// Get the offset for this direction.
    pub fn offset(self) -> (i32, i32, i32) {
        let spec = self.spec();
        let mut offset = [0; 3];
        offset[spec.w_axis.index()] = spec.step;
        (offset[0], offset[1], offset[2])
    }

    /// Get the opposite direction.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Whether the face sits on the far side (`w + 1`) of its voxel.
    pub fn is_positive(self) -> bool {
        self.spec().step > 0
    }

    /// Map `(u, v, w)` slice coordinates back to chunk-local `(x, y, z)`.
    pub fn local_position(self, u: i32, v: i32, w: i32) -> [i32; 3] {
        let spec = self.spec();
        let mut pos = [0; 3];
        pos[spec.u_axis.index()] = u;
        pos[spec.v_axis.index()] = v;
        pos[spec.w_axis.index()] = w;
        pos
    }

    /// Corner positions of a `width x height` rectangle on slice `w`.
    ///
    /// Positions are chunk-local, with voxel `(x, y, z)` occupying
    /// `[x, x + 1] x [y, y + 1] x [z, z + 1]`. The order is taken from
    /// [`FaceSpec::corners`] and must not be changed: it decides which side of
    /// the quad survives backface culling.
    pub fn quad_corners(self, u: i32, v: i32, w: i32, width: i32, height: i32) -> [[f32; 3]; 4] {
        let spec = self.spec();
        let plane = if spec.step > 0 { w + 1 } else { w };
        spec.corners.map(|(du, dv)| {
            let [x, y, z] = self.local_position(
                u + i32::from(du) * width,
                v + i32::from(dv) * height,
                plane,
            );
            [x as f32, y as f32, z as f32]
        })
    }

    /// Parse from string (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "north" => Some(Direction::North),
            "south" => Some(Direction::South),
            "east" => Some(Direction::East),
            "west" => Some(Direction::West),
            _ => None,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        })
    }
}
