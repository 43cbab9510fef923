//! Static vertex data for the demos. Everything here is uploaded once and
//! never touched again.

pub const TRIANGLE: [[f32; 2]; 3] = [[0.0, 0.8], [-0.8, -0.8], [0.8, -0.8]];

/// Position and color, interleaved in one buffer.
#[derive(Copy, Clone, Debug, PartialEq)]
#[repr(C)]
pub struct ColorVertex {
    pub coord2d: [f32; 2],
    pub v_color: [f32; 3],
}

pub const COLORED_TRIANGLE: [ColorVertex; 3] = [
    ColorVertex { coord2d: [0.0, 0.8], v_color: [1.0, 1.0, 0.0] },
    ColorVertex { coord2d: [-0.8, -0.8], v_color: [0.0, 0.0, 1.0] },
    ColorVertex { coord2d: [0.8, -0.8], v_color: [1.0, 0.0, 0.0] },
];

/// The eight corners of the unit cube, front face first.
pub const CUBE_CORNERS: [[f32; 3]; 8] = [
    // front
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
    // back
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
];

pub const CUBE_CORNER_COLORS: [[f32; 3]; 8] = [
    // front
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 1.0, 1.0],
    // back
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 1.0, 1.0],
];

pub const CUBE_CORNER_ELEMENTS: [u16; 36] = [
    // front
    0, 1, 2, 2, 3, 0,
    // top
    3, 2, 6, 6, 7, 3,
    // back
    7, 6, 5, 5, 4, 7,
    // bottom
    4, 5, 1, 1, 0, 4,
    // left
    4, 0, 3, 3, 7, 4,
    // right
    1, 5, 6, 6, 2, 1,
];

/// Four vertices per face so every face can carry its own texture coordinates.
pub const CUBE_FACE_VERTICES: [[f32; 3]; 24] = [
    // front
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
    // top
    [-1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    // back
    [1.0, -1.0, -1.0],
    [-1.0, -1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [1.0, 1.0, -1.0],
    // bottom
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, -1.0, 1.0],
    [-1.0, -1.0, 1.0],
    // left
    [-1.0, -1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [-1.0, 1.0, 1.0],
    [-1.0, 1.0, -1.0],
    // right
    [1.0, -1.0, 1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [1.0, 1.0, 1.0],
];

pub const FACE_TEXCOORDS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// `FACE_TEXCOORDS` repeated for each of the six faces.
pub fn cube_face_texcoords() -> [[f32; 2]; 24] {
    let mut texcoords = [[0.0; 2]; 24];
    for (i, texcoord) in texcoords.iter_mut().enumerate() {
        *texcoord = FACE_TEXCOORDS[i % 4];
    }
    texcoords
}

pub const CUBE_FACE_ELEMENTS: [u16; 36] = [
    // front
    0, 1, 2, 2, 3, 0,
    // top
    4, 5, 6, 6, 7, 4,
    // back
    8, 9, 10, 10, 11, 8,
    // bottom
    12, 13, 14, 14, 15, 12,
    // left
    16, 17, 18, 18, 19, 16,
    // right
    20, 21, 22, 22, 23, 20,
];
