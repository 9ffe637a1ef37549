use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Attribute {
    Position2,
    Position3,
    Color3,
    Normal3,
}

impl Attribute {
    /// Name of the attribute in GLSL sources
    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Position2 | Attribute::Position3 => "a_Position",
            Attribute::Color3 => "a_Color",
            Attribute::Normal3 => "a_Normal",
        }
    }

    pub fn components(&self) -> usize {
        match self {
            Attribute::Position2 => 2,
            Attribute::Position3 | Attribute::Color3 | Attribute::Normal3 => 3,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Topology {
    Triangles,
    Lines,
}

#[derive(Debug, Clone)]
pub struct Mesh {
    pub layout: Vec<Attribute>,
    /// Interleaved in `layout` order
    pub vertices: Vec<f32>,
    pub indices: Option<Vec<u16>>,
    pub topology: Topology,
}

impl Mesh {
    pub fn stride(&self) -> usize {
        self.layout.iter().map(|a| a.components()).sum()
    }

    pub fn vertex_count(&self) -> usize {
        match self.stride() {
            0 => 0,
            stride => self.vertices.len() / stride,
        }
    }

    pub fn element_count(&self) -> usize {
        self.indices
            .as_ref()
            .map(|i| i.len())
            .unwrap_or_else(|| self.vertex_count())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("attribute {0:?} has no data column")]
    MissingColumn(Attribute),
    #[error("column for {attribute:?} holds {len} floats, not a multiple of {components}")]
    RaggedColumn {
        attribute: Attribute,
        len: usize,
        components: usize,
    },
    #[error("columns describe a different amount of vertices")]
    CountMismatch,
}

/// Packs separate per-attribute columns into one interleaved buffer.
pub fn interleave(layout: &[Attribute], columns: &[&[f32]]) -> Result<Vec<f32>, MeshError> {
    if columns.len() < layout.len() {
        return Err(MeshError::MissingColumn(layout[columns.len()]));
    }

    let mut count = None;

    for (attribute, column) in layout.iter().zip(columns) {
        let components = attribute.components();
        if column.len() % components != 0 {
            return Err(MeshError::RaggedColumn {
                attribute: *attribute,
                len: column.len(),
                components,
            });
        }

        let n = column.len() / components;
        match count {
            None => count = Some(n),
            Some(c) if c != n => return Err(MeshError::CountMismatch),
            Some(_) => {}
        }
    }

    let count = count.unwrap_or(0);
    let stride: usize = layout.iter().map(|a| a.components()).sum();
    let mut out = Vec::with_capacity(count * stride);

    for i in 0..count {
        for (attribute, column) in layout.iter().zip(columns) {
            let c = attribute.components();
            out.extend_from_slice(&column[i * c..(i + 1) * c]);
        }
    }

    Ok(out)
}

/// Two nested triangles drawn without any transform.
pub fn double_triangle() -> Mesh {
    #[rustfmt::skip]
    let vertices = vec![
        0.0, 0.5, -0.5, -0.5, 0.5, -0.5,
        0.0, 0.8, -0.8, -0.8, 0.8, -0.8,
    ];

    Mesh {
        layout: vec![Attribute::Position2],
        vertices,
        indices: None,
        topology: Topology::Triangles,
    }
}

pub fn triangle() -> Mesh {
    Mesh {
        layout: vec![Attribute::Position2],
        vertices: vec![0.0, 0.5, -0.5, -0.5, 0.5, -0.5],
        indices: None,
        topology: Topology::Triangles,
    }
}

/// Triangle in pixel units, for cameras spanning a few hundred units.
pub fn shape_triangle() -> Mesh {
    Mesh {
        layout: vec![Attribute::Position2],
        vertices: vec![0.0, 100.0, -100.0, -100.0, 100.0, -100.0],
        indices: None,
        topology: Topology::Triangles,
    }
}

//    v6----- v5
//   /|      /|
//  v1------v0|
//  | |     | |
//  | |v7---|-|v4
//  |/      |/
//  v2------v3
#[rustfmt::skip]
const CUBE_POSITIONS: [f32; 72] = [
     1.0,  1.0,  1.0,  -1.0,  1.0,  1.0,  -1.0, -1.0,  1.0,   1.0, -1.0,  1.0, // front
     1.0,  1.0,  1.0,   1.0, -1.0,  1.0,   1.0, -1.0, -1.0,   1.0,  1.0, -1.0, // right
     1.0,  1.0,  1.0,   1.0,  1.0, -1.0,  -1.0,  1.0, -1.0,  -1.0,  1.0,  1.0, // up
    -1.0,  1.0,  1.0,  -1.0,  1.0, -1.0,  -1.0, -1.0, -1.0,  -1.0, -1.0,  1.0, // left
    -1.0, -1.0, -1.0,   1.0, -1.0, -1.0,   1.0, -1.0,  1.0,  -1.0, -1.0,  1.0, // down
     1.0, -1.0, -1.0,  -1.0, -1.0, -1.0,  -1.0,  1.0, -1.0,   1.0,  1.0, -1.0, // back
];

const CUBE_FACE_NORMALS: [[f32; 3]; 6] = [
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [-1.0, 0.0, 0.0],
    [0.0, -1.0, 0.0],
    [0.0, 0.0, -1.0],
];

/// Cube with flat shaded faces, four vertices per face.
pub fn cube(color: [f32; 3]) -> Mesh {
    let vertices: Vec<f32> = CUBE_POSITIONS
        .chunks_exact(3)
        .enumerate()
        .flat_map(|(i, position)| {
            let normal = &CUBE_FACE_NORMALS[i / 4];
            position.iter().chain(&color).chain(normal).copied()
        })
        .collect();

    let indices = (0..6_u16)
        .flat_map(|face| {
            let b = face * 4;
            [b, b + 1, b + 2, b, b + 2, b + 3]
        })
        .collect();

    let layout = vec![Attribute::Position3, Attribute::Color3, Attribute::Normal3];

    Mesh {
        layout,
        vertices,
        indices: Some(indices),
        topology: Topology::Triangles,
    }
}

/// X, Y and Z axis lines coloured red, green and blue.
pub fn axes(length: f32) -> Mesh {
    #[rustfmt::skip]
    let vertices = vec![
        0.0, 0.0, 0.0,      1.0, 0.0, 0.0,
        length, 0.0, 0.0,   1.0, 0.0, 0.0,
        0.0, 0.0, 0.0,      0.0, 1.0, 0.0,
        0.0, length, 0.0,   0.0, 1.0, 0.0,
        0.0, 0.0, 0.0,      0.0, 0.0, 1.0,
        0.0, 0.0, length,   0.0, 0.0, 1.0,
    ];

    Mesh {
        layout: vec![Attribute::Position3, Attribute::Color3],
        vertices,
        indices: None,
        topology: Topology::Lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_counts() {
        assert_eq!(double_triangle().vertex_count(), 6);
        assert_eq!(triangle().vertex_count(), 3);
        assert_eq!(shape_triangle().element_count(), 3);

        let axes = axes(100.0);
        assert_eq!(axes.vertex_count(), 6);
        assert_eq!(axes.topology, Topology::Lines);
    }

    #[test]
    fn cube_layout() {
        let cube = cube([1.0, 0.0, 0.0]);

        assert_eq!(cube.stride(), 9);
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.element_count(), 36);

        let indices = cube.indices.as_ref().unwrap();
        assert!(indices.iter().all(|i| (*i as usize) < cube.vertex_count()));

        for vertex in cube.vertices.chunks(cube.stride()) {
            assert_eq!(&vertex[3..6], &[1.0, 0.0, 0.0]);

            let n = &vertex[6..9];
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn cube_matches_interleaved_columns() {
        let color = [0.2, 0.4, 0.6];
        let cube = cube(color);

        let colors: Vec<f32> = std::iter::repeat(color).take(24).flatten().collect();
        let normals: Vec<f32> = CUBE_FACE_NORMALS
            .iter()
            .flat_map(|n| std::iter::repeat(n).take(4).flatten().copied())
            .collect();

        let expected = interleave(&cube.layout, &[&CUBE_POSITIONS, &colors, &normals]).unwrap();
        assert_eq!(cube.vertices, expected);
    }

    #[test]
    fn cube_normals_point_outwards() {
        let cube = cube([1.0, 1.0, 1.0]);

        for vertex in cube.vertices.chunks(cube.stride()) {
            let dot = vertex[0] * vertex[6] + vertex[1] * vertex[7] + vertex[2] * vertex[8];
            assert!(dot > 0.0);
        }
    }

    #[test]
    fn interleave_columns() {
        let layout = [Attribute::Position2, Attribute::Color3];
        let out = interleave(
            &layout,
            &[&[0.0, 1.0, 2.0, 3.0], &[0.1, 0.2, 0.3, 0.4, 0.5, 0.6]],
        )
        .unwrap();

        assert_eq!(out, vec![0.0, 1.0, 0.1, 0.2, 0.3, 2.0, 3.0, 0.4, 0.5, 0.6]);
    }

    #[test]
    fn interleave_rejects_bad_columns() {
        let layout = [Attribute::Position2, Attribute::Color3];

        assert_eq!(
            interleave(&layout, &[&[0.0, 1.0], &[0.1, 0.2, 0.3, 0.4, 0.5, 0.6]]),
            Err(MeshError::CountMismatch)
        );
        assert_eq!(
            interleave(&layout, &[&[0.0, 1.0, 2.0]]),
            Err(MeshError::MissingColumn(Attribute::Color3))
        );
        assert!(matches!(
            interleave(&layout, &[&[0.0, 1.0, 2.0], &[0.1, 0.2, 0.3]]),
            Err(MeshError::RaggedColumn { .. })
        ));
    }
}
