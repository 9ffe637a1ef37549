use std::ffi::c_void;
use thiserror::Error;

use crate::program::Program;

pub struct GeometryBuilder<'a> {
    attributes: Vec<(&'a str, VertexAttribute)>,
    data: &'a [f32],
    indices: Option<&'a [u16]>,
    primitive: Primitive,
}

impl<'a> GeometryBuilder<'a> {
    pub fn new(data: &'a [f32]) -> Self {
        Self {
            data,
            attributes: Vec::new(),
            indices: None,
            primitive: Primitive::Triangles,
        }
    }

    /// Attributes are interleaved in the order they are added.
    pub fn with_attribute(mut self, name: &'a str, attr: VertexAttribute) -> Self {
        self.attributes.push((name, attr));
        self
    }

    pub fn with_indices(mut self, indices: &'a [u16]) -> Self {
        self.indices = Some(indices);
        self
    }

    pub fn with_primitive(mut self, primitive: Primitive) -> Self {
        self.primitive = primitive;
        self
    }

    pub fn build(self, program: &Program) -> Result<Geometry, GBError> {
        let vertices = validate(self.data, &self.attributes, self.indices)?;
        let total_len: usize = self.attributes.iter().map(|(_, a)| a.size()).sum();

        let mut vao = 0;
        let mut vbo = 0;
        let mut ebo = None;

        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::GenBuffers(1, &mut vbo);

            gl::BindVertexArray(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);

            gl::BufferData(
                gl::ARRAY_BUFFER,
                std::mem::size_of_val(self.data) as isize,
                self.data.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );

            let stride = (total_len * std::mem::size_of::<f32>()) as i32;
            let mut offset = 0;

            for (name, attr) in &self.attributes {
                if let Some(location) = program.attrib_location(name) {
                    gl::VertexAttribPointer(
                        location,
                        attr.size() as i32,
                        gl::FLOAT,
                        gl::FALSE,
                        stride,
                        (offset * std::mem::size_of::<f32>()) as *const c_void,
                    );
                    gl::EnableVertexAttribArray(location);
                }
                offset += attr.size();
            }

            if let Some(indices) = self.indices {
                let mut id = 0;
                gl::GenBuffers(1, &mut id);
                // element buffer binding is recorded in the VAO
                gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, id);
                gl::BufferData(
                    gl::ELEMENT_ARRAY_BUFFER,
                    std::mem::size_of_val(indices) as isize,
                    indices.as_ptr() as *const c_void,
                    gl::STATIC_DRAW,
                );
                ebo = Some(id);
            }

            gl::BindVertexArray(0);
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
        }

        let elements = self.indices.map(|i| i.len()).unwrap_or(vertices);

        Ok(Geometry {
            vao,
            vbo,
            ebo,
            vertices,
            elements,
            primitive: self.primitive,
        })
    }
}

/// Returns the vertex count described by `data` and `attributes`.
fn validate(
    data: &[f32],
    attributes: &[(&str, VertexAttribute)],
    indices: Option<&[u16]>,
) -> Result<usize, GBError> {
    let total_len: usize = attributes.iter().map(|(_, a)| a.size()).sum();

    if total_len == 0 || data.is_empty() {
        return Err(GBError::Empty);
    }

    if data.len() % total_len != 0 {
        return Err(GBError::InvalidDataLength);
    }

    let vertices = data.len() / total_len;

    if let Some(indices) = indices {
        if indices.iter().any(|i| *i as usize >= vertices) {
            return Err(GBError::IndexOutOfRange);
        }
    }

    Ok(vertices)
}

#[derive(Debug, Error)]
pub enum GBError {
    #[error("Invalid data length for given attributes")]
    InvalidDataLength,
    #[error("Index points past the last vertex")]
    IndexOutOfRange,
    #[error("Geometry has no vertex data")]
    Empty,
}

#[derive(Debug, Copy, Clone)]
pub enum VertexAttribute {
    Float,
    Vec2,
    Vec3,
    Vec4,
}

impl VertexAttribute {
    pub fn size(&self) -> usize {
        match self {
            VertexAttribute::Float => 1,
            VertexAttribute::Vec2 => 2,
            VertexAttribute::Vec3 => 3,
            VertexAttribute::Vec4 => 4,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Primitive {
    Triangles,
    Lines,
}

impl Primitive {
    pub(crate) fn gl_mode(&self) -> gl::types::GLenum {
        match self {
            Primitive::Triangles => gl::TRIANGLES,
            Primitive::Lines => gl::LINES,
        }
    }
}

pub struct Geometry {
    vao: u32,
    vbo: u32,
    ebo: Option<u32>,
    vertices: usize,
    elements: usize,
    primitive: Primitive,
}

impl Geometry {
    pub fn vao(&self) -> u32 {
        self.vao
    }

    pub fn vertices(&self) -> usize {
        self.vertices
    }

    /// Amount of vertices a draw call consumes, indices when present.
    pub fn elements(&self) -> usize {
        self.elements
    }

    pub fn is_indexed(&self) -> bool {
        self.ebo.is_some()
    }

    pub fn primitive(&self) -> Primitive {
        self.primitive
    }
}

impl Drop for Geometry {
    fn drop(&mut self) {
        unsafe {
            if let Some(ebo) = &self.ebo {
                gl::DeleteBuffers(1, ebo);
            }
            gl::DeleteBuffers(1, &self.vbo);
            gl::DeleteVertexArrays(1, &self.vao);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_sizes() {
        let total: usize = [
            VertexAttribute::Vec3,
            VertexAttribute::Vec3,
            VertexAttribute::Vec2,
            VertexAttribute::Float,
        ]
        .iter()
        .map(|a| a.size())
        .sum();

        assert_eq!(total, 9);
        assert_eq!(VertexAttribute::Vec4.size(), 4);
    }

    const POS_COLOR: [(&str, VertexAttribute); 2] = [
        ("a_Position", VertexAttribute::Vec3),
        ("a_Color", VertexAttribute::Vec3),
    ];

    #[test]
    fn validate_counts_vertices() {
        let data = [0.0; 18];

        assert!(matches!(validate(&data, &POS_COLOR, None), Ok(3)));
        assert!(matches!(
            validate(&data, &POS_COLOR, Some(&[0, 1, 2, 2, 1, 0][..])),
            Ok(3)
        ));
    }

    #[test]
    fn validate_rejects_empty() {
        assert!(matches!(
            validate(&[0.0; 6], &[], None),
            Err(GBError::Empty)
        ));
        assert!(matches!(
            validate(&[], &POS_COLOR, None),
            Err(GBError::Empty)
        ));
    }

    #[test]
    fn validate_rejects_partial_vertex() {
        assert!(matches!(
            validate(&[0.0; 16], &POS_COLOR, None),
            Err(GBError::InvalidDataLength)
        ));
    }

    #[test]
    fn validate_rejects_index_past_last_vertex() {
        // three vertices, so index 3 is one past the end
        assert!(matches!(
            validate(&[0.0; 18], &POS_COLOR, Some(&[0, 1, 3][..])),
            Err(GBError::IndexOutOfRange)
        ));
    }

    #[test]
    fn primitive_modes() {
        assert_eq!(Primitive::Triangles.gl_mode(), gl::TRIANGLES);
        assert_eq!(Primitive::Lines.gl_mode(), gl::LINES);
    }
}
