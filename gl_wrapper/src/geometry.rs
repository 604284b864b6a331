use std::ffi::c_void;
use std::mem::size_of;

use thiserror::Error;

/// Builds a [`Geometry`] from interleaved vertex data.
///
/// Attributes are declared in location order; the declared layout must
/// match the data exactly, the GPU cannot verify it.
pub struct GeometryBuilder<'a> {
    attributes: Vec<VertexAttribute>,
    data: &'a [f32],
}

impl<'a> GeometryBuilder<'a> {
    pub fn new(data: &'a [f32]) -> Self {
        Self {
            data,
            attributes: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, attr: VertexAttribute) -> Self {
        self.attributes.push(attr);
        self
    }

    pub fn build(self) -> Result<Geometry, GeometryError> {
        let floats_per_vertex: usize = self.attributes.iter().map(|a| a.size()).sum();

        if floats_per_vertex == 0 {
            return Err(GeometryError::NoAttributes);
        }

        if self.data.len() % floats_per_vertex != 0 {
            return Err(GeometryError::InvalidDataLength);
        }

        let (stride, offsets) = interleaved_layout(&self.attributes);

        let mut vao = 0;
        let mut vbo = 0;

        unsafe {
            gl::GenVertexArrays(1, (&mut vao) as *mut u32);
            gl::GenBuffers(1, (&mut vbo) as *mut u32);

            gl::BindVertexArray(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);

            gl::BufferData(
                gl::ARRAY_BUFFER,
                (self.data.len() * size_of::<f32>()) as isize,
                self.data.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );

            for (i, (attr, offset)) in self.attributes.iter().zip(&offsets).enumerate() {
                gl::VertexAttribPointer(
                    i as u32,
                    attr.size() as i32,
                    gl::FLOAT,
                    gl::FALSE,
                    stride as i32,
                    *offset as *const c_void,
                );
                gl::EnableVertexAttribArray(i as u32);
            }

            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
        }

        let vertices = self.data.len() / floats_per_vertex;

        Ok(Geometry { vao, vbo, vertices })
    }
}

/// Byte stride of one vertex and the byte offset of each attribute.
fn interleaved_layout(attributes: &[VertexAttribute]) -> (usize, Vec<usize>) {
    let stride = attributes.iter().map(|a| a.size()).sum::<usize>() * size_of::<f32>();

    let mut offsets = Vec::with_capacity(attributes.len());
    let mut offset = 0;

    for attr in attributes {
        offsets.push(offset);
        offset += attr.size() * size_of::<f32>();
    }

    (stride, offsets)
}

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("geometry has no vertex attributes")]
    NoAttributes,
    #[error("data length is not a multiple of the vertex size")]
    InvalidDataLength,
}

pub enum VertexAttribute {
    Float,
    Vec2,
    Vec3,
}

impl VertexAttribute {
    /// Float count of the attribute.
    pub fn size(&self) -> usize {
        match self {
            VertexAttribute::Float => 1,
            VertexAttribute::Vec2 => 2,
            VertexAttribute::Vec3 => 3,
        }
    }
}

/// Owning handle pair for an uploaded vertex array (VAO + VBO).
pub struct Geometry {
    vao: u32,
    vbo: u32,
    vertices: usize,
}

impl Geometry {
    pub fn vao(&self) -> u32 {
        self.vao
    }

    pub fn vertices(&self) -> usize {
        self.vertices
    }
}

impl Drop for Geometry {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, (&self.vbo) as *const u32);
            gl::DeleteVertexArrays(1, (&self.vao) as *const u32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_color_layout() {
        let (stride, offsets) =
            interleaved_layout(&[VertexAttribute::Vec3, VertexAttribute::Vec3]);

        assert_eq!(stride, 24);
        assert_eq!(offsets, vec![0, 12]);
    }

    #[test]
    fn mixed_attribute_layout() {
        let (stride, offsets) = interleaved_layout(&[
            VertexAttribute::Vec2,
            VertexAttribute::Float,
            VertexAttribute::Vec3,
        ]);

        assert_eq!(stride, 24);
        assert_eq!(offsets, vec![0, 8, 12]);
    }

    #[test]
    fn rejects_mismatched_data_length() {
        // 5 floats cannot form whole 6-float vertices
        let res = GeometryBuilder::new(&[0.0; 5])
            .with_attribute(VertexAttribute::Vec3)
            .with_attribute(VertexAttribute::Vec3)
            .build();

        assert!(matches!(res, Err(GeometryError::InvalidDataLength)));
    }

    #[test]
    fn rejects_empty_attribute_list() {
        let res = GeometryBuilder::new(&[0.0; 6]).build();

        assert!(matches!(res, Err(GeometryError::NoAttributes)));
    }
}
