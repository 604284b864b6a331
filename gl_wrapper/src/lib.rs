//! Thin owning wrappers over raw OpenGL objects for the tridrift demo.
//!
//! All GL state mutation goes through explicit handle types and the
//! [`renderer::GlRenderer`] state object instead of free-floating calls.

/// Interleaved vertex data for the demo triangle.
///
/// Three vertices, six floats each: position (x, y, z) then color (r, g, b).
#[rustfmt::skip]
pub const TRIANGLE: [f32; 18] = [
    // positions        // colors
     0.5, -0.5, 0.0,    1.0, 0.0, 0.0,
    -0.5, -0.5, 0.0,    0.0, 1.0, 0.0,
     0.0,  0.5, 0.0,    0.0, 0.0, 1.0,
];

pub mod geometry;
pub mod program;
pub mod renderer;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_vertex_data() {
        assert_eq!(
            TRIANGLE,
            [
                0.5, -0.5, 0.0, 1.0, 0.0, 0.0, //
                -0.5, -0.5, 0.0, 0.0, 1.0, 0.0, //
                0.0, 0.5, 0.0, 0.0, 0.0, 1.0,
            ]
        );

        // three vertices of six floats
        assert_eq!(TRIANGLE.len() % 6, 0);
        assert_eq!(TRIANGLE.len() / 6, 3);
    }
}
