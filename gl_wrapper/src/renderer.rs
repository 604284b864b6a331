use crate::geometry::Geometry;
use crate::program::Program;

/// Explicit render-state object; the only place draw, clear and viewport
/// calls are issued.
pub struct GlRenderer {
    current_program: u32,
}

impl GlRenderer {
    pub fn new() -> Self {
        Self { current_program: 0 }
    }

    pub fn draw(&mut self, geometry: &Geometry, program: &Program) {
        let p_id = program.get_id();
        if self.current_program != p_id {
            unsafe { gl::UseProgram(p_id) }
            self.current_program = p_id;
        }

        unsafe {
            gl::BindVertexArray(geometry.vao());
            gl::DrawArrays(gl::TRIANGLES, 0, geometry.vertices() as i32);
        }
    }

    /// Full-window viewport, no aspect correction.
    pub fn resize(&self, width: u32, height: u32) {
        let (x, y, w, h) = viewport_rect(width, height);
        unsafe {
            gl::Viewport(x, y, w, h);
        }
    }

    pub fn clear_color(&self, r: f32, g: f32, b: f32) {
        unsafe {
            gl::ClearColor(r, g, b, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }
}

fn viewport_rect(width: u32, height: u32) -> (i32, i32, i32, i32) {
    (0, 0, width as i32, height as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_covers_whole_window() {
        assert_eq!(viewport_rect(400, 300), (0, 0, 400, 300));
        assert_eq!(viewport_rect(800, 600), (0, 0, 800, 600));
    }
}
