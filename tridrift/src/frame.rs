use cgmath::{Matrix4, Vector3};

/// Per-frame state derived from the wall clock; recomputed every frame,
/// never persisted.
#[derive(Debug, Clone, Copy)]
pub struct FrameState {
    pub elapsed: f32,
}

impl FrameState {
    pub fn at(elapsed: f32) -> Self {
        Self { elapsed }
    }

    /// Translation along X and Y grows linearly with elapsed time;
    /// Z stays put.
    pub fn transform(&self, speed: f32) -> Matrix4<f32> {
        let shift = speed * self.elapsed;

        Matrix4::from_translation(Vector3::new(shift, shift, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use cgmath::SquareMatrix;

    #[test]
    fn identity_at_start() {
        let transform = FrameState::at(0.0).transform(0.1);

        assert_eq!(transform, Matrix4::identity());
    }

    #[test]
    fn drifts_along_x_and_y() {
        let transform = FrameState::at(10.0).transform(0.1);

        assert_eq!(transform[3][0], 1.0);
        assert_eq!(transform[3][1], 1.0);
        assert_eq!(transform[3][2], 0.0);
    }

    #[test]
    fn speed_scales_the_drift() {
        let transform = FrameState::at(2.0).transform(0.5);

        assert_eq!(transform[3][0], 1.0);
        assert_eq!(transform[3][1], 1.0);
    }
}
