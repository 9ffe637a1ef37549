use cgmath::{
    ortho, perspective, Deg, InnerSpace, Matrix, Matrix3, Matrix4, Point3, SquareMatrix, Vector3,
};

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Projection {
    Identity,
    Orthographic {
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    },
    Perspective {
        fovy_deg: f32,
        near: f32,
        far: f32,
    },
}

impl Projection {
    /// Orthographic volumes get stretched along the longer window axis,
    /// so a square stays square at any window size.
    pub fn matrix(&self, aspect: f32) -> Matrix4<f32> {
        let aspect = if aspect.is_finite() && aspect > 0.0 {
            aspect
        } else {
            1.0
        };

        match *self {
            Projection::Identity => Matrix4::identity(),
            Projection::Orthographic {
                left,
                right,
                bottom,
                top,
                near,
                far,
            } => {
                let (sx, sy) = if aspect >= 1.0 {
                    (aspect, 1.0)
                } else {
                    (1.0, 1.0 / aspect)
                };

                let cx = (left + right) / 2.0;
                let cy = (bottom + top) / 2.0;
                let hw = (right - left) / 2.0 * sx;
                let hh = (top - bottom) / 2.0 * sy;

                ortho(cx - hw, cx + hw, cy - hh, cy + hh, near, far)
            }
            Projection::Perspective {
                fovy_deg,
                near,
                far,
            } => perspective(Deg(fovy_deg), aspect, near, far),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum View {
    Identity,
    LookAt {
        eye: [f32; 3],
        target: [f32; 3],
        up: [f32; 3],
    },
}

impl View {
    pub fn look_at(eye: [f32; 3], target: [f32; 3]) -> Self {
        View::LookAt {
            eye,
            target,
            up: [0.0, 1.0, 0.0],
        }
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        match *self {
            View::Identity => Matrix4::identity(),
            View::LookAt { eye, target, up } => Matrix4::look_at_rh(
                Point3::from(eye),
                Point3::from(target),
                Vector3::from(up),
            ),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub view: View,
    pub projection: Projection,
}

impl Camera {
    pub fn identity() -> Self {
        Self {
            view: View::Identity,
            projection: Projection::Identity,
        }
    }
}

/// Rotation about `axis`. A zero axis means no rotation.
pub fn rotation(angle: Deg<f32>, axis: Vector3<f32>) -> Matrix4<f32> {
    if axis.magnitude2() == 0.0 {
        return Matrix4::identity();
    }

    Matrix4::from_axis_angle(axis.normalize(), angle)
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transforms {
    pub model: Matrix4<f32>,
    pub view: Matrix4<f32>,
    pub projection: Matrix4<f32>,
}

impl Transforms {
    pub fn mvp(&self) -> Matrix4<f32> {
        self.projection * self.view * self.model
    }

    /// Inverse transpose of the model's linear part; lighting is done in world space.
    pub fn normal_matrix(&self) -> Matrix3<f32> {
        let linear = Matrix3::from_cols(
            self.model.x.truncate(),
            self.model.y.truncate(),
            self.model.z.truncate(),
        );

        linear
            .invert()
            .map(|inv| inv.transpose())
            .unwrap_or_else(Matrix3::identity)
    }
}
