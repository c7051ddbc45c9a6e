//! Math utilities and types
//!
//! Thin aliases over nalgebra plus the handful of matrix helpers the scene
//! graph needs: composing local transforms, moving points into world space
//! and pulling the scale vector back out of a composed matrix.

pub use nalgebra::{
    Vector3, Vector4,
    Matrix3, Matrix4,
    Quaternion,
    Unit,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type, used for RGBA colors
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Tolerance used when deciding whether a node's scale has changed
pub const SCALE_EPSILON: f32 = 1e-6;

/// Transform representing position, rotation, and scale
///
/// Convenience builder for the 4x4 matrices the scene graph stores. Nodes
/// keep the matrix, not this struct, so arbitrary affine edits stay possible.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder pattern: Set rotation from axis-angle
    pub fn with_rotation_axis_angle(mut self, axis: Vec3, angle: f32) -> Self {
        self.rotation = Quat::from_axis_angle(&Unit::new_normalize(axis), angle);
        self
    }

    /// Builder pattern: Set scale (uniform)
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::new(scale, scale, scale);
        self
    }

    /// Builder pattern: Set scale (non-uniform)
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Convert to a transformation matrix (TRS order)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Create a transform from a transformation matrix
    pub fn from_matrix(matrix: &Mat4) -> Self {
        let position = matrix.translation_vector();
        let scale = matrix.scale_vector();

        let rotation_matrix = Mat3::new(
            matrix.m11 / scale.x, matrix.m12 / scale.y, matrix.m13 / scale.z,
            matrix.m21 / scale.x, matrix.m22 / scale.y, matrix.m23 / scale.z,
            matrix.m31 / scale.x, matrix.m32 / scale.y, matrix.m33 / scale.z,
        );
        let rotation = Quat::from_matrix(&rotation_matrix);

        Self {
            position,
            rotation,
            scale,
        }
    }
}

/// Extension trait for Mat4 with the helpers the scene graph relies on
pub trait Mat4Ext {
    /// Create a translation matrix from components
    fn translation(x: f32, y: f32, z: f32) -> Mat4;

    /// Extract the translation column
    fn translation_vector(&self) -> Vec3;

    /// Extract the scale factors (column magnitudes of the upper 3x3)
    fn scale_vector(&self) -> Vec3;

    /// Translate this matrix in its own local space (post-multiply)
    fn translate_local(&mut self, offset: &Vec3);

    /// Move a local-space point into the space this matrix maps to
    fn apply_to_point(&self, point: &Point3) -> Point3;
}

impl Mat4Ext for Mat4 {
    fn translation(x: f32, y: f32, z: f32) -> Mat4 {
        Mat4::new_translation(&Vec3::new(x, y, z))
    }

    fn translation_vector(&self) -> Vec3 {
        Vec3::new(self.m14, self.m24, self.m34)
    }

    fn scale_vector(&self) -> Vec3 {
        Vec3::new(
            Vec3::new(self.m11, self.m21, self.m31).magnitude(),
            Vec3::new(self.m12, self.m22, self.m32).magnitude(),
            Vec3::new(self.m13, self.m23, self.m33).magnitude(),
        )
    }

    fn translate_local(&mut self, offset: &Vec3) {
        *self *= Mat4::new_translation(offset);
    }

    fn apply_to_point(&self, point: &Point3) -> Point3 {
        self.transform_point(point)
    }
}

/// Whether two scale vectors differ beyond [`SCALE_EPSILON`]
pub fn scale_differs(before: &Vec3, after: &Vec3) -> bool {
    !approx::relative_eq!(*before, *after, epsilon = SCALE_EPSILON)
}
