/// Dimension-checked vectors and row-major 4x4 matrices
use crate::error::MathError;

/// Magnitudes below this are treated as zero when normalizing.
pub const NORMALIZE_EPSILON: f32 = 1e-5;

/// An ordered, fixed-length sequence of `f32` components.
///
/// Binary operations require equal length on both operands and report
/// [`MathError::DimensionMismatch`] otherwise; components are never
/// silently padded or truncated.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    elements: Vec<f32>,
}

impl Vector {
    pub fn new(elements: Vec<f32>) -> Self {
        Self { elements }
    }

    /// The zero vector with the given number of components.
    pub fn zero(dimensions: usize) -> Self {
        Self {
            elements: vec![0.0; dimensions],
        }
    }

    pub fn dimensions(&self) -> usize {
        self.elements.len()
    }

    pub fn elements(&self) -> &[f32] {
        &self.elements
    }

    /// Component accessors; absent components read as 0.
    pub fn x(&self) -> f32 {
        self.component(0)
    }

    pub fn y(&self) -> f32 {
        self.component(1)
    }

    pub fn z(&self) -> f32 {
        self.component(2)
    }

    pub fn w(&self) -> f32 {
        self.component(3)
    }

    fn component(&self, index: usize) -> f32 {
        self.elements.get(index).copied().unwrap_or(0.0)
    }

    fn check_dimensions(&self, other: &Vector) -> Result<(), MathError> {
        if self.dimensions() != other.dimensions() {
            return Err(MathError::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        Ok(())
    }

    pub fn add(&self, other: &Vector) -> Result<Vector, MathError> {
        self.check_dimensions(other)?;
        Ok(Vector::new(
            self.elements
                .iter()
                .zip(&other.elements)
                .map(|(a, b)| a + b)
                .collect(),
        ))
    }

    pub fn subtract(&self, other: &Vector) -> Result<Vector, MathError> {
        self.check_dimensions(other)?;
        Ok(Vector::new(
            self.elements
                .iter()
                .zip(&other.elements)
                .map(|(a, b)| a - b)
                .collect(),
        ))
    }

    pub fn multiply(&self, scalar: f32) -> Vector {
        Vector::new(self.elements.iter().map(|e| e * scalar).collect())
    }

    pub fn divide(&self, scalar: f32) -> Vector {
        Vector::new(self.elements.iter().map(|e| e / scalar).collect())
    }

    pub fn dot(&self, other: &Vector) -> Result<f32, MathError> {
        self.check_dimensions(other)?;
        Ok(self
            .elements
            .iter()
            .zip(&other.elements)
            .map(|(a, b)| a * b)
            .sum())
    }

    /// Cross product, defined only for 3-component vectors.
    pub fn cross(&self, other: &Vector) -> Result<Vector, MathError> {
        if self.dimensions() != 3 {
            return Err(MathError::DimensionMismatch {
                expected: 3,
                actual: self.dimensions(),
            });
        }
        self.check_dimensions(other)?;
        Ok(Vector::new(vec![
            self.y() * other.z() - self.z() * other.y(),
            self.z() * other.x() - self.x() * other.z(),
            self.x() * other.y() - self.y() * other.x(),
        ]))
    }

    pub fn magnitude(&self) -> f32 {
        self.elements.iter().map(|e| e * e).sum::<f32>().sqrt()
    }

    /// The unit vector in this vector's direction.
    ///
    /// A magnitude below [`NORMALIZE_EPSILON`] yields the zero vector of
    /// the same dimension.
    pub fn unit(&self) -> Vector {
        let magnitude = self.magnitude();
        if magnitude > NORMALIZE_EPSILON {
            self.divide(magnitude)
        } else {
            Vector::zero(self.dimensions())
        }
    }

    /// The projection of `self` onto `onto`.
    pub fn projection(&self, onto: &Vector) -> Result<Vector, MathError> {
        self.check_dimensions(onto)?;
        let unit = onto.unit();
        Ok(unit.multiply(self.dot(&unit)?))
    }
}

impl<const N: usize> From<[f32; N]> for Vector {
    fn from(components: [f32; N]) -> Self {
        Vector::new(components.to_vec())
    }
}

// Fixed-dimension [f32; 3] helpers for the camera and normal code, where
// the dimension is known statically and a reportable error has no caller.

pub(crate) fn sub3(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub(crate) fn dot3(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub(crate) fn cross3(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Normalize a raw 3-component array; near-zero input yields zero.
pub(crate) fn normalize3(v: [f32; 3]) -> [f32; 3] {
    let length = dot3(v, v).sqrt();
    if length > NORMALIZE_EPSILON {
        [v[0] / length, v[1] / length, v[2] / length]
    } else {
        [0.0, 0.0, 0.0]
    }
}

/// A row-major 4x4 transform matrix, stored as a flat array of 16 floats
/// with the translation components at indices 12..15.
///
/// Multiplication is non-commutative; composition order is part of every
/// caller's contract.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    m: [f32; 16],
}

impl Mat4 {
    pub fn from_array(m: [f32; 16]) -> Self {
        Self { m }
    }

    pub fn as_array(&self) -> &[f32; 16] {
        &self.m
    }

    pub fn identity() -> Self {
        Self {
            m: [
                1.0, 0.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    pub fn translation(tx: f32, ty: f32, tz: f32) -> Self {
        Self {
            m: [
                1.0, 0.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0, //
                tx, ty, tz, 1.0,
            ],
        }
    }

    pub fn scaling(sx: f32, sy: f32, sz: f32) -> Self {
        Self {
            m: [
                sx, 0.0, 0.0, 0.0, //
                0.0, sy, 0.0, 0.0, //
                0.0, 0.0, sz, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Axis-angle rotation in Rodrigues form, after the glRotate reference.
    ///
    /// The axis is normalized internally; a zero-length axis is a caller
    /// error and produces a matrix of NaNs.
    pub fn rotation(angle_degrees: f32, x: f32, y: f32, z: f32) -> Self {
        let axis_length = (x * x + y * y + z * z).sqrt();
        let s = angle_degrees.to_radians().sin();
        let c = angle_degrees.to_radians().cos();
        let one_minus_c = 1.0 - c;
        let x = x / axis_length;
        let y = y / axis_length;
        let z = z / axis_length;

        let (x2, y2, z2) = (x * x, y * y, z * z);
        let (xy, yz, xz) = (x * y, y * z, x * z);
        let (xs, ys, zs) = (x * s, y * s, z * s);

        Self {
            m: [
                x2 * one_minus_c + c,
                xy * one_minus_c + zs,
                xz * one_minus_c - ys,
                0.0,
                xy * one_minus_c - zs,
                y2 * one_minus_c + c,
                yz * one_minus_c + xs,
                0.0,
                xz * one_minus_c + ys,
                yz * one_minus_c - xs,
                z2 * one_minus_c + c,
                0.0,
                0.0,
                0.0,
                0.0,
                1.0,
            ],
        }
    }

    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        Self {
            m: [
                2.0 / (right - left),
                0.0,
                0.0,
                0.0,
                0.0,
                2.0 / (top - bottom),
                0.0,
                0.0,
                0.0,
                0.0,
                -2.0 / (far - near),
                0.0,
                -(right + left) / (right - left),
                -(top + bottom) / (top - bottom),
                -(far + near) / (far - near),
                1.0,
            ],
        }
    }

    /// Perspective projection from a vertical field of view in degrees.
    pub fn perspective(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fov_degrees.to_radians() * 0.5).tan();
        let range_inv = 1.0 / (near - far);

        Self {
            m: [
                f / aspect,
                0.0,
                0.0,
                0.0,
                0.0,
                f,
                0.0,
                0.0,
                0.0,
                0.0,
                (near + far) * range_inv,
                -1.0,
                0.0,
                0.0,
                near * far * range_inv * 2.0,
                0.0,
            ],
        }
    }

    /// Standard row-by-column composition; the element-by-element formula
    /// downstream transform order depends on.
    pub fn multiply(&self, other: &Mat4) -> Mat4 {
        let mut result = [0.0f32; 16];
        for row in 0..4 {
            for col in 0..4 {
                let mut sum = 0.0;
                for i in 0..4 {
                    sum += self.m[row * 4 + i] * other.m[i * 4 + col];
                }
                result[row * 4 + col] = sum;
            }
        }
        Mat4 { m: result }
    }
}

impl std::ops::Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        self.multiply(&rhs)
    }
}

impl std::ops::Index<usize> for Mat4 {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        &self.m[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_near(a: &Vector, b: &Vector, tolerance: f32) {
        assert_eq!(a.dimensions(), b.dimensions());
        for (x, y) in a.elements().iter().zip(b.elements()) {
            assert!((x - y).abs() < tolerance, "{:?} != {:?}", a, b);
        }
    }

    fn assert_mat_near(a: &Mat4, b: &Mat4, tolerance: f32) {
        for i in 0..16 {
            assert!((a[i] - b[i]).abs() < tolerance, "{:?} != {:?}", a, b);
        }
    }

    #[test]
    fn test_add_subtract_round_trip() {
        let u = Vector::from([1.5, -2.0, 3.25]);
        let v = Vector::from([0.5, 4.0, -1.25]);
        let round_trip = u.add(&v).unwrap().subtract(&v).unwrap();
        assert_vec_near(&round_trip, &u, 1e-6);
    }

    #[test]
    fn test_dimension_mismatch_reported() {
        let u = Vector::from([1.0, 2.0]);
        let v = Vector::from([1.0, 2.0, 3.0]);
        assert_eq!(
            u.add(&v),
            Err(MathError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        );
        assert!(u.subtract(&v).is_err());
        assert!(u.dot(&v).is_err());
        assert!(u.projection(&v).is_err());
    }

    #[test]
    fn test_cross_is_orthogonal_and_antisymmetric() {
        let u = Vector::from([1.0, 2.0, 3.0]);
        let v = Vector::from([-4.0, 0.5, 2.0]);
        let uv = u.cross(&v).unwrap();
        assert!(uv.dot(&u).unwrap().abs() < 1e-5);
        assert!(uv.dot(&v).unwrap().abs() < 1e-5);

        let vu = v.cross(&u).unwrap();
        assert_vec_near(&uv, &vu.multiply(-1.0), 1e-6);
    }

    #[test]
    fn test_cross_requires_three_dimensions() {
        let u = Vector::from([1.0, 2.0]);
        let v = Vector::from([3.0, 4.0]);
        assert!(u.cross(&v).is_err());
    }

    #[test]
    fn test_unit_magnitude() {
        let v = Vector::from([3.0, 4.0, 12.0]);
        assert!((v.unit().magnitude() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_unit_of_zero_vector_is_zero() {
        let v = Vector::zero(3);
        assert_eq!(v.unit(), Vector::zero(3));

        let tiny = Vector::from([1e-7, 0.0, 0.0]);
        assert_eq!(tiny.unit(), Vector::zero(3));
    }

    #[test]
    fn test_projection() {
        // Projecting onto the x axis keeps only the x component.
        let u = Vector::from([3.0, 4.0, 5.0]);
        let x_axis = Vector::from([2.0, 0.0, 0.0]);
        let p = u.projection(&x_axis).unwrap();
        assert_vec_near(&p, &Vector::from([3.0, 0.0, 0.0]), 1e-6);
    }

    #[test]
    fn test_identity_is_multiplicative_identity() {
        let m = Mat4::rotation(30.0, 1.0, 2.0, 0.5);
        assert_mat_near(&Mat4::identity().multiply(&m), &m, 1e-6);
        assert_mat_near(&m.multiply(&Mat4::identity()), &m, 1e-6);
    }

    #[test]
    fn test_multiply_associative_not_commutative() {
        let a = Mat4::rotation(45.0, 0.0, 1.0, 0.0);
        let b = Mat4::translation(1.0, 2.0, 3.0);
        let c = Mat4::scaling(2.0, 0.5, 1.5);

        let left = a.multiply(&b).multiply(&c);
        let right = a.multiply(&b.multiply(&c));
        assert_mat_near(&left, &right, 1e-5);

        let ab = a.multiply(&b);
        let ba = b.multiply(&a);
        let mut differs = false;
        for i in 0..16 {
            if (ab[i] - ba[i]).abs() > 1e-4 {
                differs = true;
            }
        }
        assert!(differs, "rotation and translation should not commute");
    }

    #[test]
    fn test_rotation_quarter_turn() {
        // 90 degrees about Y carries +X onto -Z (row-vector convention).
        let r = Mat4::rotation(90.0, 0.0, 1.0, 0.0);
        let x = [r[0], r[1], r[2]];
        assert!((x[0] - 0.0).abs() < 1e-6);
        assert!((x[1] - 0.0).abs() < 1e-6);
        assert!((x[2] - -1.0).abs() < 1e-6);
    }

    #[test]
    fn test_orthographic_maps_bounds_to_clip_cube() {
        let o = Mat4::orthographic(-2.0, 2.0, -1.0, 1.0, 0.1, 10.0);
        // Row-vector transform of the right-top corner lands on (1, 1).
        let x = 2.0 * o[0] + o[12];
        let y = 1.0 * o[5] + o[13];
        assert!((x - 1.0).abs() < 1e-6);
        assert!((y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_perspective_elements() {
        let p = Mat4::perspective(90.0, 2.0, 0.1, 100.0);
        let f = 1.0 / (45.0f32.to_radians()).tan();
        let range_inv = 1.0 / (0.1 - 100.0);
        assert!((p[0] - f / 2.0).abs() < 1e-6);
        assert!((p[5] - f).abs() < 1e-6);
        assert!((p[10] - (0.1 + 100.0) * range_inv).abs() < 1e-6);
        assert!((p[11] - -1.0).abs() < 1e-6);
        assert!((p[14] - 0.1 * 100.0 * range_inv * 2.0).abs() < 1e-6);
    }
}
