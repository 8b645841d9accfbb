// Copyright 2026 the Compose3d Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row-major 4×4 transform matrix.
//!
//! Values are kept in the `m11..m44` order used by CSS matrix objects: position
//! `4 * row + col` holds `m{row+1}{col+1}`, and the translation lives at
//! positions 12, 13 and 14. Points are row vectors, so the plain product
//! `a * b` maps a point through `a` first and then through `b`.
//!
//! In CSS terms (column vectors, `transform: A B` meaning `A × B`), the
//! mutators here right-multiply: `m.translate(..)` turns `M` into
//! `M × translate(..)`, which is `translate * m` in this storage order.

use alloc::string::{String, ToString};
use core::fmt;
use core::ops::Mul;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Affine;

use crate::css;
use crate::error::Error;

/// Operand order used by [`Matrix::multiply`].
///
/// Some runtimes compose CSS matrix stacks in the reverse order from the one
/// CSS Transforms defines. The correct value comes from feature
/// detection outside this crate and is supplied explicitly wherever matrices
/// are multiplied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StackOrder {
    /// `a.multiply(b)` maps points through `a`, then through `b`.
    #[default]
    Standard,
    /// `a.multiply(b)` maps points through `b`, then through `a`.
    Inverted,
}

impl StackOrder {
    /// Maps a detected "matrix stack is inverted" flag to a [`StackOrder`].
    #[inline]
    #[must_use]
    pub const fn from_inverted(inverted: bool) -> Self {
        if inverted {
            Self::Inverted
        } else {
            Self::Standard
        }
    }

    /// Returns `true` for [`StackOrder::Inverted`].
    #[inline]
    #[must_use]
    pub const fn is_inverted(self) -> bool {
        matches!(self, Self::Inverted)
    }
}

/// A 4×4 transform stored as 16 row-major values.
///
/// `Matrix` is `Copy`; every copy owns its values outright, so there is no
/// sharing between clones.
///
/// The raw constructors and products do not check for overflow. Use
/// [`is_finite`](Self::is_finite) before serializing a matrix from an
/// untrusted source; the registry rejects any stack whose product is not
/// finite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix {
    values: [f64; 16],
}

impl Matrix {
    /// The 4×4 identity matrix.
    pub const IDENTITY: Self = Self {
        values: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Returns the identity matrix.
    #[inline]
    #[must_use]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Creates a matrix from 16 row-major values (`m11, m12, ..., m44`).
    #[inline]
    #[must_use]
    pub const fn from_values(values: [f64; 16]) -> Self {
        Self { values }
    }

    /// Creates a matrix from a slice that must hold exactly 16 values.
    ///
    /// Returns [`Error::InvalidArity`] with the slice length otherwise.
    pub fn try_from_slice(values: &[f64]) -> Result<Self, Error> {
        let values: [f64; 16] = values
            .try_into()
            .map_err(|_| Error::InvalidArity(values.len()))?;
        Ok(Self { values })
    }

    /// Parses a transform string such as `matrix3d(1,0,0,0, ...)`.
    ///
    /// See [`css`] for the accepted forms.
    pub fn from_transform_string(s: &str) -> Result<Self, Error> {
        css::parse(s)
    }

    /// Creates a pure translation matrix.
    #[inline]
    #[must_use]
    pub const fn from_translation(x: f64, y: f64, z: f64) -> Self {
        Self {
            values: [
                1.0, 0.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0, //
                x, y, z, 1.0,
            ],
        }
    }

    /// Creates a non-uniform scale matrix.
    #[inline]
    #[must_use]
    pub const fn from_scale(x: f64, y: f64, z: f64) -> Self {
        Self {
            values: [
                x, 0.0, 0.0, 0.0, //
                0.0, y, 0.0, 0.0, //
                0.0, 0.0, z, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Creates a rotation of `angle_deg` degrees around the axis `(x, y, z)`.
    ///
    /// The axis does not need to be unit length. A zero-length axis yields the
    /// identity.
    #[must_use]
    pub fn from_axis_angle(x: f64, y: f64, z: f64, angle_deg: f64) -> Self {
        // Pre-scale by the largest component so squaring cannot overflow or
        // underflow for finite axes.
        let largest = x.abs().max(y.abs()).max(z.abs());
        if largest == 0.0 || !largest.is_finite() {
            return Self::IDENTITY;
        }
        let (x, y, z) = (x / largest, y / largest, z / largest);
        let len = (x * x + y * y + z * z).sqrt();
        let (x, y, z) = (x / len, y / len, z / len);

        let radians = angle_deg.to_radians();
        #[cfg(feature = "std")]
        let (s, c) = radians.sin_cos();
        #[cfg(not(feature = "std"))]
        let (s, c) = (radians.sin(), radians.cos());
        let t = 1.0 - c;

        Self {
            values: [
                t * x * x + c,
                t * x * y + s * z,
                t * x * z - s * y,
                0.0,
                t * x * y - s * z,
                t * y * y + c,
                t * y * z + s * x,
                0.0,
                t * x * z + s * y,
                t * y * z - s * x,
                t * z * z + c,
                0.0,
                0.0,
                0.0,
                0.0,
                1.0,
            ],
        }
    }

    /// Applies a scale on top of this transform.
    pub fn scale(&mut self, x: f64, y: f64, z: f64) {
        *self = Self::from_scale(x, y, z) * *self;
    }

    /// Applies a translation on top of this transform.
    pub fn translate(&mut self, x: f64, y: f64, z: f64) {
        *self = Self::from_translation(x, y, z) * *self;
    }

    /// Applies a rotation of `angle_deg` degrees around `(x, y, z)` on top of
    /// this transform.
    ///
    /// A zero-length axis leaves the matrix unchanged.
    pub fn rotate_axis_angle(&mut self, x: f64, y: f64, z: f64, angle_deg: f64) {
        *self = Self::from_axis_angle(x, y, z, angle_deg) * *self;
    }

    /// Combines `other` into this matrix.
    ///
    /// With [`StackOrder::Standard`] the result maps points through `self`
    /// first and `other` second (`self * other`); with
    /// [`StackOrder::Inverted`] the operands are swapped (`other * self`).
    pub fn multiply(&mut self, other: &Self, order: StackOrder) {
        *self = match order {
            StackOrder::Standard => *self * *other,
            StackOrder::Inverted => *other * *self,
        };
    }

    /// Returns the 16 row-major values.
    #[inline]
    #[must_use]
    pub const fn values(&self) -> [f64; 16] {
        self.values
    }

    /// Returns the value at `row`, `col` (both 0-based).
    ///
    /// # Panics
    ///
    /// Panics if `row >= 4` or `col >= 4`.
    #[inline]
    #[must_use]
    pub const fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < 4 && col < 4, "matrix index out of range");
        self.values[row * 4 + col]
    }

    /// Returns the translation part (`m41`, `m42`, `m43`).
    #[inline]
    #[must_use]
    pub const fn translation(&self) -> [f64; 3] {
        [self.values[12], self.values[13], self.values[14]]
    }

    /// Serializes the matrix as `matrix3d(v0,v1,...,v15)`.
    ///
    /// Each value uses the shortest decimal form that parses back to the same
    /// `f64`, so [`from_transform_string`](Self::from_transform_string)
    /// reproduces the values exactly.
    #[must_use]
    pub fn to_transform_string(&self) -> String {
        self.to_string()
    }

    /// Is every value [finite]?
    ///
    /// [finite]: f64::is_finite
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }

    /// Returns `true` if the matrix only acts in the XY plane.
    #[must_use]
    pub fn is_2d(&self) -> bool {
        let v = &self.values;
        v[2] == 0.0
            && v[3] == 0.0
            && v[6] == 0.0
            && v[7] == 0.0
            && v[8] == 0.0
            && v[9] == 0.0
            && v[10] == 1.0
            && v[11] == 0.0
            && v[14] == 0.0
            && v[15] == 1.0
    }

    /// Returns the equivalent 2-D affine transform, if [`is_2d`](Self::is_2d).
    #[must_use]
    pub fn to_affine(&self) -> Option<Affine> {
        if !self.is_2d() {
            return None;
        }
        let v = &self.values;
        Some(Affine::new([v[0], v[1], v[4], v[5], v[12], v[13]]))
    }
}

impl Default for Matrix {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Matrix {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let a = &self.values;
        let b = &rhs.values;
        let mut out = [0.0_f64; 16];
        for row in 0..4 {
            for col in 0..4 {
                out[row * 4 + col] = a[row * 4] * b[col]
                    + a[row * 4 + 1] * b[4 + col]
                    + a[row * 4 + 2] * b[8 + col]
                    + a[row * 4 + 3] * b[12 + col];
            }
        }
        Self { values: out }
    }
}

impl From<Affine> for Matrix {
    fn from(affine: Affine) -> Self {
        let [a, b, c, d, e, f] = affine.as_coeffs();
        Self {
            values: [
                a, b, 0.0, 0.0, //
                c, d, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0, //
                e, f, 0.0, 1.0,
            ],
        }
    }
}

impl TryFrom<&[f64]> for Matrix {
    type Error = Error;

    fn try_from(values: &[f64]) -> Result<Self, Error> {
        Self::try_from_slice(values)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        css::write_matrix3d(f, &self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_close(a: &Matrix, b: &Matrix) {
        for (i, (x, y)) in a.values().iter().zip(b.values().iter()).enumerate() {
            assert!((x - y).abs() < EPS, "component {i}: {x} != {y}");
        }
    }

    #[test]
    fn default_is_identity() {
        assert_eq!(Matrix::default(), Matrix::IDENTITY);
        assert_eq!(Matrix::identity().values()[15], 1.0);
    }

    #[test]
    fn identity_laws_hold_in_both_orders() {
        let mut m = Matrix::IDENTITY;
        m.scale(2.0, 3.0, 1.0);
        m.rotate_axis_angle(1.0, 1.0, 0.0, 30.0);
        m.translate(5.0, -4.0, 2.0);

        for order in [StackOrder::Standard, StackOrder::Inverted] {
            let mut left = Matrix::IDENTITY;
            left.multiply(&m, order);
            assert_eq!(left, m);

            let mut right = m;
            right.multiply(&Matrix::IDENTITY, order);
            assert_eq!(right, m);
        }
    }

    #[test]
    fn translate_from_identity() {
        let mut m = Matrix::identity();
        m.translate(1.0, 2.0, 3.0);
        assert_eq!(m.translation(), [1.0, 2.0, 3.0]);
        assert_eq!(m, Matrix::from_translation(1.0, 2.0, 3.0));
    }

    #[test]
    fn translation_composition() {
        let a = Matrix::from_translation(1.0, 0.0, 0.0);
        let b = Matrix::from_translation(0.0, 2.0, 0.0);
        assert_eq!((a * b).translation(), [1.0, 2.0, 0.0]);
    }

    #[test]
    fn scale_then_translate_scales_the_offset() {
        // CSS `scale(2, 2, 1) translate(10px, 0, 0)`.
        let mut m = Matrix::identity();
        m.scale(2.0, 2.0, 1.0);
        m.translate(10.0, 0.0, 0.0);
        assert_eq!(m.get(0, 0), 2.0);
        assert_eq!(m.get(1, 1), 2.0);
        assert_eq!(m.translation(), [20.0, 0.0, 0.0]);
    }

    #[test]
    fn translate_then_rotate_differs_from_rotate_then_translate() {
        let mut translate_first = Matrix::identity();
        translate_first.translate(10.0, 0.0, 0.0);
        translate_first.rotate_axis_angle(0.0, 0.0, 1.0, 90.0);

        let mut rotate_first = Matrix::identity();
        rotate_first.rotate_axis_angle(0.0, 0.0, 1.0, 90.0);
        rotate_first.translate(10.0, 0.0, 0.0);

        // The offset is applied after the rotation, so it stays on the x axis.
        assert_eq!(translate_first.get(3, 0), 10.0);
        assert_eq!(translate_first.get(3, 1), 0.0);
        // The offset is rotated onto the y axis.
        assert!(rotate_first.get(3, 0).abs() < EPS);
        assert!((rotate_first.get(3, 1) - 10.0).abs() < EPS);
    }

    #[test]
    fn rotation_z_ninety_degrees() {
        let r = Matrix::from_axis_angle(0.0, 0.0, 1.0, 90.0);
        assert!(r.get(0, 0).abs() < EPS);
        assert!((r.get(0, 1) - 1.0).abs() < EPS);
        assert!((r.get(1, 0) + 1.0).abs() < EPS);
        assert!(r.get(1, 1).abs() < EPS);
        assert!((r.get(2, 2) - 1.0).abs() < EPS);
    }

    #[test]
    fn rotation_axis_is_normalized() {
        let unit = Matrix::from_axis_angle(0.0, 1.0, 0.0, 45.0);
        let long = Matrix::from_axis_angle(0.0, 7.5, 0.0, 45.0);
        assert_close(&unit, &long);
    }

    #[test]
    fn extreme_axis_lengths_still_rotate() {
        let unit = Matrix::from_axis_angle(1.0, 0.0, 0.0, 90.0);
        assert_ne!(unit, Matrix::IDENTITY);
        assert_close(&Matrix::from_axis_angle(1e200, 0.0, 0.0, 90.0), &unit);
        assert_close(&Matrix::from_axis_angle(1e-200, 0.0, 0.0, 90.0), &unit);
        assert_close(
            &Matrix::from_axis_angle(1e300, 1e300, 0.0, 30.0),
            &Matrix::from_axis_angle(1.0, 1.0, 0.0, 30.0),
        );
    }

    #[test]
    fn zero_axis_rotation_is_a_no_op() {
        let mut m = Matrix::from_translation(3.0, 4.0, 5.0);
        m.rotate_axis_angle(0.0, 0.0, 0.0, 45.0);
        assert_eq!(m, Matrix::from_translation(3.0, 4.0, 5.0));
        assert_eq!(Matrix::from_axis_angle(0.0, 0.0, 0.0, 90.0), Matrix::IDENTITY);
    }

    #[test]
    fn multiply_order_follows_stack_order() {
        let offset = Matrix::from_translation(10.0, 0.0, 0.0);
        let zoom = Matrix::from_scale(2.0, 2.0, 1.0);

        // Offset first, then zoom: the offset gets scaled.
        let mut standard = offset;
        standard.multiply(&zoom, StackOrder::Standard);
        assert_eq!(standard.translation(), [20.0, 0.0, 0.0]);

        // Zoom first, then offset: the offset is untouched.
        let mut inverted = offset;
        inverted.multiply(&zoom, StackOrder::Inverted);
        assert_eq!(inverted.translation(), [10.0, 0.0, 0.0]);
    }

    #[test]
    fn stack_order_from_flag() {
        assert_eq!(StackOrder::from_inverted(false), StackOrder::Standard);
        assert_eq!(StackOrder::from_inverted(true), StackOrder::Inverted);
        assert!(StackOrder::Inverted.is_inverted());
        assert!(!StackOrder::default().is_inverted());
    }

    #[test]
    fn try_from_slice_checks_arity() {
        let short = [0.0; 15];
        assert_eq!(
            Matrix::try_from_slice(&short),
            Err(Error::InvalidArity(15))
        );
        let long = [0.0; 17];
        assert_eq!(Matrix::try_from(&long[..]), Err(Error::InvalidArity(17)));

        let exact = Matrix::IDENTITY.values();
        assert_eq!(Matrix::try_from_slice(&exact), Ok(Matrix::IDENTITY));
    }

    #[test]
    fn affine_round_trip() {
        let affine = Affine::new([2.0, 0.5, -0.5, 2.0, 30.0, 40.0]);
        let m = Matrix::from(affine);
        assert!(m.is_2d());
        assert_eq!(m.translation(), [30.0, 40.0, 0.0]);
        assert_eq!(m.to_affine(), Some(affine));

        let mut lifted = m;
        lifted.translate(0.0, 0.0, 1.0);
        assert!(!lifted.is_2d());
        assert_eq!(lifted.to_affine(), None);
    }

    #[test]
    fn nan_detected() {
        let mut values = Matrix::IDENTITY.values();
        values[9] = f64::NAN;
        assert!(!Matrix::from_values(values).is_finite());
        assert!(Matrix::IDENTITY.is_finite());
    }
}
