// Copyright 2026 the Compose3d Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CSS transform text and the field-by-field matrix handle.
//!
//! The text format is the one a rendering layer reports for a node's
//! computed transform and accepts back:
//!
//! - `matrix3d(v0, v1, ..., v15)`: 16 comma-separated numbers in
//!   `m11..m44` order. Whitespace around each field is ignored.
//! - `matrix(a, b, c, d, e, f)`: the 2-D form, mapped onto `m11`, `m12`,
//!   `m21`, `m22`, `m41`, `m42`.
//! - `none`: the identity.
//!
//! Output is always `matrix3d(...)` with no spaces, each value printed with
//! the shortest decimal representation that parses back to the same `f64`.

use core::fmt;

use kurbo::Affine;

use crate::error::{Error, ParseFault};
use crate::matrix::Matrix;

/// A matrix addressed by named fields, laid out like the `CSSMatrix` objects
/// rendering runtimes hand out.
///
/// `mRC` is row `R`, column `C` of the row-major [`Matrix`] storage; `m41`,
/// `m42` and `m43` are the translation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[allow(missing_docs, reason = "fields are named after their matrix position")]
pub struct CssMatrix {
    pub m11: f64,
    pub m12: f64,
    pub m13: f64,
    pub m14: f64,
    pub m21: f64,
    pub m22: f64,
    pub m23: f64,
    pub m24: f64,
    pub m31: f64,
    pub m32: f64,
    pub m33: f64,
    pub m34: f64,
    pub m41: f64,
    pub m42: f64,
    pub m43: f64,
    pub m44: f64,
}

impl From<Matrix> for CssMatrix {
    fn from(matrix: Matrix) -> Self {
        let [
            m11, m12, m13, m14, //
            m21, m22, m23, m24, //
            m31, m32, m33, m34, //
            m41, m42, m43, m44,
        ] = matrix.values();
        Self {
            m11,
            m12,
            m13,
            m14,
            m21,
            m22,
            m23,
            m24,
            m31,
            m32,
            m33,
            m34,
            m41,
            m42,
            m43,
            m44,
        }
    }
}

impl From<CssMatrix> for Matrix {
    fn from(m: CssMatrix) -> Self {
        Self::from_values([
            m.m11, m.m12, m.m13, m.m14, //
            m.m21, m.m22, m.m23, m.m24, //
            m.m31, m.m32, m.m33, m.m34, //
            m.m41, m.m42, m.m43, m.m44,
        ])
    }
}

impl fmt::Display for CssMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_matrix3d(f, &Matrix::from(*self).values())
    }
}

/// Parses a transform string into a [`Matrix`].
pub(crate) fn parse(input: &str) -> Result<Matrix, Error> {
    let s = input.trim();
    if s.eq_ignore_ascii_case("none") {
        return Ok(Matrix::IDENTITY);
    }

    let (name, args) = split_function(s).ok_or(Error::ParseFailure(ParseFault::UnknownSyntax))?;
    if name.eq_ignore_ascii_case("matrix3d") {
        parse_fields::<16>(args).map(Matrix::from_values)
    } else if name.eq_ignore_ascii_case("matrix") {
        parse_fields::<6>(args).map(|coeffs| Matrix::from(Affine::new(coeffs)))
    } else {
        Err(Error::ParseFailure(ParseFault::UnknownSyntax))
    }
}

/// Writes `values` as `matrix3d(v0,...,v15)`.
pub(crate) fn write_matrix3d(f: &mut impl fmt::Write, values: &[f64; 16]) -> fmt::Result {
    f.write_str("matrix3d(")?;
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            f.write_char(',')?;
        }
        write!(f, "{v}")?;
    }
    f.write_char(')')
}

/// Splits `name(args)` into its name and argument text.
fn split_function(s: &str) -> Option<(&str, &str)> {
    let open = s.find('(')?;
    let inner = s[open + 1..].strip_suffix(')')?;
    if inner.contains(['(', ')']) {
        return None;
    }
    Some((s[..open].trim(), inner))
}

fn parse_fields<const N: usize>(args: &str) -> Result<[f64; N], Error> {
    let count = args.split(',').count();
    if count != N {
        return Err(Error::ParseFailure(ParseFault::FieldCount(count)));
    }

    let mut out = [0.0_f64; N];
    for (i, (slot, raw)) in out.iter_mut().zip(args.split(',')).enumerate() {
        let value: f64 = raw
            .trim()
            .parse()
            .map_err(|_| Error::ParseFailure(ParseFault::NotNumeric(i)))?;
        if !value.is_finite() {
            return Err(Error::ParseFailure(ParseFault::NotFinite(i)));
        }
        *slot = value;
    }
    Ok(out)
}
