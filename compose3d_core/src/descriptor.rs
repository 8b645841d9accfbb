// Copyright 2026 the Compose3d Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transform descriptors.
//!
//! A [`Descriptor`] names one elementary transform: a translation, a scale,
//! or a rotation around an axis. The variants carry exactly the fields each
//! kind needs, so an angle can only be attached to a rotation.
//!
//! Descriptors that arrive as loosely typed data (script bindings, config
//! files) go through [`RawDescriptor`], which checks presence and kind before
//! producing a [`Descriptor`].

use core::fmt;
use core::str::FromStr;

use crate::error::{DescriptorFault, Error};
use crate::matrix::{Matrix, StackOrder};

/// A coordinate axis, used to report which component is missing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The x component.
    X,
    /// The y component.
    Y,
    /// The z component.
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        })
    }
}

/// The kind of an elementary transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DescriptorKind {
    /// Translation by `(x, y, z)`.
    Translate,
    /// Scale by `(x, y, z)`.
    Scale,
    /// Rotation around the axis `(x, y, z)`.
    Rotate,
}

impl DescriptorKind {
    /// Returns the lowercase name used in untyped descriptors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Translate => "translate",
            Self::Scale => "scale",
            Self::Rotate => "rotate",
        }
    }
}

impl FromStr for DescriptorKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "translate" => Ok(Self::Translate),
            "scale" => Ok(Self::Scale),
            "rotate" => Ok(Self::Rotate),
            _ => Err(Error::InvalidDescriptor(DescriptorFault::UnknownKind)),
        }
    }
}

/// One elementary transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Descriptor {
    /// Translation by `(x, y, z)`.
    Translate {
        /// Offset along x.
        x: f64,
        /// Offset along y.
        y: f64,
        /// Offset along z.
        z: f64,
    },
    /// Scale by `(x, y, z)`.
    Scale {
        /// Factor along x.
        x: f64,
        /// Factor along y.
        y: f64,
        /// Factor along z.
        z: f64,
    },
    /// Rotation of `angle_deg` degrees around the axis `(x, y, z)`.
    Rotate {
        /// Axis x component.
        x: f64,
        /// Axis y component.
        y: f64,
        /// Axis z component.
        z: f64,
        /// Rotation angle in degrees.
        angle_deg: f64,
    },
}

impl Descriptor {
    /// Shorthand for [`Descriptor::Translate`].
    #[must_use]
    pub const fn translate(x: f64, y: f64, z: f64) -> Self {
        Self::Translate { x, y, z }
    }

    /// Shorthand for [`Descriptor::Scale`].
    #[must_use]
    pub const fn scale(x: f64, y: f64, z: f64) -> Self {
        Self::Scale { x, y, z }
    }

    /// Shorthand for [`Descriptor::Rotate`].
    #[must_use]
    pub const fn rotate(x: f64, y: f64, z: f64, angle_deg: f64) -> Self {
        Self::Rotate { x, y, z, angle_deg }
    }

    /// Returns the kind of this descriptor.
    #[must_use]
    pub const fn kind(&self) -> DescriptorKind {
        match self {
            Self::Translate { .. } => DescriptorKind::Translate,
            Self::Scale { .. } => DescriptorKind::Scale,
            Self::Rotate { .. } => DescriptorKind::Rotate,
        }
    }

    /// Returns the `(x, y, z)` components.
    #[must_use]
    pub const fn components(&self) -> [f64; 3] {
        match *self {
            Self::Translate { x, y, z } | Self::Scale { x, y, z } | Self::Rotate { x, y, z, .. } => {
                [x, y, z]
            }
        }
    }

    /// Returns the rotation angle in degrees, for rotations.
    #[must_use]
    pub const fn angle_deg(&self) -> Option<f64> {
        match *self {
            Self::Rotate { angle_deg, .. } => Some(angle_deg),
            _ => None,
        }
    }

    /// Checks that every component (and the angle) is finite.
    pub fn validate(&self) -> Result<(), Error> {
        let finite = self.components().iter().all(|v| v.is_finite())
            && self.angle_deg().is_none_or(f64::is_finite);
        if finite {
            Ok(())
        } else {
            Err(Error::InvalidDescriptor(DescriptorFault::NotFinite))
        }
    }

    /// Returns the elementary matrix for this descriptor.
    #[must_use]
    pub fn to_matrix(&self) -> Matrix {
        let mut matrix = Matrix::identity();
        match *self {
            Self::Translate { x, y, z } => matrix.translate(x, y, z),
            Self::Scale { x, y, z } => matrix.scale(x, y, z),
            Self::Rotate { x, y, z, angle_deg } => matrix.rotate_axis_angle(x, y, z, angle_deg),
        }
        matrix
    }

    /// Multiplies this descriptor's matrix onto `reference` and returns the
    /// result.
    ///
    /// This is the one-shot form of a composed transform: pass the node's
    /// current matrix to build on it, or [`Matrix::IDENTITY`] to replace it.
    ///
    /// Returns [`Error::NonFiniteMatrix`] if `reference` or the product is not
    /// finite.
    pub fn apply_to(&self, reference: &Matrix, order: StackOrder) -> Result<Matrix, Error> {
        self.validate()?;
        let mut out = *reference;
        out.multiply(&self.to_matrix(), order);
        if !out.is_finite() {
            return Err(Error::NonFiniteMatrix);
        }
        Ok(out)
    }
}

/// A descriptor whose fields may be missing, as received from untyped data.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RawDescriptor<'a> {
    /// `"translate"`, `"scale"`, or `"rotate"`.
    pub kind: Option<&'a str>,
    /// The x component.
    pub x: Option<f64>,
    /// The y component.
    pub y: Option<f64>,
    /// The z component.
    pub z: Option<f64>,
    /// The rotation angle in degrees (rotations only).
    pub angle: Option<f64>,
}

impl RawDescriptor<'_> {
    /// Checks the descriptor without converting it.
    pub fn validate(&self) -> Result<(), Error> {
        Descriptor::try_from(*self).map(|_| ())
    }
}

impl TryFrom<RawDescriptor<'_>> for Descriptor {
    type Error = Error;

    fn try_from(raw: RawDescriptor<'_>) -> Result<Self, Error> {
        let fault = Error::InvalidDescriptor;

        let kind: DescriptorKind = raw.kind.ok_or(fault(DescriptorFault::MissingKind))?.parse()?;
        let x = raw.x.ok_or(fault(DescriptorFault::MissingComponent(Axis::X)))?;
        let y = raw.y.ok_or(fault(DescriptorFault::MissingComponent(Axis::Y)))?;
        let z = raw.z.ok_or(fault(DescriptorFault::MissingComponent(Axis::Z)))?;

        let descriptor = match (kind, raw.angle) {
            (DescriptorKind::Rotate, Some(angle_deg)) => Self::rotate(x, y, z, angle_deg),
            (DescriptorKind::Rotate, None) => return Err(fault(DescriptorFault::MissingAngle)),
            (_, Some(_)) => return Err(fault(DescriptorFault::UnexpectedAngle)),
            (DescriptorKind::Translate, None) => Self::translate(x, y, z),
            (DescriptorKind::Scale, None) => Self::scale(x, y, z),
        };
        descriptor.validate()?;
        Ok(descriptor)
    }
}
