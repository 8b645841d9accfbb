// Copyright 2026 the Compose3d Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.
//!
//! Every fallible operation in this crate returns [`Error`] synchronously and
//! leaves the matrix or registry it was called on in its previous state.

use core::fmt;

use crate::descriptor::Axis;
use crate::registry::NodeId;

/// Why a transform string could not be parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParseFault {
    /// The input is not `none`, `matrix(...)`, or `matrix3d(...)`.
    UnknownSyntax,
    /// The function held this many comma-separated fields instead of the
    /// expected count.
    FieldCount(usize),
    /// The field at this position is not a number.
    NotNumeric(usize),
    /// The field at this position is infinite or NaN.
    NotFinite(usize),
}

/// Why a transform descriptor was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DescriptorFault {
    /// No transform type was given.
    MissingKind,
    /// The transform type is not `translate`, `scale`, or `rotate`.
    UnknownKind,
    /// A required component is absent.
    MissingComponent(Axis),
    /// A rotation has no angle.
    MissingAngle,
    /// A translation or scale carries an angle.
    UnexpectedAngle,
    /// A component or the angle is infinite or NaN.
    NotFinite,
}

/// Errors produced by matrix construction, parsing, and the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Error {
    /// A raw value list did not hold exactly 16 elements.
    InvalidArity(usize),
    /// A transform string was malformed.
    ParseFailure(ParseFault),
    /// A transform descriptor had wrong or missing fields.
    InvalidDescriptor(DescriptorFault),
    /// A slot index outside `1..=10` was given.
    InvalidIndex(usize),
    /// The node has no composed transform (never initialized, or removed).
    UnknownOwner(NodeId),
    /// A matrix (supplied, or the product of a stack) holds an infinite or
    /// NaN value.
    NonFiniteMatrix,
}

impl fmt::Display for ParseFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSyntax => f.write_str("expected `none`, `matrix(...)` or `matrix3d(...)`"),
            Self::FieldCount(n) => write!(f, "wrong number of fields ({n})"),
            Self::NotNumeric(i) => write!(f, "field {i} is not a number"),
            Self::NotFinite(i) => write!(f, "field {i} is not finite"),
        }
    }
}

impl fmt::Display for DescriptorFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingKind => f.write_str("missing transform type"),
            Self::UnknownKind => f.write_str("unknown transform type"),
            Self::MissingComponent(axis) => write!(f, "missing {axis} component"),
            Self::MissingAngle => f.write_str("rotation requires an angle"),
            Self::UnexpectedAngle => f.write_str("only rotations take an angle"),
            Self::NotFinite => f.write_str("components must be finite"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArity(n) => write!(f, "a matrix needs 16 values, got {n}"),
            Self::ParseFailure(fault) => write!(f, "invalid transform string: {fault}"),
            Self::InvalidDescriptor(fault) => write!(f, "invalid transform: {fault}"),
            Self::InvalidIndex(i) => {
                write!(f, "invalid slot index {i} (0 is reserved, 10 is the max)")
            }
            Self::UnknownOwner(node) => write!(f, "no composed transform for {node:?}"),
            Self::NonFiniteMatrix => f.write_str("matrix values must be finite"),
        }
    }
}

impl core::error::Error for Error {}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn display_mentions_the_offending_value() {
        assert_eq!(
            Error::InvalidArity(15).to_string(),
            "a matrix needs 16 values, got 15"
        );
        assert_eq!(
            Error::ParseFailure(ParseFault::NotNumeric(3)).to_string(),
            "invalid transform string: field 3 is not a number"
        );
        assert_eq!(
            Error::InvalidDescriptor(DescriptorFault::MissingComponent(Axis::Y)).to_string(),
            "invalid transform: missing y component"
        );
        assert_eq!(
            Error::UnknownOwner(NodeId(7)).to_string(),
            "no composed transform for NodeId(7)"
        );
    }
}
