#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

mod curve;
mod geom;
mod kernel;
mod num;
mod order;
mod status;
mod subcurve;

pub use geom::{Point, Segment};
pub use kernel::{CubicKernel, CurveKernel};
pub use order::StatusOrder;
pub use status::{StatusLine, StatusPos};
pub use subcurve::{Subcurve, SubcurveIdx, Subcurves};

/// Things that can go wrong while maintaining the status line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// A curve's two endpoints compared equal, so it has no usable sweep
    /// direction. Such curves are rejected before they reach the status line.
    DegenerateCurve,
    /// Two adjacent status-line entries were found out of order at the
    /// current sweep position.
    ///
    /// This means the comparator stopped being a strict weak order for the
    /// active set (a kernel numeric error, or a comparison at a position
    /// where it wasn't valid), and the ordered structure can no longer be
    /// trusted. The payload is the lower of the two offending positions.
    OrderViolation(StatusPos),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::DegenerateCurve => write!(f, "curve endpoints coincide"),
            Error::OrderViolation(pos) => {
                write!(f, "status line out of order at {pos:?}")
            }
        }
    }
}

impl std::error::Error for Error {}
