use thiserror::Error;

/// Errors returned by queries against a finished triangulation.
///
/// Construction itself never fails: degenerate input yields a defined
/// alternate output instead.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("point {id} is out of range for a set of {len} points")]
    PointOutOfRange { id: usize, len: usize },

    #[error("point {0} is not on the convex hull")]
    NotOnHull(usize),

    /// The point was skipped as a near-duplicate, or the input was collinear
    /// and produced no triangles at all.
    #[error("point {0} is not a vertex of any triangle")]
    NoIncidentHalfedge(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
