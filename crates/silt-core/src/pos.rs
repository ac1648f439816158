//! Position conventions and the [`PosVec`] type alias.
//!
//! Silt addresses nodes by dense **1-based** positions: a class with `n`
//! nodes occupies positions `1..=n`. Position `0` is never valid. The
//! 1-based convention is part of the external contract (restrictions
//! translate between parent and local position spaces using it), so it is
//! preserved all the way down to the view facades, which subtract one at
//! the single point where a vector is actually indexed.

use smallvec::SmallVec;

/// A list of parent-space positions held by a sparse restriction.
///
/// Uses `SmallVec<[usize; 8]>` so small subclasses (the common case when
/// carving a handful of nodes out of a larger population) stay inline;
/// larger lists spill to the heap transparently.
pub type PosVec = SmallVec<[usize; 8]>;
