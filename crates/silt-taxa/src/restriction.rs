//! Parent-to-subclass position membership and translation.

use std::ops::Range;

use silt_core::{ConsistencyError, ModelError, PosVec, RangeError};

/// Which positions of a parent class belong to a subclass, and how local
/// positions map back to parent positions.
///
/// All positions are 1-based. The three shapes share one contract:
/// membership ([`contains`](Restriction::contains)), size, translation in
/// both directions, and ascending iteration over the included parent
/// positions. Empty restrictions (size 0) are valid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Restriction {
    /// All parent positions `1..=n`; local and parent positions coincide.
    Full(usize),
    /// The contiguous interval `lo..=hi`; local `k` maps to parent
    /// `lo + k - 1`.
    Range {
        /// First included parent position.
        lo: usize,
        /// Last included parent position.
        hi: usize,
    },
    /// An explicit strictly ascending list of parent positions; local `k`
    /// maps to the `k`-th listed position.
    Sparse(PosVec),
}

impl Restriction {
    /// All positions `1..=n` of the parent.
    pub fn full(n: usize) -> Self {
        Self::Full(n)
    }

    /// The contiguous interval `lo..=hi`.
    ///
    /// Rejects `lo == 0` and `hi < lo` with
    /// `ConsistencyError::MalformedRestriction`.
    pub fn range(lo: usize, hi: usize) -> Result<Self, ModelError> {
        if lo == 0 {
            return Err(ConsistencyError::MalformedRestriction {
                reason: "range lower bound must be at least 1".into(),
            }
            .into());
        }
        if hi < lo {
            return Err(ConsistencyError::MalformedRestriction {
                reason: format!("range upper bound {hi} below lower bound {lo}"),
            }
            .into());
        }
        Ok(Self::Range { lo, hi })
    }

    /// An explicit list of parent positions.
    ///
    /// The list must be strictly ascending (which also rules out
    /// duplicates) and must not contain position 0. An empty list is a
    /// valid empty restriction.
    pub fn sparse(positions: impl Into<PosVec>) -> Result<Self, ModelError> {
        let positions = positions.into();
        if positions.first() == Some(&0) {
            return Err(ConsistencyError::MalformedRestriction {
                reason: "sparse positions must be at least 1".into(),
            }
            .into());
        }
        if let Some(w) = positions.windows(2).find(|w| w[0] >= w[1]) {
            return Err(ConsistencyError::MalformedRestriction {
                reason: format!(
                    "sparse positions must be strictly ascending, found {} then {}",
                    w[0], w[1]
                ),
            }
            .into());
        }
        Ok(Self::Sparse(positions))
    }

    /// Build a restriction from a boolean membership mask over parent
    /// positions `1..=mask.len()`.
    ///
    /// Always produces `Sparse`, even for an all-true mask; callers that
    /// mean "every position" construct [`Restriction::full`] explicitly.
    pub fn from_mask(mask: &[bool]) -> Self {
        let positions: PosVec = mask
            .iter()
            .enumerate()
            .filter_map(|(i, &member)| member.then_some(i + 1))
            .collect();
        Self::Sparse(positions)
    }

    /// Number of parent positions included.
    pub fn size(&self) -> usize {
        match self {
            Self::Full(n) => *n,
            Self::Range { lo, hi } => hi - lo + 1,
            Self::Sparse(positions) => positions.len(),
        }
    }

    /// Whether no positions are included.
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Whether `parent` is a member of the subclass.
    pub fn contains(&self, parent: usize) -> bool {
        match self {
            Self::Full(n) => parent >= 1 && parent <= *n,
            Self::Range { lo, hi } => parent >= *lo && parent <= *hi,
            Self::Sparse(positions) => positions.binary_search(&parent).is_ok(),
        }
    }

    /// Translate a parent position into the subclass's local position.
    ///
    /// Returns `None` if the parent position is not a member.
    pub fn to_local(&self, parent: usize) -> Option<usize> {
        match self {
            Self::Full(n) => (parent >= 1 && parent <= *n).then_some(parent),
            Self::Range { lo, hi } => {
                (parent >= *lo && parent <= *hi).then(|| parent - lo + 1)
            }
            Self::Sparse(positions) => {
                positions.binary_search(&parent).ok().map(|i| i + 1)
            }
        }
    }

    /// Translate a local position into the parent's position space.
    ///
    /// Returns `None` if `local` falls outside `1..=size()`.
    pub fn to_parent(&self, local: usize) -> Option<usize> {
        if local == 0 || local > self.size() {
            return None;
        }
        match self {
            Self::Full(_) => Some(local),
            Self::Range { lo, .. } => Some(lo + local - 1),
            Self::Sparse(positions) => Some(positions[local - 1]),
        }
    }

    /// Iterate over the included parent positions in ascending order.
    ///
    /// The iterator is finite and restartable: each call starts a fresh
    /// pass over the same positions.
    pub fn parent_positions(&self) -> ParentPositions<'_> {
        let inner = match self {
            Self::Full(n) => PositionsInner::Contiguous(1..n + 1),
            Self::Range { lo, hi } => PositionsInner::Contiguous(*lo..hi + 1),
            Self::Sparse(positions) => PositionsInner::Listed(positions.iter()),
        };
        ParentPositions { inner }
    }

    /// Check that every referenced parent position lies within
    /// `1..=parent_size`.
    ///
    /// Returns `RangeError::OutOfRange` naming the first offending
    /// position. Constructors already reject position 0, so only the
    /// upper bound is checked here.
    pub fn check_within(&self, parent_size: usize) -> Result<(), ModelError> {
        let max = match self {
            Self::Full(n) => *n,
            Self::Range { hi, .. } => *hi,
            Self::Sparse(positions) => positions.last().copied().unwrap_or(0),
        };
        if max > parent_size {
            return Err(RangeError::OutOfRange {
                position: max,
                size: parent_size,
            }
            .into());
        }
        Ok(())
    }

    /// Compose this restriction with one defined over its local space.
    ///
    /// `self` maps space B into space A, `inner` maps space C into space
    /// B; the result maps C directly into A. Single-variant shortcuts keep
    /// the result exact: a `Full` on either side passes the other through,
    /// and two `Range`s compose to a `Range`; everything else collapses to
    /// `Sparse`. Fails with `RangeError::OutOfRange` if `inner` references
    /// a local position `self` does not have.
    pub fn compose(&self, inner: &Restriction) -> Result<Restriction, ModelError> {
        inner.check_within(self.size())?;
        Ok(match (self, inner) {
            (Self::Full(_), _) => inner.clone(),
            (_, Self::Full(m)) if *m == self.size() => self.clone(),
            (Self::Range { lo, .. }, Self::Range { lo: lo2, hi: hi2 }) => Self::Range {
                lo: lo + lo2 - 1,
                hi: lo + hi2 - 1,
            },
            _ => Self::Sparse(
                inner
                    .parent_positions()
                    .map(|p| {
                        self.to_parent(p)
                            .expect("inner positions bounded by self.size()")
                    })
                    .collect(),
            ),
        })
    }
}

/// Ascending iterator over the parent positions of a [`Restriction`].
pub struct ParentPositions<'a> {
    inner: PositionsInner<'a>,
}

enum PositionsInner<'a> {
    Contiguous(Range<usize>),
    Listed(std::slice::Iter<'a, usize>),
}

impl Iterator for ParentPositions<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        match &mut self.inner {
            PositionsInner::Contiguous(range) => range.next(),
            PositionsInner::Listed(iter) => iter.next().copied(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            PositionsInner::Contiguous(range) => range.size_hint(),
            PositionsInner::Listed(iter) => iter.size_hint(),
        }
    }
}

impl ExactSizeIterator for ParentPositions<'_> {}
