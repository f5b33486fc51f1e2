//! Furthest-failure bookkeeping.
//!
//! Only failures at the deepest offset reached survive; everything recorded
//! at a shallower offset is discarded as soon as a deeper one appears.

use crate::error::Expectation;

pub(crate) struct FailureTracker {
    furthest: usize,
    expected: Vec<Expectation>,
    reporting: bool,
}

impl FailureTracker {
    pub(crate) fn new() -> Self {
        FailureTracker {
            furthest: 0,
            expected: Vec::new(),
            reporting: true,
        }
    }

    /// Record a failed match at `pos`. `make` runs only if the expectation
    /// is kept.
    pub(crate) fn record(&mut self, pos: usize, make: impl FnOnce() -> Expectation) {
        if self.reporting {
            self.force(pos, make());
        }
    }

    /// Record regardless of suppression.
    pub(crate) fn force(&mut self, pos: usize, expectation: Expectation) {
        if pos < self.furthest {
            return;
        }
        if pos > self.furthest {
            self.furthest = pos;
            self.expected.clear();
        }
        self.expected.push(expectation);
    }

    /// Disable reporting, returning the previous state for [`restore`].
    ///
    /// [`restore`]: FailureTracker::restore
    pub(crate) fn suppress(&mut self) -> bool {
        std::mem::replace(&mut self.reporting, false)
    }

    pub(crate) fn restore(&mut self, previous: bool) {
        self.reporting = previous;
    }

    pub(crate) fn furthest(&self) -> usize {
        self.furthest
    }

    pub(crate) fn into_expected(self) -> Vec<Expectation> {
        self.expected
    }
}
