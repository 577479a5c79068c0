//! Pruned depth-first enumeration of majority coalitions.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::CoalitionError;

/// How often (in visited subsets) the cancellation flag is polled.
const CANCEL_POLL_INTERVAL: u64 = 1024;

/// A seated party, as a row index into the analyzer's profiles.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Member {
    pub(crate) row: usize,
    pub(crate) seats: u32,
}

/// Bounds for one enumeration run.
pub(crate) struct Limits<'a> {
    pub(crate) max_size: usize,
    pub(crate) max_evaluated: u64,
    pub(crate) minimal_winning_only: bool,
    pub(crate) cancel: Option<&'a AtomicBool>,
}

/// Majority subsets found, as member rows, plus the work it took.
#[derive(Debug)]
pub(crate) struct Enumeration {
    pub(crate) coalitions: Vec<(Vec<usize>, u32)>,
    pub(crate) evaluated: u64,
}

/// Enumerate every subset of 2..=`max_size` members whose seats exceed half
/// of `total_seats`.
///
/// `members` must be sorted by seats, largest first. That ordering lets a
/// branch be cut as soon as even the largest remaining parties cannot lift
/// it over the majority line.
pub(crate) fn enumerate_majorities(
    members: &[Member],
    total_seats: u32,
    limits: &Limits<'_>,
) -> Result<Enumeration, CoalitionError> {
    let mut prefix = Vec::with_capacity(members.len() + 1);
    prefix.push(0u64);
    for member in members {
        let last = prefix.last().copied().unwrap_or(0);
        prefix.push(last + u64::from(member.seats));
    }

    let mut search = Search {
        members,
        prefix,
        total_seats: u64::from(total_seats),
        limits,
        stack: Vec::with_capacity(limits.max_size.min(members.len())),
        found: Vec::new(),
        evaluated: 0,
    };
    search.poll_cancel()?;
    search.visit(0, 0)?;

    Ok(Enumeration {
        coalitions: search.found,
        evaluated: search.evaluated,
    })
}

struct Search<'a> {
    members: &'a [Member],
    /// `prefix[i]` is the seat total of `members[..i]`.
    prefix: Vec<u64>,
    total_seats: u64,
    limits: &'a Limits<'a>,
    stack: Vec<usize>,
    found: Vec<(Vec<usize>, u32)>,
    evaluated: u64,
}

impl Search<'_> {
    fn is_majority(&self, seats: u64) -> bool {
        seats * 2 > self.total_seats
    }

    /// Most seats obtainable by adding at most `slots` members from `from` on.
    fn best_extension(&self, from: usize, slots: usize) -> u64 {
        let end = from.saturating_add(slots).min(self.members.len());
        self.prefix[end] - self.prefix[from]
    }

    fn poll_cancel(&self) -> Result<(), CoalitionError> {
        match self.limits.cancel {
            Some(flag) if flag.load(Ordering::Relaxed) => Err(CoalitionError::Cancelled {
                evaluated: self.evaluated,
            }),
            _ => Ok(()),
        }
    }

    fn count_visit(&mut self) -> Result<(), CoalitionError> {
        self.evaluated += 1;
        if self.evaluated > self.limits.max_evaluated {
            return Err(CoalitionError::ComputationLimitExceeded {
                evaluated: self.evaluated,
                limit: self.limits.max_evaluated,
            });
        }
        if self.evaluated % CANCEL_POLL_INTERVAL == 0 {
            self.poll_cancel()?;
        }
        Ok(())
    }

    fn visit(&mut self, start: usize, seats: u64) -> Result<(), CoalitionError> {
        let slots = self.limits.max_size.saturating_sub(self.stack.len());
        if slots == 0 {
            return Ok(());
        }

        for pos in start..self.members.len() {
            // Later positions hold no more seats than this one.
            if !self.is_majority(seats + self.best_extension(pos, slots)) {
                break;
            }
            self.count_visit()?;

            let member_seats = u64::from(self.members[pos].seats);
            let total = seats + member_seats;
            self.stack.push(pos);

            let majority = self.is_majority(total);
            if majority && self.stack.len() >= 2 {
                // The newest member is the smallest; if dropping it loses the
                // majority, dropping any member does.
                let minimal = !self.is_majority(total - member_seats);
                if minimal || !self.limits.minimal_winning_only {
                    let rows = self.stack.iter().map(|&p| self.members[p].row).collect();
                    let coalition_seats = u32::try_from(total).unwrap_or(u32::MAX);
                    self.found.push((rows, coalition_seats));
                }
            }
            if !(majority && self.limits.minimal_winning_only) {
                self.visit(pos + 1, total)?;
            }

            self.stack.pop();
        }
        Ok(())
    }
}
