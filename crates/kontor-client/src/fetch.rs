// SPDX-FileCopyrightText: 2026 Kontor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stale-response guard for overlapping list fetches.
//!
//! A caller that refreshes a list while an earlier fetch is still in flight
//! must not let the earlier response overwrite the newer one. Each fetch
//! takes a ticket; only the most recently issued ticket is allowed to apply
//! its result.

use std::sync::atomic::{AtomicU64, Ordering};

/// Issues monotonically increasing fetch tickets for one logical list.
///
/// Keep one sequence per independently refreshable view. Cheap enough to
/// embed wherever list state lives. The bundled CLI runs one fetch per
/// command and never overlaps them, so it does not carry a sequence; this
/// exists for long-lived embedders whose views refresh while an earlier
/// fetch is still in flight.
#[derive(Debug, Default)]
pub struct FetchSequence {
    latest: AtomicU64,
}

/// A ticket for a single in-flight fetch.
#[derive(Debug, Clone, Copy)]
pub struct FetchTicket<'a> {
    seq: u64,
    owner: &'a FetchSequence,
}

impl FetchSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fetch, invalidating every ticket issued before it.
    pub fn begin(&self) -> FetchTicket<'_> {
        let seq = self.latest.fetch_add(1, Ordering::AcqRel) + 1;
        FetchTicket { seq, owner: self }
    }
}

impl FetchTicket<'_> {
    /// Whether this ticket's fetch is still the newest one.
    ///
    /// A response arriving on a stale ticket must be dropped, not applied.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.owner.latest.load(Ordering::Acquire) == self.seq
    }
}
