/*!
 * Seed Space Partitioning
 *
 * Both policies cover `[1, n]` exactly once, in ascending order, with no
 * gaps or overlaps. `n` must be below `u64::MAX`; configuration validation
 * caps it at `MAX_NUMBER_TO_TEST`.
 *
 * Blocks are computed up front (there are at most `MAX_WORKERS` of them).
 * Chunks are handed out lazily from an atomic cursor, so dynamic scheduling
 * costs the same memory for ten units as for a hundred million.
 */

use super::types::{SchedulePolicy, SeedRange};
use crate::core::types::Seed;
use std::sync::atomic::{AtomicU64, Ordering};

/// Split `[1, n]` into at most `blocks` contiguous blocks
///
/// Uses `min(blocks, n)` blocks of `n / blocks` seeds; the last block also
/// takes the remainder.
pub fn partition_blocks(n: u64, blocks: usize) -> Vec<SeedRange> {
    if n == 0 || blocks == 0 {
        return Vec::new();
    }

    let count = (blocks as u64).min(n);
    let size = n / count;
    let end = n + 1;

    (0..count)
        .map(|b| {
            let start = 1 + b * size;
            let stop = if b + 1 == count { end } else { start + size };
            SeedRange::new(start, stop)
        })
        .collect()
}

/// Consecutive chunks of `chunk` seeds over `[1, n]` (the last may be
/// shorter), produced on demand
pub fn partition_chunks(n: u64, chunk: u64) -> ChunkCursor {
    ChunkCursor::new(n, chunk)
}

/// Shared cursor over `[1, n]` that any number of workers pull chunks from
///
/// Each seed is handed out exactly once; concurrent callers never receive
/// overlapping chunks.
#[derive(Debug)]
pub struct ChunkCursor {
    next: AtomicU64,
    end: Seed,
    chunk: u64,
}

impl ChunkCursor {
    pub fn new(n: u64, chunk: u64) -> Self {
        let end = n.saturating_add(1);
        // Empty inputs start exhausted
        let start = if n == 0 || chunk == 0 { end } else { 1 };
        Self {
            next: AtomicU64::new(start),
            end,
            chunk,
        }
    }

    /// Claim the next chunk, or `None` once the range is exhausted
    #[inline]
    pub fn next_chunk(&self) -> Option<SeedRange> {
        let end = self.end;
        let chunk = self.chunk;
        self.next
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |start| {
                (start < end).then(|| start.saturating_add(chunk).min(end))
            })
            .ok()
            .map(|start| SeedRange::new(start, start.saturating_add(chunk).min(end)))
    }

    /// Number of chunks not yet handed out
    pub fn remaining(&self) -> u64 {
        let seeds = self.end.saturating_sub(self.next.load(Ordering::Relaxed));
        if seeds == 0 {
            0
        } else {
            seeds.div_ceil(self.chunk)
        }
    }
}

impl Iterator for ChunkCursor {
    type Item = SeedRange;

    fn next(&mut self) -> Option<SeedRange> {
        self.next_chunk()
    }
}

/// Units of work for one run, as laid out by the schedule policy
#[derive(Debug)]
pub enum WorkPlan {
    /// Contiguous blocks, one worker each
    Blocks(Vec<SeedRange>),
    /// Chunks pulled by a fixed set of workers until the cursor drains
    Chunks(ChunkCursor),
}

impl WorkPlan {
    /// Lay out `[1, n]` for `policy`
    pub fn new(policy: SchedulePolicy, n: u64, blocks: usize, chunk: u64) -> Self {
        match policy {
            SchedulePolicy::Static => Self::Blocks(partition_blocks(n, blocks)),
            SchedulePolicy::Dynamic => Self::Chunks(partition_chunks(n, chunk)),
        }
    }

    pub fn policy(&self) -> SchedulePolicy {
        match self {
            Self::Blocks(_) => SchedulePolicy::Static,
            Self::Chunks(_) => SchedulePolicy::Dynamic,
        }
    }

    /// Units not yet started
    pub fn unit_count(&self) -> u64 {
        match self {
            Self::Blocks(blocks) => blocks.len() as u64,
            Self::Chunks(cursor) => cursor.remaining(),
        }
    }
}
