//! Row-partitioning policies for the parallel strategies.
//!
//! Both policies hand out disjoint contiguous row ranges. Static fixes the
//! chunking up front; guided claims shrinking chunks from a shared atomic
//! cursor so faster workers absorb the tail of the loop.

use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Minimum guided chunk granularity, in rows.
pub const GUIDED_CHUNK_MIN: usize = 1;

/// Work-partitioning policy.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Schedule {
    /// Contiguous equal-size chunks, one per worker, fixed at partition time.
    Static,
    /// Chunks start large and shrink as rows are claimed.
    Guided,
}

/// Chunk size for the static policy: `ceil(rows / workers)`.
#[inline]
pub fn static_chunk_size(rows: usize, workers: usize) -> usize {
    rows.div_ceil(workers.max(1)).max(1)
}

/// The static row range owned by `worker_id`, or `None` when there are more
/// workers than chunks.
#[inline]
pub fn static_range(rows: usize, workers: usize, worker_id: usize) -> Option<Range<usize>> {
    let chunk = static_chunk_size(rows, workers);
    let start = worker_id.saturating_mul(chunk);
    if start >= rows {
        return None;
    }
    Some(start..(start + chunk).min(rows))
}

/// Claim the next guided chunk from `cursor`, or `None` when `rows` is
/// exhausted. Chunk size is `max(remaining / workers, GUIDED_CHUNK_MIN)`,
/// recomputed against the cursor value actually won.
#[inline]
pub fn claim_guided(cursor: &AtomicUsize, rows: usize, workers: usize) -> Option<Range<usize>> {
    let workers = workers.max(1);
    let mut start = cursor.load(Ordering::Relaxed);
    loop {
        if start >= rows {
            return None;
        }
        let remaining = rows - start;
        let chunk = (remaining / workers).max(GUIDED_CHUNK_MIN);
        let end = start + chunk;
        match cursor.compare_exchange_weak(start, end, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return Some(start..end.min(rows)),
            Err(observed) => start = observed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Schedule, claim_guided, static_range};
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn static_ranges_cover_all_rows_disjointly() {
        for rows in [1usize, 5, 7, 100] {
            for workers in [1usize, 2, 3, 4, 8, 13] {
                let mut seen = vec![false; rows];
                for worker_id in 0..workers {
                    if let Some(range) = static_range(rows, workers, worker_id) {
                        for row in range {
                            assert!(!seen[row], "row {row} assigned twice");
                            seen[row] = true;
                        }
                    }
                }
                assert!(seen.iter().all(|&s| s), "rows={rows} workers={workers}");
            }
        }
    }

    #[test]
    fn guided_claims_cover_all_rows_with_shrinking_chunks() {
        let rows = 100;
        let workers = 4;
        let cursor = AtomicUsize::new(0);

        let mut next_expected = 0;
        let mut prev_len = usize::MAX;
        while let Some(range) = claim_guided(&cursor, rows, workers) {
            assert_eq!(range.start, next_expected);
            assert!(range.len() <= prev_len, "guided chunks must not grow");
            assert!(!range.is_empty());
            prev_len = range.len();
            next_expected = range.end;
        }
        assert_eq!(next_expected, rows);
    }

    #[test]
    fn guided_single_worker_claims_everything_first() {
        let cursor = AtomicUsize::new(0);
        let range = claim_guided(&cursor, 64, 1).unwrap();
        assert_eq!(range, 0..64);
        assert!(claim_guided(&cursor, 64, 1).is_none());
    }

    #[test]
    fn schedule_is_copy_eq() {
        assert_eq!(Schedule::Static, Schedule::Static);
        assert_ne!(Schedule::Static, Schedule::Guided);
    }
}
