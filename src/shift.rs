use crate::error::SubshiftError;
use crate::srt::{Srt, Subtitle, ZERO_TIME};

use std::mem;
use std::time::Duration;

// All deltas are whole milliseconds, the resolution of the format. Offsets
// themselves stay `Duration`, so time before the zero epoch does not exist:
// a start refuses to cross it (clamp-by-skip below) and an end saturates on
// it.

impl Subtitle {
    pub fn shift(&mut self, delta: i64) {
        self.shift_start(delta);
        self.shift_end(delta);
    }

    /// Moves the start only when the result lands strictly after the zero
    /// epoch; a shift landing exactly on the epoch is skipped too.
    pub fn shift_start(&mut self, delta: i64) {
        if let Some(shifted) = offset(self.start, delta) {
            if shifted > ZERO_TIME {
                self.start = shifted;
            }
        }
    }

    /// Moves the end unconditionally, saturating at the zero epoch.
    pub fn shift_end(&mut self, delta: i64) {
        self.end = offset(self.end, delta).unwrap_or(ZERO_TIME);
    }
}

impl Srt {
    pub fn shift_all(&mut self, delta: i64) {
        for sub in &mut self.subtitles {
            sub.shift(delta);
        }
    }

    /// Moves the subtitles lying strictly inside the window; one touching
    /// either bound exactly stays where it is.
    pub fn shift_part(&mut self, from: Duration, to: Duration, delta: i64) {
        for sub in &mut self.subtitles {
            if sub.start > from && sub.end < to {
                sub.shift(delta);
            }
        }
    }

    /// Drops the subtitles lying strictly inside the window. A retained
    /// subtitle ending strictly after the window moves by the window's
    /// width, `to - from`.
    pub fn cut_part(&mut self, from: Duration, to: Duration) {
        let width = to.as_millis() as i64 - from.as_millis() as i64;
        let subtitles = mem::take(&mut self.subtitles);

        for mut sub in subtitles {
            if sub.start > from && sub.end < to {
                continue;
            }
            if sub.end > to {
                sub.shift(width);
            }
            self.subtitles.push(sub);
        }
    }

    /// Spreads `change` milliseconds across the timeline: a subtitle at the
    /// zero epoch moves by nothing, the final one by the full amount. The
    /// last subtitle in collection order anchors the timeline, so it must be
    /// the one that ends latest for the result to mean anything.
    pub fn shift_sync(&mut self, change: i64) -> Result<(), SubshiftError> {
        let last = self.subtitles.last().ok_or(SubshiftError::EmptyDocument)?;
        let total = last.end.as_millis() as i64;
        if total == 0 {
            return Err(SubshiftError::ZeroLengthTimeline);
        }

        for sub in &mut self.subtitles {
            let start_shift = proportional(sub.start, total, change);
            let end_shift = proportional(sub.end, total, change);
            sub.shift_start(start_shift);
            sub.shift_end(end_shift);
        }
        Ok(())
    }
}

// Truncates toward zero after the floating-point multiply.
fn proportional(at: Duration, total: i64, change: i64) -> i64 {
    (at.as_millis() as f64 / total as f64 * change as f64) as i64
}

// None when the result would fall before the zero epoch.
fn offset(duration: Duration, delta: i64) -> Option<Duration> {
    if delta >= 0 {
        duration.checked_add(Duration::from_millis(delta as u64))
    } else {
        duration.checked_sub(Duration::from_millis(delta.unsigned_abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subtitle(start_ms: u64, end_ms: u64) -> Subtitle {
        Subtitle::new(
            Duration::from_millis(start_ms),
            Duration::from_millis(end_ms),
            vec!["text".to_string()],
        )
    }

    fn timings(srt: &Srt) -> Vec<(u64, u64)> {
        srt.subtitles
            .iter()
            .map(|sub| (sub.start.as_millis() as u64, sub.end.as_millis() as u64))
            .collect()
    }

    #[test]
    fn shift_moves_both_ends() {
        let mut sub = subtitle(1000, 2000);

        sub.shift(2000);

        assert_eq!(sub.start, Duration::from_millis(3000));
        assert_eq!(sub.end, Duration::from_millis(4000));
    }

    #[test]
    fn shift_into_negative_leaves_start_alone() {
        let mut sub = subtitle(0, 2000);

        sub.shift(-1000);

        assert_eq!(sub.start, Duration::from_millis(0));
        assert_eq!(sub.end, Duration::from_millis(1000));
    }

    #[test]
    fn shift_landing_exactly_on_the_epoch_is_skipped() {
        let mut sub = subtitle(2000, 3000);

        sub.shift(-2000);

        // Strictly-after rule: a start shifted onto 00:00:00,000 keeps its
        // old value rather than moving there.
        assert_eq!(sub.start, Duration::from_millis(2000));
        assert_eq!(sub.end, Duration::from_millis(1000));
    }

    #[test]
    fn shift_end_saturates_at_the_epoch() {
        let mut sub = subtitle(0, 1000);

        sub.shift_end(-5000);

        assert_eq!(sub.end, ZERO_TIME);
    }

    #[test]
    fn shift_start_and_shift_end_act_independently() {
        let mut sub = subtitle(1000, 2000);

        sub.shift_start(500);
        sub.shift_end(-500);

        assert_eq!(sub.start, Duration::from_millis(1500));
        assert_eq!(sub.end, Duration::from_millis(1500));
    }

    #[test]
    fn shift_all_moves_every_block() {
        let mut srt = Srt {
            subtitles: vec![subtitle(1000, 2000), subtitle(3000, 4000)],
        };

        srt.shift_all(2000);

        assert_eq!(timings(&srt), vec![(3000, 4000), (5000, 6000)]);
    }

    #[test]
    fn shift_all_back_and_forth_restores_timings() {
        let mut srt = Srt {
            subtitles: vec![subtitle(5000, 7000), subtitle(10_000, 12_000)],
        };

        srt.shift_all(2500);
        srt.shift_all(-2500);

        assert_eq!(timings(&srt), vec![(5000, 7000), (10_000, 12_000)]);
    }

    #[test]
    fn shift_part_moves_only_blocks_strictly_inside_the_window() {
        let mut srt = Srt {
            subtitles: vec![
                subtitle(1000, 2000),
                subtitle(5000, 6000),
                subtitle(9000, 10_000),
            ],
        };

        srt.shift_part(Duration::from_millis(4000), Duration::from_millis(7000), 500);

        assert_eq!(timings(&srt), vec![(1000, 2000), (5500, 6500), (9000, 10_000)]);
    }

    #[test]
    fn shift_part_excludes_blocks_touching_a_bound() {
        let mut srt = Srt {
            subtitles: vec![subtitle(4000, 5000), subtitle(5500, 7000)],
        };

        // First block starts exactly on `from`, second ends exactly on `to`.
        srt.shift_part(Duration::from_millis(4000), Duration::from_millis(7000), 500);

        assert_eq!(timings(&srt), vec![(4000, 5000), (5500, 7000)]);
    }

    #[test]
    fn cut_part_drops_blocks_strictly_inside_the_window() {
        let mut srt = Srt {
            subtitles: vec![
                subtitle(1000, 2000),
                subtitle(5000, 6000),
                subtitle(9000, 10_000),
            ],
        };

        srt.cut_part(Duration::from_millis(4000), Duration::from_millis(7000));

        // The interior block is gone; the block past the window moved by the
        // window width, the block before it did not move.
        assert_eq!(timings(&srt), vec![(1000, 2000), (12_000, 13_000)]);
    }

    #[test]
    fn cut_part_keeps_blocks_touching_a_bound() {
        let mut srt = Srt {
            subtitles: vec![subtitle(4000, 5000), subtitle(5500, 7000)],
        };

        srt.cut_part(Duration::from_millis(4000), Duration::from_millis(7000));

        assert_eq!(timings(&srt), vec![(4000, 5000), (5500, 7000)]);
    }

    #[test]
    fn cut_part_keeps_straddling_blocks_and_shifts_them() {
        let mut srt = Srt {
            subtitles: vec![subtitle(3000, 8000)],
        };

        srt.cut_part(Duration::from_millis(4000), Duration::from_millis(7000));

        // Starts before the window, ends after it: retained, end past `to`
        // so the whole block moves by the 3s width.
        assert_eq!(timings(&srt), vec![(6000, 11_000)]);
    }

    #[test]
    fn cut_part_preserves_collection_order() {
        let mut srt = Srt {
            subtitles: vec![
                subtitle(9000, 10_000),
                subtitle(5000, 6000),
                subtitle(1000, 2000),
            ],
        };

        srt.cut_part(Duration::from_millis(4000), Duration::from_millis(7000));

        assert_eq!(timings(&srt), vec![(12_000, 13_000), (1000, 2000)]);
    }

    #[test]
    fn shift_sync_scales_from_nothing_to_the_full_change() {
        let mut srt = Srt {
            subtitles: vec![subtitle(0, 1000), subtitle(3000, 4000)],
        };

        srt.shift_sync(1000).unwrap();

        // First start sits on the epoch: share 0. Last end is the anchor:
        // full 1000ms. Interior values scale linearly.
        assert_eq!(timings(&srt), vec![(0, 1250), (3750, 5000)]);
    }

    #[test]
    fn shift_sync_with_negative_change_compresses_the_timeline() {
        let mut srt = Srt {
            subtitles: vec![subtitle(0, 1000), subtitle(3000, 4000)],
        };

        srt.shift_sync(-1000).unwrap();

        assert_eq!(timings(&srt), vec![(0, 750), (2250, 3000)]);
    }

    #[test]
    fn shift_sync_truncates_shares_toward_zero() {
        let mut srt = Srt {
            subtitles: vec![subtitle(333, 666), subtitle(900, 1000)],
        };

        srt.shift_sync(100).unwrap();

        // 333/1000*100 = 33.3 and 666/1000*100 = 66.6: both truncate.
        assert_eq!(timings(&srt), vec![(366, 732), (990, 1100)]);
    }

    #[test]
    fn shift_sync_on_an_empty_document_is_an_error() {
        let mut srt = Srt::new();

        match srt.shift_sync(1000) {
            Err(SubshiftError::EmptyDocument) => (),
            other => panic!("expected EmptyDocument, got {:?}", other),
        }
    }

    #[test]
    fn shift_sync_on_a_zero_length_timeline_is_an_error() {
        let mut srt = Srt {
            subtitles: vec![subtitle(0, 0)],
        };

        match srt.shift_sync(1000) {
            Err(SubshiftError::ZeroLengthTimeline) => (),
            other => panic!("expected ZeroLengthTimeline, got {:?}", other),
        }
    }
}
