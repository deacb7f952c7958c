//! Window detector: turns a score curve into ranked fishing windows

use crate::models::{FishingWindow, HourlyScore};
use chrono::NaiveDateTime;

/// At most this many windows are reported per day
const MAX_WINDOWS: usize = 3;

struct OpenRun {
    start: NaiveDateTime,
    end: NaiveDateTime,
    max_score: f64,
    reason: String,
}

/// Extract contiguous at/above-threshold stretches of the curve, ranked by
/// their peak score, at most three.
///
/// A run opens at the first hour scoring at/above the threshold and closes
/// at the last consecutive hour still at/above it; a run still open at the
/// end of the day closes on the final hour. The reason names the two
/// strongest factors at the run's point of maximum score.
#[must_use]
pub fn find_best_windows(scores: &[HourlyScore], threshold: f64) -> Vec<FishingWindow> {
    let mut windows = Vec::new();
    let mut open: Option<OpenRun> = None;

    for s in scores {
        if s.score >= threshold {
            match open.as_mut() {
                None => {
                    open = Some(OpenRun {
                        start: s.hour,
                        end: s.hour,
                        max_score: s.score,
                        reason: s.factors.top_two_labels(),
                    });
                }
                Some(run) => {
                    run.end = s.hour;
                    if s.score > run.max_score {
                        run.max_score = s.score;
                        run.reason = s.factors.top_two_labels();
                    }
                }
            }
        } else if let Some(run) = open.take() {
            windows.push(close_run(run));
        }
    }
    if let Some(run) = open.take() {
        windows.push(close_run(run));
    }

    windows.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    windows.truncate(MAX_WINDOWS);
    windows
}

fn close_run(run: OpenRun) -> FishingWindow {
    FishingWindow {
        start: run.start,
        end: run.end,
        score: run.max_score,
        reason: run.reason,
    }
}
