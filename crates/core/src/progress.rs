//! Arithmetic behind the progress bar and the completion score card.

use chrono::Duration;

use crate::model::QuizScore;

/// Smallest width the bar is drawn at, so an empty bar stays visible.
pub const MIN_BAR_WIDTH: f64 = 5.0;
pub const MAX_BAR_WIDTH: f64 = 100.0;

/// Share of questions already behind the learner, in percent.
#[must_use]
pub fn progress_percent(index: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let ratio = index as f64 / total as f64;
    ratio * 100.0
}

/// Rendered bar width in percent, clamped to `[MIN_BAR_WIDTH, MAX_BAR_WIDTH]`.
#[must_use]
pub fn bar_width(value: f64) -> f64 {
    if value.is_nan() {
        return MIN_BAR_WIDTH;
    }
    value.clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH)
}

/// CSS width for a progress value, rounded to whole percent.
#[must_use]
pub fn bar_width_css(value: f64) -> String {
    format!("{}%", bar_width(value).round())
}

#[must_use]
pub fn points_label(score: QuizScore) -> String {
    format!("+ {}", score.points)
}

#[must_use]
pub fn correct_label(score: QuizScore) -> String {
    format!("{}/{}", score.correct, score.total)
}

#[must_use]
pub fn elapsed_label(elapsed: Duration) -> String {
    let seconds = elapsed.num_seconds().max(0);
    let minutes = seconds / 60;
    let remainder = seconds % 60;
    format!("{minutes}:{remainder:02}")
}
