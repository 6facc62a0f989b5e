//! Animated statistic component.
//!
//! The partial renders the final value inside `<noscript>` and an element the
//! counter script fills from the SSE endpoint at `src`.

use crate::catalog::Stat;

/// Display data for one animated statistic.
#[derive(Debug, Clone)]
pub struct StatCounterView {
    pub key: &'static str,
    pub label: &'static str,
    /// Final value with thousands separators.
    pub target_display: String,
    pub suffix: &'static str,
    /// SSE endpoint streaming the animation.
    pub src: String,
}

impl StatCounterView {
    #[must_use]
    pub fn new(stat: &Stat) -> Self {
        Self {
            key: stat.key,
            label: stat.label,
            target_display: group_thousands(stat.target),
            suffix: stat.suffix,
            src: format!("/api/counters/{}", stat.key),
        }
    }
}

/// Format `value` with comma thousands separators.
#[must_use]
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i).is_multiple_of(3) {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
