//! Bounded index arithmetic for list navigation.

/// Next index, never past `max`. From -1 (nothing focused) this yields 0.
pub fn next_index(current: isize, max: isize) -> isize {
    current.saturating_add(1).min(max)
}

/// Previous index, never below 0.
pub fn prev_index(current: isize) -> isize {
    current.saturating_sub(1).max(0)
}
