//! Small string helpers shared by the process and file tables.

/// Longest prefix of `s` that fits in `max` bytes without splitting a char.
pub fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("scheduler", 5), "sched");
        assert_eq!(truncate("ps", 31), "ps");
        assert_eq!(truncate("", 4), "");
    }

    #[test]
    fn test_truncate_respects_char_boundary() {
        // 'é' is two bytes; cutting inside it backs off to the boundary.
        assert_eq!(truncate("abé", 3), "ab");
        assert_eq!(truncate("abé", 4), "abé");
    }
}
