//! Small text helpers shared between views.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates from the front, keeping the tail and prefixing "…" when the
/// text does not fit. Useful for file paths where the end matters most.
pub fn truncate_start_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width.saturating_sub(1);
    let mut tail: Vec<char> = Vec::new();
    let mut used = 0;
    for c in text.chars().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        tail.push(c);
    }
    tail.reverse();
    let mut out = String::from("…");
    out.extend(tail);
    out
}

/// Truncates from the end, appending "…" when the text does not fit.
pub fn truncate_end_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

/// Formats a byte count for display ("312 B", "4.2 KB", "1.1 MB").
pub fn format_bytes(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    let bytes_f = bytes as f64;
    if bytes_f >= MB {
        format!("{:.1} MB", bytes_f / MB)
    } else if bytes_f >= KB {
        format!("{:.1} KB", bytes_f / KB)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_start_keeps_tail() {
        assert_eq!(truncate_start_with_ellipsis("abcdef", 10), "abcdef");
        assert_eq!(truncate_start_with_ellipsis("abcdef", 4), "…def");
        assert_eq!(truncate_start_with_ellipsis("abcdef", 0), "");
    }

    #[test]
    fn truncate_end_keeps_head() {
        assert_eq!(truncate_end_with_ellipsis("abcdef", 10), "abcdef");
        assert_eq!(truncate_end_with_ellipsis("abcdef", 4), "abc…");
    }

    #[test]
    fn format_bytes_units() {
        assert_eq!(format_bytes(312), "312 B");
        assert_eq!(format_bytes(4300), "4.2 KB");
        assert_eq!(format_bytes(1_200_000), "1.1 MB");
    }
}
