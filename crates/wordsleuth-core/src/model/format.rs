/// Text formatting for counts and progress, shared by frontends.
use super::ProgressSnapshot;

/// Format a count with thousand separators (`1234567` → `1,234,567`).
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `"Processed 3 of 10 files (30%)"`, or a plain count while the total is unknown.
pub fn format_progress(snapshot: &ProgressSnapshot) -> String {
    let processed = format_count(snapshot.processed as u64);
    match snapshot.percentage() {
        Some(pct) => format!(
            "Processed {processed} of {} files ({pct:.0}%)",
            format_count(snapshot.total as u64)
        ),
        None => format!("Processed {processed} files"),
    }
}
