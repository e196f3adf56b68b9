//! Footer and aggregate row removal.

use crate::frame::Frame;

/// Drop records where any field contains any keyword (case-insensitive).
///
/// Blank keywords are ignored, and an empty list leaves the frame as is.
/// Returns the number of records removed.
pub(crate) fn remove_summary_rows<S: AsRef<str>>(frame: &mut Frame, keywords: &[S]) -> usize {
    let keys: Vec<String> = keywords
        .iter()
        .map(|k| k.as_ref().trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();
    if keys.is_empty() {
        tracing::debug!("no summary keywords configured, skipping summary filter");
        return 0;
    }

    frame.retain_records(|record| {
        !record.cells.iter().any(|cell| {
            if cell.is_missing() {
                return false;
            }
            let text = cell.render().to_lowercase();
            keys.iter().any(|k| text.contains(k.as_str()))
        })
    })
}
