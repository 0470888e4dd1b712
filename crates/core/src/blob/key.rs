/// Object key layout.
///
/// - Resource PDFs: `resources/{category}/{timestamp_ms}-{file}`
/// - Author photos: `authors/{timestamp_ms}-{file}`
use std::sync::atomic::{AtomicI64, Ordering};

use crate::resource::model::Category;

const RESOURCES_PREFIX: &str = "resources";
const AUTHORS_PREFIX: &str = "authors";

static LAST_KEY_MS: AtomicI64 = AtomicI64::new(0);

/// Millisecond timestamp for a new key, strictly greater than any this process
/// has handed out before. Identically named uploads in the same millisecond
/// therefore still get distinct keys.
pub fn key_timestamp_ms(now_ms: i64) -> i64 {
    let previous = LAST_KEY_MS
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(now_ms.max(last + 1))
        })
        .unwrap_or_else(|last| last);
    now_ms.max(previous + 1)
}

/// Replace anything outside `[A-Za-z0-9.-]` with `_`.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

pub fn resource_key(category: Category, timestamp_ms: i64, file_name: &str) -> String {
    format!(
        "{RESOURCES_PREFIX}/{category}/{timestamp_ms}-{}",
        sanitize_filename(file_name)
    )
}

pub fn author_photo_key(timestamp_ms: i64, file_name: &str) -> String {
    format!("{AUTHORS_PREFIX}/{timestamp_ms}-{}", sanitize_filename(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_unsafe_characters() {
        assert_eq!(sanitize_filename("My Guide (v2).pdf"), "My_Guide__v2_.pdf");
        assert_eq!(sanitize_filename("ok-name.1.pdf"), "ok-name.1.pdf");
        assert_eq!(sanitize_filename("../etc/passwd"), ".._etc_passwd");
        assert_eq!(sanitize_filename("résumé.pdf"), "r_sum_.pdf");
    }

    #[test]
    fn key_timestamps_never_repeat() {
        let first = key_timestamp_ms(1_700_000_000_000);
        let second = key_timestamp_ms(1_700_000_000_000);
        let earlier_clock = key_timestamp_ms(1);
        assert!(first >= 1_700_000_000_000);
        assert!(second > first);
        assert!(earlier_clock > second);
    }

    #[test]
    fn resource_key_layout() {
        assert_eq!(
            resource_key(Category::Clinicians, 1700000000000, "stewardship guide.pdf"),
            "resources/clinicians/1700000000000-stewardship_guide.pdf"
        );
    }

    #[test]
    fn author_key_layout() {
        assert_eq!(
            author_photo_key(42, "me.jpg"),
            "authors/42-me.jpg"
        );
    }
}
