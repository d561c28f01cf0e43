//! Cache identities for task logs.
//!
//! Identities are shared between service instances, so they are derived only
//! from their inputs: a SHA-256 over a domain tag and length-prefixed fields
//! in a fixed order, hex encoded.
//!
//! Format: `log:content:{hex}` and `log:request:{hex}`

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::models::{LogStream, TaskDescriptor};

const CONTENT_TAG: &[u8] = b"log:content:v1";
const REQUEST_TAG: &[u8] = b"log:request:v1";

/// Opaque cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheIdentity(String);

impl CacheIdentity {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CacheIdentity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Feeds a field as `len (u64 big-endian) || bytes` so adjacent fields can
/// never be re-split into a colliding sequence.
fn update_field(hasher: &mut Sha256, field: &[u8]) {
    hasher.update((field.len() as u64).to_be_bytes());
    hasher.update(field);
}

/// Identity of the full, unpaginated log of one task attempt's stream.
#[must_use]
pub fn compute_content_identity(task: &TaskDescriptor, stream: LogStream) -> CacheIdentity {
    let mut hasher = Sha256::new();
    hasher.update(CONTENT_TAG);
    update_field(&mut hasher, task.flow_id.as_bytes());
    update_field(&mut hasher, task.run_number.as_bytes());
    update_field(&mut hasher, task.step_name.as_bytes());
    update_field(&mut hasher, task.task_id.as_bytes());
    update_field(&mut hasher, task.attempt_id.as_bytes());
    update_field(&mut hasher, stream.as_str().as_bytes());

    CacheIdentity(format!("log:content:{}", hex::encode(hasher.finalize())))
}

/// Identity of one paginated or raw view of a log.
///
/// Every view parameter participates, including those raw output ignores
/// when slicing.
#[must_use]
pub fn compute_request_identity(
    task: &TaskDescriptor,
    stream: LogStream,
    page: u32,
    limit: u32,
    reverse_order: bool,
    output_raw: bool,
) -> CacheIdentity {
    let content = compute_content_identity(task, stream);

    let mut hasher = Sha256::new();
    hasher.update(REQUEST_TAG);
    update_field(&mut hasher, content.as_str().as_bytes());
    update_field(&mut hasher, &page.to_be_bytes());
    update_field(&mut hasher, &limit.to_be_bytes());
    update_field(&mut hasher, &[u8::from(reverse_order)]);
    update_field(&mut hasher, &[u8::from(output_raw)]);

    CacheIdentity(format!("log:request:{}", hex::encode(hasher.finalize())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_task() -> TaskDescriptor {
        TaskDescriptor::new("TestFlow", "1234", "test_step", "1234", "0")
    }

    fn first_task_second_attempt() -> TaskDescriptor {
        TaskDescriptor::new("TestFlow", "1234", "test_step", "1234", "1")
    }

    fn second_task() -> TaskDescriptor {
        TaskDescriptor::new("TestFlow", "1234", "test_step", "1235", "0")
    }

    #[test]
    fn test_content_identity_is_stable() {
        assert_eq!(
            compute_content_identity(&first_task(), LogStream::Stdout),
            compute_content_identity(&first_task(), LogStream::Stdout)
        );
    }

    #[test]
    fn test_content_identity_discriminates_stream() {
        assert_ne!(
            compute_content_identity(&first_task(), LogStream::Stdout),
            compute_content_identity(&first_task(), LogStream::Stderr)
        );
    }

    #[test]
    fn test_content_identity_discriminates_attempt() {
        assert_ne!(
            compute_content_identity(&first_task(), LogStream::Stdout),
            compute_content_identity(&first_task_second_attempt(), LogStream::Stdout)
        );
    }

    #[test]
    fn test_content_identity_discriminates_task() {
        assert_ne!(
            compute_content_identity(&first_task(), LogStream::Stdout),
            compute_content_identity(&second_task(), LogStream::Stdout)
        );
    }

    #[test]
    fn test_content_identity_field_boundaries_are_unambiguous() {
        let a = TaskDescriptor::new("ab", "c", "step", "1", "0");
        let b = TaskDescriptor::new("a", "bc", "step", "1", "0");
        assert_ne!(
            compute_content_identity(&a, LogStream::Stdout),
            compute_content_identity(&b, LogStream::Stdout)
        );
    }

    #[test]
    fn test_content_identity_format() {
        let id = compute_content_identity(&first_task(), LogStream::Stdout);
        let hex_part = id.as_str().strip_prefix("log:content:").expect("prefix");
        assert_eq!(hex_part.len(), 64); // SHA256 hex is 64 chars
        assert!(hex_part.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_request_identity_format() {
        let id = compute_request_identity(&first_task(), LogStream::Stdout, 1, 0, false, false);
        assert!(id.as_str().starts_with("log:request:"));
        assert_eq!(id.to_string(), id.as_str());
        assert_eq!(AsRef::<str>::as_ref(&id), id.as_str());
    }

    #[test]
    fn test_request_identity_is_stable() {
        assert_eq!(
            compute_request_identity(&first_task(), LogStream::Stdout, 0, 1, false, false),
            compute_request_identity(&first_task(), LogStream::Stdout, 0, 1, false, false)
        );
    }

    #[test]
    fn test_request_identity_discriminates_task_and_attempt() {
        let base = compute_request_identity(&first_task(), LogStream::Stdout, 0, 1, false, false);
        assert_ne!(
            base,
            compute_request_identity(
                &first_task_second_attempt(),
                LogStream::Stdout,
                0,
                1,
                false,
                false
            )
        );
        assert_ne!(
            base,
            compute_request_identity(&second_task(), LogStream::Stdout, 0, 1, false, false)
        );
    }

    #[test]
    fn test_request_identity_discriminates_stream() {
        assert_ne!(
            compute_request_identity(&first_task(), LogStream::Stdout, 1, 1, false, false),
            compute_request_identity(&first_task(), LogStream::Stderr, 1, 1, false, false)
        );
    }

    #[test]
    fn test_request_identity_discriminates_page() {
        assert_ne!(
            compute_request_identity(&first_task(), LogStream::Stdout, 0, 1, false, false),
            compute_request_identity(&first_task(), LogStream::Stdout, 1, 1, false, false)
        );
    }

    #[test]
    fn test_request_identity_discriminates_limit() {
        assert_ne!(
            compute_request_identity(&first_task(), LogStream::Stdout, 1, 1, false, false),
            compute_request_identity(&first_task(), LogStream::Stdout, 1, 0, false, false)
        );
    }

    #[test]
    fn test_request_identity_discriminates_reverse_order() {
        assert_ne!(
            compute_request_identity(&first_task(), LogStream::Stdout, 1, 1, false, false),
            compute_request_identity(&first_task(), LogStream::Stdout, 1, 1, true, false)
        );
    }

    #[test]
    fn test_request_identity_discriminates_output_raw() {
        assert_ne!(
            compute_request_identity(&first_task(), LogStream::Stdout, 1, 1, false, false),
            compute_request_identity(&first_task(), LogStream::Stdout, 1, 1, false, true)
        );
    }

    #[test]
    fn test_page_and_limit_are_not_interchangeable() {
        assert_ne!(
            compute_request_identity(&first_task(), LogStream::Stdout, 2, 5, false, false),
            compute_request_identity(&first_task(), LogStream::Stdout, 5, 2, false, false)
        );
    }

    #[test]
    fn test_request_identity_differs_from_content_identity() {
        let content = compute_content_identity(&first_task(), LogStream::Stdout);
        let request =
            compute_request_identity(&first_task(), LogStream::Stdout, 1, 0, false, false);
        assert_ne!(content, request);
    }

    #[test]
    fn test_identities_match_known_values() {
        // Pinned: identities are shared cache keys, any change invalidates
        // every cache entry written by other instances.
        assert_eq!(
            compute_content_identity(&first_task(), LogStream::Stdout).as_str(),
            "log:content:306f645aaba1930299f5ea68ede87372d960be4b44a665c0badd1f203e62eba8"
        );
        assert_eq!(
            compute_request_identity(&first_task(), LogStream::Stdout, 1, 0, false, false)
                .as_str(),
            "log:request:c1afc3b2d7ecd4d1632c746ff6e596c182d0b8ad9292cae811d1ade4a43b045f"
        );
    }

    #[test]
    fn test_identity_serde_is_plain_string() {
        let id = compute_content_identity(&first_task(), LogStream::Stdout);
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, format!("\"{}\"", id));
        let deserialized: CacheIdentity = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(deserialized, id);
    }
}
