//! # Identity & Hashing
//!
//! Entity ids and password digests.
//!
//! ## Id Format
//! ```text
//! user-1a2b3c4d   car-9f8e7d6c   inv-0011aabb
//! └┬─┘ └──┬───┘
//!  │      └── first 8 hex chars of a v4 UUID (32 random bits)
//!  └── category prefix
//! ```
//!
//! Ids are not checked against existing ids here. The record store refuses
//! to insert a duplicate, so a collision surfaces as `CoreError::DuplicateId`
//! instead of overwriting a record.
//!
//! ## Digests
//! Unsalted SHA-256, lowercase hex. Equal passwords give equal digests, which
//! also means precomputed tables work against a leaked data file.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Generates a new entity id: `{prefix}-{8 hex chars}`.
///
/// ## Example
/// ```rust
/// use dealer_core::identity::new_id;
///
/// let id = new_id("car");
/// assert!(id.starts_with("car-"));
/// assert_eq!(id.len(), "car-".len() + 8);
/// ```
pub fn new_id(prefix: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}", prefix, &suffix[..8])
}

/// Returns the lowercase hex SHA-256 digest of `plaintext`.
pub fn hash_password(plaintext: &str) -> String {
    hex::encode(Sha256::digest(plaintext.as_bytes()))
}

/// Checks `plaintext` against a stored digest.
///
/// An empty stored digest never matches.
pub fn verify_password(plaintext: &str, digest: &str) -> bool {
    !digest.is_empty() && hash_password(plaintext) == digest
}
