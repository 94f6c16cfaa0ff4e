//! Stable association identifiers (versioned).
//!
//! Re-ingesting the same source data must reproduce the same association ids,
//! otherwise graph diffs between releases become meaningless. Ids are therefore
//! a pure function of the ordered association tuple:
//!
//! - algorithm: **SHA-256**
//! - input: a domain tag, then every field framed as `<byte len>:<value>;`
//!   (absent optional fields are framed as `-;`)
//! - output: `"<namespace>:b<19 lowercase hex digits>"`
//!
//! The framing is unambiguous: two different tuples never produce the same
//! byte stream, so collisions are left to the hash alone. An absent field and
//! a field holding the text `"None"` are distinct.

use sha2::{Digest, Sha256};

/// Domain tag hashed ahead of every association tuple.
pub const ASSOC_ID_V1_DOMAIN: &str = "phenograph.assoc.v1";

/// Namespace used when none is configured.
pub const DEFAULT_ID_NAMESPACE: &str = "MONARCH";

/// Number of hex digits kept from the digest.
pub const ASSOC_ID_V1_HEX_DIGITS: usize = 19;

/// Compute the v1 association id for `(source, subject, relation, object, extras...)`.
///
/// `extras` are the association-specific qualifiers, in the order the caller
/// fixes for its association kind. Their order is part of the identity.
pub fn association_id_v1(
    namespace: &str,
    source: &str,
    subject: &str,
    relation: &str,
    object: &str,
    extras: &[Option<&str>],
) -> String {
    fn add(hasher: &mut Sha256, value: Option<&str>) {
        match value {
            Some(v) => {
                hasher.update(v.len().to_string().as_bytes());
                hasher.update(b":");
                hasher.update(v.as_bytes());
                hasher.update(b";");
            }
            None => hasher.update(b"-;"),
        }
    }

    let mut hasher = Sha256::new();
    hasher.update(ASSOC_ID_V1_DOMAIN.as_bytes());
    hasher.update(b"\n");

    for field in [source, subject, relation, object] {
        add(&mut hasher, Some(field));
    }
    hasher.update(b"|");
    for extra in extras {
        add(&mut hasher, *extra);
    }

    let digest = hasher.finalize();
    let mut hex = String::with_capacity(digest.len() * 2);
    for b in digest.iter() {
        hex.push_str(&format!("{b:02x}"));
    }

    format!("{namespace}:b{}", &hex[..ASSOC_ID_V1_HEX_DIGITS])
}
