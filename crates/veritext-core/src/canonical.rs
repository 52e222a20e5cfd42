//! Canonical JSON encoding of manifests.
//!
//! Signature validity depends on every implementation producing identical
//! bytes for the same manifest, so the encoding never relies on a JSON
//! library's default key ordering. Rules for manifest version "1.0":
//!
//! - UTF-8, no insignificant whitespace
//! - Top-level fields in fixed order: `hash`, `timestamp`, `metadata`,
//!   `version`; `metadata` is omitted entirely when absent
//! - All nested object keys sorted by byte-wise comparison of their UTF-8
//!   encoding
//! - String escaping and number formatting follow serde_json (shortest
//!   round-trip for floats; integer-valued metadata should prefer integers)
//!
//! **CRITICAL**: This encoding is FROZEN. Changes break all existing
//! signatures. A future schema revision gets a new `version` value and its
//! own rules.

use serde_json::Value;

use crate::manifest::{Manifest, Metadata};

/// Encode a manifest to its canonical byte sequence.
///
/// These are the exact bytes that get signed and verified, reconstructed
/// identically whether the manifest was built locally or received from a
/// third party.
pub fn canonical_bytes(manifest: &Manifest) -> Vec<u8> {
    let mut buf = Vec::with_capacity(128);
    buf.extend_from_slice(b"{\"hash\":");
    write_string(&mut buf, &manifest.hash.to_hex());
    buf.extend_from_slice(b",\"timestamp\":");
    write_string(&mut buf, &manifest.timestamp);
    if let Some(metadata) = &manifest.metadata {
        buf.extend_from_slice(b",\"metadata\":");
        write_object(&mut buf, metadata);
    }
    buf.extend_from_slice(b",\"version\":");
    write_string(&mut buf, &manifest.version);
    buf.push(b'}');
    buf
}

/// The canonical serialized size of a metadata document, in bytes.
///
/// This is the measure the 10 KiB metadata bound is enforced against.
pub fn canonical_metadata_size(metadata: &Metadata) -> usize {
    let mut buf = Vec::with_capacity(64);
    write_object(&mut buf, metadata);
    buf.len()
}

fn write_object(buf: &mut Vec<u8>, map: &Metadata) {
    // serde_json's default map is already sorted, but the ordering here must
    // not depend on which map implementation a feature flag selected.
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort_by(|a, b| a.as_bytes().cmp(b.as_bytes()));

    buf.push(b'{');
    for (i, key) in keys.iter().enumerate() {
        if i > 0 {
            buf.push(b',');
        }
        write_string(buf, key);
        buf.push(b':');
        write_value(buf, &map[*key]);
    }
    buf.push(b'}');
}

fn write_value(buf: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Null => buf.extend_from_slice(b"null"),
        Value::Bool(true) => buf.extend_from_slice(b"true"),
        Value::Bool(false) => buf.extend_from_slice(b"false"),
        Value::Number(n) => {
            serde_json::to_writer(&mut *buf, n).expect("writing to Vec cannot fail")
        }
        Value::String(s) => write_string(buf, s),
        Value::Array(items) => {
            buf.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    buf.push(b',');
                }
                write_value(buf, item);
            }
            buf.push(b']');
        }
        Value::Object(map) => write_object(buf, map),
    }
}

fn write_string(buf: &mut Vec<u8>, s: &str) {
    serde_json::to_writer(&mut *buf, s).expect("writing to Vec cannot fail")
}
