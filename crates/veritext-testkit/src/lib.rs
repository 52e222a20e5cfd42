//! # Veritext Testkit
//!
//! Testing utilities for Veritext.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known test cases with expected outputs for cross-implementation verification
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Helper structs for setting up test scenarios
//!
//! ## Golden Vectors
//!
//! Golden vectors freeze the hash and canonical encoding:
//!
//! ```rust
//! use veritext_testkit::vectors::{all_vectors, manifest_from_vector};
//!
//! for vector in all_vectors() {
//!     let manifest = manifest_from_vector(&vector);
//!     assert_eq!(manifest.hash.to_hex(), vector.expected_hash);
//! }
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use veritext_testkit::generators::{ManifestParams, signed_manifest_from_params};
//!
//! proptest! {
//!     #[test]
//!     fn manifest_id_is_deterministic(params: ManifestParams) {
//!         let s1 = signed_manifest_from_params(&params);
//!         let s2 = signed_manifest_from_params(&params);
//!         prop_assert_eq!(s1.compute_id(), s2.compute_id());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! Quickly set up test scenarios:
//!
//! ```rust
//! use veritext_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::with_seed([0x42; 32]);
//! let signed = fixture.make_signed("some text", None);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_signer_fixtures, sample_metadata, TestFixture, FIXED_TIMESTAMP};
pub use generators::{manifest_from_params, signed_manifest_from_params, ManifestParams};
pub use vectors::{
    all_vectors, manifest_from_vector, signed_manifest_from_vector, verify_all_vectors,
    GoldenVector,
};
