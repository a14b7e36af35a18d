//! Kani Arbitrary implementations and proof harnesses.
//!
//! The harnesses check that the lenient parsers never panic on bounded input
//! and that normalization is idempotent.
//!
//! # Usage
//!
//! Kani is not a Cargo dependency. Install and run with:
//!
//! ```bash
//! cargo install --locked kani-verifier
//! cargo kani setup
//! cargo kani --features kani
//! ```
//!
//! This module is only compiled when using Kani (`#[cfg(kani)]`).

use crate::tokenizer::tokenize;
use crate::{Path, decode};

/// Characters that exercise every branch of the tokenizer and decoder.
const INTERESTING: &[u8] = b"a.:/\\?#@%+=&9F";

fn arbitrary_char() -> char {
    let idx: usize = kani::any();
    char::from(INTERESTING[idx % INTERESTING.len()])
}

fn arbitrary_text(max: usize) -> String {
    let len: usize = kani::any();
    let len = len % (max + 1);
    (0..len).map(|_| arbitrary_char()).collect()
}

impl kani::Arbitrary for Path {
    fn any() -> Self {
        Path::parse(&arbitrary_text(4))
    }
}

/// Proof: the tokenizer accepts any input
#[kani::proof]
#[kani::unwind(7)]
fn proof_tokenize_never_panics() {
    let text = arbitrary_text(6);
    let _ = tokenize(&text);
}

/// Proof: decoding accepts malformed escapes
#[kani::proof]
#[kani::unwind(7)]
fn proof_decode_never_panics() {
    let text = arbitrary_text(6);
    let _ = decode(&text);
}

/// Proof: normalize(normalize(p)) == normalize(p)
#[kani::proof]
#[kani::unwind(6)]
fn proof_normalize_idempotent() {
    let path: Path = kani::any();
    let once = path.normalize();
    assert_eq!(once.normalize(), once);
}

/// Proof: a path is never less than itself and equal paths compare equal
#[kani::proof]
#[kani::unwind(6)]
fn proof_order_reflexive() {
    let path: Path = kani::any();
    assert_eq!(path.cmp(&path), std::cmp::Ordering::Equal);
}
