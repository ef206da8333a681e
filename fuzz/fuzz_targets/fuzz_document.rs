//! Fuzz target for HAR document construction.
//!
//! Captures arrive from untrusted uploads; construction must reject
//! arbitrary input with a typed error, never a panic.

#![no_main]

use libfuzzer_sys::fuzz_target;

use hs_redact::Document;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = Document::from_str(text);
    }
});
