//! Fuzz target for the full default scrub.
//!
//! Any input that parses as a capture must scrub without panicking and
//! yield a capture that parses again.

#![no_main]

use libfuzzer_sys::fuzz_target;

use hs_redact::{Document, Sanitizer, ScrubSpec};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(document) = Document::from_str(text) else {
        return;
    };
    let sanitizer = Sanitizer::default();
    if let Ok(clean) = sanitizer.scrub(document, &ScrubSpec::default()) {
        let _ = Document::from_str(clean.text());
    }
});
