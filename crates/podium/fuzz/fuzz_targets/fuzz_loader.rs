//! Fuzz target for the loader and canonicalizer.
//!
//! Arbitrary bytes as the event file must never panic: the loader reports
//! problems as diagnostics and the canonicalizer accepts whatever it gets.

#![no_main]

use libfuzzer_sys::fuzz_target;
use podium::{Canonicalizer, Loader, LoaderConfig};
use std::io::Write;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    if let Ok(mut temp_file) = tempfile::NamedTempFile::new() {
        if temp_file.write_all(data).is_ok() {
            let loader = Loader::with_config(LoaderConfig::new(temp_file.path(), None));
            let raw = loader.load();
            let _ = Canonicalizer::new().canonicalize(raw);
        }
    }
});
