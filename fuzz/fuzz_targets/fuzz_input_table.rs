#![no_main]

use dhsvm_config::config::InputTable;
use libfuzzer_sys::fuzz_target;
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = InputTable::parse(text, Path::new("fuzz.cfg"));
    }
});
