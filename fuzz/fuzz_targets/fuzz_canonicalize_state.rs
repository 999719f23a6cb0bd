#![no_main]

use gstify::core::canonicalize_state;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let once = canonicalize_state(s);
        let _ = canonicalize_state(&once.to_string());
    }
});
