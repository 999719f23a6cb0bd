#![no_main]

use gstify::core::{BusinessConfig, Platform, Workbook};
use gstify::files::read_csv;
use gstify::ingest::{self, Context};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(table) = read_csv("fuzz", data) else {
        return;
    };
    let workbook: Workbook = table.into();
    let ctx = Context::new(&BusinessConfig::default());
    // Rejections are fine; panics are bugs.
    for platform in Platform::ALL {
        let _ = ingest::run(platform, &workbook, &ctx);
    }
});
