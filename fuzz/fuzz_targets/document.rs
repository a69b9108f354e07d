#![no_main]

use colscope_core::{run_extraction, DocumentConnector, ExtractionOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(connector) = DocumentConnector::from_reader(data) {
        let _ = run_extraction(&connector, &ExtractionOptions::default());
    }
});
