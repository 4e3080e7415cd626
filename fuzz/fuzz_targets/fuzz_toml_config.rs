#![no_main]

use datavail_config::TomlConfig;
use libfuzzer_sys::fuzz_target;

const MAX_INPUT_SIZE: usize = 16 * 1024;

fuzz_target!(|data: &[u8]| {
    if data.len() > MAX_INPUT_SIZE {
        return;
    }
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = TomlConfig::parse(text) {
        // Merging with defaults never fails.
        let _ = config.settings();
    }
});
