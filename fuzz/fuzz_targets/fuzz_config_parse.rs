#![no_main]

use libfuzzer_sys::fuzz_target;

use stakedao_ledger::LedgerConfig;

// Parsing arbitrary text as configuration must never panic, and anything that
// parses and validates must survive a TOML round trip.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(config) = LedgerConfig::from_toml_str(text) else {
        return;
    };
    if config.validate().is_err() {
        return;
    }
    let rendered = config.to_toml_string().expect("valid config serializes");
    let reparsed = LedgerConfig::from_toml_str(&rendered).expect("rendered config parses");
    assert_eq!(reparsed, config);
});
