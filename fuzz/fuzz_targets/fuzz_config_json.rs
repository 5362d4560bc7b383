#![no_main]

use folio::config::FolioConfig;
use folio::portfolio::Catalog;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Config and catalog files are user-editable JSON; parsing must never panic
    if let Ok(s) = std::str::from_utf8(data) {
        let _config: Result<FolioConfig, _> = serde_json::from_str(s);
        if let Ok(mut catalog) = serde_json::from_str::<Catalog>(s) {
            catalog.sort();
        }
    }
});
