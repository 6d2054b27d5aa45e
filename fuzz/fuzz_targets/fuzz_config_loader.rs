#![no_main]

use dhsvm_config::config::ConfigLoader;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let loader = ConfigLoader::with_defaults();

        // Must never panic; a successful load must be repeatable.
        if let Ok(first) = loader.load_from_str(text) {
            let second = loader
                .load_from_str(text)
                .expect("second load of accepted input failed");
            assert_eq!(first.config, second.config);
        }
    }
});
