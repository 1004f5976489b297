#![no_main]

use httpt::config::types::ConfigFile;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let parsed: Option<ConfigFile> = toml::from_str(input).ok();
        let applied = httpt::fuzzing::apply_config_from_toml(input);
        if applied.is_ok() {
            if let Some(config) = parsed {
                debug_assert!(config.data.is_none() || config.data_file.is_none());
                debug_assert!(config.times != Some(0));
                debug_assert!(config.workers != Some(0));
                debug_assert!(config.monitor_buffer != Some(0));
            }
        }
    }
});
