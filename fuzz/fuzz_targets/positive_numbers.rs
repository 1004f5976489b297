#![no_main]

use libfuzzer_sys::fuzz_target;

// `--times`, `--workers` and `--monitor-buffer` must accept exactly the
// non-zero integers, and the config file must agree with the CLI.
fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let plain = input.trim().parse::<u64>();

    match (httpt::fuzzing::parse_positive_u64_input(input), plain.as_ref()) {
        (Ok(value), Ok(expected)) => debug_assert!(value == *expected && value >= 1),
        (Ok(_), Err(_)) => debug_assert!(false, "accepted non-integer {:?}", input),
        (Err(_), Ok(expected)) => debug_assert_eq!(*expected, 0),
        (Err(_), Err(_)) => {}
    }

    let as_usize = httpt::fuzzing::parse_positive_usize_input(input);
    debug_assert_eq!(
        as_usize.is_ok(),
        input.trim().parse::<usize>().is_ok_and(|value| value > 0)
    );

    if let Ok(value) = plain {
        for field in ["times", "workers", "monitor_buffer"] {
            let applied = httpt::fuzzing::apply_config_from_toml(&format!("{} = {}\n", field, value));
            // TOML integers are signed 64-bit.
            let fits = i64::try_from(value).is_ok()
                && (field == "times" || usize::try_from(value).is_ok());
            if fits {
                debug_assert_eq!(applied.is_ok(), value > 0);
            }
        }
    }
});
