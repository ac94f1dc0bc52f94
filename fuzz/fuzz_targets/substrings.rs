#![no_main]

use chars::CharSet;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First byte picks the minimum length, second the alphabet bound
    let [min_length, bound, rest @ ..] = data else {
        return;
    };
    let min_length = usize::from(*min_length % 16);
    let set = CharSet::from_bytes(0x20..=(*bound).max(0x20));

    let scanner = set.scanner(min_length);
    let runs: Vec<_> = scanner.scan(rest).collect();

    let mut previous_end = 0;
    for run in &runs {
        assert!(run.offset >= previous_end, "runs overlap or are out of order");
        assert!(run.len() >= min_length.max(1));
        assert!(set.matches(run.bytes));
        assert!(run.offset == 0 || !set.include_byte(rest[run.offset - 1]));
        assert!(run.end() == rest.len() || !set.include_byte(rest[run.end()]));
        previous_end = run.end();
    }

    let probed: Vec<_> = scanner.scan_probing(rest).collect();
    assert_eq!(runs, probed);
});
