//! Fuzzing target for mapping compilation
//!
//! Any pair of path strings must either compile or fail with an error,
//! never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use treeshift_core::compile_pair;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // First byte picks where the source path ends
    let split_point = (data[0] as usize) % data.len();
    let (source, destination) = data[1..].split_at(split_point.min(data.len() - 1));

    let source = String::from_utf8_lossy(source);
    let destination = String::from_utf8_lossy(destination);
    let _ = compile_pair(&source, &destination);
});
