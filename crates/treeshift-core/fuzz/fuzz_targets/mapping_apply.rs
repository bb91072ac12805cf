//! Fuzzing target for applying mappings
//!
//! Splits the input into a mapping pair and a document, then applies the
//! compiled pair to a fixed set of awkward documents plus the fuzzed one.

#![no_main]

use libfuzzer_sys::fuzz_target;
use serde_json::{json, Value};
use treeshift_core::{MappingTable, ShiftOptions, Shifter};

fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }

    let first = (data[0] as usize) % data.len();
    let second = first + (data[1] as usize) % (data.len() - first);
    let rest = &data[2..];
    let first = first.min(rest.len());
    let second = second.clamp(first, rest.len());

    let source = String::from_utf8_lossy(&rest[..first]);
    let destination = String::from_utf8_lossy(&rest[first..second]);

    let Ok(shifter) = Shifter::new(MappingTable::new().with(source, destination)) else {
        return;
    };

    let documents = vec![
        json!(null),
        json!(42),
        json!([]),
        json!({}),
        json!([[1, [2]], {"a": [3]}]),
        json!({"a": {"b": [{"c": null}, 1, "x"]}}),
        json!({"a": [[{"b": []}]]}),
    ];
    for document in &documents {
        let _ = shifter.apply(document, ShiftOptions::new().continue_on_error());
        let _ = shifter.apply(document, ShiftOptions::new().with_destination(json!([1, {"a": 2}])));
    }

    if let Ok(document) = serde_json::from_slice::<Value>(&rest[second..]) {
        let _ = shifter.apply(&document, ShiftOptions::default());
    }
});
