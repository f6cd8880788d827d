//! Serialized-shape tests for the structures handed to external
//! consumers.
//!
//! The JSON forms of readings and coverage reports are a de facto
//! interface: the CLI emits them with `--json` and downstream tooling
//! keys on field names. These snapshots pin the shapes so a rename or
//! reorder shows up as a reviewed diff, not a silent break.

use dps_decode::{DecoderRegistry, KeyDecoder};
use dps_monitor::compute_coverage;
use dps_types::{KeyId, RawSnapshot, RawValue};

fn keys(list: &[&str]) -> Vec<KeyId> {
    list.iter().map(|&k| k.into()).collect()
}

#[test]
fn battery_reading_shape() {
    let snapshot = RawSnapshot::from_entries([("163", RawValue::Int(87))]);
    let registry = DecoderRegistry::standard();
    let battery = registry.iter().find(|d| d.name() == "battery").unwrap();
    let reading = battery.decode(&snapshot).unwrap();

    insta::assert_json_snapshot!(reading, @r#"
    {
      "source_keys": [
        "163"
      ],
      "value": {
        "type": "percent",
        "value": 87,
        "band": "high"
      },
      "unit": "%",
      "confidence": 100,
      "method": "key 163 raw level (newer app source, exact match to vendor display)",
      "raw_inputs": {
        "163": 87
      }
    }
    "#);
}

#[test]
fn coverage_report_shape() {
    let snapshot = RawSnapshot::from_entries([
        ("163", RawValue::Int(87)),
        ("158", RawValue::Int(2)),
        ("154", RawValue::Text("x".into())),
    ]);
    let report = compute_coverage(&snapshot, &keys(&["163", "167", "158", "152"]));

    insta::assert_json_snapshot!(report, @r#"
    {
      "statuses": [
        {
          "key": "163",
          "expected": true,
          "present": true
        },
        {
          "key": "167",
          "expected": true,
          "present": false
        },
        {
          "key": "158",
          "expected": true,
          "present": true
        },
        {
          "key": "152",
          "expected": true,
          "present": false
        }
      ],
      "found_count": 2,
      "total_expected": 4,
      "ratio": 0.5,
      "unexpected": [
        "154"
      ]
    }
    "#);
}

#[test]
fn work_status_partial_shape() {
    let snapshot = RawSnapshot::from_entries([("153", RawValue::Int(5))]);
    let registry = DecoderRegistry::standard();
    let work_status = registry
        .iter()
        .find(|d| d.name() == "work_status")
        .unwrap();
    let reading = work_status.decode(&snapshot).unwrap();

    insta::assert_json_snapshot!(reading.value, @r#"
    {
      "type": "work_status",
      "status": {
        "state": "present",
        "value": "cleaning"
      },
      "play_pause": {
        "state": "missing"
      }
    }
    "#);
}
