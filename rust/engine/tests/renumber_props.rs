// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use poleline_engine::{renumber, Asset, Assignment, MatchRule};
use poleline_geometry::Point2;
use proptest::prelude::*;

#[derive(Debug)]
struct Record;

fn zone_name() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["LINE A", "LINE B", "LINE C", "LINE 10"]).prop_map(String::from)
}

fn assignment_specs() -> impl Strategy<Value = Vec<(String, f64)>> {
    prop::collection::vec((zone_name(), -500.0f64..500.0), 0..300)
}

fn assignments<'a>(record: &'a Record, specs: &[(String, f64)]) -> Vec<Assignment<'a, Record>> {
    specs
        .iter()
        .enumerate()
        .map(|(i, (zone, key))| Assignment {
            asset: Asset::new(format!("pole-{}", i), Point2::new(*key, 0.0), record),
            zone: zone.clone(),
            ordering_key: *key,
            rule: MatchRule::ReferencePath,
            boundary: None,
        })
        .collect()
}

proptest! {
    #[test]
    fn labels_are_contiguous_from_one(specs in assignment_specs()) {
        let record = Record;
        let labeled = renumber(assignments(&record, &specs), "P", 3).unwrap();

        prop_assert_eq!(labeled.len(), specs.len());
        for (i, item) in labeled.iter().enumerate() {
            prop_assert_eq!(item.sequence, i as u64 + 1);
            prop_assert_eq!(&item.label, &format!("P{:03}", i + 1));
        }
    }

    #[test]
    fn output_is_sorted_by_zone_then_key(specs in assignment_specs()) {
        let record = Record;
        let labeled = renumber(assignments(&record, &specs), "", 3).unwrap();

        for pair in labeled.windows(2) {
            let (a, b) = (&pair[0].assignment, &pair[1].assignment);
            prop_assert!(
                a.zone < b.zone || (a.zone == b.zone && a.ordering_key <= b.ordering_key),
                "{} {} before {} {}", a.zone, a.ordering_key, b.zone, b.ordering_key
            );
        }
    }

    #[test]
    fn renumbering_is_deterministic(specs in assignment_specs()) {
        let record = Record;
        let summarize = |specs: &[(String, f64)]| -> Vec<(String, String)> {
            renumber(assignments(&record, specs), "X-", 4)
                .unwrap()
                .into_iter()
                .map(|item| (item.assignment.asset.label, item.label))
                .collect()
        };

        prop_assert_eq!(summarize(&specs), summarize(&specs));
    }

    #[test]
    fn overflow_only_past_capacity(count in 0usize..40, pad_width in 1usize..3) {
        let record = Record;
        let specs: Vec<_> = (0..count).map(|i| ("LINE A".to_string(), i as f64)).collect();
        let result = renumber(assignments(&record, &specs), "", pad_width);

        let capacity = 10usize.pow(pad_width as u32) - 1;
        prop_assert_eq!(result.is_ok(), count <= capacity);
    }
}
