// Copyright 2025 the Stackboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests: both backends keep z unique and agree on every layout.

use proptest::prelude::*;
use stackboard_store::backends::{MemTable, TableStore};
use stackboard_store::{InMemoryStore, Widget, WidgetDraft, WidgetStore};

#[derive(Debug, Clone)]
enum Op {
    Create(Option<i32>),
    /// Replace the n-th live widget (mod len) with a new z.
    Replace(usize, Option<i32>),
    /// Delete the n-th live widget (mod len).
    Delete(usize),
}

fn op() -> impl Strategy<Value = Op> {
    let z = prop::option::of(-20_i32..20);
    prop_oneof![
        3 => z.clone().prop_map(Op::Create),
        2 => (any::<usize>(), z).prop_map(|(i, z)| Op::Replace(i, z)),
        1 => any::<usize>().prop_map(Op::Delete),
    ]
}

/// Apply `op` and return the ordered layout as `(creation index, z)` pairs so
/// the two stores can be compared without relying on generated ids.
fn apply<S: WidgetStore>(store: &S, labels: &mut Vec<(String, usize)>, n: usize, op: &Op) {
    let live = store.find_all().unwrap();
    match op {
        Op::Create(z) => {
            let draft = WidgetDraft {
                z: *z,
                ..WidgetDraft::new(0, 0, 2, 2)
            };
            let w = store.create_or_replace(draft).unwrap();
            labels.push((w.id.to_string(), n));
        }
        Op::Replace(i, z) if !live.is_empty() => {
            let mut draft = live[i % live.len()].to_draft();
            draft.z = *z;
            store.create_or_replace(draft).unwrap();
        }
        Op::Delete(i) if !live.is_empty() => {
            store.delete_by_id(&live[i % live.len()].id).unwrap();
        }
        _ => {}
    }
}

fn layout(store: &dyn WidgetStore, labels: &[(String, usize)]) -> Vec<(usize, i32)> {
    let label = |w: &Widget| {
        labels
            .iter()
            .find(|(id, _)| id == w.id.as_str())
            .map(|(_, n)| *n)
            .unwrap()
    };
    store
        .find_all_ordered(1, usize::MAX)
        .unwrap()
        .iter()
        .map(|w| (label(w), w.z))
        .collect()
}

proptest! {
    #[test]
    fn z_stays_unique_and_backends_agree(ops in prop::collection::vec(op(), 1..60)) {
        let memory = InMemoryStore::new();
        let table = TableStore::new(MemTable::new());
        let mut memory_labels = Vec::new();
        let mut table_labels = Vec::new();

        for (n, op) in ops.iter().enumerate() {
            apply(&memory, &mut memory_labels, n, op);
            apply(&table, &mut table_labels, n, op);

            let zs: Vec<i32> = memory.find_all().unwrap().iter().map(|w| w.z).collect();
            prop_assert!(zs.windows(2).all(|p| p[0] < p[1]), "duplicate or unordered z: {:?}", zs);
            prop_assert_eq!(
                layout(&memory, &memory_labels),
                layout(&table, &table_labels)
            );
        }
    }

    #[test]
    fn pages_cover_everything_once(
        count in 0_usize..80,
        per_page in 1_usize..25,
        table in any::<bool>(),
    ) {
        let store: Box<dyn WidgetStore> = if table {
            Box::new(TableStore::new(MemTable::new()))
        } else {
            Box::new(InMemoryStore::new())
        };
        for _ in 0..count {
            store.create_or_replace(WidgetDraft::new(0, 0, 1, 1)).unwrap();
        }
        let mut joined = Vec::new();
        let mut page = 1;
        loop {
            let chunk = store.find_all_ordered(page, per_page).unwrap();
            if chunk.is_empty() {
                break;
            }
            prop_assert!(chunk.len() <= per_page);
            joined.extend(chunk);
            page += 1;
        }
        prop_assert_eq!(joined, store.find_all_ordered(1, usize::MAX).unwrap());
    }
}
