// Copyright 2025 the Stackboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end board scenarios, run against every storage kind.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::thread;

use stackboard::{
    Area, Config, Error, PagingConfig, StorageKind, Widget, WidgetDescription, WidgetId,
    WidgetManager,
};
use tracing_subscriber::layer::SubscriberExt;

const KINDS: [StorageKind; 2] = [StorageKind::InMemory, StorageKind::Table];

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn board(storage: StorageKind) -> WidgetManager {
    init_tracing();
    WidgetManager::from_config(&Config {
        storage,
        ..Config::default()
    })
}

#[test]
fn claiming_an_occupied_z_pushes_the_occupant_up() {
    for kind in KINDS {
        let board = board(kind);
        let first = board.create(&WidgetDescription::new(1, 1, 1, 1)).unwrap();
        assert_eq!(first.z, 0);

        let second = board
            .create(&WidgetDescription::new(1, 1, 1, 1).with_z(0))
            .unwrap();
        assert_eq!(second.z, 0);
        assert_eq!(board.find_by_id(&first.id).unwrap().z, 1);

        let ids: Vec<_> = board
            .list_paged(1, 10)
            .unwrap()
            .into_iter()
            .map(|w| w.id)
            .collect();
        assert_eq!(ids, [second.id, first.id], "{kind:?}");
    }
}

#[test]
fn hundred_widgets_page_in_z_order() {
    for kind in KINDS {
        let board = board(kind);
        for _ in 0..100 {
            board.create(&WidgetDescription::new(0, 0, 5, 5)).unwrap();
        }
        let zs: Vec<i32> = board.list_paged(2, 50).unwrap().iter().map(|w| w.z).collect();
        assert_eq!(zs, (50..100).collect::<Vec<_>>(), "{kind:?}");
        assert!(board.list_paged(3, 50).unwrap().is_empty());
        assert_eq!(board.count().unwrap(), 100);
    }
}

#[test]
fn deleting_an_unknown_id_changes_nothing() {
    for kind in KINDS {
        let board = board(kind);
        board.create(&WidgetDescription::new(0, 0, 1, 1)).unwrap();
        let id = WidgetId::from("missing");
        let err = board.delete(&id).unwrap_err();
        assert_eq!(err, Error::NotFound { id });
        assert_eq!(err.status_hint(), 404);
        assert_eq!(board.count().unwrap(), 1);
    }
}

#[test]
fn concurrent_creates_keep_z_unique() {
    for kind in KINDS {
        let board = board(kind);
        thread::scope(|s| {
            for _ in 0..10 {
                let board = board.clone();
                s.spawn(move || {
                    for _ in 0..10 {
                        board
                            .create(&WidgetDescription::new(3, 3, 2, 2).with_z(1))
                            .unwrap();
                    }
                });
            }
        });

        let all = board.list_paged(1, 500).unwrap();
        assert_eq!(all.len(), 100, "{kind:?}");
        assert!(all.windows(2).all(|p| p[0].z < p[1].z), "{kind:?}");
        assert!(all.iter().all(|w| w.last_modified >= w.created), "{kind:?}");
        assert_eq!(board.count().unwrap(), 100);
    }
}

fn assert_untorn(snapshot: &[Widget], kind: StorageKind) {
    assert!(
        snapshot.windows(2).all(|p| p[0].z < p[1].z),
        "{kind:?}: {:?}",
        snapshot.iter().map(|w| w.z).collect::<Vec<_>>()
    );
    let ids: HashSet<&WidgetId> = snapshot.iter().map(|w| &w.id).collect();
    assert_eq!(ids.len(), snapshot.len(), "{kind:?}");
}

#[test]
fn readers_only_see_complete_states() {
    for kind in KINDS {
        let board = board(kind);
        for _ in 0..10 {
            board.create(&WidgetDescription::new(0, 0, 2, 2)).unwrap();
        }
        thread::scope(|s| {
            for _ in 0..4 {
                let board = board.clone();
                s.spawn(move || {
                    for _ in 0..25 {
                        let w = board
                            .create(&WidgetDescription::new(0, 0, 2, 2).with_z(0))
                            .unwrap();
                        board.create(&WidgetDescription::new(0, 0, 2, 2).with_z(4)).unwrap();
                        board.delete(&w.id).unwrap();
                    }
                });
            }
            for _ in 0..4 {
                let board = board.clone();
                s.spawn(move || {
                    for _ in 0..100 {
                        assert_untorn(&board.store().find_all().unwrap(), kind);
                        assert_untorn(&board.list_paged(1, usize::MAX).unwrap(), kind);
                    }
                });
            }
        });

        let all = board.list_paged(1, usize::MAX).unwrap();
        assert_untorn(&all, kind);
        assert_eq!(all.len(), 110, "{kind:?}");
        assert_eq!(board.count().unwrap(), 110);
    }
}

#[test]
fn update_keeps_identity_and_creation_time() {
    for kind in KINDS {
        let board = board(kind);
        let before = board.create(&WidgetDescription::new(0, 0, 4, 4)).unwrap();
        let after = board
            .update(
                &before.id,
                &WidgetDescription {
                    width: Some(8),
                    z: Some(7),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(after.id, before.id);
        assert_eq!(after.created, before.created);
        assert!(after.last_modified >= before.last_modified);
        assert_eq!((after.width, after.height, after.z), (8, 4, 7));

        let listed = board.list_paged(1, 10).unwrap();
        assert_eq!(listed, [after], "{kind:?}");
    }
}

#[test]
fn returned_widgets_are_copies() {
    for kind in KINDS {
        let board = board(kind);
        let mut w = board.create(&WidgetDescription::new(0, 0, 1, 1)).unwrap();
        w.x = 99;
        w.z = 42;
        let stored = board.find_by_id(&w.id).unwrap();
        assert_eq!((stored.x, stored.z), (0, 0));
    }
}

#[test]
fn area_pages_follow_z_order() {
    for kind in KINDS {
        let board = board(kind);
        // Alternate inside and outside the area.
        for i in 0..10 {
            let x = if i % 2 == 0 { 0 } else { 1_000 };
            board.create(&WidgetDescription::new(x, 0, 10, 10)).unwrap();
        }
        let area = Area::new(-10, -10, 10, 10);
        let paging = PagingConfig::default();

        let first = board
            .list_in_area_request(&area, paging.resolve(Some(1), Some(3)))
            .unwrap();
        let second = board
            .list_in_area_request(&area, paging.resolve(Some(2), Some(3)))
            .unwrap();
        let zs = |ws: &[Widget]| ws.iter().map(|w| w.z).collect::<Vec<_>>();
        assert_eq!(zs(&first), [0, 2, 4], "{kind:?}");
        assert_eq!(zs(&second), [6, 8], "{kind:?}");
        assert!(board.list_in_area(&area, 3, 3).unwrap().is_empty());
    }
}

#[test]
fn validation_failures_reach_the_caller() {
    let board = board(StorageKind::InMemory);
    let err = board
        .create(&WidgetDescription::new(0, 0, 0, 5))
        .unwrap_err();
    assert!(matches!(err, Error::Validation { field: "width", .. }));
    assert_eq!(err.status_hint(), 400);
    assert_eq!(board.count().unwrap(), 0);
}

/// Collects the message of every event at or above `WARN`.
#[derive(Clone, Default)]
struct Warnings(Arc<Mutex<Vec<String>>>);

struct MessageVisitor<'a>(&'a mut String);

impl tracing::field::Visit for MessageVisitor<'_> {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            *self.0 = format!("{value:?}");
        }
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for Warnings {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        if *event.metadata().level() <= tracing::Level::WARN {
            let mut message = String::new();
            event.record(&mut MessageVisitor(&mut message));
            self.0.lock().unwrap().push(message);
        }
    }
}

#[test]
fn rejected_requests_are_logged_as_warnings() {
    let warnings = Warnings::default();
    let subscriber = tracing_subscriber::registry().with(warnings.clone());
    tracing::subscriber::with_default(subscriber, || {
        let board = WidgetManager::from_config(&Config::default());
        let _ = board.find_by_id(&WidgetId::from("ghost"));
        let _ = board.create(&WidgetDescription::default());
        board.create(&WidgetDescription::new(0, 0, 1, 1)).unwrap();
    });

    let seen = warnings.0.lock().unwrap();
    assert_eq!(
        *seen,
        ["widget not found", "rejected widget description"],
        "{seen:?}"
    );
}
