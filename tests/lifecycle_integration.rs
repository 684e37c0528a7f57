//! Behavioural integration tests for the production lifecycle manager.
//!
//! These tests exercise the crate's public API against the in-memory
//! backend in realistic workshop flows, verifying stage advancement,
//! the rejection/rework cycle, and artist reassignment end to end.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use std::sync::Arc;

use atelier::production::{
    adapters::memory::{InMemoryProductionBackend, RecordingCompletionSink},
    domain::{
        ArtistId, ItemId, ProductionTask, ProductionTaskData, Quantity, ReworkDepartment, Stage,
        TaskId, TaskStatus,
    },
    ports::ArtistProfile,
    services::{LifecycleError, ProductionLifecycleService},
};
use chrono::NaiveDate;
use mockable::DefaultClock;
use tokio::runtime::Runtime;

type Service = ProductionLifecycleService<
    InMemoryProductionBackend,
    InMemoryProductionBackend,
    RecordingCompletionSink,
    DefaultClock,
>;

/// Creates a tokio runtime for async operations in tests.
fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

struct Workshop {
    backend: Arc<InMemoryProductionBackend>,
    completions: Arc<RecordingCompletionSink>,
    service: Service,
}

fn workshop() -> Workshop {
    let backend = Arc::new(InMemoryProductionBackend::new());
    backend
        .insert_artist(ArtistProfile::new(artist(3), "John Doe"))
        .expect("seed artist");
    backend
        .insert_artist(ArtistProfile::new(artist(4), "Jane Smith"))
        .expect("seed artist");
    let completions = Arc::new(RecordingCompletionSink::new());
    let service = ProductionLifecycleService::new(
        Arc::clone(&backend),
        Arc::clone(&backend),
        Arc::clone(&completions),
        Arc::new(DefaultClock),
    );
    Workshop {
        backend,
        completions,
        service,
    }
}

fn artist(value: u64) -> ArtistId {
    ArtistId::new(value).expect("valid artist id")
}

fn seed_task(backend: &InMemoryProductionBackend, stage: Stage) -> ProductionTask {
    let task = ProductionTask::from_parts(ProductionTaskData {
        id: TaskId::new(1).expect("valid task id"),
        item_ref: ItemId::new(7).expect("valid item id"),
        item_name: "Elephant Table".to_owned(),
        artist_ref: artist(3),
        artist_name: "John Doe".to_owned(),
        quantity: Quantity::new(10).expect("valid quantity"),
        accepted: 0,
        current_stage: stage,
        status: TaskStatus::InProgress,
        rejection_count: 0,
        notes: String::new(),
        start_date: NaiveDate::from_ymd_opt(2024, 8, 3).expect("valid date"),
        end_date: NaiveDate::from_ymd_opt(2024, 8, 10).expect("valid date"),
    })
    .expect("valid task data");
    backend.insert_task(task.clone()).expect("seed task");
    task
}

#[test]
fn completing_a_packaging_task_emits_exactly_one_signal() {
    let rt = test_runtime();
    let shop = workshop();
    let task = seed_task(&shop.backend, Stage::Packaging);

    let completed = rt
        .block_on(shop.service.advance_stage(&task, Some(8)))
        .expect("completion should succeed");

    assert_eq!(completed.current_stage(), Stage::Done);
    assert_eq!(completed.status(), TaskStatus::Completed);
    assert_eq!(completed.accepted(), 8);
    assert_eq!(shop.completions.events().len(), 1);

    // A second advancement must fail without mutating anything.
    let repeat = rt.block_on(shop.service.advance_stage(&completed, Some(8)));
    assert!(matches!(repeat, Err(LifecycleError::Validation(_))));

    let stored = shop
        .backend
        .task(completed.id())
        .expect("backend readable")
        .expect("task present");
    assert_eq!(stored, completed);
    assert_eq!(shop.completions.events().len(), 1);
}

#[test]
fn rejection_cycle_preserves_the_counter_invariant() {
    let rt = test_runtime();
    let shop = workshop();
    let task = seed_task(&shop.backend, Stage::Painting);

    let referral = rt
        .block_on(shop.service.refer_to_rework(&task, ReworkDepartment::Carpentry))
        .expect("referral should succeed");
    assert_eq!(referral.task.rejection_count(), 1);
    assert_eq!(referral.task.current_stage(), Stage::Painting);

    let open = rt
        .block_on(shop.service.outstanding_rejections(&referral.task))
        .expect("listing should succeed");
    assert_eq!(open.len(), referral.task.rejection_count() as usize);

    let blocked = rt.block_on(shop.service.advance_stage(&referral.task, None));
    assert!(matches!(blocked, Err(LifecycleError::Validation(_))));

    let resolution = rt
        .block_on(
            shop.service
                .mark_rework_fixed(&referral.task, &referral.record),
        )
        .expect("resolution should succeed");
    assert!(resolution.record.is_fixed());
    assert_eq!(resolution.task.rejection_count(), 0);

    let remaining = rt
        .block_on(shop.service.outstanding_rejections(&resolution.task))
        .expect("listing should succeed");
    assert!(remaining.is_empty());

    let advanced = rt
        .block_on(shop.service.advance_stage(&resolution.task, None))
        .expect("advancement should succeed once fixed");
    assert_eq!(advanced.current_stage(), Stage::Finishing);
}

#[test]
fn artists_can_be_reassigned_after_completion() {
    let rt = test_runtime();
    let shop = workshop();
    let task = seed_task(&shop.backend, Stage::Packaging);

    let completed = rt
        .block_on(shop.service.advance_stage(&task, Some(10)))
        .expect("completion should succeed");

    let reassigned = rt
        .block_on(shop.service.reassign_artist(&completed, artist(4)))
        .expect("reassignment should succeed");

    assert_eq!(reassigned.artist_ref(), artist(4));
    assert_eq!(reassigned.artist_name(), "Jane Smith");
    assert_eq!(reassigned.current_stage(), Stage::Done);

    // Reassigning to the same artist is an idempotent no-op.
    let unchanged = rt
        .block_on(shop.service.reassign_artist(&reassigned, artist(4)))
        .expect("idempotent reassignment should succeed");
    assert_eq!(unchanged, reassigned);
}
