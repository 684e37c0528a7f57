//! Service orchestration tests over the in-memory backend.

use std::sync::Arc;

use crate::production::{
    adapters::memory::{InMemoryProductionBackend, RecordingCompletionSink},
    domain::{ReworkDepartment, Stage, TaskDomainError, TaskStatus},
    ports::{ArtistProfile, GatewayError},
    services::{LifecycleError, ProductionLifecycleService},
    tests::fixtures::{artist_id, task_at, task_id, task_with},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService = ProductionLifecycleService<
    InMemoryProductionBackend,
    InMemoryProductionBackend,
    RecordingCompletionSink,
    DefaultClock,
>;

struct Harness {
    backend: Arc<InMemoryProductionBackend>,
    completions: Arc<RecordingCompletionSink>,
    service: TestService,
}

#[fixture]
fn harness() -> Harness {
    let backend = Arc::new(InMemoryProductionBackend::new());
    backend
        .insert_artist(ArtistProfile::new(artist_id(3), "John Doe"))
        .expect("seed artist");
    backend
        .insert_artist(ArtistProfile::new(artist_id(4), "Jane Smith"))
        .expect("seed artist");
    let completions = Arc::new(RecordingCompletionSink::new());
    let service = ProductionLifecycleService::new(
        Arc::clone(&backend),
        Arc::clone(&backend),
        Arc::clone(&completions),
        Arc::new(DefaultClock),
    );
    Harness {
        backend,
        completions,
        service,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn advance_walks_the_full_stage_sequence(harness: Harness) {
    let mut task = task_at(Stage::Ordered);
    harness
        .backend
        .insert_task(task.clone())
        .expect("seed task");

    let intermediate = [
        Stage::SplittingDrawing,
        Stage::CarvingCutting,
        Stage::Sanding,
        Stage::Painting,
        Stage::Finishing,
        Stage::Packaging,
    ];
    for expected in intermediate {
        task = harness
            .service
            .advance_stage(&task, None)
            .await
            .expect("intermediate advancement should succeed");
        assert_eq!(task.current_stage(), expected);
        assert_eq!(task.status(), TaskStatus::InProgress);
    }
    assert!(harness.completions.events().is_empty());

    task = harness
        .service
        .advance_stage(&task, Some(8))
        .await
        .expect("completion should succeed");

    assert_eq!(task.current_stage(), Stage::Done);
    assert_eq!(task.status(), TaskStatus::Completed);
    assert_eq!(task.accepted(), 8);

    let events = harness.completions.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events.first().map(|event| event.task_id), Some(task.id()));
    assert_eq!(events.first().map(|event| event.accepted), Some(8));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn advancing_a_completed_task_changes_nothing(harness: Harness) {
    let task = task_with(Stage::Done, TaskStatus::Completed, 0);
    harness
        .backend
        .insert_task(task.clone())
        .expect("seed task");

    let result = harness.service.advance_stage(&task, Some(8)).await;

    assert!(matches!(
        result,
        Err(LifecycleError::Validation(TaskDomainError::TaskCompleted(_)))
    ));
    let stored = harness
        .backend
        .task(task.id())
        .expect("backend readable")
        .expect("task present");
    assert_eq!(stored, task);
    assert!(harness.completions.events().is_empty());
}

#[rstest]
#[case(Some(0))]
#[case(None)]
#[case(Some(11))]
#[tokio::test(flavor = "multi_thread")]
async fn completion_gating_refuses_bad_accepted_counts(
    harness: Harness,
    #[case] accepted: Option<u32>,
) {
    let task = task_at(Stage::Packaging);
    harness
        .backend
        .insert_task(task.clone())
        .expect("seed task");

    let result = harness.service.advance_stage(&task, accepted).await;

    assert!(matches!(
        result,
        Err(LifecycleError::Validation(
            TaskDomainError::AcceptedCountOutOfRange { .. }
        ))
    ));
    let stored = harness
        .backend
        .task(task.id())
        .expect("backend readable")
        .expect("task present");
    assert_eq!(stored.current_stage(), Stage::Packaging);
    assert!(harness.completions.events().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn referral_creates_record_and_increments_counter(harness: Harness) {
    let task = task_at(Stage::Painting);
    harness
        .backend
        .insert_task(task.clone())
        .expect("seed task");

    let referral = harness
        .service
        .refer_to_rework(&task, ReworkDepartment::Sanding)
        .await
        .expect("referral should succeed");

    assert_eq!(referral.record.task_ref(), task.id());
    assert_eq!(referral.record.stage(), Stage::Painting);
    assert_eq!(referral.record.department(), ReworkDepartment::Sanding);
    assert!(!referral.record.is_fixed());
    assert_eq!(referral.task.rejection_count(), 1);
    assert_eq!(referral.task.current_stage(), Stage::Painting);
    assert_eq!(referral.task.status(), task.status());

    let open = harness
        .backend
        .open_rejection_count(task.id())
        .expect("backend readable");
    assert_eq!(open, referral.task.rejection_count() as usize);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn referral_is_refused_on_a_finished_task(harness: Harness) {
    let task = task_with(Stage::Done, TaskStatus::Completed, 0);
    harness
        .backend
        .insert_task(task.clone())
        .expect("seed task");

    let result = harness
        .service
        .refer_to_rework(&task, ReworkDepartment::Carpentry)
        .await;

    assert!(matches!(
        result,
        Err(LifecycleError::Validation(TaskDomainError::TaskCompleted(_)))
    ));
    let open = harness
        .backend
        .open_rejection_count(task.id())
        .expect("backend readable");
    assert_eq!(open, 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejections_block_advancement_until_fixed(harness: Harness) {
    let task = task_at(Stage::Painting);
    harness
        .backend
        .insert_task(task.clone())
        .expect("seed task");

    let referral = harness
        .service
        .refer_to_rework(&task, ReworkDepartment::Carpentry)
        .await
        .expect("referral should succeed");

    let blocked = harness.service.advance_stage(&referral.task, None).await;
    assert!(matches!(
        blocked,
        Err(LifecycleError::Validation(
            TaskDomainError::RejectionsOutstanding { .. }
        ))
    ));

    let resolution = harness
        .service
        .mark_rework_fixed(&referral.task, &referral.record)
        .await
        .expect("resolution should succeed");
    assert_eq!(resolution.task.rejection_count(), 0);

    let advanced = harness
        .service
        .advance_stage(&resolution.task, None)
        .await
        .expect("advancement should succeed once fixed");
    assert_eq!(advanced.current_stage(), Stage::Finishing);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn fixing_the_last_rejection_restores_progress(harness: Harness) {
    let task = task_with(Stage::Painting, TaskStatus::Pending, 0);
    harness
        .backend
        .insert_task(task.clone())
        .expect("seed task");

    let referral = harness
        .service
        .refer_to_rework(&task, ReworkDepartment::Carpentry)
        .await
        .expect("referral should succeed");
    let resolution = harness
        .service
        .mark_rework_fixed(&referral.task, &referral.record)
        .await
        .expect("resolution should succeed");

    assert!(resolution.record.is_fixed());
    assert_eq!(resolution.task.rejection_count(), 0);
    assert_eq!(resolution.task.status(), TaskStatus::InProgress);
    let open = harness
        .backend
        .open_rejection_count(task.id())
        .expect("backend readable");
    assert_eq!(open, 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn fixing_one_of_two_rejections_keeps_status(harness: Harness) {
    let task = task_with(Stage::Painting, TaskStatus::Pending, 0);
    harness
        .backend
        .insert_task(task.clone())
        .expect("seed task");

    let first = harness
        .service
        .refer_to_rework(&task, ReworkDepartment::Carpentry)
        .await
        .expect("first referral should succeed");
    let second = harness
        .service
        .refer_to_rework(&first.task, ReworkDepartment::Painting)
        .await
        .expect("second referral should succeed");

    let resolution = harness
        .service
        .mark_rework_fixed(&second.task, &first.record)
        .await
        .expect("resolution should succeed");

    assert_eq!(resolution.task.rejection_count(), 1);
    assert_eq!(resolution.task.status(), TaskStatus::Pending);
    let open = harness
        .backend
        .open_rejection_count(task.id())
        .expect("backend readable");
    assert_eq!(open, 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn fixed_records_cannot_be_fixed_again(harness: Harness) {
    let task = task_at(Stage::Painting);
    harness
        .backend
        .insert_task(task.clone())
        .expect("seed task");

    let referral = harness
        .service
        .refer_to_rework(&task, ReworkDepartment::Carpentry)
        .await
        .expect("referral should succeed");
    let resolution = harness
        .service
        .mark_rework_fixed(&referral.task, &referral.record)
        .await
        .expect("resolution should succeed");

    // The refreshed record snapshot is refused before any call is issued.
    let repeat = harness
        .service
        .mark_rework_fixed(&resolution.task, &resolution.record)
        .await;
    assert!(matches!(
        repeat,
        Err(LifecycleError::Validation(
            TaskDomainError::RecordAlreadyFixed(_)
        ))
    ));

    // A stale pending snapshot passes client validation and is refused by
    // the backend instead.
    let stale = harness
        .service
        .mark_rework_fixed(&resolution.task, &referral.record)
        .await;
    assert!(matches!(
        stale,
        Err(LifecycleError::Transport(GatewayError::Rejected {
            status: 400,
            ..
        }))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reassignment_updates_the_artist_at_any_stage(harness: Harness) {
    let task = task_with(Stage::Done, TaskStatus::Completed, 0);
    harness
        .backend
        .insert_task(task.clone())
        .expect("seed task");

    let updated = harness
        .service
        .reassign_artist(&task, artist_id(4))
        .await
        .expect("reassignment should succeed");

    assert_eq!(updated.artist_ref(), artist_id(4));
    assert_eq!(updated.artist_name(), "Jane Smith");
    assert_eq!(updated.current_stage(), Stage::Done);
    assert_eq!(updated.status(), TaskStatus::Completed);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reassignment_to_an_unknown_artist_is_refused(harness: Harness) {
    let task = task_at(Stage::Sanding);
    harness
        .backend
        .insert_task(task.clone())
        .expect("seed task");

    let result = harness.service.reassign_artist(&task, artist_id(99)).await;

    assert!(matches!(
        result,
        Err(LifecycleError::Validation(TaskDomainError::UnknownArtist(_)))
    ));
    let stored = harness
        .backend
        .task(task.id())
        .expect("backend readable")
        .expect("task present");
    assert_eq!(stored.artist_ref(), artist_id(3));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reload_returns_the_backend_snapshot(harness: Harness) {
    let task = task_at(Stage::Sanding);
    harness
        .backend
        .insert_task(task.clone())
        .expect("seed task");

    let fetched = harness
        .service
        .reload_task(task.id())
        .await
        .expect("reload should succeed");
    assert_eq!(fetched, task);

    let missing = harness.service.reload_task(task_id(2)).await;
    assert!(matches!(
        missing,
        Err(LifecycleError::Transport(GatewayError::TaskNotFound(_)))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn outstanding_rejections_match_the_counter(harness: Harness) {
    let task = task_at(Stage::CarvingCutting);
    harness
        .backend
        .insert_task(task.clone())
        .expect("seed task");

    let first = harness
        .service
        .refer_to_rework(&task, ReworkDepartment::Carpentry)
        .await
        .expect("first referral should succeed");
    let second = harness
        .service
        .refer_to_rework(&first.task, ReworkDepartment::Sanding)
        .await
        .expect("second referral should succeed");

    let open = harness
        .service
        .outstanding_rejections(&second.task)
        .await
        .expect("listing should succeed");
    assert_eq!(open.len(), second.task.rejection_count() as usize);

    let resolution = harness
        .service
        .mark_rework_fixed(&second.task, &first.record)
        .await
        .expect("resolution should succeed");
    let remaining = harness
        .service
        .outstanding_rejections(&resolution.task)
        .await
        .expect("listing should succeed");
    assert_eq!(remaining.len(), 1);
    assert_eq!(
        remaining.first().map(|record| record.id()),
        Some(second.record.id())
    );
}
