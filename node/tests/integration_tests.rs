//! Integration tests exercising the registry service end to end:
//! concurrent callers → serialized commits → events → snapshot on disk → reopen.

use std::collections::HashSet;
use std::sync::Arc;

use hqa_node::{NodeConfig, NodeError, RegistryService};
use hqa_nullables::NullClock;
use hqa_registry::{HousingRegistry, RegistryError, RegistryEvent};
use hqa_types::{AccountId, AssessmentId, PropertyToken, Timestamp};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const OWNER: &str = "0x00000000000000000000000000000000000000aa";

fn owner() -> AccountId {
    AccountId::new(OWNER)
}

fn in_memory(clock: Arc<NullClock>) -> RegistryService {
    let registry = HousingRegistry::new(owner()).unwrap();
    RegistryService::new(registry, clock, 256)
}

fn config_in(dir: &std::path::Path) -> NodeConfig {
    NodeConfig {
        owner: OWNER.to_string(),
        data_dir: dir.to_path_buf(),
        ..NodeConfig::default()
    }
}

async fn onboard(service: &RegistryService, who: &AccountId) {
    service.register(who).await.unwrap();
    service.certify(&owner(), who).await.unwrap();
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn operations_use_the_injected_clock() {
    let clock = Arc::new(NullClock::new(1_000));
    let service = in_memory(clock.clone());
    let alice = AccountId::new("alice");

    service.register(&alice).await.unwrap();
    service.certify(&owner(), &alice).await.unwrap();
    clock.advance(10);
    let id = service
        .submit(&alice, 85, 90, 75, 80, "PROP-001".into())
        .await
        .unwrap();
    clock.advance(10);
    service.verify(&owner(), id).await.unwrap();

    assert_eq!(
        service.assessor_stats(&alice).await.registration_time,
        Timestamp::new(1_000)
    );
    assert_eq!(
        service.assessment_info(id).await.unwrap().timestamp,
        Timestamp::new(1_010)
    );
    let report = service.quality_report(id).await.unwrap();
    assert_eq!(report.report_time, Timestamp::new(1_020));
    assert_eq!(report.overall_score, 82);
}

#[tokio::test]
async fn subscribers_see_events_in_commit_order() {
    let service = in_memory(Arc::new(NullClock::new(5)));
    let mut rx = service.subscribe();
    let alice = AccountId::new("alice");

    onboard(&service, &alice).await;
    let id = service
        .submit(&alice, 50, 50, 50, 50, "P".into())
        .await
        .unwrap();
    // Rejected: no event.
    assert!(service.register(&alice).await.is_err());
    service.verify(&owner(), id).await.unwrap();

    let mut received = Vec::new();
    while let Ok(event) = rx.try_recv() {
        received.push(event);
    }
    assert_eq!(
        received,
        vec![
            RegistryEvent::AssessorRegistered {
                assessor: alice.clone(),
                at: Timestamp::new(5)
            },
            RegistryEvent::AssessorCertified {
                assessor: alice.clone(),
                certified_by: owner()
            },
            RegistryEvent::AssessmentSubmitted {
                id,
                assessor: alice.clone(),
                at: Timestamp::new(5)
            },
            RegistryEvent::AssessmentVerified {
                id,
                verified_by: owner()
            },
        ]
    );
}

#[tokio::test]
async fn errors_surface_as_registry_errors() {
    let service = in_memory(Arc::new(NullClock::new(0)));
    let bob = AccountId::new("bob");
    let err = service
        .submit(&bob, 1, 2, 3, 4, "P".into())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        NodeError::Registry(RegistryError::NotRegistered(ref who)) if *who == bob
    ));
    assert!(matches!(
        service.verify(&bob, AssessmentId::FIRST).await,
        Err(NodeError::Registry(RegistryError::NotAuthorized { .. }))
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_submissions_get_unique_sequential_ids() {
    let service = in_memory(Arc::new(NullClock::new(1)));
    let assessors: Vec<AccountId> = (0..8)
        .map(|i| AccountId::new(format!("assessor-{i}")))
        .collect();
    for a in &assessors {
        onboard(&service, a).await;
    }

    const PER_ASSESSOR: usize = 25;
    let mut handles = Vec::new();
    for a in assessors.clone() {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            let mut ids = Vec::new();
            for n in 0..PER_ASSESSOR {
                let token = PropertyToken::new(format!("PROP-{}", n % 3));
                ids.push(service.submit(&a, 60, 70, 80, 90, token).await.unwrap());
            }
            ids
        }));
    }

    let mut all = HashSet::new();
    for handle in handles {
        for id in handle.await.unwrap() {
            assert!(all.insert(id), "duplicate id {id}");
        }
    }

    let total = assessors.len() * PER_ASSESSOR;
    assert_eq!(all.len(), total);
    assert_eq!(service.total_assessments().await as usize, total);
    let expected: HashSet<AssessmentId> = (1..=total as u32).map(AssessmentId::new).collect();
    assert_eq!(all, expected);

    for a in &assessors {
        assert_eq!(
            service.assessor_stats(a).await.total_assessments,
            PER_ASSESSOR as u64
        );
    }

    let mut indexed = 0;
    for n in 0..3 {
        let token = PropertyToken::new(format!("PROP-{n}"));
        let ids = service.property_assessment_ids(&token).await;
        assert!(ids.windows(2).all(|w| w[0] < w[1]), "index out of submission order");
        assert_eq!(ids.len(), service.property_assessment_count(&token).await);
        indexed += ids.len();
    }
    assert_eq!(indexed, total);
    service.snapshot().await.validate().unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_verification_credits_exactly_once() {
    let service = in_memory(Arc::new(NullClock::new(1)));
    let alice = AccountId::new("alice");
    onboard(&service, &alice).await;
    let id = service
        .submit(&alice, 90, 92, 88, 85, "A".into())
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..16 {
        let service = service.clone();
        handles.push(tokio::spawn(async move { service.verify(&owner(), id).await }));
    }
    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => successes += 1,
            Err(NodeError::Registry(RegistryError::AlreadyVerified(dup))) => assert_eq!(dup, id),
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!(successes, 1);
    assert_eq!(service.assessor_stats(&alice).await.verified_assessments, 1);
}

#[tokio::test]
async fn open_creates_then_restores() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let alice = AccountId::new("alice");

    {
        let service = RegistryService::open(&config, Arc::new(NullClock::new(100))).unwrap();
        assert!(config.snapshot_path().exists());
        onboard(&service, &alice).await;
        let id = service
            .submit(&alice, 25, 28, 40, 35, "PROP-C".into())
            .await
            .unwrap();
        service.verify(&owner(), id).await.unwrap();
    }

    let reopened = RegistryService::open(&config, Arc::new(NullClock::new(200))).unwrap();
    assert_eq!(reopened.owner().await, owner());
    assert_eq!(reopened.total_assessments().await, 1);
    let report = reopened.quality_report(AssessmentId::FIRST).await.unwrap();
    assert_eq!(report.overall_score, 32);
    assert!(report.has_structural_issues && report.has_safety_issues && report.has_utility_issues);
    assert_eq!(report.report_time, Timestamp::new(100));

    let next = reopened
        .submit(&alice, 50, 50, 50, 50, "PROP-C".into())
        .await
        .unwrap();
    assert_eq!(next, AssessmentId::new(2));
}

#[tokio::test]
async fn open_without_owner_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = NodeConfig {
        data_dir: dir.path().to_path_buf(),
        ..NodeConfig::default()
    };
    assert!(matches!(
        RegistryService::open(&config, Arc::new(NullClock::new(0))),
        Err(NodeError::Registry(RegistryError::InvalidConfiguration(_)))
    ));
    assert!(!config.snapshot_path().exists());
}

#[tokio::test]
async fn open_rejects_owner_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    RegistryService::open(&config, Arc::new(NullClock::new(0))).unwrap();

    let other = NodeConfig {
        owner: "someone-else".into(),
        ..config.clone()
    };
    assert!(matches!(
        RegistryService::open(&other, Arc::new(NullClock::new(0))),
        Err(NodeError::Config(_))
    ));

    let unspecified = NodeConfig {
        owner: String::new(),
        ..config
    };
    assert!(RegistryService::open(&unspecified, Arc::new(NullClock::new(0))).is_ok());
}

#[tokio::test]
async fn failed_persistence_discards_the_mutation() {
    let dir = tempfile::tempdir().unwrap();
    let registry = HousingRegistry::new(owner()).unwrap();
    // A directory where the snapshot file should be makes every rename fail.
    let blocked = dir.path().join("blocked");
    std::fs::create_dir_all(blocked.join("occupied")).unwrap();
    let service = RegistryService::new(registry, Arc::new(NullClock::new(0)), 16)
        .with_persistence(&blocked);
    let mut rx = service.subscribe();

    let alice = AccountId::new("alice");
    assert!(matches!(
        service.register(&alice).await,
        Err(NodeError::Persistence(_))
    ));
    assert!(!service.assessor_stats(&alice).await.is_registered);
    assert!(rx.try_recv().is_err());
    assert!(!blocked.with_extension("tmp").exists());
}

#[tokio::test]
async fn unwritable_temp_file_is_a_persistence_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let service = RegistryService::open(&config, Arc::new(NullClock::new(0))).unwrap();
    std::fs::create_dir(config.snapshot_path().with_extension("tmp")).unwrap();
    let mut rx = service.subscribe();

    let alice = AccountId::new("alice");
    assert!(matches!(
        service.register(&alice).await,
        Err(NodeError::Persistence(_))
    ));
    assert!(!service.assessor_stats(&alice).await.is_registered);
    assert!(rx.try_recv().is_err());

    let on_disk = RegistryService::open(&config, Arc::new(NullClock::new(0))).unwrap();
    assert!(!on_disk.assessor_stats(&alice).await.is_registered);
}

#[tokio::test]
async fn persist_on_write_disabled_keeps_initial_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let config = NodeConfig {
        persist_on_write: false,
        ..config_in(dir.path())
    };
    let service = RegistryService::open(&config, Arc::new(NullClock::new(0))).unwrap();
    assert!(service.snapshot_path().is_none());
    service.register(&AccountId::new("alice")).await.unwrap();

    let reopened = RegistryService::open(&config, Arc::new(NullClock::new(0))).unwrap();
    assert!(!reopened.assessor_stats(&AccountId::new("alice")).await.is_registered);
}
