//! Service-level tests for the claim lifecycle engine

use chrono::Duration;
use rust_decimal_macros::dec;

use claims_engine::{EngineError, StoreError};
use domain_claims::{
    ClaimStatus, ReviewDecision, ReviewStatus, RmStatus, SettlementDetail, TransactionType,
    TransitionRequest,
};
use test_utils::{ActorFixtures, ClaimSubmissionBuilder, EngineHarness, MoneyFixtures};

fn qc_query_request() -> TransitionRequest {
    TransitionRequest::QcQuery {
        issue_categories: vec!["Billing".to_string()],
        repeat_issue: false,
        action_required: "resend bill".to_string(),
        remarks: None,
    }
}

// ============================================================================
// Submission
// ============================================================================

mod submission_tests {
    use super::*;

    #[tokio::test]
    async fn test_submit_creates_claim_with_created_entry() {
        let engine = EngineHarness::new();
        let hospital = ActorFixtures::hospital();

        let record = engine
            .lifecycle
            .submit(&hospital, ClaimSubmissionBuilder::new().build())
            .await
            .unwrap();

        assert_eq!(record.claim.status, ClaimStatus::QcPending);
        assert_eq!(record.version, 1);
        assert!(record.lock.is_none());

        let audit = engine
            .lifecycle
            .transactions(record.claim.id, 0, 10)
            .await
            .unwrap();
        assert_eq!(audit.len(), 1);
        assert_eq!(audit[0].transaction_type, TransactionType::Created);
        assert_eq!(audit[0].previous_status, "none");
        assert_eq!(audit[0].new_status, "qc_pending");
    }

    #[tokio::test]
    async fn test_only_hospitals_submit() {
        let engine = EngineHarness::new();

        let err = engine
            .lifecycle
            .submit(&ActorFixtures::processor_l1(), ClaimSubmissionBuilder::new().build())
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Domain(_)));
    }
}

// ============================================================================
// Lock protocol
// ============================================================================

mod lock_tests {
    use super::*;

    #[tokio::test]
    async fn test_second_acquirer_conflicts_while_lock_live() {
        let engine = EngineHarness::new();
        let claim_id = engine
            .lifecycle
            .submit(&ActorFixtures::hospital(), ClaimSubmissionBuilder::new().build())
            .await
            .unwrap()
            .claim
            .id;

        let lock = engine
            .locks
            .acquire(claim_id, &ActorFixtures::processor_l1())
            .await
            .unwrap();
        assert_eq!(lock.holder.id, "proc-1");

        let err = engine
            .locks
            .acquire(claim_id, &ActorFixtures::processor_l2())
            .await
            .unwrap_err();
        match err {
            EngineError::LockConflict { holder_id, .. } => assert_eq!(holder_id, "proc-1"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_reacquire_by_holder_extends_expiry() {
        let engine = EngineHarness::new();
        let claim_id = engine
            .lifecycle
            .submit(&ActorFixtures::hospital(), ClaimSubmissionBuilder::new().build())
            .await
            .unwrap()
            .claim
            .id;
        let processor = ActorFixtures::processor_l1();

        let first = engine.locks.acquire(claim_id, &processor).await.unwrap();
        engine.clock.advance(Duration::minutes(30));
        let second = engine.locks.acquire(claim_id, &processor).await.unwrap();

        assert_eq!(second.expires_at, first.expires_at + Duration::minutes(30));
    }

    #[tokio::test]
    async fn test_expired_lock_reads_absent_and_can_be_taken() {
        let engine = EngineHarness::new();
        let claim_id = engine
            .lifecycle
            .submit(&ActorFixtures::hospital(), ClaimSubmissionBuilder::new().build())
            .await
            .unwrap()
            .claim
            .id;

        engine
            .locks
            .acquire(claim_id, &ActorFixtures::processor_l1())
            .await
            .unwrap();
        engine.clock.advance(Duration::hours(2));

        assert!(engine.locks.inspect(claim_id).await.unwrap().is_none());

        let lock = engine
            .locks
            .acquire(claim_id, &ActorFixtures::processor_l2())
            .await
            .unwrap();
        assert_eq!(lock.holder.id, "proc-2");
    }

    #[tokio::test]
    async fn test_release_rules() {
        let engine = EngineHarness::new();
        let claim_id = engine
            .lifecycle
            .submit(&ActorFixtures::hospital(), ClaimSubmissionBuilder::new().build())
            .await
            .unwrap()
            .claim
            .id;
        let holder = ActorFixtures::processor_l1();

        // releasing an absent lock is idempotent success
        engine.locks.release(claim_id, &holder).await.unwrap();

        engine.locks.acquire(claim_id, &holder).await.unwrap();

        let err = engine
            .locks
            .release(claim_id, &ActorFixtures::processor_l2())
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::NotLockHolder));

        engine.locks.release(claim_id, &holder).await.unwrap();
        assert!(engine.locks.inspect(claim_id).await.unwrap().is_none());

        // releasing an expired lock is also idempotent success
        engine.locks.acquire(claim_id, &holder).await.unwrap();
        engine.clock.advance(Duration::hours(2));
        engine
            .locks
            .release(claim_id, &ActorFixtures::processor_l2())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_racing_late_acquirers_produce_one_winner() {
        let engine = EngineHarness::new();
        let claim_id = engine
            .lifecycle
            .submit(&ActorFixtures::hospital(), ClaimSubmissionBuilder::new().build())
            .await
            .unwrap()
            .claim
            .id;

        engine
            .locks
            .acquire(claim_id, &ActorFixtures::processor_l1())
            .await
            .unwrap();
        engine.clock.advance(Duration::hours(2));

        let mut handles = Vec::new();
        for n in 0..8 {
            let locks = engine.locks.clone();
            let actor = core_kernel::Actor::processor(
                format!("racer-{n}"),
                format!("Racer {n}"),
                core_kernel::ProcessorTier::L2,
            );
            handles.push(tokio::spawn(async move {
                locks.acquire(claim_id, &actor).await.is_ok()
            }));
        }

        let mut wins = 0;
        for handle in handles {
            if handle.await.unwrap() {
                wins += 1;
            }
        }
        assert_eq!(wins, 1);
    }

    #[tokio::test]
    async fn test_hospital_cannot_lock() {
        let engine = EngineHarness::new();
        let claim_id = engine
            .lifecycle
            .submit(&ActorFixtures::hospital(), ClaimSubmissionBuilder::new().build())
            .await
            .unwrap()
            .claim
            .id;

        let err = engine
            .locks
            .acquire(claim_id, &ActorFixtures::hospital())
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Domain(_)));
    }
}

// ============================================================================
// Transitions through the service
// ============================================================================

mod transition_tests {
    use super::*;

    #[tokio::test]
    async fn test_lock_contention_walkthrough() {
        // processor A locks, processor B conflicts, A raises a query with
        // the lock retained and exactly one audit record appended
        let engine = EngineHarness::new();
        let a = ActorFixtures::processor_l2();
        let b = ActorFixtures::processor_l1();

        let claim_id = engine
            .lifecycle
            .submit(&ActorFixtures::hospital(), ClaimSubmissionBuilder::new().build())
            .await
            .unwrap()
            .claim
            .id;

        engine.locks.acquire(claim_id, &a).await.unwrap();
        assert!(matches!(
            engine.locks.acquire(claim_id, &b).await.unwrap_err(),
            EngineError::LockConflict { .. }
        ));

        let record = engine
            .lifecycle
            .transition(claim_id, &a, &qc_query_request())
            .await
            .unwrap();
        assert_eq!(record.claim.status, ClaimStatus::QcQuery);
        assert!(record.lock.is_some());

        let audit = engine.lifecycle.transactions(claim_id, 0, 10).await.unwrap();
        assert_eq!(audit.len(), 2);
        assert_eq!(audit[1].transaction_type, TransactionType::Queried);
        assert_eq!(audit[1].previous_status, "qc_pending");
        assert_eq!(audit[1].new_status, "qc_query");
    }

    #[tokio::test]
    async fn test_processor_transition_requires_lock() {
        let engine = EngineHarness::new();
        let claim_id = engine
            .lifecycle
            .submit(&ActorFixtures::hospital(), ClaimSubmissionBuilder::new().build())
            .await
            .unwrap()
            .claim
            .id;

        let err = engine
            .lifecycle
            .transition(claim_id, &ActorFixtures::processor_l1(), &qc_query_request())
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::LockNotHeld));

        // an expired lock is no lock
        engine
            .locks
            .acquire(claim_id, &ActorFixtures::processor_l1())
            .await
            .unwrap();
        engine.clock.advance(Duration::hours(2));
        let err = engine
            .lifecycle
            .transition(claim_id, &ActorFixtures::processor_l1(), &qc_query_request())
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::LockNotHeld));
    }

    #[tokio::test]
    async fn test_admission_denied_writes_nothing() {
        // claim above the processor's ceiling: transition refused, no
        // audit entry, claim untouched
        let engine = EngineHarness::new();
        let claim_id = engine
            .lifecycle
            .submit(
                &ActorFixtures::hospital(),
                ClaimSubmissionBuilder::new()
                    .with_claimed_amount(MoneyFixtures::mid_claim())
                    .with_total_bill_amount(MoneyFixtures::mid_claim())
                    .build(),
            )
            .await
            .unwrap()
            .claim
            .id;
        let l1 = ActorFixtures::processor_l1();

        engine.locks.acquire(claim_id, &l1).await.unwrap();
        let err = engine
            .lifecycle
            .transition(
                claim_id,
                &l1,
                &TransitionRequest::ClaimApproved {
                    approved_amount: None,
                    remarks: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::AdmissionDenied { .. }));

        let record = engine.lifecycle.get(claim_id).await.unwrap();
        assert_eq!(record.claim.status, ClaimStatus::QcPending);
        assert_eq!(
            engine.lifecycle.transactions(claim_id, 0, 10).await.unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn test_terminal_decisions_clear_the_lock() {
        let engine = EngineHarness::new();
        let processor = ActorFixtures::processor_l2();
        let claim_id = engine
            .lifecycle
            .submit(&ActorFixtures::hospital(), ClaimSubmissionBuilder::new().build())
            .await
            .unwrap()
            .claim
            .id;

        engine.locks.acquire(claim_id, &processor).await.unwrap();
        let record = engine
            .lifecycle
            .transition(
                claim_id,
                &processor,
                &TransitionRequest::ClaimApproved {
                    approved_amount: Some(dec!(45000)),
                    remarks: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(record.claim.status, ClaimStatus::ClaimApproved);
        assert_eq!(record.claim.approved_amount.unwrap().amount(), dec!(45000));
        assert_eq!(record.claim.disallowed_amount.unwrap().amount(), dec!(15000));
        assert!(record.lock.is_none());
        assert!(engine.locks.inspect(claim_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_hospital_transitions_need_no_lock() {
        let engine = EngineHarness::new();
        let hospital = ActorFixtures::hospital();
        let processor = ActorFixtures::processor_l2();
        let claim_id = engine
            .lifecycle
            .submit(&hospital, ClaimSubmissionBuilder::new().build())
            .await
            .unwrap()
            .claim
            .id;

        engine.locks.acquire(claim_id, &processor).await.unwrap();
        engine
            .lifecycle
            .transition(claim_id, &processor, &qc_query_request())
            .await
            .unwrap();

        // the processor still holds the lock; the hospital answers anyway
        let record = engine
            .lifecycle
            .transition(
                claim_id,
                &hospital,
                &TransitionRequest::QcAnswered {
                    response: "Bill resent".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(record.claim.status, ClaimStatus::QcAnswered);
    }

    #[tokio::test]
    async fn test_stale_version_commit_is_refused() {
        use claims_engine::ClaimStore;

        let engine = EngineHarness::new();
        let record = engine
            .lifecycle
            .submit(&ActorFixtures::hospital(), ClaimSubmissionBuilder::new().build())
            .await
            .unwrap();
        let claim_id = record.claim.id;

        engine
            .store
            .commit(claim_id, record.version, record.claim.clone(), Vec::new())
            .await
            .unwrap();

        let err = engine
            .store
            .commit(claim_id, record.version, record.claim, Vec::new())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::VersionConflict { .. }));
    }
}

// ============================================================================
// Inbox listing
// ============================================================================

mod listing_tests {
    use super::*;

    #[tokio::test]
    async fn test_inbox_is_admission_filtered_and_bucketed() {
        let engine = EngineHarness::new();
        let hospital = ActorFixtures::hospital();

        let small = engine
            .lifecycle
            .submit(&hospital, ClaimSubmissionBuilder::new().build())
            .await
            .unwrap();
        engine
            .lifecycle
            .submit(
                &hospital,
                ClaimSubmissionBuilder::new()
                    .with_claimed_amount(MoneyFixtures::large_claim())
                    .with_total_bill_amount(MoneyFixtures::large_claim())
                    .build(),
            )
            .await
            .unwrap();

        // move the small claim out of the unprocessed bucket
        let processor = ActorFixtures::processor_l1();
        engine.locks.acquire(small.claim.id, &processor).await.unwrap();
        engine
            .lifecycle
            .transition(small.claim.id, &processor, &qc_query_request())
            .await
            .unwrap();

        let inbox = engine.lifecycle.list_for_processor(&processor).await.unwrap();
        assert!(inbox.unprocessed.is_empty());
        assert_eq!(inbox.processed.len(), 1);

        let inbox = engine
            .lifecycle
            .list_for_processor(&ActorFixtures::processor_l4())
            .await
            .unwrap();
        assert_eq!(inbox.unprocessed.len(), 1);
        assert_eq!(inbox.processed.len(), 1);
    }

    #[tokio::test]
    async fn test_hospital_sees_only_own_claims() {
        let engine = EngineHarness::new();
        engine
            .lifecycle
            .submit(&ActorFixtures::hospital(), ClaimSubmissionBuilder::new().build())
            .await
            .unwrap();
        engine
            .lifecycle
            .submit(&ActorFixtures::other_hospital(), ClaimSubmissionBuilder::new().build())
            .await
            .unwrap();

        let mine = engine
            .lifecycle
            .list_for_hospital(&ActorFixtures::hospital())
            .await
            .unwrap();
        assert_eq!(mine.len(), 1);
    }
}

// ============================================================================
// Review and settlement
// ============================================================================

mod workflow_tests {
    use super::*;

    #[tokio::test]
    async fn test_review_decision_appends_record_and_audit() {
        let engine = EngineHarness::new();
        let claim_id = engine
            .lifecycle
            .submit(&ActorFixtures::hospital(), ClaimSubmissionBuilder::new().build())
            .await
            .unwrap()
            .claim
            .id;

        let record = engine
            .reviews
            .decide(
                claim_id,
                &ActorFixtures::reviewer(),
                &ReviewDecision::Reviewed {
                    total_bill_amount: dec!(10000),
                    claimed_amount: dec!(10000),
                    approved_amount: dec!(12000),
                    disallowed_amount: None,
                },
                None,
            )
            .await
            .unwrap();

        assert_eq!(record.claim.review.review_status, ReviewStatus::Completed);
        let amounts = record.claim.review.history[0].amounts.as_ref().unwrap();
        assert_eq!(amounts.disallowed_amount.amount(), dec!(0));

        let audit = engine.lifecycle.transactions(claim_id, 0, 10).await.unwrap();
        assert_eq!(audit.last().unwrap().transaction_type, TransactionType::Reviewed);
        assert_eq!(audit.last().unwrap().new_status, "REVIEW COMPLETED");
    }

    #[tokio::test]
    async fn test_review_does_not_touch_processor_lock() {
        let engine = EngineHarness::new();
        let processor = ActorFixtures::processor_l2();
        let claim_id = engine
            .lifecycle
            .submit(&ActorFixtures::hospital(), ClaimSubmissionBuilder::new().build())
            .await
            .unwrap()
            .claim
            .id;

        engine.locks.acquire(claim_id, &processor).await.unwrap();
        engine
            .reviews
            .escalate(claim_id, &ActorFixtures::reviewer(), "Payer unresponsive", None)
            .await
            .unwrap();

        let lock = engine.locks.inspect(claim_id).await.unwrap();
        assert_eq!(lock.unwrap().holder.id, "proc-2");
    }

    #[tokio::test]
    async fn test_settlement_update_and_reevaluation() {
        let engine = EngineHarness::new();
        let rm = ActorFixtures::rm();
        let claim_id = engine
            .lifecycle
            .submit(&ActorFixtures::hospital(), ClaimSubmissionBuilder::new().build())
            .await
            .unwrap()
            .claim
            .id;

        let err = engine
            .settlements
            .update_status(claim_id, &rm, RmStatus::Settled, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Domain(_)));

        let detail = SettlementDetail {
            claim_settlement_date: chrono::NaiveDate::from_ymd_opt(2026, 2, 1),
            payment_mode: Some("NEFT".to_string()),
            settled_amount: Some(dec!(45000)),
            ..SettlementDetail::default()
        };
        let record = engine
            .settlements
            .update_status(claim_id, &rm, RmStatus::Settled, Some(detail), None)
            .await
            .unwrap();
        assert_eq!(record.claim.settlement.rm_status, Some(RmStatus::Settled));

        let record = engine
            .settlements
            .re_evaluate(claim_id, &rm, "Shortfall against approved amount")
            .await
            .unwrap();
        assert!(record.claim.settlement.reevaluation_requested);
        assert_eq!(record.claim.settlement.rm_status, Some(RmStatus::Settled));

        let audit = engine.lifecycle.transactions(claim_id, 0, 10).await.unwrap();
        let types: Vec<_> = audit.iter().map(|t| t.transaction_type).collect();
        assert_eq!(
            types,
            vec![
                TransactionType::Created,
                TransactionType::Updated,
                TransactionType::Reevaluated
            ]
        );
        // seq is strictly increasing
        assert!(audit.windows(2).all(|w| w[1].seq == w[0].seq + 1));
    }
}
