mod common;

use print_jobs::clients::mock::{MockOrderStore, MockPrintProvider, RecordingSleeper};
use print_jobs::clients::{ProviderError, ProviderResponse, StoreError};
use print_jobs::model::{
    EditionType, JobStatus, JobStatusName, Lang, OrderItem, PrintJobId, PrintJobStatus,
};
use print_jobs::payload::PayloadError;
use print_jobs::pipeline::{
    BatchReport, OrderError, OrderOutcome, PipelineError, SubmissionError, SubmissionPipeline,
};
use serde_json::json;
use std::time::Duration;

struct Harness {
    store: MockOrderStore,
    provider: MockPrintProvider,
    sleeper: RecordingSleeper,
}

impl Harness {
    fn new() -> Self {
        Self {
            store: MockOrderStore::new(),
            provider: MockPrintProvider::new(),
            sleeper: RecordingSleeper::default(),
        }
    }

    fn pipeline(&self) -> SubmissionPipeline<MockOrderStore, MockPrintProvider, RecordingSleeper> {
        SubmissionPipeline::new(
            self.store.clone(),
            self.provider.clone(),
            common::catalog(),
            common::settings(),
        )
        .with_sleeper(self.sleeper.clone())
    }

    fn verify(&self) {
        self.store.verify();
        self.provider.verify();
    }
}

fn secs(values: &[u64]) -> Vec<Duration> {
    values.iter().copied().map(Duration::from_secs).collect()
}

fn unavailable() -> StoreError {
    StoreError::Unavailable("connection refused".into())
}

#[tokio::test]
async fn created_job_is_linked_then_recorded_as_accepted() {
    let h = Harness::new();
    h.store.expect_find().return_ok(vec![common::presubmit_order("ord_1")]);
    h.provider
        .expect_create()
        .return_created(PrintJobId(1001), "ord_1", JobStatusName::Created);
    h.store.expect_save().return_ok();
    h.provider
        .expect_status(PrintJobId(1001))
        .return_status(JobStatusName::Unpaid);
    h.store.expect_save().return_ok();

    let report = h.pipeline().run().await.unwrap();

    assert_eq!(
        report,
        BatchReport {
            fetched: 1,
            accepted: 1,
            ..Default::default()
        }
    );
    let saves = h.store.save_attempts();
    assert_eq!(saves[0].print_job_status, PrintJobStatus::Pending);
    assert_eq!(saves[0].print_job_id, Some(PrintJobId(1001)));

    let stored = h.store.stored("ord_1").unwrap();
    assert_eq!(stored.print_job_status, PrintJobStatus::Accepted);
    assert_eq!(stored.print_job_id, Some(PrintJobId(1001)));

    let submitted = h.provider.submitted();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].external_id, "ord_1");
    assert_eq!(h.sleeper.recorded(), secs(&[0, 180]));
    h.verify();
}

#[tokio::test]
async fn linkage_save_is_retried_after_zero_five_and_twenty_five_seconds() {
    let h = Harness::new();
    h.store.expect_find().return_ok(vec![common::presubmit_order("ord_1")]);
    h.provider
        .expect_create()
        .return_created(PrintJobId(1001), "ord_1", JobStatusName::Created);
    h.store.expect_save().return_err(unavailable());
    h.store.expect_save().return_err(unavailable());
    h.store.expect_save().return_ok();
    h.provider
        .expect_status(PrintJobId(1001))
        .return_status(JobStatusName::Unpaid);
    h.store.expect_save().return_ok();

    let report = h.pipeline().run().await.unwrap();

    assert_eq!(report.accepted, 1);
    let saves = h.store.save_attempts();
    assert_eq!(saves.len(), 4);
    for linkage in &saves[..3] {
        assert_eq!(linkage.print_job_status, PrintJobStatus::Pending);
        assert_eq!(linkage.print_job_id, Some(PrintJobId(1001)));
    }
    assert_eq!(h.sleeper.recorded(), secs(&[0, 5, 25, 180]));
    h.verify();
}

#[tokio::test]
async fn exhausted_linkage_skips_verification_and_leaves_store_untouched() {
    let h = Harness::new();
    let order = common::presubmit_order("ord_1");
    h.store.seed(order.clone());
    h.provider
        .expect_create()
        .return_created(PrintJobId(1001), "ord_1", JobStatusName::Created);
    for _ in 0..3 {
        h.store.expect_save().return_err(unavailable());
    }

    let err = h.pipeline().process_order(order.clone()).await.unwrap_err();

    match &err {
        OrderError::LinkagePersistence {
            order_id,
            job_id,
            attempts,
            last_error,
        } => {
            assert_eq!(order_id, "ord_1");
            assert_eq!(*job_id, PrintJobId(1001));
            assert_eq!(*attempts, 3);
            assert_eq!(last_error.as_ref(), Some(&unavailable()));
        }
        other => panic!("expected linkage failure, got {other:?}"),
    }
    assert!(err.requires_manual_intervention());
    assert!(h.provider.polled().is_empty());
    assert_eq!(h.store.stored("ord_1"), Some(order));
    assert_eq!(h.sleeper.recorded(), secs(&[0, 5, 25]));
    h.verify();
}

#[tokio::test]
async fn exhausted_linkage_counts_as_needing_attention() {
    let h = Harness::new();
    h.store.expect_find().return_ok(vec![common::presubmit_order("ord_1")]);
    h.provider
        .expect_create()
        .return_created(PrintJobId(1001), "ord_1", JobStatusName::Created);
    for _ in 0..3 {
        h.store.expect_save().return_err(unavailable());
    }

    let report = h.pipeline().run().await.unwrap();

    assert_eq!(report.needs_attention, 1);
    assert_eq!(report.accepted + report.rejected + report.skipped, 0);
    h.verify();
}

#[tokio::test]
async fn failed_review_is_recorded_as_rejected() {
    let h = Harness::new();
    let order = common::presubmit_order("ord_1");
    h.provider
        .expect_create()
        .return_created(PrintJobId(7), "ord_1", JobStatusName::Created);
    h.store.expect_save().return_ok();
    h.provider
        .expect_status(PrintJobId(7))
        .return_response(ProviderResponse::ok(
            200,
            JobStatus::with_message(JobStatusName::Rejected, "interior file unreadable"),
        ));
    h.store.expect_save().return_ok();

    let outcome = h.pipeline().process_order(order).await.unwrap();

    assert_eq!(
        outcome,
        OrderOutcome::Rejected {
            order_id: "ord_1".into(),
            job_id: PrintJobId(7),
            provider_status: JobStatusName::Rejected,
            message: Some("interior file unreadable".into()),
        }
    );
    let stored = h.store.stored("ord_1").unwrap();
    assert_eq!(stored.print_job_status, PrintJobStatus::Rejected);
    assert_eq!(stored.print_job_id, Some(PrintJobId(7)));
    h.verify();
}

#[tokio::test]
async fn only_failure_statuses_reject() {
    let cases = [
        (JobStatusName::Error, PrintJobStatus::Rejected),
        (JobStatusName::Canceled, PrintJobStatus::Rejected),
        (JobStatusName::Rejected, PrintJobStatus::Rejected),
        (JobStatusName::InReview, PrintJobStatus::Accepted),
        (JobStatusName::PaymentInProgress, PrintJobStatus::Accepted),
        (JobStatusName::ProductionReady, PrintJobStatus::Accepted),
        (JobStatusName::Shipped, PrintJobStatus::Accepted),
    ];

    for (provider_status, expected) in cases {
        let h = Harness::new();
        h.provider
            .expect_create()
            .return_created(PrintJobId(1), "ord_1", JobStatusName::Created);
        h.store.expect_save().return_ok();
        h.provider.expect_status(PrintJobId(1)).return_status(provider_status);
        h.store.expect_save().return_ok();

        h.pipeline()
            .process_order(common::presubmit_order("ord_1"))
            .await
            .unwrap();

        let stored = h.store.stored("ord_1").unwrap();
        assert_eq!(stored.print_job_status, expected, "for {provider_status}");
        h.verify();
    }
}

#[tokio::test]
async fn server_error_on_create_does_not_stop_later_orders() {
    let h = Harness::new();
    h.store.expect_find().return_ok(vec![
        common::presubmit_order("ord_1"),
        common::presubmit_order("ord_2"),
    ]);
    h.provider
        .expect_create()
        .return_response(ProviderResponse::error(500, json!({ "message": "internal error" })));
    h.provider
        .expect_create()
        .return_created(PrintJobId(1002), "ord_2", JobStatusName::Created);
    h.store.expect_save().return_ok();
    h.provider
        .expect_status(PrintJobId(1002))
        .return_status(JobStatusName::Unpaid);
    h.store.expect_save().return_ok();

    let report = h.pipeline().run().await.unwrap();

    assert_eq!(
        report,
        BatchReport {
            fetched: 2,
            accepted: 1,
            skipped: 1,
            ..Default::default()
        }
    );
    assert!(h.store.save_attempts().iter().all(|o| o.id == "ord_2"));
    assert_eq!(
        h.store.stored("ord_2").unwrap().print_job_status,
        PrintJobStatus::Accepted
    );
    h.verify();
}

#[tokio::test]
async fn non_201_create_is_a_submission_failure_with_the_response() {
    let h = Harness::new();
    h.provider
        .expect_create()
        .return_response(ProviderResponse::error(400, json!({ "postcode": "required" })));

    let err = h
        .pipeline()
        .process_order(common::presubmit_order("ord_1"))
        .await
        .unwrap_err();

    match err {
        OrderError::Submission {
            order_id,
            source: SubmissionError::UnexpectedHttpStatus { status, response },
        } => {
            assert_eq!(order_id, "ord_1");
            assert_eq!(status, 400);
            assert!(response.contains("postcode"));
        }
        other => panic!("expected submission failure, got {other:?}"),
    }
    assert!(h.store.save_attempts().is_empty());
    h.verify();
}

#[tokio::test]
async fn job_not_created_in_created_status_is_not_linked() {
    let h = Harness::new();
    h.provider
        .expect_create()
        .return_created(PrintJobId(5), "ord_1", JobStatusName::InReview);

    let err = h
        .pipeline()
        .process_order(common::presubmit_order("ord_1"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        OrderError::Submission {
            source: SubmissionError::UnexpectedJobStatus {
                job_id: PrintJobId(5),
                status: JobStatusName::InReview,
            },
            ..
        }
    ));
    assert!(h.store.save_attempts().is_empty());
    h.verify();
}

#[tokio::test]
async fn transport_failure_on_create_skips_the_order() {
    let h = Harness::new();
    h.provider
        .expect_create()
        .return_err(ProviderError::Transport("connection reset".into()));

    let err = h
        .pipeline()
        .process_order(common::presubmit_order("ord_1"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        OrderError::Submission {
            source: SubmissionError::Transport(_),
            ..
        }
    ));
    assert!(!err.requires_manual_intervention());
    h.verify();
}

#[tokio::test]
async fn failed_poll_leaves_order_pending() {
    let h = Harness::new();
    h.provider
        .expect_create()
        .return_created(PrintJobId(1001), "ord_1", JobStatusName::Created);
    h.store.expect_save().return_ok();
    h.provider
        .expect_status(PrintJobId(1001))
        .return_response(ProviderResponse::error(503, json!({ "message": "maintenance" })));

    let err = h
        .pipeline()
        .process_order(common::presubmit_order("ord_1"))
        .await
        .unwrap_err();

    match &err {
        OrderError::VerificationPoll {
            job_id,
            http_status,
            response,
            ..
        } => {
            assert_eq!(*job_id, PrintJobId(1001));
            assert_eq!(*http_status, Some(503));
            assert!(response.contains("maintenance"));
        }
        other => panic!("expected poll failure, got {other:?}"),
    }
    assert!(err.requires_manual_intervention());

    let stored = h.store.stored("ord_1").unwrap();
    assert_eq!(stored.print_job_status, PrintJobStatus::Pending);
    assert_eq!(stored.print_job_id, Some(PrintJobId(1001)));
    assert_eq!(h.store.save_attempts().len(), 1);
    h.verify();
}

#[tokio::test]
async fn unreachable_provider_on_poll_is_a_poll_failure() {
    let h = Harness::new();
    h.provider
        .expect_create()
        .return_created(PrintJobId(3), "ord_1", JobStatusName::Created);
    h.store.expect_save().return_ok();
    h.provider
        .expect_status(PrintJobId(3))
        .return_err(ProviderError::Transport("timed out".into()));

    let err = h
        .pipeline()
        .process_order(common::presubmit_order("ord_1"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        OrderError::VerificationPoll {
            http_status: None,
            ..
        }
    ));
    h.verify();
}

#[tokio::test]
async fn outcome_save_is_attempted_once() {
    let h = Harness::new();
    h.provider
        .expect_create()
        .return_created(PrintJobId(1001), "ord_1", JobStatusName::Created);
    h.store.expect_save().return_ok();
    h.provider
        .expect_status(PrintJobId(1001))
        .return_status(JobStatusName::Unpaid);
    h.store.expect_save().return_err(unavailable());

    let err = h
        .pipeline()
        .process_order(common::presubmit_order("ord_1"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        OrderError::OutcomePersistence {
            status: PrintJobStatus::Accepted,
            ..
        }
    ));
    assert_eq!(h.store.save_attempts().len(), 2);
    assert_eq!(
        h.store.stored("ord_1").unwrap().print_job_status,
        PrintJobStatus::Pending
    );
    assert_eq!(h.sleeper.recorded(), secs(&[0, 180]));
    assert!(err.requires_manual_intervention());
    h.verify();
}

#[tokio::test]
async fn attention_count_follows_manual_intervention() {
    let h = Harness::new();
    h.store.expect_find().return_ok(vec![
        common::presubmit_order("ord_1"),
        common::presubmit_order("ord_2"),
    ]);
    h.provider
        .expect_create()
        .return_created(PrintJobId(1001), "ord_1", JobStatusName::Created);
    h.store.expect_save().return_ok();
    h.provider
        .expect_status(PrintJobId(1001))
        .return_status(JobStatusName::Unpaid);
    h.store.expect_save().return_err(unavailable());
    h.provider
        .expect_create()
        .return_err(ProviderError::Transport("connection reset".into()));

    let report = h.pipeline().run().await.unwrap();

    assert_eq!(
        report,
        BatchReport {
            fetched: 2,
            skipped: 1,
            needs_attention: 1,
            ..Default::default()
        }
    );
    h.verify();
}

#[tokio::test]
async fn retrieval_failure_ends_the_run() {
    let h = Harness::new();
    h.store.expect_find().return_err(unavailable());

    let err = h.pipeline().run().await.unwrap_err();

    assert!(matches!(err, PipelineError::Retrieval(StoreError::Unavailable(_))));
    assert!(h.provider.submitted().is_empty());
    h.verify();
}

#[tokio::test]
async fn unresolvable_order_is_skipped_and_batch_continues() {
    let h = Harness::new();
    let mut unknown = common::presubmit_order("ord_1");
    unknown.items.push(OrderItem {
        document_id: "apology".into(),
        edition_type: EditionType::Original,
        lang: Lang::En,
        quantity: 1,
    });
    h.store
        .expect_find()
        .return_ok(vec![unknown.clone(), common::presubmit_order("ord_2")]);
    h.provider
        .expect_create()
        .return_created(PrintJobId(1001), "ord_2", JobStatusName::Created);
    h.store.expect_save().return_ok();
    h.provider
        .expect_status(PrintJobId(1001))
        .return_status(JobStatusName::Unpaid);
    h.store.expect_save().return_ok();

    let report = h.pipeline().run().await.unwrap();

    assert_eq!(report.skipped, 1);
    assert_eq!(report.accepted, 1);
    let submitted = h.provider.submitted();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].external_id, "ord_2");
    h.verify();

    let err = h.pipeline().process_order(unknown).await.unwrap_err();
    assert!(matches!(
        err,
        OrderError::PayloadBuild(PayloadError::UnresolvedEdition(_))
    ));
}

#[tokio::test]
async fn multi_volume_order_submits_one_line_item_per_volume() {
    let h = Harness::new();
    let mut order = common::presubmit_order("ord_1");
    order.items = vec![common::journal_item()];
    h.provider
        .expect_create()
        .return_created(PrintJobId(1), "ord_1", JobStatusName::Created);
    h.store.expect_save().return_ok();
    h.provider.expect_status(PrintJobId(1)).return_status(JobStatusName::Unpaid);
    h.store.expect_save().return_ok();

    h.pipeline().process_order(order).await.unwrap();

    let payload = &h.provider.submitted()[0];
    let titles: Vec<_> = payload.line_items.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Journal of George Fox, vol. 1", "Journal of George Fox, vol. 2"]
    );
    h.verify();
}

#[tokio::test]
async fn already_linked_order_is_never_resubmitted() {
    let h = Harness::new();
    let mut order = common::presubmit_order("ord_1");
    order.link_print_job(PrintJobId(44));

    let err = h.pipeline().process_order(order).await.unwrap_err();

    assert!(matches!(
        err,
        OrderError::Ineligible {
            status: PrintJobStatus::Pending,
            ..
        }
    ));
    assert!(h.provider.submitted().is_empty());
    h.verify();
}

#[tokio::test]
async fn empty_batch_does_nothing() {
    let h = Harness::new();
    h.store.expect_find().return_ok(vec![]);

    let report = h.pipeline().run().await.unwrap();

    assert_eq!(report, BatchReport::default());
    assert!(h.sleeper.recorded().is_empty());
    h.verify();
}
