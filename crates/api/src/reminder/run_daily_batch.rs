use super::send_stage_reminder::SendStageReminderUseCase;
use crate::error::NurtureError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use nurture_scheduler_api_structs::dtos::{BatchItemErrorDTO, BatchRunSummaryDTO};
use nurture_scheduler_api_structs::run_daily_batch::*;
use nurture_scheduler_domain::{day_bounds, ReminderStage, ReminderTracker};
use nurture_scheduler_infra::{DueTrackersQuery, NurtureContext};
use std::time::Duration;
use tracing::{error, info};

pub async fn run_daily_batch_controller(
    http_req: HttpRequest,
    ctx: web::Data<NurtureContext>,
) -> Result<HttpResponse, NurtureError> {
    protect_route(&http_req, &ctx)?;

    let timestamp = ctx.sys.get_timestamp_millis();
    match execute(RunDailyBatchUseCase {}, &ctx).await {
        Ok(summary) => Ok(HttpResponse::Ok().json(APIResponse {
            summary: BatchRunSummaryDTO {
                processed: summary.processed,
                sent: summary.sent,
                failed: summary.failed,
                skipped: summary.skipped,
                errors: summary
                    .errors
                    .into_iter()
                    .map(|e| BatchItemErrorDTO {
                        order_id: e.order_id,
                        stage: e.stage,
                        error: e.error,
                    })
                    .collect(),
            },
            timestamp,
        })),
        Err(UseCaseError::StorageError) => {
            Ok(HttpResponse::InternalServerError().json(ErrorResponse {
                message: "The reminder batch could not be started because the tracker store was unavailable".into(),
                timestamp,
            }))
        }
    }
}

/// One daily pass over the due-set. Every selected tracker gets at most one
/// send attempt, for its latest due stage. Individual send failures are
/// recorded on the tracker and in the summary but never abort the rest of
/// the run.
#[derive(Debug)]
pub struct RunDailyBatchUseCase {}

#[derive(Debug, Default, PartialEq)]
pub struct BatchRunSummary {
    pub processed: usize,
    pub sent: usize,
    pub failed: usize,
    pub skipped: usize,
    pub errors: Vec<BatchItemError>,
}

#[derive(Debug, PartialEq)]
pub struct BatchItemError {
    pub order_id: String,
    pub stage: ReminderStage,
    pub error: String,
}

#[derive(Debug)]
pub enum UseCaseError {
    /// The tracker store failed during due-set selection, nothing was sent
    StorageError,
}

impl From<UseCaseError> for NurtureError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RunDailyBatchUseCase {
    type Response = BatchRunSummary;

    type Error = UseCaseError;

    async fn execute(&mut self, ctx: &NurtureContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let (_, day_end) = day_bounds(now);

        let due_trackers = ctx
            .repos
            .trackers
            .find_due(DueTrackersQuery {
                due_before: day_end,
                limit: ctx.config.max_trackers_per_run,
            })
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        info!("Reminder batch selected {} trackers", due_trackers.len());

        let mut summary = BatchRunSummary::default();
        let mut attempts = 0;
        for tracker in due_trackers {
            summary.processed += 1;

            let stage = match tracker.next_due_stage(day_end) {
                Some(stage) => stage,
                None => {
                    summary.skipped += 1;
                    finalize(tracker, ctx).await;
                    continue;
                }
            };

            // Space out transport calls so the mail server is not hammered
            if attempts > 0 && ctx.config.send_delay_millis > 0 {
                actix_web::rt::time::sleep(Duration::from_millis(ctx.config.send_delay_millis))
                    .await;
            }
            attempts += 1;

            let order_id = tracker.order_id.clone();
            match execute(SendStageReminderUseCase { tracker, stage }, ctx).await {
                Ok(report) => {
                    if report.success {
                        summary.sent += 1;
                    } else {
                        summary.failed += 1;
                        summary.errors.push(BatchItemError {
                            order_id,
                            stage,
                            error: report
                                .error
                                .unwrap_or_else(|| "Unknown send failure".into()),
                        });
                    }
                    finalize(report.tracker, ctx).await;
                }
                Err(_) => {
                    summary.failed += 1;
                    summary.errors.push(BatchItemError {
                        order_id,
                        stage,
                        error: "The tracker could not be persisted after the send attempt".into(),
                    });
                }
            }
        }

        info!(
            "Reminder batch done. processed: {}, sent: {}, failed: {}, skipped: {}",
            summary.processed, summary.sent, summary.failed, summary.skipped
        );

        Ok(summary)
    }
}

/// Promotes a tracker that has exhausted its final stage to unreviewed. A
/// failure to persist the promotion is logged and left for the next run.
async fn finalize(mut tracker: ReminderTracker, ctx: &NurtureContext) {
    if tracker.promote_if_exhausted() {
        if let Err(e) = ctx.repos.trackers.save(&tracker).await {
            error!(
                "Failed to persist terminal promotion for order {}: {:?}",
                tracker.order_id, e
            );
        }
    }
}
