use super::template_resolver::resolve_template;
use crate::error::NurtureError;
use crate::shared::usecase::UseCase;
use nurture_scheduler_domain::{ReminderStage, ReminderTracker};
use nurture_scheduler_infra::{NurtureContext, OutgoingEmail};
use tracing::info;

/// Dispatches one stage reminder for one tracker and records the outcome on
/// that stage. The stage is marked sent only when the transport confirms
/// acceptance of the recipient; every other outcome leaves the stage unsent
/// with the error stored for the next run to retry. The updated tracker is
/// persisted exactly once per call.
#[derive(Debug)]
pub struct SendStageReminderUseCase {
    pub tracker: ReminderTracker,
    pub stage: ReminderStage,
}

#[derive(Debug)]
pub struct StageSendReport {
    pub tracker: ReminderTracker,
    pub success: bool,
    pub message_id: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug)]
pub enum UseCaseError {
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
impl UseCase for SendStageReminderUseCase {
    type Response = StageSendReport;

    type Error = UseCaseError;

    async fn execute(&mut self, ctx: &NurtureContext) -> Result<Self::Response, Self::Error> {
        let mut tracker = self.tracker.clone();
        let recipient = tracker.customer.email.clone();

        // Without credentials no transport attempt is made at all
        let outcome = if !ctx.mailer.is_configured() {
            Err("Email credentials are not configured".to_string())
        } else {
            let rendered = resolve_template(ctx, self.stage, &tracker).await;
            let email = OutgoingEmail {
                to: recipient.clone(),
                subject: rendered.subject,
                html: rendered.body,
            };
            match ctx.mailer.send(&email).await {
                Ok(receipt) if receipt.accepted.contains(&recipient) => Ok(receipt.message_id),
                Ok(receipt) => Err(format!(
                    "Recipient was rejected by the mail server: {}",
                    receipt.response
                )),
                Err(e) => Err(e.to_string()),
            }
        };

        let (success, message_id, error) = match outcome {
            Ok(message_id) => {
                tracker
                    .stages
                    .get_mut(self.stage)
                    .record_sent(ctx.sys.get_timestamp_millis());
                info!(
                    "Sent {} reminder for order {}",
                    self.stage, tracker.order_id
                );
                (true, message_id, None)
            }
            Err(error) => {
                tracker
                    .stages
                    .get_mut(self.stage)
                    .record_failure(error.clone());
                (false, None, Some(error))
            }
        };

        ctx.repos
            .trackers
            .save(&tracker)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(StageSendReport {
            tracker,
            success,
            message_id,
            error,
        })
    }
}
