//! Payment / completion recorder
//!
//! Two persisted sub-steps: the completion report is saved first without
//! touching the status, so a failed payment submission leaves the
//! request `in_progress` with the report already on record — resumable
//! at the payment step. Only the payment write flips the request to
//! `completed`.

use crate::workflow::engine::WorkflowEngine;
use crate::workflow::error::{WorkflowError, WorkflowResult};
use crate::workflow::money::{split_amount, validate_amount};
use shared::models::repair_request::{CompletionReport, PaymentMethod, PaymentRecord};
use shared::models::{Actor, ActorRole, NotificationKind, RepairRequest, RequestStatus};
use shared::util::{non_blank, now_rfc3339};

/// Completion report submission (phase 1)
#[derive(Debug, Clone)]
pub struct CompletionInput {
    pub booking_id: String,
    pub problem: String,
    pub solution: String,
    pub parts_used: Option<String>,
    /// File references returned by the proof-image upload
    pub proof_images: Vec<String>,
}

/// Payment submission (phase 2, finalizes the request)
#[derive(Debug, Clone)]
pub struct PaymentInput {
    pub booking_id: String,
    pub method: PaymentMethod,
    pub amount: f64,
    pub upi_transaction_id: Option<String>,
}

impl WorkflowEngine {
    /// Save the completion report. The request stays `in_progress`;
    /// this is a valid, recoverable intermediate state.
    pub async fn save_completion_report(
        &self,
        actor: &Actor,
        input: CompletionInput,
    ) -> WorkflowResult<RepairRequest> {
        let lock = self.lock_for(&input.booking_id);
        let _guard = lock.lock().await;

        let mut request = self
            .requests
            .find_by_id(&input.booking_id)
            .await?
            .ok_or_else(|| WorkflowError::RequestNotFound(input.booking_id.clone()))?;

        let from = request.status;
        if from != RequestStatus::InProgress {
            return Err(WorkflowError::InvalidTransition {
                from,
                to: RequestStatus::Completed,
            });
        }
        self.authorize(actor, ActorRole::Engineer, &request)?;

        let problem = non_blank(&input.problem)
            .ok_or(WorkflowError::MissingField("problem"))?
            .to_string();
        let solution = non_blank(&input.solution)
            .ok_or(WorkflowError::MissingField("solution"))?
            .to_string();
        if input.proof_images.is_empty() {
            return Err(WorkflowError::MissingField("proofImages"));
        }

        request.completion_report = Some(CompletionReport {
            problem,
            solution,
            parts_used: input.parts_used.as_deref().and_then(non_blank).map(String::from),
            proof_images: input.proof_images,
            completed_at: now_rfc3339(),
        });

        let updated = self.persist(&request).await?;
        tracing::info!(
            target: "workflow",
            request = %updated.id_string(),
            "Completion report saved"
        );
        Ok(updated)
    }

    /// Record the payment, compute the fixed 70/30 split, and finalize
    /// the request as `completed` in a single guarded write.
    pub async fn record_payment(
        &self,
        actor: &Actor,
        input: PaymentInput,
    ) -> WorkflowResult<RepairRequest> {
        let lock = self.lock_for(&input.booking_id);
        let _guard = lock.lock().await;

        let mut request = self
            .requests
            .find_by_id(&input.booking_id)
            .await?
            .ok_or_else(|| WorkflowError::RequestNotFound(input.booking_id.clone()))?;

        let from = request.status;
        if from != RequestStatus::InProgress {
            return Err(WorkflowError::InvalidTransition {
                from,
                to: RequestStatus::Completed,
            });
        }
        self.authorize(actor, ActorRole::Engineer, &request)?;

        if request.completion_report.is_none() {
            return Err(WorkflowError::MissingField("completion report"));
        }
        validate_amount(input.amount)?;
        let upi_transaction_id = match input.method {
            PaymentMethod::Upi => Some(
                input
                    .upi_transaction_id
                    .as_deref()
                    .and_then(non_blank)
                    .ok_or(WorkflowError::MissingField("upiTransactionId"))?
                    .to_string(),
            ),
            PaymentMethod::Cash => None,
        };

        let (company_share, engineer_share) = split_amount(input.amount);
        request.payment = Some(PaymentRecord {
            method: input.method,
            amount: input.amount,
            upi_transaction_id,
            company_share,
            engineer_share,
        });
        request.status = RequestStatus::Completed;

        let updated = self.persist(&request).await?;
        let engineer = self.load_assigned_engineer(&updated).await;
        self.queue_notifications(
            &[
                NotificationKind::RepairCompleted,
                NotificationKind::AdminWorkCompleted,
            ],
            &updated,
            engineer.as_ref(),
        );

        tracing::info!(
            target: "workflow",
            request = %updated.id_string(),
            amount = input.amount,
            company_share,
            engineer_share,
            "Payment recorded, repair completed"
        );
        Ok(updated)
    }
}
