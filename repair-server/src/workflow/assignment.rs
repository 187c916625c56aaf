//! Assignment resolver
//!
//! Matches a request to an engineer. A specialization of the transition
//! engine for the `assigned` target, which carries a mandatory engineer
//! selection. Reassignment overwrites the previous engineer; a job that
//! is already `in_progress` must be resolved (hold / unable) before it
//! can move to someone else.

use crate::workflow::engine::WorkflowEngine;
use crate::workflow::error::{WorkflowError, WorkflowResult};
use shared::models::{Actor, ActorRole, NotificationKind, RepairRequest, RequestStatus};

impl WorkflowEngine {
    /// Assign (or reassign) a request to an active engineer.
    pub async fn assign(
        &self,
        actor: &Actor,
        request_id: &str,
        engineer_id: &str,
    ) -> WorkflowResult<RepairRequest> {
        if actor.role != ActorRole::Admin {
            return Err(WorkflowError::Forbidden(
                "assignment requires admin actor".to_string(),
            ));
        }

        let lock = self.lock_for(request_id);
        let _guard = lock.lock().await;

        let mut request = self
            .requests
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| WorkflowError::RequestNotFound(request_id.to_string()))?;

        let from = request.status;
        if !matches!(
            from,
            RequestStatus::Confirmed
                | RequestStatus::Assigned
                | RequestStatus::Rejected
                | RequestStatus::UnableToComplete
        ) {
            return Err(WorkflowError::InvalidTransition {
                from,
                to: RequestStatus::Assigned,
            });
        }

        let engineer = self
            .engineers
            .find_by_id(engineer_id)
            .await?
            .ok_or_else(|| WorkflowError::EngineerNotFound(engineer_id.to_string()))?;
        if !engineer.is_active {
            return Err(WorkflowError::InactiveEngineer(engineer_id.to_string()));
        }

        request.assigned_engineer = engineer.id.clone();
        request.status = RequestStatus::Assigned;

        let updated = self.persist(&request).await?;
        self.queue_notifications(
            &[NotificationKind::EngineerAssignment],
            &updated,
            Some(&engineer),
        );

        tracing::info!(
            target: "workflow",
            request = %updated.id_string(),
            engineer = %engineer.id_string(),
            from = %from,
            "Engineer assigned"
        );
        Ok(updated)
    }
}
