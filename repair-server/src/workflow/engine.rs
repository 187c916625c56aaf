//! Workflow engine
//!
//! Holds the repositories, the notifier handle, and a per-request lock
//! map. Validation happens entirely before the write; the write is a
//! version-guarded compare-and-swap; notifications are queued after the
//! write commits and never influence its outcome.

use std::sync::Arc;

use dashmap::DashMap;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio::sync::Mutex;

use crate::db::repository::{EngineerRepository, RepairRequestRepository};
use crate::notify::{build_message, Notifier};
use crate::workflow::error::{WorkflowError, WorkflowResult};
use crate::workflow::transition::{find_rule, Requirement};
use shared::models::repair_request::BookingCreate;
use shared::models::{Actor, ActorRole, Engineer, NotificationKind, RepairRequest, RequestStatus};
use shared::util::non_blank;

/// Generic transition request (confirm / cancel / accept / reject /
/// start / hold / unable / resume). Assignment and completion carry
/// extra mandatory payload and use their dedicated entry points.
#[derive(Debug, Clone)]
pub struct TransitionInput {
    pub request_id: String,
    pub to: RequestStatus,
    pub cancel_reason: Option<String>,
    pub hold_reason: Option<String>,
    pub unable_reason: Option<String>,
}

impl TransitionInput {
    pub fn new(request_id: impl Into<String>, to: RequestStatus) -> Self {
        Self {
            request_id: request_id.into(),
            to,
            cancel_reason: None,
            hold_reason: None,
            unable_reason: None,
        }
    }
}

/// Repair-request workflow engine
pub struct WorkflowEngine {
    pub(crate) requests: RepairRequestRepository,
    pub(crate) engineers: EngineerRepository,
    pub(crate) notifier: Notifier,
    pub(crate) admin_email: String,
    /// Per-request serialization: concurrent admin clicks on the same
    /// request queue up here instead of racing the CAS
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl WorkflowEngine {
    pub fn new(db: Surreal<Db>, notifier: Notifier, admin_email: impl Into<String>) -> Self {
        Self {
            requests: RepairRequestRepository::new(db.clone()),
            engineers: EngineerRepository::new(db),
            notifier,
            admin_email: admin_email.into(),
            locks: DashMap::new(),
        }
    }

    pub(crate) fn lock_for(&self, request_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(request_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Customer booking: creates the request in `pending` and notifies
    /// the back office plus a customer acknowledgement.
    pub async fn submit_booking(&self, payload: BookingCreate) -> WorkflowResult<RepairRequest> {
        non_blank(&payload.customer_name).ok_or(WorkflowError::MissingField("customerName"))?;
        non_blank(&payload.customer_email).ok_or(WorkflowError::MissingField("customerEmail"))?;
        non_blank(&payload.customer_phone).ok_or(WorkflowError::MissingField("customerPhone"))?;
        non_blank(&payload.customer_address)
            .ok_or(WorkflowError::MissingField("customerAddress"))?;
        non_blank(&payload.service_type).ok_or(WorkflowError::MissingField("serviceType"))?;
        non_blank(&payload.device_type).ok_or(WorkflowError::MissingField("deviceType"))?;
        non_blank(&payload.model_number).ok_or(WorkflowError::MissingField("modelNumber"))?;
        let issue = non_blank(&payload.issue_description)
            .ok_or(WorkflowError::MissingField("issueDescription"))?
            .to_string();

        let request = self
            .requests
            .create(payload.customer(), payload.device(), issue)
            .await?;

        self.queue_notifications(
            &[
                NotificationKind::AdminNewBooking,
                NotificationKind::StatusUpdate,
            ],
            &request,
            None,
        );

        tracing::info!(
            target: "workflow",
            request = %request.id_string(),
            "Booking created"
        );
        Ok(request)
    }

    /// Apply a generic status transition on behalf of `actor`.
    pub async fn transition(
        &self,
        actor: &Actor,
        input: TransitionInput,
    ) -> WorkflowResult<RepairRequest> {
        let lock = self.lock_for(&input.request_id);
        let _guard = lock.lock().await;

        let mut request = self
            .requests
            .find_by_id(&input.request_id)
            .await?
            .ok_or_else(|| WorkflowError::RequestNotFound(input.request_id.clone()))?;

        let from = request.status;
        let to = input.to;

        // Terminal states admit nothing, not even a repeated write of
        // the same terminal status
        if from.is_terminal() {
            return Err(WorkflowError::InvalidTransition { from, to });
        }

        let rule = find_rule(from, to).ok_or(WorkflowError::InvalidTransition { from, to })?;

        self.authorize(actor, rule.actor, &request)?;

        match rule.requires {
            Requirement::None => {}
            Requirement::CancelReason => {
                let reason = input
                    .cancel_reason
                    .as_deref()
                    .and_then(non_blank)
                    .ok_or(WorkflowError::MissingField("cancelReason"))?;
                request.cancel_reason = Some(reason.to_string());
            }
            Requirement::HoldReason => {
                let reason = input
                    .hold_reason
                    .as_deref()
                    .and_then(non_blank)
                    .ok_or(WorkflowError::MissingField("holdReason"))?;
                request.hold_reason = Some(reason.to_string());
            }
            Requirement::UnableReason => {
                let reason = input
                    .unable_reason
                    .as_deref()
                    .and_then(non_blank)
                    .ok_or(WorkflowError::MissingField("unableReason"))?;
                request.unable_reason = Some(reason.to_string());
            }
            // These transitions carry mandatory payload served by their
            // dedicated entry points; the generic path rejects them
            Requirement::EngineerSelection => {
                return Err(WorkflowError::MissingField("engineerId"));
            }
            Requirement::CompletionAndPayment => {
                return Err(WorkflowError::MissingField("completion report and payment"));
            }
        }

        request.status = to;

        let updated = self.persist(&request).await?;
        let engineer = self.load_assigned_engineer(&updated).await;
        self.queue_notifications(rule.notifications, &updated, engineer.as_ref());

        tracing::info!(
            target: "workflow",
            request = %updated.id_string(),
            from = %from,
            to = %to,
            actor = %actor.role,
            "Status transition applied"
        );
        Ok(updated)
    }

    /// Role check plus engineer-identity check: an engineer may only act
    /// on a request currently assigned to them.
    pub(crate) fn authorize(
        &self,
        actor: &Actor,
        required_role: ActorRole,
        request: &RepairRequest,
    ) -> WorkflowResult<()> {
        if actor.role != required_role {
            return Err(WorkflowError::Forbidden(format!(
                "transition requires {} actor",
                required_role
            )));
        }
        if actor.role == ActorRole::Engineer {
            let assigned = request
                .assigned_engineer
                .as_ref()
                .map(|id| id.to_string())
                .ok_or_else(|| {
                    WorkflowError::Forbidden("request has no assigned engineer".to_string())
                })?;
            if assigned != actor.id {
                return Err(WorkflowError::Forbidden(
                    "request is assigned to a different engineer".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Version-guarded write; a CAS miss surfaces as `Conflict`.
    pub(crate) async fn persist(&self, request: &RepairRequest) -> WorkflowResult<RepairRequest> {
        let id = request
            .id
            .clone()
            .ok_or_else(|| WorkflowError::RequestNotFound("<unsaved>".to_string()))?;
        self.requests
            .update_guarded(&id, request.version, request)
            .await?
            .ok_or(WorkflowError::Conflict)
    }

    pub(crate) async fn load_assigned_engineer(&self, request: &RepairRequest) -> Option<Engineer> {
        let id = request.assigned_engineer.as_ref()?.to_string();
        match self.engineers.find_by_id(&id).await {
            Ok(engineer) => engineer,
            Err(e) => {
                tracing::warn!(target: "workflow", error = %e, "Failed to load assigned engineer");
                None
            }
        }
    }

    /// Queue the notifications a committed transition produced.
    /// Best-effort: unresolvable recipients are dropped with a warning.
    pub(crate) fn queue_notifications(
        &self,
        kinds: &[NotificationKind],
        request: &RepairRequest,
        engineer: Option<&Engineer>,
    ) {
        for &kind in kinds {
            match build_message(kind, request, engineer, &self.admin_email) {
                Some(message) => self.notifier.queue(message),
                None => tracing::warn!(
                    target: "workflow",
                    kind = %kind,
                    request = %request.id_string(),
                    "No recipient for notification, dropping"
                ),
            }
        }
    }
}
