//! Legal-transition table
//!
//! The single source of truth for which status changes exist, who may
//! trigger them, what extra payload they must carry, and which
//! notifications they fire. Anything not in this table is an
//! `InvalidTransition`.

use shared::models::{ActorRole, NotificationKind, RequestStatus};

use NotificationKind as N;
use RequestStatus as S;

/// Extra payload a transition must carry before any write happens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Status write only
    None,
    /// Non-blank cancellation reason
    CancelReason,
    /// Non-blank hold reason
    HoldReason,
    /// Non-blank unable-to-complete reason
    UnableReason,
    /// An active engineer selection (served by `WorkflowEngine::assign`)
    EngineerSelection,
    /// Completion report + payment record (served by the completion recorder)
    CompletionAndPayment,
}

/// One row of the legal-transition table
#[derive(Debug, Clone, Copy)]
pub struct TransitionRule {
    pub from: RequestStatus,
    pub to: RequestStatus,
    pub actor: ActorRole,
    pub requires: Requirement,
    pub notifications: &'static [NotificationKind],
}

/// The complete legal-transition table
pub const TRANSITIONS: &[TransitionRule] = &[
    TransitionRule {
        from: S::Pending,
        to: S::Confirmed,
        actor: ActorRole::Admin,
        requires: Requirement::None,
        notifications: &[],
    },
    TransitionRule {
        from: S::Pending,
        to: S::Cancelled,
        actor: ActorRole::Admin,
        requires: Requirement::CancelReason,
        notifications: &[N::RequestCancelled],
    },
    TransitionRule {
        from: S::Confirmed,
        to: S::Cancelled,
        actor: ActorRole::Admin,
        requires: Requirement::CancelReason,
        notifications: &[N::RequestCancelled],
    },
    // Fresh assignment and reassignment after rejection/failure
    TransitionRule {
        from: S::Confirmed,
        to: S::Assigned,
        actor: ActorRole::Admin,
        requires: Requirement::EngineerSelection,
        notifications: &[N::EngineerAssignment],
    },
    TransitionRule {
        from: S::Assigned,
        to: S::Assigned,
        actor: ActorRole::Admin,
        requires: Requirement::EngineerSelection,
        notifications: &[N::EngineerAssignment],
    },
    TransitionRule {
        from: S::Rejected,
        to: S::Assigned,
        actor: ActorRole::Admin,
        requires: Requirement::EngineerSelection,
        notifications: &[N::EngineerAssignment],
    },
    TransitionRule {
        from: S::UnableToComplete,
        to: S::Assigned,
        actor: ActorRole::Admin,
        requires: Requirement::EngineerSelection,
        notifications: &[N::EngineerAssignment],
    },
    TransitionRule {
        from: S::Assigned,
        to: S::Accepted,
        actor: ActorRole::Engineer,
        requires: Requirement::None,
        notifications: &[],
    },
    TransitionRule {
        from: S::Assigned,
        to: S::Rejected,
        actor: ActorRole::Engineer,
        requires: Requirement::None,
        notifications: &[N::AdminTaskRejected],
    },
    TransitionRule {
        from: S::Accepted,
        to: S::InProgress,
        actor: ActorRole::Engineer,
        requires: Requirement::None,
        notifications: &[N::AdminWorkStarted, N::EngineerStarted],
    },
    TransitionRule {
        from: S::InProgress,
        to: S::Completed,
        actor: ActorRole::Engineer,
        requires: Requirement::CompletionAndPayment,
        notifications: &[N::RepairCompleted, N::AdminWorkCompleted],
    },
    TransitionRule {
        from: S::InProgress,
        to: S::HoldOnWork,
        actor: ActorRole::Engineer,
        requires: Requirement::HoldReason,
        notifications: &[N::AdminWorkOnHold, N::CustomerWorkOnHold],
    },
    TransitionRule {
        from: S::InProgress,
        to: S::UnableToComplete,
        actor: ActorRole::Engineer,
        requires: Requirement::UnableReason,
        notifications: &[N::AdminUnableToComplete],
    },
    TransitionRule {
        from: S::HoldOnWork,
        to: S::InProgress,
        actor: ActorRole::Admin,
        requires: Requirement::None,
        notifications: &[N::EngineerWorkResumed, N::CustomerWorkResumed],
    },
];

/// Look up the rule for a (from, to) pair
pub fn find_rule(from: RequestStatus, to: RequestStatus) -> Option<&'static TransitionRule> {
    TRANSITIONS.iter().find(|r| r.from == from && r.to == to)
}

/// All transitions leaving a given status
pub fn transitions_from(from: RequestStatus) -> impl Iterator<Item = &'static TransitionRule> {
    TRANSITIONS.iter().filter(move |r| r.from == from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states_have_no_outgoing_rules() {
        assert_eq!(transitions_from(S::Completed).count(), 0);
        assert_eq!(transitions_from(S::Cancelled).count(), 0);
    }

    #[test]
    fn assignment_sources() {
        for from in [S::Confirmed, S::Assigned, S::Rejected, S::UnableToComplete] {
            let rule = find_rule(from, S::Assigned).expect("assignment rule");
            assert_eq!(rule.requires, Requirement::EngineerSelection);
            assert_eq!(rule.actor, ActorRole::Admin);
        }
        assert!(find_rule(S::InProgress, S::Assigned).is_none());
        assert!(find_rule(S::Pending, S::Assigned).is_none());
    }

    #[test]
    fn no_duplicate_rows() {
        for (i, a) in TRANSITIONS.iter().enumerate() {
            for b in &TRANSITIONS[i + 1..] {
                assert!(
                    !(a.from == b.from && a.to == b.to),
                    "duplicate rule {} -> {}",
                    a.from,
                    a.to
                );
            }
        }
    }
}
