// libs/appointment-cell/src/services/lifecycle.rs
use tracing::{debug, warn};

use crate::models::{AppointmentError, AppointmentStatus};

#[derive(Debug, Default, Clone, Copy)]
pub struct AppointmentLifecycleService;

impl AppointmentLifecycleService {
    pub fn new() -> Self {
        Self
    }

    /// Validate that a status transition is allowed
    pub fn validate_status_transition(
        &self,
        current_status: AppointmentStatus,
        new_status: AppointmentStatus,
    ) -> Result<(), AppointmentError> {
        debug!("Validating status transition from {} to {}", current_status, new_status);

        if !self.get_valid_transitions(current_status).contains(&new_status) {
            warn!("Invalid status transition attempted: {} -> {}", current_status, new_status);
            return Err(AppointmentError::InvalidTransition {
                from: current_status,
                to: new_status,
            });
        }

        Ok(())
    }

    /// Get all valid next statuses for a given current status
    pub fn get_valid_transitions(&self, current_status: AppointmentStatus) -> &'static [AppointmentStatus] {
        match current_status {
            AppointmentStatus::Pending => &[AppointmentStatus::Confirmed, AppointmentStatus::Cancelled],
            AppointmentStatus::Confirmed => &[AppointmentStatus::Completed, AppointmentStatus::Cancelled],
            // Terminal states - no transitions allowed
            AppointmentStatus::Completed => &[],
            AppointmentStatus::Cancelled => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use AppointmentStatus::*;

    const ALL: [AppointmentStatus; 4] = [Pending, Confirmed, Completed, Cancelled];

    #[test]
    fn pending_can_be_confirmed_or_cancelled() {
        let lifecycle = AppointmentLifecycleService::new();
        assert!(lifecycle.validate_status_transition(Pending, Confirmed).is_ok());
        assert!(lifecycle.validate_status_transition(Pending, Cancelled).is_ok());
    }

    #[test]
    fn pending_cannot_skip_to_completed() {
        let lifecycle = AppointmentLifecycleService::new();
        assert!(matches!(
            lifecycle.validate_status_transition(Pending, Completed),
            Err(AppointmentError::InvalidTransition { from: Pending, to: Completed })
        ));
    }

    #[test]
    fn confirmed_can_complete_or_cancel_only() {
        let lifecycle = AppointmentLifecycleService::new();
        assert!(lifecycle.validate_status_transition(Confirmed, Completed).is_ok());
        assert!(lifecycle.validate_status_transition(Confirmed, Cancelled).is_ok());
        assert!(lifecycle.validate_status_transition(Confirmed, Pending).is_err());
        assert!(lifecycle.validate_status_transition(Confirmed, Confirmed).is_err());
    }

    #[test]
    fn terminal_states_reject_everything() {
        let lifecycle = AppointmentLifecycleService::new();
        for terminal in [Completed, Cancelled] {
            assert!(terminal.is_terminal());
            for next in ALL {
                assert!(lifecycle.validate_status_transition(terminal, next).is_err());
            }
        }
    }
}
