//! Add-on choice held by a booking in progress

use serde::Serialize;

use crate::models::{AddOnChoice, AddOnPolicy, Service};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SelectionError {
    #[error("Add-on option {choice:?} is not available for service {service_id} ({policy:?})")]
    ChoiceUnavailable {
        service_id: i64,
        choice: AddOnChoice,
        policy: AddOnPolicy,
    },
}

/// Booking selection for one loaded service.
///
/// Created with the policy's default choice and changed any number of times
/// afterwards; it never reaches back into the service it was built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingSelection {
    service_id: i64,
    policy: AddOnPolicy,
    choice: AddOnChoice,
}

impl BookingSelection {
    pub fn for_service(service: &Service) -> Self {
        let policy = AddOnPolicy::for_service(service);
        Self {
            service_id: service.id,
            policy,
            choice: policy.default_choice(),
        }
    }

    /// Selection for `service` with an optional stored or submitted choice
    pub fn with_choice(
        service: &Service,
        choice: Option<AddOnChoice>,
    ) -> Result<Self, SelectionError> {
        let mut selection = Self::for_service(service);
        if let Some(choice) = choice {
            selection.choose(choice)?;
        }
        Ok(selection)
    }

    /// Switch add-on path; disabled paths are rejected
    pub fn choose(&mut self, choice: AddOnChoice) -> Result<(), SelectionError> {
        if !self.policy.allows(choice) {
            return Err(SelectionError::ChoiceUnavailable {
                service_id: self.service_id,
                choice,
                policy: self.policy,
            });
        }
        self.choice = choice;
        Ok(())
    }

    pub fn choice(&self) -> AddOnChoice {
        self.choice
    }

    pub fn policy(&self) -> AddOnPolicy {
        self.policy
    }

    pub fn service_id(&self) -> i64 {
        self.service_id
    }
}
