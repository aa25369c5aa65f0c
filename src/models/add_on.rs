//! Add-on (jumbo) options of a service

use serde::{Deserialize, Serialize};

use super::Service;

/// Which add-on path the customer picked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOnChoice {
    /// Salon supplies the add-on (`salon` on the booking form)
    #[serde(alias = "salon")]
    SalonProvided,
    /// Customer brings their own add-on (`own` on the booking form)
    #[serde(alias = "own")]
    CustomerProvided,
}

impl AddOnChoice {
    pub fn label(&self) -> &'static str {
        match self {
            AddOnChoice::SalonProvided => "Usará jumbo do salão",
            AddOnChoice::CustomerProvided => "Trará jumbo próprio",
        }
    }
}

/// Which add-on paths a service allows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOnPolicy {
    /// Bundled add-on or own add-on with discount; customer picks
    Selectable,
    /// Only the salon's add-on; the discount path is disabled
    SalonOnly,
    /// Only the customer's own add-on; the salon path is disabled
    CustomerOnly,
    /// No add-on involved; any choice is ignored
    NotApplicable,
}

impl AddOnPolicy {
    pub fn for_service(service: &Service) -> Self {
        match (service.includes_add_on, service.offers_add_on_discount) {
            (true, true) => AddOnPolicy::Selectable,
            (true, false) => AddOnPolicy::SalonOnly,
            (false, true) => AddOnPolicy::CustomerOnly,
            (false, false) => AddOnPolicy::NotApplicable,
        }
    }

    /// Choice a fresh booking starts with
    pub fn default_choice(&self) -> AddOnChoice {
        match self {
            AddOnPolicy::CustomerOnly => AddOnChoice::CustomerProvided,
            AddOnPolicy::Selectable | AddOnPolicy::SalonOnly | AddOnPolicy::NotApplicable => {
                AddOnChoice::SalonProvided
            }
        }
    }

    /// Whether `choice` is an enabled path under this policy
    pub fn allows(&self, choice: AddOnChoice) -> bool {
        match self {
            AddOnPolicy::Selectable | AddOnPolicy::NotApplicable => true,
            AddOnPolicy::SalonOnly => choice == AddOnChoice::SalonProvided,
            AddOnPolicy::CustomerOnly => choice == AddOnChoice::CustomerProvided,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn service(includes: bool, offers: bool) -> Service {
        let mut service = Service::priced(1, "Tranças", dec!(100));
        service.includes_add_on = includes;
        service.offers_add_on_discount = offers;
        service
    }

    #[test]
    fn test_policy_per_service_configuration() {
        assert_eq!(AddOnPolicy::for_service(&service(true, true)), AddOnPolicy::Selectable);
        assert_eq!(AddOnPolicy::for_service(&service(true, false)), AddOnPolicy::SalonOnly);
        assert_eq!(AddOnPolicy::for_service(&service(false, true)), AddOnPolicy::CustomerOnly);
        assert_eq!(AddOnPolicy::for_service(&service(false, false)), AddOnPolicy::NotApplicable);
    }

    #[test]
    fn test_default_choice() {
        assert_eq!(AddOnPolicy::Selectable.default_choice(), AddOnChoice::SalonProvided);
        assert_eq!(AddOnPolicy::SalonOnly.default_choice(), AddOnChoice::SalonProvided);
        assert_eq!(AddOnPolicy::CustomerOnly.default_choice(), AddOnChoice::CustomerProvided);
        assert_eq!(AddOnPolicy::NotApplicable.default_choice(), AddOnChoice::SalonProvided);
    }

    #[test]
    fn test_disabled_paths_are_not_allowed() {
        assert!(!AddOnPolicy::SalonOnly.allows(AddOnChoice::CustomerProvided));
        assert!(!AddOnPolicy::CustomerOnly.allows(AddOnChoice::SalonProvided));
        assert!(AddOnPolicy::Selectable.allows(AddOnChoice::CustomerProvided));
    }

    #[test]
    fn test_choice_accepts_form_values() {
        let choice: AddOnChoice = serde_json::from_str("\"own\"").unwrap();
        assert_eq!(choice, AddOnChoice::CustomerProvided);
        let choice: AddOnChoice = serde_json::from_str("\"salon_provided\"").unwrap();
        assert_eq!(choice, AddOnChoice::SalonProvided);
    }
}
