//! Service layer: the API surface consumed by the external HTTP/CLI layer
//! and the scheduling trigger.

pub mod match_flow;
pub mod registrations;

pub use match_flow::MatchFlowService;
pub use registrations::RegistrationService;
