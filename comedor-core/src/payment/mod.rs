//! Payment pipeline: duplicate detection, payload construction, and the
//! per-week submission orchestrator

pub mod duplicate;
pub mod orchestrator;
pub mod request;

pub use duplicate::{Conflict, ConflictReport, check_week};
pub use orchestrator::{PaymentOrchestrator, PaymentOutcome, PaymentPhase, WeekSubmission};
pub use request::build_request;
