//! Comedor ordering core
//!
//! Order-selection aggregation and reconciliation engine for the school
//! cafeteria weekly ordering system.
//!
//! # Module structure
//!
//! ```text
//! comedor-core/src/
//! ├── common/       # errors, money, time, logging
//! ├── config.rs     # env-backed configuration
//! ├── selection/    # selection store + session continuity mirror
//! ├── summary/      # order summary aggregation
//! ├── week/         # Monday-anchored week partitioner
//! ├── payment/      # duplicate detection, payload build, orchestration
//! ├── services/     # external collaborator contracts
//! ├── menu.rs       # menu planning facade
//! └── session.rs    # explicit ordering session context
//! ```
//!
//! # Control flow
//!
//! ```text
//! UI → OrderingSession (SelectionStore) → summarize() for display totals
//!                 │ pay
//!                 ▼
//!   partition_by_week → duplicate check per week → sequential submission
//!                 │                                      │
//!              Conflict                        first payment_url → Redirect
//! ```

pub mod common;
pub mod config;
pub mod menu;
pub mod payment;
pub mod selection;
pub mod services;
pub mod session;
pub mod summary;
pub mod week;

// Re-export public types
pub use common::error::{CoreError, CoreResult};
pub use common::logger::init_logger;
pub use config::Config;
pub use menu::MenuPlanner;
pub use payment::duplicate::{Conflict, ConflictReport};
pub use payment::orchestrator::{PaymentOrchestrator, PaymentOutcome, PaymentPhase, WeekSubmission};
pub use selection::persist::SelectionMirror;
pub use selection::store::SelectionStore;
pub use services::{MenuService, OrderService, SessionStore};
pub use session::OrderingSession;
pub use summary::summarize;
pub use week::{WeekGroup, partition_by_week};
