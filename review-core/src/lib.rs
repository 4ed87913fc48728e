//! Review Core - financial recalculation and approval engine
//!
//! Pure, synchronous engine behind the service-order review screen:
//! pricing tiers, the editable line-item ledger, totals, pre-approval
//! validation and the review workflow state machine.
//!
//! # Example
//!
//! ```
//! use review_core::{ReviewSession, ReviewAction, plan};
//! use review_core::ledger::MaterialField;
//! use shared::{Material, OrderDetail};
//!
//! let mut session = ReviewSession::open(OrderDetail::default());
//! let idx = session.add::<Material>();
//! session.update_field(idx, MaterialField::Quantity, "2").unwrap();
//! session.update_field(idx, MaterialField::UnitPrice, "10,50").unwrap();
//! assert_eq!(session.breakdown().total_materials.to_string(), "21.00");
//!
//! let draft = plan(&session, ReviewAction::Save).unwrap();
//! assert_eq!(draft.path(), "review/0/save");
//! ```

pub mod error;
pub mod ledger;
pub mod list_cache;
pub mod money;
pub mod pricing;
pub mod session;
pub mod totals;
pub mod validation;
pub mod workflow;

pub use error::{ReviewError, ReviewResult};
pub use ledger::Ledger;
pub use list_cache::ListCache;
pub use pricing::{ClientType, PricingTier};
pub use session::ReviewSession;
pub use totals::FinancialBreakdown;
pub use validation::Violation;
pub use workflow::{ReviewAction, TransitionBody, TransitionRequest, plan, plan_for_row};
