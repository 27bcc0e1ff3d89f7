pub mod action;
pub mod alert;
mod error;
pub mod ledger;
pub mod loan;
mod money;
pub mod notification;
pub mod profile;
pub mod report;
pub mod senior;
pub mod session;
pub mod theme;
pub mod validate;

pub use action::{ActionState, ActionStatus};
pub use error::{Error, Result};
pub use ledger::{Member, MemberId, Transaction, TransactionKind};
pub use money::Amount;
pub use session::{Credentials, Leader, LoginMethod, Session, SessionState, SessionToken};
pub use theme::Theme;

#[doc(hidden)]
pub use anyhow::anyhow as internal_anyhow_dont_use;
