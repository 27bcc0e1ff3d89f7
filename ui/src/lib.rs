//! Pieces shared by every page of the panel.

mod action;
pub use action::{ActionSink, AsyncAction, Settled, dismiss_after, run, use_action};

mod components;
pub use components::{ConfirmDialog, Loading, PageHeader, StatCard, StatusBadge, Tone};

mod error;
pub use error::{ErrorBanner, ErrorState, provide_error, use_error};

mod session;
pub use session::{SessionContext, provide_session, use_session};

mod theme;
pub use theme::{ThemeContext, ThemeToggle, provide_theme, use_theme};

mod toast;
pub use toast::Toast;
