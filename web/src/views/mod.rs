mod components;

mod login;
pub use login::Login;

mod logout;
pub use logout::Logout;

mod dashboard;
pub use dashboard::Dashboard;

mod members;
pub use members::{AddMember, EditMember, Members};

mod ledger;
pub use ledger::{AddTransaction, MemberLedger};

mod notifications;
pub use notifications::Notifications;

mod alerts;
pub use alerts::Alerts;

mod reports;
pub use reports::Reports;

mod loans;
pub use loans::Loans;

mod senior;
pub use senior::SeniorAmount;

mod profile;
pub use profile::Profile;

mod help;
pub use help::Help;
