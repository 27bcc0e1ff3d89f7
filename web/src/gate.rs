use types::SessionState;

use crate::Route;

#[derive(Debug, Clone, PartialEq)]
pub enum Access {
    Allow,
    Redirect(Route),
}

impl Route {
    /// Everything under `/leader/` needs a signed-in leader.
    pub fn is_protected(&self) -> bool {
        !matches!(
            self,
            Route::Root {} | Route::Login {} | Route::Logout {} | Route::NotFound { .. }
        )
    }

    /// Where `/` and unknown paths lead.
    pub fn home(session: &SessionState) -> Route {
        if session.is_authenticated() {
            Route::Dashboard {}
        } else {
            Route::Login {}
        }
    }

    pub fn gate(&self, session: &SessionState) -> Access {
        let authenticated = session.is_authenticated();

        match self {
            Route::Logout {} => Access::Allow,
            Route::Root {} | Route::NotFound { .. } => Access::Redirect(Route::home(session)),
            Route::Login {} if authenticated => Access::Redirect(Route::Dashboard {}),
            Route::Login {} => Access::Allow,
            _ if authenticated => Access::Allow,
            _ => Access::Redirect(Route::Login {}),
        }
    }

    /// The sidebar entry a route belongs to.
    pub fn section(&self) -> &'static str {
        match self {
            Route::Root {} | Route::Login {} | Route::Logout {} | Route::NotFound { .. } => "",
            Route::Dashboard {} => "dashboard",
            Route::Members {}
            | Route::AddMember {}
            | Route::EditMember { .. }
            | Route::MemberLedger { .. } => "users",
            Route::AddTransaction { .. } => "transactions",
            Route::Reports {} => "reports",
            Route::Notifications { .. } => "notifications",
            Route::Alerts {} => "alerts",
            Route::Profile {} => "profile",
            Route::Help {} => "help",
            Route::SeniorAmount {} => "senior-amount",
            Route::Loans {} => "loans",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{Credentials, MemberId, TransactionKind};

    fn protected_routes() -> Vec<Route> {
        vec![
            Route::Dashboard {},
            Route::Members {},
            Route::AddMember {},
            Route::edit_member(MemberId(3)),
            Route::ledger(MemberId(3)),
            Route::add_transaction(None, None),
            Route::add_transaction(Some(MemberId(3)), Some(TransactionKind::Debit)),
            Route::Reports {},
            Route::Notifications { user_id: None },
            Route::remind(MemberId(3)),
            Route::Alerts {},
            Route::Profile {},
            Route::Help {},
            Route::SeniorAmount {},
            Route::Loans {},
        ]
    }

    #[test]
    fn anonymous_visitors_are_sent_to_login() {
        for route in protected_routes() {
            assert!(route.is_protected(), "{route}");
            assert_eq!(route.gate(&SessionState::Anonymous), Access::Redirect(Route::Login {}));
        }
        assert_eq!(Route::Login {}.gate(&SessionState::Anonymous), Access::Allow);
    }

    #[test]
    fn root_and_unknown_paths_follow_the_session() {
        let unknown: Route = "/definitely/not/here".parse().unwrap();
        assert!(matches!(unknown, Route::NotFound { .. }));

        for route in [Route::Root {}, unknown] {
            assert_eq!(route.gate(&SessionState::Anonymous), Access::Redirect(Route::Login {}));
        }
    }

    #[test]
    fn paths_parse_to_routes() {
        let route: Route = "/leader/users/12/ledger".parse().unwrap();
        assert_eq!(route, Route::ledger(MemberId(12)));
        assert_eq!(Route::Login {}.to_string(), "/login");
        assert_eq!(Route::SeniorAmount {}.to_string(), "/leader/senior-amount");
    }

    // The only test touching the shared session store.
    #[tokio::test(start_paused = true)]
    async fn signing_in_and_out_moves_the_gate() {
        let session = api::login(Credentials::email("a@gmail.com", "a")).await.unwrap();
        let signed_in = SessionState::Authenticated(session);

        assert_eq!(Route::Login {}.gate(&signed_in), Access::Redirect(Route::Dashboard {}));
        assert_eq!(Route::Root {}.gate(&signed_in), Access::Redirect(Route::Dashboard {}));
        assert_eq!(Route::Logout {}.gate(&signed_in), Access::Allow);
        for route in protected_routes() {
            assert_eq!(route.gate(&signed_in), Access::Allow);
        }

        api::logout();
        let restored = api::restore_session();
        assert_eq!(restored, SessionState::Anonymous);
        assert_eq!(Route::Logout {}.gate(&restored), Access::Allow);
        for route in protected_routes() {
            assert_eq!(route.gate(&restored), Access::Redirect(Route::Login {}));
        }
    }
}
