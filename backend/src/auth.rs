use secrecy::{ExposeSecret, SecretString};
use types::{Credentials, Leader, LoginMethod, Result, err};

/// The single demo account the panel accepts for email sign-in.
pub struct DemoAccount<'a> {
    pub email: &'a str,
    pub password: &'a SecretString,
}

impl DemoAccount<'_> {
    /// Check `credentials` and return who signed in.
    ///
    /// Mobile sign-in is not wired to an OTP flow and accepts any input.
    pub fn authenticate(&self, credentials: &Credentials) -> Result<Leader> {
        match credentials.method {
            LoginMethod::Email => {
                let email_matches = credentials.identifier == self.email;
                let password_matches =
                    credentials.password.expose_secret() == self.password.expose_secret();

                if !(email_matches && password_matches) {
                    return Err(err!("Invalid credentials. Use {} / {}", self.email, self.password.expose_secret()));
                }

                Ok(Leader {
                    display_name: "Leader Name".to_string(),
                    login: self.email.to_string(),
                    method: LoginMethod::Email,
                })
            }
            LoginMethod::Mobile => {
                tracing::warn!(
                    mobile = %credentials.identifier,
                    "mobile sign-in accepted without verification"
                );

                Ok(Leader {
                    display_name: "Leader Name".to_string(),
                    login: credentials.identifier.trim().to_string(),
                    method: LoginMethod::Mobile,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(password: &SecretString) -> DemoAccount<'_> {
        DemoAccount {
            email: "a@gmail.com",
            password,
        }
    }

    #[test]
    fn demo_pair_signs_in() {
        let password = "a".into();
        let leader = account(&password)
            .authenticate(&Credentials::email("a@gmail.com", "a"))
            .unwrap();
        assert_eq!(leader.login, "a@gmail.com");
        assert_eq!(leader.method, LoginMethod::Email);
    }

    #[test]
    fn any_other_email_pair_fails_with_hint() {
        let password = "a".into();
        for (email, pass) in [("a@gmail.com", "b"), ("b@gmail.com", "a"), (" a@gmail.com ", "a"), ("", "")] {
            let error = account(&password)
                .authenticate(&Credentials::email(email, pass))
                .unwrap_err();
            assert_eq!(error.message(), "Invalid credentials. Use a@gmail.com / a");
        }
    }

    #[test]
    fn mobile_always_signs_in() {
        let password = "a".into();
        for (mobile, pass) in [("+91 9876543210", "whatever"), ("", "")] {
            let leader = account(&password)
                .authenticate(&Credentials::mobile(mobile, pass))
                .unwrap();
            assert_eq!(leader.method, LoginMethod::Mobile);
        }
    }
}
