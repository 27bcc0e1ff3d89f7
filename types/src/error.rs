use serde::{Deserialize, Serialize};

/// A serializable error for client rendering.
///
/// Built from any `anyhow`-compatible error; the message carries the whole
/// context chain so a toast or banner can show it as-is. The chain is also
/// kept link by link, outermost context first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Error {
    message: String,
    #[serde(default)]
    chain: Vec<String>,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn chain(&self) -> &[String] {
        &self.chain
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl<E> From<E> for Error
where
    E: Into<anyhow::Error>,
{
    fn from(error: E) -> Self {
        let report: anyhow::Error = error.into();
        Self {
            message: format!("{report:#}"),
            chain: report.chain().map(ToString::to_string).collect(),
        }
    }
}

/// Build a [`Error`] from a format string, like `anyhow!`.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from($crate::internal_anyhow_dont_use!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn message_includes_context_chain() {
        let error: Error = std::result::Result::<(), _>::Err(anyhow::anyhow!("not found"))
            .context("loading member 7")
            .unwrap_err()
            .into();

        assert_eq!(error.message(), "loading member 7: not found");
        assert_eq!(error.chain(), ["loading member 7", "not found"]);
    }

    #[test]
    fn chain_keeps_colons_inside_a_message() {
        let error = crate::err!("Invalid credentials: use a@gmail.com / a");
        assert_eq!(error.chain(), ["Invalid credentials: use a@gmail.com / a"]);
    }

    #[test]
    fn err_macro_formats() {
        let id = 3;
        let error = crate::err!("member {id} is gone");
        assert_eq!(error.to_string(), "member 3 is gone");
    }
}
