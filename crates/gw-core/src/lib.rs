//! Shared primitives used across Gangway crates.

use core::fmt;

/// Result alias used across the workspace.
pub type ShellResult<T> = Result<T, ShellError>;

/// Top-level error type for the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellError {
    pub code: &'static str,
    pub message: String,
}

impl ShellError {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ShellError {}

/// Desktop Chrome user agent presented by the embedded browser.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Scheme literal reserved for the cookie handshake.
pub const DEFAULT_PRIVATE_SCHEME: &str = "autotrader";

/// Shell-wide configuration: the private scheme the interceptor claims,
/// the user agent the browser control presents, and the window shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub private_scheme: String,
    pub user_agent: String,
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            private_scheme: DEFAULT_PRIVATE_SCHEME.to_owned(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            window_title: "Gangway".to_owned(),
            window_width: 800,
            window_height: 600,
        }
    }
}

impl ShellConfig {
    pub fn validate(&self) -> ShellResult<()> {
        // URL parsing normalizes schemes to lowercase, so anything else
        // here could never match an incoming navigation attempt.
        if !is_valid_scheme(&self.private_scheme) {
            return Err(ShellError::new(
                "config.scheme_invalid",
                format!(
                    "private scheme `{}` must be lowercase ASCII, start with a letter, \
                     and contain only letters, digits, `+`, `-`, or `.`",
                    self.private_scheme
                ),
            ));
        }

        if matches!(self.private_scheme.as_str(), "http" | "https") {
            return Err(ShellError::new(
                "config.scheme_reserved",
                format!(
                    "private scheme `{}` would shadow real web navigation",
                    self.private_scheme
                ),
            ));
        }

        if self.user_agent.trim().is_empty() {
            return Err(ShellError::new(
                "config.user_agent_empty",
                "user agent string must not be empty",
            ));
        }

        if self.window_width == 0 || self.window_height == 0 {
            return Err(ShellError::new(
                "config.window_size_invalid",
                format!(
                    "window size {}x{} must be non-zero",
                    self.window_width, self.window_height
                ),
            ));
        }

        Ok(())
    }
}

fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    first.is_ascii_lowercase()
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '+' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::ShellConfig;

    #[test]
    fn default_config_is_valid() {
        let config = ShellConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.private_scheme, "autotrader");
    }

    #[test]
    fn rejects_uppercase_scheme() {
        let config = ShellConfig {
            private_scheme: "AutoTrader".to_owned(),
            ..ShellConfig::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "config.scheme_invalid");
        }
    }

    #[test]
    fn rejects_web_schemes() {
        let config = ShellConfig {
            private_scheme: "https".to_owned(),
            ..ShellConfig::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "config.scheme_reserved");
        }
    }

    #[test]
    fn rejects_blank_user_agent() {
        let config = ShellConfig {
            user_agent: "   ".to_owned(),
            ..ShellConfig::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "config.user_agent_empty");
        }
    }

    #[test]
    fn rejects_zero_window_size() {
        let config = ShellConfig {
            window_width: 0,
            ..ShellConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
