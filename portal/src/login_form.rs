use crate::PortalConfig;
use thiserror::Error;
use url::form_urlencoded;

/// Why a login attempt was refused
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginError {
    /// the username or password field was missing or blank
    #[error("Validation failed")]
    Validation,

    /// the credentials did not match
    #[error("Invalid username or password")]
    InvalidCredentials,
}

/// The fields of a submitted login form
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoginForm {
    username: String,
    password: String,
}

impl LoginForm {
    /**
    reads `username` and `password` from a url-encoded body. the first
    occurrence of each field wins and unknown fields are ignored
    */
    pub fn parse(body: &str) -> Self {
        let mut username = None;
        let mut password = None;

        for (key, value) in form_urlencoded::parse(body.as_bytes()) {
            match &*key {
                "username" if username.is_none() => username = Some(value.into_owned()),
                "password" if password.is_none() => password = Some(value.into_owned()),
                _ => {}
            }
        }

        Self {
            username: username.unwrap_or_default(),
            password: password.unwrap_or_default(),
        }
    }

    /// the submitted username, trimmed
    pub fn username(&self) -> &str {
        self.username.trim()
    }

    /// checks the form against the configured account, returning the
    /// username on success
    pub fn authenticate(&self, config: &PortalConfig) -> Result<String, LoginError> {
        if self.username().is_empty() || self.password.is_empty() {
            return Err(LoginError::Validation);
        }

        if config.verify(self.username(), &self.password) {
            Ok(self.username().to_string())
        } else {
            Err(LoginError::InvalidCredentials)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_urlencoded_fields() {
        let form = LoginForm::parse("username=ad%20min&password=p%26ss+word&extra=1");
        assert_eq!(form.username(), "ad min");
        assert_eq!(form.password, "p&ss word");
    }

    #[test]
    fn authentication_outcomes() {
        let config = PortalConfig::new();
        assert_eq!(
            LoginForm::parse("username=admin&password=password123").authenticate(&config),
            Ok("admin".to_string())
        );
        assert_eq!(
            LoginForm::parse("username=admin&password=nope").authenticate(&config),
            Err(LoginError::InvalidCredentials)
        );
        assert_eq!(
            LoginForm::parse("username=&password=x").authenticate(&config),
            Err(LoginError::Validation)
        );
        assert_eq!(
            LoginForm::parse("").authenticate(&config),
            Err(LoginError::Validation)
        );
    }

    #[test]
    fn messages_match_flash_text() {
        assert_eq!(LoginError::Validation.to_string(), "Validation failed");
        assert_eq!(
            LoginError::InvalidCredentials.to_string(),
            "Invalid username or password"
        );
    }
}
