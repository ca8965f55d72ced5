use serde::{Deserialize, Serialize};
use serde_valid::Validate;

use super::common::{SubmitError, DEFAULT_API_HOST};

/// Body of `POST /login`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct Credentials {
    #[validate(min_length = 1)]
    pub username: String,
    #[validate(min_length = 1)]
    pub password: String,
}

/// Token returned from login
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Result of a successful login, handed to the next step
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub api_host: String,
}

/// Raw state of the login screen
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginForm {
    /// API address received from the configuration step
    pub api_host: String,
    pub username: String,
    pub password: String,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new(DEFAULT_API_HOST)
    }
}

impl LoginForm {
    pub fn new(api_host: impl Into<String>) -> Self {
        let api_host = api_host.into();
        Self {
            api_host: if api_host.trim().is_empty() {
                DEFAULT_API_HOST.to_string()
            } else {
                api_host
            },
            username: String::new(),
            password: String::new(),
        }
    }

    /// Both fields must be filled in before anything is sent.
    pub fn credentials(&self) -> Result<Credentials, SubmitError> {
        let credentials = Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        };

        credentials
            .validate()
            .map_err(|_| SubmitError::Validation("Fill in username and password".to_string()))?;

        Ok(credentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fields_are_rejected() {
        let cases = [("", "secret"), ("admin", ""), ("", "")];

        for (username, password) in cases {
            let form = LoginForm {
                username: username.to_string(),
                password: password.to_string(),
                ..Default::default()
            };

            assert!(matches!(
                form.credentials(),
                Err(SubmitError::Validation(_))
            ));
        }
    }

    #[test]
    fn filled_form_yields_credentials() {
        let form = LoginForm {
            username: "admin".to_string(),
            password: "admin".to_string(),
            ..Default::default()
        };

        assert_eq!(
            form.credentials().unwrap(),
            Credentials {
                username: "admin".to_string(),
                password: "admin".to_string(),
            }
        );
    }

    #[test]
    fn whitespace_password_is_a_password() {
        let form = LoginForm {
            username: "admin".to_string(),
            password: " ".to_string(),
            ..Default::default()
        };

        assert!(form.credentials().is_ok());
    }

    #[test]
    fn missing_api_host_falls_back_to_default() {
        assert_eq!(LoginForm::new("").api_host, DEFAULT_API_HOST);
        assert_eq!(LoginForm::new("http://10.0.0.2:8000").api_host, "http://10.0.0.2:8000");
    }

    #[test]
    fn token_type_is_optional() {
        let token: TokenResponse = serde_json::from_str(r#"{"access_token":"abc"}"#).unwrap();

        assert_eq!(token.access_token, "abc");
        assert_eq!(token.token_type, None);
    }
}
