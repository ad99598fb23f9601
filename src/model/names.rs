// Request boundary types for activity names and participant emails.

use std::fmt;

/// Error raised while turning raw request input into boundary types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("missing required query parameter: {0}")]
    MissingQuery(&'static str),
    #[error("{0}")]
    InvalidPath(String),
    #[error("{0}")]
    InvalidQuery(String),
}

/// Activity name exactly as it appeared in the (decoded) request path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActivityName(String);

impl ActivityName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActivityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Participant email, taken verbatim. The format is not validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn new(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    /// Builds an email from an optional `email` query parameter.
    pub fn from_query(raw: Option<String>) -> Result<Self, RequestError> {
        raw.map(Self).ok_or(RequestError::MissingQuery("email"))
    }

    /// Picks `email` out of decoded query pairs. A repeated parameter keeps its last value.
    pub fn from_query_pairs<I>(pairs: I) -> Result<Self, RequestError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let raw = pairs
            .into_iter()
            .filter_map(|(key, value)| (key == "email").then_some(value))
            .last();
        Self::from_query(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_from_query_keeps_value_verbatim() {
        let email = Email::from_query(Some("Not An Email".to_string())).unwrap();
        assert_eq!(email.as_str(), "Not An Email");

        let empty = Email::from_query(Some(String::new())).unwrap();
        assert_eq!(empty.as_str(), "");
    }

    #[test]
    fn test_email_from_query_requires_value() {
        let err = Email::from_query(None).unwrap_err();
        assert_eq!(err, RequestError::MissingQuery("email"));
        assert_eq!(err.to_string(), "missing required query parameter: email");
    }

    #[test]
    fn test_email_from_query_pairs_takes_last_value() {
        let pairs = vec![
            ("email".to_string(), "first@mergington.edu".to_string()),
            ("other".to_string(), "ignored".to_string()),
            ("email".to_string(), "last@mergington.edu".to_string()),
        ];
        let email = Email::from_query_pairs(pairs).unwrap();
        assert_eq!(email.as_str(), "last@mergington.edu");

        let err = Email::from_query_pairs(vec![("mail".to_string(), "x".to_string())]).unwrap_err();
        assert_eq!(err, RequestError::MissingQuery("email"));
    }

    #[test]
    fn test_activity_name_is_case_sensitive() {
        assert_ne!(ActivityName::new("Chess Club"), ActivityName::new("chess club"));
        assert_eq!(ActivityName::new("Chess Club").to_string(), "Chess Club");
    }
}
