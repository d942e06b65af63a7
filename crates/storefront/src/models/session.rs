//! Session-related types.
//!
//! The session record is what the login popup persists between page loads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use funky_teens_core::Username;

/// The logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Name entered in the login popup.
    pub username: Username,
    /// When the login happened.
    #[serde(rename = "loginTime")]
    pub login_time: DateTime<Utc>,
}

/// Persisted login state.
///
/// Stored as `{"isLoggedIn": bool, "currentUser": {...} | null}`. Missing
/// fields default to the logged-out state, and a record that claims to be
/// logged in without a user is treated as logged out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    is_logged_in: bool,
    #[serde(default)]
    current_user: Option<CurrentUser>,
}

impl Session {
    /// The logged-out session.
    #[must_use]
    pub const fn logged_out() -> Self {
        Self {
            is_logged_in: false,
            current_user: None,
        }
    }

    /// A session for `user`.
    #[must_use]
    pub const fn logged_in(user: CurrentUser) -> Self {
        Self {
            is_logged_in: true,
            current_user: Some(user),
        }
    }

    /// Whether a user is logged in.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.is_logged_in && self.current_user.is_some()
    }

    /// The logged-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<&CurrentUser> {
        if self.is_logged_in {
            self.current_user.as_ref()
        } else {
            None
        }
    }

    /// Drop inconsistent combinations read back from storage.
    #[must_use]
    pub fn normalized(self) -> Self {
        if self.is_logged_in() {
            self
        } else {
            Self::logged_out()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn user() -> CurrentUser {
        CurrentUser {
            username: Username::parse("riya").unwrap(),
            login_time: Utc.with_ymd_and_hms(2025, 3, 1, 10, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_value(Session::logged_in(user())).unwrap();
        assert_eq!(json["isLoggedIn"], true);
        assert_eq!(json["currentUser"]["username"], "riya");
        assert_eq!(json["currentUser"]["loginTime"], "2025-03-01T10:30:00Z");

        let json = serde_json::to_value(Session::logged_out()).unwrap();
        assert_eq!(json, serde_json::json!({"isLoggedIn": false, "currentUser": null}));
    }

    #[test]
    fn test_reads_browser_timestamps() {
        let raw = r#"{"isLoggedIn":true,"currentUser":{"username":"kabir","loginTime":"2025-03-01T10:30:00.123Z"}}"#;
        let session: Session = serde_json::from_str(raw).unwrap();
        assert!(session.is_logged_in());
        assert_eq!(session.current_user().unwrap().username.as_str(), "kabir");
    }

    #[test]
    fn test_missing_fields_default_to_logged_out() {
        let session: Session = serde_json::from_str("{}").unwrap();
        assert!(!session.is_logged_in());
        assert!(session.current_user().is_none());
    }

    #[test]
    fn test_logged_in_without_user_normalizes_to_logged_out() {
        let session: Session = serde_json::from_str(r#"{"isLoggedIn":true}"#).unwrap();
        assert!(!session.is_logged_in());
        assert_eq!(session.normalized(), Session::logged_out());
    }

    #[test]
    fn test_stale_user_is_hidden_when_logged_out() {
        let raw = r#"{"isLoggedIn":false,"currentUser":{"username":"kabir","loginTime":"2025-03-01T10:30:00Z"}}"#;
        let session: Session = serde_json::from_str(raw).unwrap();
        assert!(session.current_user().is_none());
        assert_eq!(session.normalized(), Session::logged_out());
    }
}
