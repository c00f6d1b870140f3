//! Peer roles within a signaling room.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::SignalingError;

/// Role a peer plays in a room.
///
/// A room holds at most one `Host` (the stream producer) and any number of
/// `Viewer`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Host,
    Viewer,
}

impl Role {
    /// Returns the wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Host => "host",
            Role::Viewer => "viewer",
        }
    }

    pub fn is_host(&self) -> bool {
        matches!(self, Role::Host)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = SignalingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "host" => Ok(Role::Host),
            "viewer" => Ok(Role::Viewer),
            other => Err(SignalingError::InvalidRole(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_roles() {
        assert_eq!("host".parse::<Role>().unwrap(), Role::Host);
        assert_eq!("viewer".parse::<Role>().unwrap(), Role::Viewer);
    }

    #[test]
    fn rejects_unknown_role() {
        let err = "instructor".parse::<Role>().unwrap_err();
        assert_eq!(err, SignalingError::InvalidRole("instructor".to_string()));
    }

    #[test]
    fn role_parsing_is_case_sensitive() {
        assert!("Host".parse::<Role>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Viewer).unwrap(), r#""viewer""#);
    }
}
