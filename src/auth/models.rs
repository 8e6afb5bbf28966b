//! Authentication models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Portal roles. Each role sees only its own part of the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Researcher,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Patient, Role::Researcher];

    /// Landing page for this role
    pub fn home_path(&self) -> &'static str {
        match self {
            Role::Patient => "/patient",
            Role::Researcher => "/researcher",
        }
    }

    /// Label shown next to the user's name in the header
    pub fn label(&self) -> &'static str {
        match self {
            Role::Patient => "Paciente",
            Role::Researcher => "Pesquisador",
        }
    }

    /// Name given to every mock identity of this role
    pub fn canned_name(&self) -> &'static str {
        match self {
            Role::Patient => "João Silva",
            Role::Researcher => "Dr. Maria Santos",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Patient => write!(f, "patient"),
            Role::Researcher => write!(f, "researcher"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "patient" => Ok(Role::Patient),
            "researcher" => Ok(Role::Researcher),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// The signed-in user.
///
/// Serialized as `{"id", "name", "email", "type"}`, which is also the
/// persisted record format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(rename = "type")]
    pub role: Role,
}

impl Identity {
    /// Create an identity for the given role
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role,
        }
    }

    /// First letter of each word of the name, uppercased
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    pub fn home_path(&self) -> &'static str {
        self.role.home_path()
    }
}

/// Login credentials
///
/// Absent fields decode as empty so callers can report them like blank ones.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_role")]
    pub role: Role,
}

fn default_role() -> Role {
    Role::Patient
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            role,
        }
    }

    /// Both fields filled in
    pub fn is_complete(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_serializes_role_as_type() {
        let identity = Identity::new("1", "João Silva", "a@x.com", Role::Patient);
        let json = serde_json::to_value(&identity).unwrap();

        assert_eq!(json["type"], "patient");
        assert_eq!(json["email"], "a@x.com");
        assert!(json.get("role").is_none());
    }

    #[test]
    fn test_initials() {
        let identity = Identity::new("1", "Dr. Maria Santos", "m@x.com", Role::Researcher);
        assert_eq!(identity.initials(), "DMS");

        let identity = Identity::new("1", "joão silva", "j@x.com", Role::Patient);
        assert_eq!(identity.initials(), "JS");
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("patient".parse::<Role>(), Ok(Role::Patient));
        assert_eq!("researcher".parse::<Role>(), Ok(Role::Researcher));
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials::new("a@x.com", "hunter2", Role::Patient);
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("a@x.com"));
    }

    #[test]
    fn test_credentials_completeness() {
        assert!(Credentials::new("a@x.com", "pw", Role::Patient).is_complete());
        assert!(!Credentials::new("", "pw", Role::Patient).is_complete());
        assert!(!Credentials::new("  ", "pw", Role::Patient).is_complete());
        assert!(!Credentials::new("a@x.com", "", Role::Researcher).is_complete());
    }

    #[test]
    fn test_credentials_missing_fields_decode_empty() {
        let creds: Credentials = serde_json::from_str(r#"{"email":"a@x.com"}"#).unwrap();
        assert_eq!(creds.password, "");
        assert_eq!(creds.role, Role::Patient);
        assert!(!creds.is_complete());

        let creds: Credentials = serde_json::from_str("{}").unwrap();
        assert!(!creds.is_complete());
    }
}
