//! Member roles and their GitLab access levels
//!
//! See <https://docs.gitlab.com/ee/api/members.html#roles>.

use crate::error::ValidationError;
use std::fmt;
use std::str::FromStr;

/// A membership role on a project or group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Guest,
    Reporter,
    Developer,
    Maintainer,
    Owner,
}

impl Role {
    /// Every role, lowest access first
    pub const ALL: [Role; 5] = [
        Role::Guest,
        Role::Reporter,
        Role::Developer,
        Role::Maintainer,
        Role::Owner,
    ];

    /// Numeric access level used by the members API
    pub fn access_level(self) -> u32 {
        match self {
            Role::Guest => 10,
            Role::Reporter => 20,
            Role::Developer => 30,
            Role::Maintainer => 40,
            Role::Owner => 50,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Role::Guest => "Guest",
            Role::Reporter => "Reporter",
            Role::Developer => "Developer",
            Role::Maintainer => "Maintainer",
            Role::Owner => "Owner",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    /// Matches on the capitalized form, so `developer`, `DEVELOPER` and
    /// `Developer` are all accepted but `de-veloper` is not.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = capitalize(s);
        Role::ALL
            .into_iter()
            .find(|role| role.name() == normalized)
            .ok_or_else(|| ValidationError::InvalidRole {
                role: s.to_string(),
                valid: Role::ALL.map(Role::name).join(", "),
            })
    }
}

/// Map a role name to its access level
pub fn role_to_access_level(role: &str) -> Result<u32, ValidationError> {
    role.parse::<Role>().map(Role::access_level)
}

/// First character upper-cased, the rest lower-cased
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
