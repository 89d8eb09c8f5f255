//! Access roles and explicit role sets.
//!
//! Authorization decisions are made by set membership only. The role
//! enumeration has no hierarchy: `Admin` does not imply `User`, and a
//! route that wants both must say both.

use serde::{Deserialize, Serialize};

/// Access tier assigned to a subject.
///
/// `Anonymous` is the safe default for subjects with no stored profile
/// (or a profile missing its role field). It is never a member of any
/// route's required set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Anonymous,
    User,
    Admin,
    Superadmin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anonymous => write!(f, "anonymous"),
            Self::User => write!(f, "user"),
            Self::Admin => write!(f, "admin"),
            Self::Superadmin => write!(f, "superadmin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "anonymous" => Ok(Self::Anonymous),
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            "superadmin" => Ok(Self::Superadmin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

impl Role {
    const fn bit(self) -> u8 {
        match self {
            Self::Anonymous => 1,
            Self::User => 1 << 1,
            Self::Admin => 1 << 2,
            Self::Superadmin => 1 << 3,
        }
    }
}

/// An explicit set of roles required to reach a route.
///
/// Membership is always checked per role; there is no ordering between
/// roles and no implied inclusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoleSet(u8);

impl RoleSet {
    /// The empty set. Nothing is authorized against it.
    pub const EMPTY: Self = Self(0);

    /// Any signed-in subject: `{user, admin, superadmin}`.
    ///
    /// This is the default requirement for "must merely be logged in"
    /// routes. Anonymous is deliberately absent.
    pub const SIGNED_IN: Self = Self::of(&[Role::User, Role::Admin, Role::Superadmin]);

    /// Order reviewers: `{admin, superadmin}`.
    pub const STAFF: Self = Self::of(&[Role::Admin, Role::Superadmin]);

    /// `{superadmin}` only.
    pub const SUPERADMIN: Self = Self::of(&[Role::Superadmin]);

    /// Build a set from an explicit list of roles.
    #[must_use]
    pub const fn of(roles: &[Role]) -> Self {
        let mut bits = 0u8;
        let mut i = 0;
        while i < roles.len() {
            bits |= roles[i].bit();
            i += 1;
        }
        Self(bits)
    }

    /// Whether `role` is a member of this set.
    #[must_use]
    pub const fn contains(self, role: Role) -> bool {
        self.0 & role.bit() != 0
    }

    /// Whether the set has no members.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate the member roles.
    pub fn iter(self) -> impl Iterator<Item = Role> {
        [Role::Anonymous, Role::User, Role::Admin, Role::Superadmin]
            .into_iter()
            .filter(move |r| self.contains(*r))
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<T: IntoIterator<Item = Role>>(iter: T) -> Self {
        let mut bits = 0u8;
        for role in iter {
            bits |= role.bit();
        }
        Self(bits)
    }
}

impl std::fmt::Display for RoleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        write!(f, "{{")?;
        for role in self.iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{role}")?;
            first = false;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_is_explicit_not_hierarchical() {
        // STAFF admits admin and superadmin but not user, even though
        // "user" sits below "admin" in the enum declaration.
        assert!(RoleSet::STAFF.contains(Role::Admin));
        assert!(RoleSet::STAFF.contains(Role::Superadmin));
        assert!(!RoleSet::STAFF.contains(Role::User));
        assert!(!RoleSet::STAFF.contains(Role::Anonymous));

        // SUPERADMIN does not admit admin.
        assert!(!RoleSet::SUPERADMIN.contains(Role::Admin));
    }

    #[test]
    fn test_signed_in_excludes_anonymous() {
        assert!(RoleSet::SIGNED_IN.contains(Role::User));
        assert!(RoleSet::SIGNED_IN.contains(Role::Admin));
        assert!(RoleSet::SIGNED_IN.contains(Role::Superadmin));
        assert!(!RoleSet::SIGNED_IN.contains(Role::Anonymous));
    }

    #[test]
    fn test_of_and_iter_round_trip() {
        let set = RoleSet::of(&[Role::User, Role::Superadmin]);
        let roles: Vec<Role> = set.iter().collect();
        assert_eq!(roles, vec![Role::User, Role::Superadmin]);
    }

    #[test]
    fn test_empty() {
        assert!(RoleSet::EMPTY.is_empty());
        assert!(!RoleSet::EMPTY.contains(Role::Anonymous));
    }

    #[test]
    fn test_role_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&Role::Superadmin).unwrap(),
            "\"superadmin\""
        );
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(RoleSet::STAFF.to_string(), "{admin, superadmin}");
    }
}
