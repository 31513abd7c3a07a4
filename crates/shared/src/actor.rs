//! Authenticated actor descriptor.
//!
//! The request layer (out of tree) authenticates the caller and resolves a
//! concrete [`Actor`] once, at the boundary. Everything below receives the
//! resolved value instead of re-inspecting token claims.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// The authenticated caller, resolved at the request boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Actor {
    /// National-level administrator; may act on any church.
    Admin {
        /// Identity (email) recorded as `created_by`/`closed_by`.
        email: String,
    },
    /// Local church treasurer; may only act on their own church.
    ChurchUser {
        /// Identity (email) recorded as `created_by`/`closed_by`.
        email: String,
        /// The church this actor belongs to.
        church_id: i32,
    },
}

impl Actor {
    /// Returns the identity string recorded in audit columns.
    #[must_use]
    pub fn identity(&self) -> &str {
        match self {
            Self::Admin { email } | Self::ChurchUser { email, .. } => email,
        }
    }

    /// Returns the church this actor is scoped to, if any.
    #[must_use]
    pub const fn church_id(&self) -> Option<i32> {
        match self {
            Self::Admin { .. } => None,
            Self::ChurchUser { church_id, .. } => Some(*church_id),
        }
    }

    /// True for national-level administrators.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin { .. })
    }

    /// Checks that this actor may act on the given church.
    ///
    /// Admins pass unconditionally; church users only for their own church.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] when a church user targets another
    /// church.
    pub fn authorize_church(&self, church_id: i32) -> Result<(), AppError> {
        match self {
            Self::Admin { .. } => Ok(()),
            Self::ChurchUser {
                church_id: own, ..
            } => {
                if *own == church_id {
                    Ok(())
                } else {
                    Err(AppError::Forbidden(format!(
                        "el usuario solo puede operar sobre su propia iglesia (id {own})"
                    )))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> Actor {
        Actor::Admin {
            email: "tesoreria@nacional.py".into(),
        }
    }

    fn church_user(church_id: i32) -> Actor {
        Actor::ChurchUser {
            email: "pastor@local.py".into(),
            church_id,
        }
    }

    #[test]
    fn test_admin_may_act_on_any_church() {
        assert!(admin().authorize_church(1).is_ok());
        assert!(admin().authorize_church(999).is_ok());
    }

    #[test]
    fn test_church_user_scoped_to_own_church() {
        let actor = church_user(7);
        assert!(actor.authorize_church(7).is_ok());
        assert!(matches!(
            actor.authorize_church(8),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_identity_and_church_id() {
        assert_eq!(admin().identity(), "tesoreria@nacional.py");
        assert_eq!(admin().church_id(), None);
        assert_eq!(church_user(3).church_id(), Some(3));
    }

    #[test]
    fn test_serde_round_trip() {
        let actor = church_user(5);
        let json = serde_json::to_string(&actor).unwrap();
        assert!(json.contains("\"role\":\"church_user\""));
        let back: Actor = serde_json::from_str(&json).unwrap();
        assert_eq!(actor, back);
    }
}
