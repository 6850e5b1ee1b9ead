use crate::{
    auth::Claims,
    models::domain::{User, UserRole},
};

/// Who is acting on a request. Built from validated token claims and handed
/// explicitly to the services that need it; it lives as long as the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityContext {
    pub user_id: String,
    pub username: String,
    pub role: Option<UserRole>,
}

impl IdentityContext {
    pub fn has_role(&self, role: UserRole) -> bool {
        self.role == Some(role)
    }
}

impl From<&Claims> for IdentityContext {
    fn from(claims: &Claims) -> Self {
        IdentityContext {
            user_id: claims.sub.clone(),
            username: claims.username.clone(),
            role: claims.role,
        }
    }
}

impl From<&User> for IdentityContext {
    fn from(user: &User) -> Self {
        IdentityContext {
            user_id: user.id.clone(),
            username: user.username.clone(),
            role: user.role,
        }
    }
}
