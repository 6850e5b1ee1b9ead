use crate::{
    auth::IdentityContext,
    errors::{AppError, AppResult},
    models::domain::UserRole,
};

pub fn require_role(identity: &IdentityContext, role: UserRole) -> AppResult<()> {
    match identity.role {
        Some(r) if r == role => Ok(()),
        Some(other) => Err(AppError::Forbidden(format!(
            "Only {}s can perform this action; this account is a {}",
            role.label().to_lowercase(),
            other.label()
        ))),
        None => Err(AppError::Forbidden(
            "Choose a role before continuing".to_string(),
        )),
    }
}
