//! Registration and password checks. Session handling lives with the caller.

use domains::{MovieRepository, PasswordHasher, User};

use crate::error::{Result, ServiceError};

/// Creates an account under the normalized name.
pub fn register_user(
    repo: &mut dyn MovieRepository,
    hasher: &dyn PasswordHasher,
    user_name: &str,
    password: &str,
) -> Result<()> {
    let user_name = User::normalize_name(user_name);
    if user_name.is_empty() {
        return Err(ServiceError::Validation("user name must not be empty".into()));
    }
    if password.is_empty() {
        return Err(ServiceError::Validation("password must not be empty".into()));
    }
    if repo.get_user(&user_name).is_some() {
        return Err(ServiceError::NameTaken(user_name));
    }

    let password_hash = hasher.hash_password(password)?;
    repo.add_user(User::new(&user_name, password_hash));
    tracing::info!(user = %user_name, "user registered");
    Ok(())
}

pub fn authenticate_user(
    repo: &dyn MovieRepository,
    hasher: &dyn PasswordHasher,
    user_name: &str,
    password: &str,
) -> Result<()> {
    let Some(user) = repo.get_user(user_name) else {
        tracing::warn!(user = %user_name, "login for unknown user");
        return Err(ServiceError::AuthenticationFailed);
    };
    if !hasher.verify_password(password, user.password()) {
        tracing::warn!(user = %user.user_name(), "login with wrong password");
        return Err(ServiceError::AuthenticationFailed);
    }
    Ok(())
}
