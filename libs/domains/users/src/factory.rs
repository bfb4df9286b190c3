use crate::error::UserResult;
use crate::models::{CreateUserParams, User};
use crate::password::PasswordHasher;
use crate::validation::{ValidationErrors, validate_create};

/// Build a new, unpersisted [`User`] from creation params.
///
/// Invalid input is an expected outcome and comes back as `Ok(Err(violations))`, with
/// nothing hashed. Only a hashing failure is an `Err`.
pub fn new_user_from_params(
    params: &CreateUserParams,
    hasher: &PasswordHasher,
) -> UserResult<Result<User, ValidationErrors>> {
    let violations = validate_create(params);
    if !violations.is_empty() {
        return Ok(Err(violations));
    }

    let encrypted_password = hasher.hash(&params.password)?;

    Ok(Ok(User {
        id: None,
        first_name: params.first_name.clone(),
        last_name: params.last_name.clone(),
        email: params.email.clone(),
        encrypted_password,
    }))
}
