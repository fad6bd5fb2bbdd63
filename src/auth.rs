use crate::models::{Role, User};
use uuid::Uuid;

/// Mock login: any non-empty email/password pair succeeds and the password
/// is never checked. The role is a presentation hint derived from the email
/// text, not an authorization boundary.
pub fn login(email: &str, password: &str) -> Option<User> {
    let email = email.trim();
    if email.is_empty() || password.trim().is_empty() {
        return None;
    }

    let name = email.split('@').next().unwrap_or(email).to_string();
    let role = if email.to_lowercase().contains("coach") {
        Role::Coach
    } else {
        Role::Client
    };

    // stable per email, so a re-login maps to the same client in shared data
    let id = Uuid::new_v5(&Uuid::NAMESPACE_OID, email.to_lowercase().as_bytes());

    Some(User {
        id,
        email: email.to_string(),
        name,
        role,
    })
}
