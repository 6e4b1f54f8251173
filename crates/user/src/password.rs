use argon2::{
    Argon2, PasswordHasher, PasswordVerifier,
    password_hash::{PasswordHash, SaltString, rand_core::OsRng},
};

/// Hash a password with Argon2id.
pub fn hash(password: &str) -> userdesk_shared::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2.hash_password(password.as_bytes(), &salt)?.to_string();

    Ok(hash)
}

/// Verify a password against a stored hash. A mismatch is `Ok(false)`,
/// not an error; only a malformed hash fails.
pub fn verify(password: &str, hash: &str) -> userdesk_shared::Result<bool> {
    let parsed = PasswordHash::new(hash)?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
