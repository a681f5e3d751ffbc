//! bcrypt password hashing; the cost factor comes from configuration.

pub fn hash_password(raw: &str, cost: u32) -> anyhow::Result<String> {
    Ok(bcrypt::hash(raw, cost)?)
}

/// Constant result on malformed hashes: a corrupt row must fail closed,
/// not error out the login path.
pub fn verify_password(raw: &str, hash: &str) -> bool {
    bcrypt::verify(raw, hash).unwrap_or(false)
}
