use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,
    pub exp: usize,
    /// Snake-case role name at issue time. Guards re-check the stored role,
    /// so a stale claim cannot grant more than the account currently has.
    pub role: String,
}

#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);
