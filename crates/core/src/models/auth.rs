use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The two kinds of users the API serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Doctor,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Doctor => "doctor",
            Role::Student => "student",
        }
    }
}

/// JWT claims carried by every bearer token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Id of the doctor or student the token was issued to
    pub sub: Uuid,
    pub role: Role,
    /// Expiry as seconds since the Unix epoch
    pub exp: u64,
}
