use serde::{Deserialize, Serialize};

/// The authenticated identity plus its bearer credential. Exactly one is
/// active per client instance; a new login overwrites any prior session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub name: String,
    pub email: String,
    pub token: String,
}
