//! Static operator authentication
//!
//! A credential check, not a security system: one built-in operator
//! account, no token issuance, no session state.

use serde::{Deserialize, Serialize};

use transitlink_types::{Error, Result};

const OPERATOR_USERNAME: &str = "taharana";
const OPERATOR_ACCESS_KEY: &str = "taha1234";

/// Operator role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Dispatcher,
    Driver,
}

/// An authenticated operator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: Role,
}

/// Check the supplied credentials against the built-in operator account
pub fn authenticate(username: &str, access_key: &str) -> Result<User> {
    if username == OPERATOR_USERNAME && access_key == OPERATOR_ACCESS_KEY {
        Ok(User {
            id: "u1".to_string(),
            name: "Taha Rana".to_string(),
            role: Role::Admin,
        })
    } else {
        Err(Error::AuthFailed(
            "Invalid credentials. Check node access key.".to_string(),
        ))
    }
}
