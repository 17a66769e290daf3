//! Authenticated user identity.
//!
//! Authentication itself happens elsewhere; the core only needs the id to
//! scope remote calls. Absence of a user is modeled as `Option<User>::None`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
}

impl User {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
        }
    }
}
