use serde::{Deserialize, Serialize};

/// The signed-in user as exposed by the auth context.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
}
