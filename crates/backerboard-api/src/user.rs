use serde::{Deserialize, Serialize};

/// Read-only snapshot of the signed-in user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub opted_out_of_recommendations: bool,
}
