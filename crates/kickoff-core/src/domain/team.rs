// Team identity. Immutable as far as scheduling is concerned.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type TeamId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
}

impl Team {
    pub fn new(id: TeamId, name: impl Into<String>) -> Self {
        Team {
            id,
            name: name.into(),
        }
    }
}
