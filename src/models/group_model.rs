use serde::{Deserialize, Serialize};

use crate::validation::{self, ValidationErrors, Validator, MAX_GROUP_NAME_LEN};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct GroupRecord {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateGroupRequest {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroupMemberRequest {
    pub user_id: i64,
}

impl CreateGroupRequest {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .check(
                "name",
                validation::required_text(&self.name, MAX_GROUP_NAME_LEN),
            )
            .finish()
    }
}
