//! Viewer identity

use serde::{Deserialize, Serialize};

use crate::value_objects::UserId;

/// The logged-in viewer, used only to pick out their own records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub user_id: UserId,
}

impl UserInfo {
    pub fn new(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}
