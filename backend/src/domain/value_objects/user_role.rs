use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Student,
    Instructor,
    Admin,
}

impl UserRole {
    pub fn from_claim(claim: &str) -> Option<Self> {
        match claim {
            "student" => Some(UserRole::Student),
            "instructor" => Some(UserRole::Instructor),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }
}
