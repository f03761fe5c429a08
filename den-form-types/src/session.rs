use serde::{Deserialize, Serialize};

use crate::StudentId;

/// Role of the signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Staff,
    Student,
}

/// The signed-in user, passed explicitly to whatever needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque session token issued by the host application.
    pub token: String,
    /// The user's id; for students this is their student number.
    pub user_id: StudentId,
    pub role: Role,
}

impl Session {
    pub fn new(token: impl Into<String>, user_id: impl Into<StudentId>, role: Role) -> Self {
        Self {
            token: token.into(),
            user_id: user_id.into(),
            role,
        }
    }

    /// A student session.
    pub fn student(token: impl Into<String>, student_id: impl Into<StudentId>) -> Self {
        Self::new(token, student_id, Role::Student)
    }

    pub fn is_student(&self) -> bool {
        self.role == Role::Student
    }
}
