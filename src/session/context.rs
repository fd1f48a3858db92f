use serde::{Deserialize, Serialize};

/// The (course, part, student) triple scoping a session
///
/// Built once when a session starts and passed explicitly to every
/// collaborator; nothing in the core looks the student up on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub course_number: u32,
    pub part_number: u32,
    pub student_id: String,
}

impl SessionContext {
    pub fn new(course_number: u32, part_number: u32, student_id: impl Into<String>) -> Self {
        Self {
            course_number,
            part_number,
            student_id: student_id.into(),
        }
    }

    /// Context for the assistant that covers every course
    pub fn global(student_id: impl Into<String>) -> Self {
        Self::new(0, 0, student_id)
    }

    pub fn is_global(&self) -> bool {
        self.course_number == 0 && self.part_number == 0
    }

    /// Display label, e.g. "Course 2.3"
    pub fn label(&self) -> String {
        if self.is_global() {
            "All courses".to_string()
        } else {
            format!("Course {}.{}", self.course_number, self.part_number)
        }
    }
}
