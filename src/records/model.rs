//! # Student Records

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lowest and highest score a student can hold
pub const MIN_SCORE: u8 = 0;
pub const MAX_SCORE: u8 = 100;

/// Class section a student belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassSection {
    A,
    B,
    C,
    D,
}

impl ClassSection {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassSection::A => "A",
            ClassSection::B => "B",
            ClassSection::C => "C",
            ClassSection::D => "D",
        }
    }
}

impl fmt::Display for ClassSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stored student.
///
/// `id` is assigned by the store and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: u64,
    pub name: String,
    pub class_section: ClassSection,
    #[serde(default)]
    pub score: u8,
    #[serde(default)]
    pub is_expelled: bool,
}

/// Fields supplied when creating a student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub class_section: ClassSection,
    #[serde(default)]
    pub score: u8,
}

impl NewStudent {
    pub fn new(name: impl Into<String>, class_section: ClassSection, score: u8) -> Self {
        Self {
            name: name.into(),
            class_section,
            score,
        }
    }

    /// Build the stored record under `id`
    pub fn into_student(self, id: u64) -> Student {
        Student {
            id,
            name: self.name,
            class_section: self.class_section,
            score: self.score,
            is_expelled: false,
        }
    }
}

/// Partial update. `None` means "leave as is"; any `Some`, including
/// `Some(0)` and `Some(false)`, is written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_section: Option<ClassSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_expelled: Option<bool>,
}

impl StudentPatch {
    /// Patch that only sets the score
    pub fn score(score: u8) -> Self {
        Self {
            score: Some(score),
            ..Default::default()
        }
    }

    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.class_section.is_none()
            && self.score.is_none()
            && self.is_expelled.is_none()
    }

    /// Merge the supplied fields into `student`
    pub fn apply_to(&self, student: &mut Student) {
        if let Some(name) = &self.name {
            student.name = name.clone();
        }
        if let Some(section) = self.class_section {
            student.class_section = section;
        }
        if let Some(score) = self.score {
            student.score = score;
        }
        if let Some(expelled) = self.is_expelled {
            student.is_expelled = expelled;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Student {
        NewStudent::new("Alice Example", ClassSection::A, 50).into_student(1)
    }

    #[test]
    fn test_new_student_is_not_expelled() {
        let student = alice();
        assert_eq!(student.id, 1);
        assert!(!student.is_expelled);
    }

    #[test]
    fn test_patch_touches_only_supplied_fields() {
        let mut student = alice();
        StudentPatch::score(0).apply_to(&mut student);

        assert_eq!(student.score, 0);
        assert_eq!(student.name, "Alice Example");
        assert_eq!(student.class_section, ClassSection::A);
    }

    #[test]
    fn test_patch_can_clear_expelled() {
        let mut student = alice();
        student.is_expelled = true;

        let patch = StudentPatch {
            is_expelled: Some(false),
            ..Default::default()
        };
        patch.apply_to(&mut student);
        assert!(!student.is_expelled);
    }

    #[test]
    fn test_empty_patch() {
        assert!(StudentPatch::default().is_empty());
        assert!(!StudentPatch::score(0).is_empty());
    }

    #[test]
    fn test_null_fields_deserialize_as_absent() {
        let patch: StudentPatch = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_section_wire_format() {
        let json = serde_json::to_string(&ClassSection::C).unwrap();
        assert_eq!(json, "\"C\"");
        assert!(serde_json::from_str::<ClassSection>("\"E\"").is_err());
    }

    #[test]
    fn test_score_defaults_to_zero() {
        let new: NewStudent =
            serde_json::from_str(r#"{"name": "Bob Stone", "class_section": "B"}"#).unwrap();
        assert_eq!(new.score, 0);
    }
}
