// 🏷️ Tag Value - free-form label attached to a person
//
// Tags are carried through every edit untouched.

use std::fmt;

use super::ConstraintError;

pub const MESSAGE_TAG_CONSTRAINTS: &str = "Tags names should be alphanumeric";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag {
    name: String,
}

impl Tag {
    pub fn parse(raw: &str) -> Result<Self, ConstraintError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.chars().all(char::is_alphanumeric) {
            return Err(ConstraintError::new("tag", MESSAGE_TAG_CONSTRAINTS));
        }

        Ok(Tag {
            name: trimmed.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.name)
    }
}
