use crate::core::error::ValidationError;
use crate::models::api::{AddGiftRequest, CommentRequest, CreateListRequest};
use crate::stores::user_directory::UserDirectory;

/// Trimmed text, rejected if nothing is left
pub fn require_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

/// Trimmed text, `None` when blank
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[derive(Debug, PartialEq, Eq)]
pub struct ValidatedList {
    pub name: String,
    pub recipients: Vec<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ValidatedGift {
    pub name: String,
    pub description: Option<String>,
}

impl CreateListRequest {
    /// A list needs a name and at least one known recipient
    pub fn validate(self, users: &UserDirectory) -> Result<ValidatedList, ValidationError> {
        let name = require_text("List name", &self.name)?;

        let recipients: Vec<String> = self
            .recipients
            .iter()
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect();

        if recipients.is_empty() {
            return Err(ValidationError::NoRecipients);
        }

        if let Some(unknown) = recipients.iter().find(|r| !users.contains(r)) {
            return Err(ValidationError::UnknownUser(unknown.clone()));
        }

        Ok(ValidatedList { name, recipients })
    }
}

impl AddGiftRequest {
    pub fn validate(self) -> Result<ValidatedGift, ValidationError> {
        Ok(ValidatedGift {
            name: require_text("Gift name", &self.name)?,
            description: optional_text(self.description.as_deref()),
        })
    }
}

impl CommentRequest {
    pub fn validate(self) -> Result<String, ValidationError> {
        require_text("Comment", &self.comment)
    }
}
