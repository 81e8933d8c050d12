//! Comment: free text written by a user.

use serde::{Deserialize, Serialize};

use crate::error::{AuthError, FieldErrors, FoodHubError};
use crate::id::{CommentId, UserId};
use crate::permission::Authored;
use crate::requester::Requester;
use crate::resource::{Resource, require_text};
use crate::time::{Timestamp, now};

/// A user comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub body: String,
    /// Always the user who created the comment.
    pub author: UserId,
    pub created_at: Timestamp,
}

/// Create payload for a [`Comment`].
///
/// Has no `author` field, so an author sent by a client is dropped during
/// decoding.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentDraft {
    #[serde(default)]
    pub body: Option<String>,
}

/// Partial-update payload for a [`Comment`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentPatch {
    #[serde(default)]
    pub body: Option<String>,
}

impl Authored for Comment {
    fn author(&self) -> UserId {
        self.author
    }
}

impl Resource for Comment {
    type Id = CommentId;
    type Draft = CommentDraft;
    type Patch = CommentPatch;

    const NAME: &'static str = "Comment";

    fn id(&self) -> CommentId {
        self.id
    }

    fn from_draft(draft: CommentDraft, requester: &Requester) -> Result<Self, FoodHubError> {
        let author = requester.principal().ok_or(AuthError::NotAuthenticated)?;
        let mut errors = FieldErrors::default();
        let body = errors.required("body", draft.body);
        let comment = Self {
            id: CommentId::new(),
            body: body.unwrap_or_default(),
            author: author.id,
            created_at: now(),
        };
        errors.check(require_text("body", &comment.body, None));
        errors.finish()?;
        Ok(comment)
    }

    fn apply(&mut self, patch: CommentPatch) {
        if let Some(body) = patch.body {
            self.body = body;
        }
    }

    fn validate(&self) -> Result<(), FoodHubError> {
        require_text("body", &self.body, None)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::requester::Principal;

    fn requester() -> (UserId, Requester) {
        let id = UserId::new();
        let requester = Requester::User(Principal {
            id,
            username: "bob".to_string(),
            is_admin: false,
        });
        (id, requester)
    }

    #[test]
    fn should_assign_requester_as_author() {
        let (id, requester) = requester();
        let draft = CommentDraft {
            body: Some("Tasty".to_string()),
        };

        let comment = Comment::from_draft(draft, &requester).unwrap();
        assert_eq!(comment.author, id);
        assert_eq!(comment.body, "Tasty");
    }

    #[test]
    fn should_drop_author_supplied_by_client() {
        let (id, requester) = requester();
        let other = UserId::new();
        let draft: CommentDraft =
            serde_json::from_str(&format!(r#"{{"body":"Hi","author":"{other}"}}"#)).unwrap();

        let comment = Comment::from_draft(draft, &requester).unwrap();
        assert_eq!(comment.author, id);
    }

    #[test]
    fn should_refuse_anonymous_author() {
        let draft = CommentDraft {
            body: Some("Hi".to_string()),
        };
        let result = Comment::from_draft(draft, &Requester::Anonymous);
        assert!(matches!(
            result,
            Err(FoodHubError::Unauthenticated(AuthError::NotAuthenticated))
        ));
    }

    #[test]
    fn should_return_validation_error_when_body_is_blank() {
        let (_, requester) = requester();
        let draft = CommentDraft {
            body: Some(String::new()),
        };
        let result = Comment::from_draft(draft, &requester);
        assert!(matches!(
            result,
            Err(FoodHubError::Validation(ValidationError::Blank { field: "body" }))
        ));
    }

    #[test]
    fn should_return_validation_error_when_body_is_missing() {
        let (_, requester) = requester();
        let result = Comment::from_draft(CommentDraft::default(), &requester);
        assert!(matches!(
            result,
            Err(FoodHubError::Validation(ValidationError::Required { field: "body" }))
        ));
    }
}
