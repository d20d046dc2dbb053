//! Schema checks for JSON request bodies.
//!
//! Bodies arrive as `serde_json::Value` so that a missing key and a key of the
//! wrong kind can be told apart. Keys that are not part of a body's schema are
//! ignored.

use serde_json::Value;

use crate::ValidationError;

/// Fields required to post a comment on a review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub username: String,
    pub body: String,
}

/// Extract `inc_votes` from a vote-adjustment body.
///
/// # Errors
///
/// - [`ValidationError::MissingField`] when `inc_votes` is absent or `null`.
/// - [`ValidationError::InvalidDataType`] when `inc_votes` is not an integer
///   that fits in an `i32`.
pub fn parse_vote_delta(body: &Value) -> Result<i32, ValidationError> {
    let value = required(body, "inc_votes")?;
    value
        .as_i64()
        .and_then(|n| i32::try_from(n).ok())
        .ok_or(ValidationError::InvalidDataType)
}

/// Extract `username` and `body` from a comment-creation body.
///
/// # Errors
///
/// - [`ValidationError::MissingField`] when either field is absent or `null`.
/// - [`ValidationError::InvalidDataType`] when either field is not a string.
pub fn parse_new_comment(body: &Value) -> Result<NewComment, ValidationError> {
    let username = required(body, "username")?;
    let text = required(body, "body")?;

    match (username.as_str(), text.as_str()) {
        (Some(username), Some(text)) => Ok(NewComment {
            username: username.to_owned(),
            body: text.to_owned(),
        }),
        _ => Err(ValidationError::InvalidDataType),
    }
}

fn required<'a>(body: &'a Value, field: &'static str) -> Result<&'a Value, ValidationError> {
    body.get(field)
        .filter(|v| !v.is_null())
        .ok_or(ValidationError::MissingField(field))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn vote_delta_accepts_positive_and_negative_integers() {
        assert_eq!(parse_vote_delta(&json!({ "inc_votes": 3 })), Ok(3));
        assert_eq!(parse_vote_delta(&json!({ "inc_votes": -10 })), Ok(-10));
    }

    #[test]
    fn vote_delta_ignores_unrelated_keys() {
        let body = json!({ "inc_votes": 3, "category": "strategy" });
        assert_eq!(parse_vote_delta(&body), Ok(3));
    }

    #[test]
    fn vote_delta_missing_field() {
        assert_eq!(
            parse_vote_delta(&json!({ "category": "cats" })),
            Err(ValidationError::MissingField("inc_votes"))
        );
        assert_eq!(
            parse_vote_delta(&json!({ "inc_votes": null })),
            Err(ValidationError::MissingField("inc_votes"))
        );
        assert_eq!(
            parse_vote_delta(&json!({})),
            Err(ValidationError::MissingField("inc_votes"))
        );
    }

    #[test]
    fn vote_delta_wrong_kind() {
        for body in [
            json!({ "inc_votes": "three" }),
            json!({ "inc_votes": 1.5 }),
            json!({ "inc_votes": [1] }),
            json!({ "inc_votes": 4_000_000_000_i64 }),
        ] {
            assert_eq!(
                parse_vote_delta(&body),
                Err(ValidationError::InvalidDataType),
                "body {body} should be rejected"
            );
        }
    }

    #[test]
    fn new_comment_requires_both_fields() {
        assert_eq!(
            parse_new_comment(&json!({ "username": "cats", "category": "pets" })),
            Err(ValidationError::MissingField("body"))
        );
        assert_eq!(
            parse_new_comment(&json!({ "body": "wow!" })),
            Err(ValidationError::MissingField("username"))
        );
    }

    #[test]
    fn new_comment_rejects_non_string_fields() {
        assert_eq!(
            parse_new_comment(&json!({ "username": 7, "body": "wow!" })),
            Err(ValidationError::InvalidDataType)
        );
    }

    #[test]
    fn new_comment_ignores_extra_keys() {
        let parsed =
            parse_new_comment(&json!({ "username": "dav3rid", "category": "pets", "body": "wow!" }))
                .expect("valid body");
        assert_eq!(
            parsed,
            NewComment {
                username: "dav3rid".to_string(),
                body: "wow!".to_string(),
            }
        );
    }
}
