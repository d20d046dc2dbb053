//! Path and query parameter validation.
//!
//! Everything here is pure: it turns raw request strings into typed values or
//! a [`ValidationError`]. Lookups that need the database (does this id exist,
//! is this category known) happen later in `bgreviews-db`.

use std::str::FromStr;

use crate::ValidationError;

/// Parse a numeric path segment such as `review_id` or `comment_id`.
///
/// Accepts only ASCII digits (no sign, no whitespace) that fit in an `i64`.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDataType`] for anything else.
pub fn parse_id(token: &str) -> Result<i64, ValidationError> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidDataType);
    }
    token
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidDataType)
}

/// Columns a review listing may be sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortColumn {
    ReviewId,
    Title,
    Owner,
    Category,
    #[default]
    CreatedAt,
    Votes,
    CommentCount,
}

impl SortColumn {
    pub const ALL: [SortColumn; 7] = [
        SortColumn::ReviewId,
        SortColumn::Title,
        SortColumn::Owner,
        SortColumn::Category,
        SortColumn::CreatedAt,
        SortColumn::Votes,
        SortColumn::CommentCount,
    ];

    /// The query-string spelling of this column.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortColumn::ReviewId => "review_id",
            SortColumn::Title => "title",
            SortColumn::Owner => "owner",
            SortColumn::Category => "category",
            SortColumn::CreatedAt => "created_at",
            SortColumn::Votes => "votes",
            SortColumn::CommentCount => "comment_count",
        }
    }
}

impl FromStr for SortColumn {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortColumn::ALL
            .into_iter()
            .find(|column| column.as_str() == s)
            .ok_or(ValidationError::BadSort)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ValidationError;

    /// Case-insensitive; `ASC`, `Asc` and `asc` are all accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortOrder::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortOrder::Desc)
        } else {
            Err(ValidationError::BadOrder)
        }
    }
}

/// Validated query parameters for `GET /api/reviews`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewListParams {
    pub sort_by: SortColumn,
    pub order: SortOrder,
    /// Category slug as stored, e.g. `social deduction`.
    pub category: Option<String>,
}

impl ReviewListParams {
    /// Validate raw query values, applying defaults for absent ones.
    ///
    /// Underscores in `category` stand for spaces so that slugs like
    /// `social deduction` can be written `social_deduction` in a URL.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::BadSort`] or [`ValidationError::BadOrder`]
    /// when a value is outside its allow-list. `sort_by` is checked first.
    pub fn parse(
        sort_by: Option<&str>,
        order: Option<&str>,
        category: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let sort_by = sort_by.map_or(Ok(SortColumn::default()), str::parse)?;
        let order = order.map_or(Ok(SortOrder::default()), str::parse)?;
        let category = category
            .filter(|c| !c.is_empty())
            .map(|c| c.replace('_', " "));

        Ok(Self {
            sort_by,
            order,
            category,
        })
    }
}
