//! Listing issues and merge requests created in a calendar year

use super::GitLabApi;
use super::result::OperationResult;
use crate::error::{GitLabError, GitLabResult};
use crate::util::QueryBuilder;
use std::fmt::Display;
use tracing::{debug, instrument};

/// Page size requested from GitLab; a shorter page ends the listing
pub const PER_PAGE: usize = 100;

/// What to list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemType {
    Issues,
    MergeRequests,
}

impl ItemType {
    /// Parse the command-line spelling (`issues` or `mr`)
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "issues" => Some(ItemType::Issues),
            "mr" => Some(ItemType::MergeRequests),
            _ => None,
        }
    }

    /// Command-line spelling, also used in result messages
    pub fn label(self) -> &'static str {
        match self {
            ItemType::Issues => "issues",
            ItemType::MergeRequests => "mr",
        }
    }

    /// Instance-wide list endpoint
    pub fn endpoint(self) -> &'static str {
        match self {
            ItemType::Issues => "/issues",
            ItemType::MergeRequests => "/merge_requests",
        }
    }
}

/// Creation-date window covering one calendar year, both ends inclusive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearRange {
    pub year: i64,
    pub created_after: String,
    pub created_before: String,
}

impl YearRange {
    /// `None` unless `year` prints as exactly four characters.
    ///
    /// This is a textual check: 1000 and even -999 pass, 999 and -2025 do not.
    pub fn new(year: i64) -> Option<Self> {
        if year.to_string().len() != 4 {
            return None;
        }

        Some(Self {
            year,
            created_after: format!("{year}-01-01T00:00:00Z"),
            created_before: format!("{year}-12-31T23:59:59Z"),
        })
    }
}

fn invalid_item_type(item_type: &str) -> OperationResult {
    OperationResult::failure(format!(
        "Invalid item_type: {item_type}. Must be \"mr\" or \"issues\""
    ))
}

/// Failure for a year that can never name a calendar year, including
/// integers too wide for `i64`.
///
/// An invalid item type is still reported first.
pub fn reject_year(item_type: &str, year: impl Display) -> OperationResult {
    if ItemType::parse(item_type).is_none() {
        return invalid_item_type(item_type);
    }
    OperationResult::failure(format!("Invalid year: {year}. Must be a 4-digit integer"))
}

impl GitLabApi {
    /// Collect every issue or merge request created during `year`.
    ///
    /// Pages are fetched one after another; a failed page discards
    /// everything fetched so far.
    #[instrument(skip(self))]
    pub async fn get_items_by_year(&self, item_type: &str, year: i64) -> OperationResult {
        let Some(kind) = ItemType::parse(item_type) else {
            return invalid_item_type(item_type);
        };

        let Some(range) = YearRange::new(year) else {
            return reject_year(item_type, year);
        };

        match self.fetch_all(kind, &range).await {
            Ok(items) => {
                let message = format!("Found {} {} created in {}", items.len(), kind.label(), year);
                OperationResult::with_items(items, message)
            }
            Err(GitLabError::Api { status, message }) => {
                OperationResult::failure(format!("API request failed: {status} - {message}"))
            }
            Err(e) => OperationResult::failure(format!("Error retrieving items: {e}")),
        }
    }

    async fn fetch_all(
        &self,
        kind: ItemType,
        range: &YearRange,
    ) -> GitLabResult<Vec<serde_json::Value>> {
        let mut items = Vec::new();
        let mut page = 1u32;

        loop {
            let query = QueryBuilder::new()
                .param("created_after", &range.created_after)
                .param("created_before", &range.created_before)
                .param("page", page)
                .param("per_page", PER_PAGE)
                .param("scope", "all")
                .build();

            let response = self.client.get(&format!("{}{}", kind.endpoint(), query)).await?;
            if !response.is_success() {
                return Err(GitLabError::from_response(
                    response.status().as_u16(),
                    response.text(),
                ));
            }

            let batch: Vec<serde_json::Value> = response.json()?;
            let fetched = batch.len();
            debug!(page, fetched, "Fetched page");
            items.extend(batch);

            if fetched < PER_PAGE {
                break;
            }
            page += 1;
        }

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_type_parse() {
        assert_eq!(ItemType::parse("issues"), Some(ItemType::Issues));
        assert_eq!(ItemType::parse("mr"), Some(ItemType::MergeRequests));
        assert_eq!(ItemType::parse("MR"), None);
        assert_eq!(ItemType::parse("merge_requests"), None);
    }

    #[test]
    fn test_year_range_bounds() {
        let range = YearRange::new(2025).unwrap();
        assert_eq!(range.created_after, "2025-01-01T00:00:00Z");
        assert_eq!(range.created_before, "2025-12-31T23:59:59Z");
    }

    #[test]
    fn test_year_range_is_textual() {
        assert!(YearRange::new(1000).is_some());
        assert!(YearRange::new(9999).is_some());
        assert!(YearRange::new(999).is_none());
        assert!(YearRange::new(10000).is_none());
        assert!(YearRange::new(-999).is_some());
        assert!(YearRange::new(-2025).is_none());
        assert!(YearRange::new(0).is_none());
    }

    #[test]
    fn test_reject_year_keeps_digits_verbatim() {
        let result = reject_year("mr", "99999999999999999999");
        assert!(!result.success);
        assert_eq!(
            result.message,
            "Invalid year: 99999999999999999999. Must be a 4-digit integer"
        );

        let result = reject_year("prs", "99999999999999999999");
        assert!(result.message.starts_with("Invalid item_type: prs."));
    }
}
