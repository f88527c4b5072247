//! List query and pagination types shared by every store implementation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::{Level, Status};

const DEFAULT_LIMIT: u32 = 10;
const LIMIT_MAX: u32 = 50;

/// Field a submission listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    WordCount,
    OverallScore,
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortField::CreatedAt => write!(f, "created_at"),
            SortField::UpdatedAt => write!(f, "updated_at"),
            SortField::WordCount => write!(f, "word_count"),
            SortField::OverallScore => write!(f, "overall_score"),
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "created_at" | "createdat" | "created" => Ok(SortField::CreatedAt),
            "updated_at" | "updatedat" | "updated" => Ok(SortField::UpdatedAt),
            "word_count" | "wordcount" | "words" => Ok(SortField::WordCount),
            "overall_score" | "overallscore" | "score" => Ok(SortField::OverallScore),
            other => Err(format!("unknown sort field: {other}")),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

/// Filter, sort, and pagination options for submission listings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListQuery {
    /// 1-based page number. Zero is treated as page 1.
    #[serde(default)]
    pub page: u32,
    /// Rows per page. Defaults to 10, clamps to 50.
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub level: Option<Level>,
    #[serde(default)]
    pub sort_by: SortField,
    #[serde(default)]
    pub sort_order: SortOrder,
}

impl ListQuery {
    /// Effective page, never below 1.
    pub fn page(&self) -> u32 {
        self.page.max(1)
    }

    /// Effective limit after defaulting and clamping.
    pub fn limit(&self) -> u32 {
        normalize_limit(self.limit)
    }

    /// Rows skipped before this page starts.
    pub fn offset(&self) -> u64 {
        u64::from(self.page() - 1) * u64::from(self.limit())
    }
}

/// Normalizes a page limit according to the listing contract.
pub fn normalize_limit(limit: Option<u32>) -> u32 {
    match limit {
        Some(0) | None => DEFAULT_LIMIT,
        Some(value) if value > LIMIT_MAX => LIMIT_MAX,
        Some(value) => value,
    }
}

/// One page of results plus the pagination envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub page: u32,
    pub limit: u32,
    /// Total rows matching the filter, across all pages.
    pub total: u64,
    /// Total page count for this limit.
    pub pages: u64,
}

impl<T> Page<T> {
    /// Build a page envelope; `pages` is the ceiling of `total / limit`.
    pub fn new(data: Vec<T>, page: u32, limit: u32, total: u64) -> Self {
        let pages = total.div_ceil(u64::from(limit.max(1)));
        Self {
            data,
            page,
            limit,
            total,
            pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_field_parse() {
        assert_eq!("createdAt".parse::<SortField>().unwrap(), SortField::CreatedAt);
        assert_eq!("word_count".parse::<SortField>().unwrap(), SortField::WordCount);
        assert_eq!("score".parse::<SortField>().unwrap(), SortField::OverallScore);
        assert!("relevance".parse::<SortField>().is_err());
    }

    #[test]
    fn sort_order_parse() {
        assert_eq!("ASC".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert_eq!("descending".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert!("random".parse::<SortOrder>().is_err());
    }

    #[test]
    fn limit_defaults_and_clamps() {
        assert_eq!(normalize_limit(None), 10);
        assert_eq!(normalize_limit(Some(0)), 10);
        assert_eq!(normalize_limit(Some(25)), 25);
        assert_eq!(normalize_limit(Some(500)), 50);
    }

    #[test]
    fn offset_math() {
        let query = ListQuery {
            page: 3,
            limit: Some(20),
            ..Default::default()
        };
        assert_eq!(query.offset(), 40);

        let zero_page = ListQuery::default();
        assert_eq!(zero_page.page(), 1);
        assert_eq!(zero_page.offset(), 0);
    }

    #[test]
    fn page_count_is_ceiling() {
        let page: Page<u32> = Page::new(vec![], 1, 10, 0);
        assert_eq!(page.pages, 0);
        let page: Page<u32> = Page::new(vec![], 1, 10, 10);
        assert_eq!(page.pages, 1);
        let page: Page<u32> = Page::new(vec![], 1, 10, 11);
        assert_eq!(page.pages, 2);
    }
}
