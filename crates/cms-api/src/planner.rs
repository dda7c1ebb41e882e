//! Translation of normalized list parameters into a selection plan.
//!
//! A [`SelectionPlan`] describes *what* to select and in which order; stores
//! decide *how*. The plan can also be evaluated directly against in-memory
//! content via [`ContentFilter::matches`] and [`SortOrder::compare`], which is
//! the reference behaviour every store must agree with.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::models::{Content, ContentStatus};
use crate::validation::{ListParams, SortDirection, SortField};

/// Conjunction of all requested filters. An absent filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentFilter {
    pub status: Option<ContentStatus>,
    pub category: Option<String>,
    /// content must carry every one of these tags
    pub tags: BTreeSet<String>,
    /// ASCII case-insensitive substring of title or body
    pub search: Option<String>,
}

impl ContentFilter {
    pub fn matches(&self, content: &Content) -> bool {
        if self.status.is_some_and(|status| status != content.status) {
            return false;
        }

        if let Some(category) = &self.category {
            if content.metadata.category.as_ref() != Some(category) {
                return false;
            }
        }

        if !self.tags.is_subset(&content.metadata.tags) {
            return false;
        }

        match &self.search {
            Some(needle) => {
                let needle = needle.to_ascii_lowercase();
                content.title.to_ascii_lowercase().contains(&needle)
                    || content.body.to_ascii_lowercase().contains(&needle)
            }
            None => true,
        }
    }
}

/// Total order over content: the requested key, then identifier ascending.
///
/// The identifier tie-break keeps page boundaries stable across requests when
/// several items share a sort key. A missing `publishedAt` sorts lowest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortOrder {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn compare(&self, a: &Content, b: &Content) -> Ordering {
        let by_key = match self.field {
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            SortField::PublishedAt => a.published_at.cmp(&b.published_at),
            SortField::Title => a.title.cmp(&b.title),
        };

        let by_key = match self.direction {
            SortDirection::Asc => by_key,
            SortDirection::Desc => by_key.reverse(),
        };

        by_key.then_with(|| a.id.cmp(&b.id))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub limit: u32,
    pub offset: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionPlan {
    pub filter: ContentFilter,
    pub order: SortOrder,
    pub window: Window,
}

pub fn plan(params: &ListParams) -> SelectionPlan {
    SelectionPlan {
        filter: ContentFilter {
            status: params.status,
            category: params.category.clone(),
            tags: params.tags.clone(),
            search: params.search.clone(),
        },
        order: SortOrder {
            field: params.sort,
            direction: params.order,
        },
        window: Window {
            limit: params.limit,
            offset: params.offset,
        },
    }
}

impl SelectionPlan {
    /// Runs the plan over an in-memory collection, returning the requested
    /// window and the number of matches before windowing.
    pub fn apply<'a, I>(&self, contents: I) -> (Vec<Content>, u64)
    where
        I: IntoIterator<Item = &'a Content>,
    {
        let mut matched: Vec<&Content> = contents
            .into_iter()
            .filter(|content| self.filter.matches(content))
            .collect();
        matched.sort_by(|a, b| self.order.compare(a, b));

        let total = matched.len() as u64;
        let offset = usize::try_from(self.window.offset).unwrap_or(usize::MAX);
        let page = matched
            .into_iter()
            .skip(offset)
            .take(self.window.limit as usize)
            .cloned()
            .collect();

        (page, total)
    }
}
