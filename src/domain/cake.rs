//! Cake domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::DEFAULT_PAGE_SIZE;

/// Cake domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Cake {
    /// Store-assigned identifier
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Lemon cheesecake")]
    pub title: String,
    #[schema(example = "A cheesecake made of lemon")]
    pub description: String,
    #[schema(example = 7.0)]
    pub rating: f64,
    /// Image URL; `null` when the cake has none
    #[schema(example = "https://img.example.com/lemon-cheesecake.jpeg")]
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Absent until the first update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Cake {
    /// Check whether the cake was updated since creation
    pub fn is_modified(&self) -> bool {
        self.updated_at.is_some()
    }
}

/// Data for a new cake, defaults already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCake {
    pub title: String,
    pub description: String,
    pub rating: f64,
    pub image: Option<String>,
}

impl NewCake {
    /// Create from a title and the optional remaining fields.
    ///
    /// Missing description becomes empty and missing rating becomes 0.
    pub fn new(
        title: impl Into<String>,
        description: Option<String>,
        rating: Option<f64>,
        image: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.unwrap_or_default(),
            rating: rating.unwrap_or(0.0),
            image,
        }
    }
}

/// Sparse update: `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CakePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub rating: Option<f64>,
    pub image: Option<String>,
}

impl CakePatch {
    /// True when no field is supplied
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.rating.is_none()
            && self.image.is_none()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// List filter with pagination window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CakeFilter {
    title: Option<String>,
    description: Option<String>,
    pub offset: u64,
    pub limit: u64,
}

impl Default for CakeFilter {
    fn default() -> Self {
        Self {
            title: None,
            description: None,
            offset: 0,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl CakeFilter {
    /// Create a filter. Empty substrings impose no constraint.
    pub fn new(
        title: Option<String>,
        description: Option<String>,
        offset: u64,
        limit: u64,
    ) -> Self {
        Self {
            title: title.filter(|s| !s.is_empty()),
            description: description.filter(|s| !s.is_empty()),
            offset,
            limit,
        }
    }

    /// Title substring, if any
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Description substring, if any
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into()).filter(|s| !s.is_empty());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into()).filter(|s| !s.is_empty());
        self
    }

    /// Move the window to `offset` / `limit`.
    pub fn page(mut self, offset: u64, limit: u64) -> Self {
        self.offset = offset;
        self.limit = limit;
        self
    }
}
