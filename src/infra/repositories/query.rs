//! List/get statement construction.
//!
//! A [`CakeQuery`] turns a [`CakeFilter`] into two statements over the same
//! condition: a count statement for the total and an ordered, windowed data
//! statement for the page. Filter text only ever travels as bound values.

use sea_orm::sea_query::LikeExpr;
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Select};

use super::entities::cake::{self, Entity as CakeEntity};
use crate::domain::CakeFilter;

/// Escape character for LIKE patterns.
const LIKE_ESCAPE: char = '\\';

/// Filtered, paginated cake query.
#[derive(Debug, Clone)]
pub struct CakeQuery {
    condition: Condition,
    offset: u64,
    limit: u64,
}

impl CakeQuery {
    /// Build the query for a list filter. Filters combine with AND.
    pub fn from_filter(filter: &CakeFilter) -> Self {
        let mut condition = Condition::all();

        if let Some(title) = filter.title() {
            condition = condition.add(cake::Column::Title.like(contains(title)));
        }
        if let Some(description) = filter.description() {
            condition = condition.add(cake::Column::Description.like(contains(description)));
        }

        Self {
            condition,
            offset: filter.offset,
            limit: filter.limit,
        }
    }

    /// Single cake by primary key.
    pub fn by_id(id: i32) -> Select<CakeEntity> {
        CakeEntity::find().filter(cake::Column::Id.eq(id))
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Every matching row, unordered; feed to `PaginatorTrait::count`.
    pub fn count_statement(&self) -> Select<CakeEntity> {
        CakeEntity::find().filter(self.condition.clone())
    }

    /// The requested page, ordered by rating (high first) then title.
    pub fn page_statement(&self) -> Select<CakeEntity> {
        self.count_statement()
            .order_by_desc(cake::Column::Rating)
            .order_by_asc(cake::Column::Title)
            .offset(self.offset)
            .limit(self.limit)
    }
}

/// Substring pattern with LIKE metacharacters matched literally.
fn contains(text: &str) -> LikeExpr {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');

    LikeExpr::new(pattern).escape(LIKE_ESCAPE)
}
