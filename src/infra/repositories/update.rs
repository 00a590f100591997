//! Partial update statement construction.
//!
//! A [`CakeUpdate`] collects one `(column, value)` assignment per supplied
//! patch field and always refreshes `updated_at`, emitting a single
//! parameterized `UPDATE ... WHERE id = ?`.

use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, UpdateMany, Value};

use super::entities::cake::{self, Entity as CakeEntity};
use crate::domain::CakePatch;

/// Sparse update of one cake.
#[derive(Debug, Clone)]
pub struct CakeUpdate {
    id: i32,
    assignments: Vec<(cake::Column, Value)>,
}

impl CakeUpdate {
    pub fn new(id: i32, patch: &CakePatch) -> Self {
        let mut assignments = Vec::with_capacity(4);

        if let Some(title) = &patch.title {
            assignments.push((cake::Column::Title, Value::from(title.clone())));
        }
        if let Some(description) = &patch.description {
            assignments.push((cake::Column::Description, Value::from(description.clone())));
        }
        if let Some(rating) = patch.rating {
            assignments.push((cake::Column::Rating, Value::from(rating)));
        }
        if let Some(image) = &patch.image {
            assignments.push((cake::Column::Image, Value::from(image.clone())));
        }

        Self { id, assignments }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    /// Supplied fields, in column order.
    pub fn assignments(&self) -> &[(cake::Column, Value)] {
        &self.assignments
    }

    /// Single statement; with no assignments it only touches `updated_at`.
    pub fn statement(&self) -> UpdateMany<CakeEntity> {
        let touched = CakeEntity::update_many().col_expr(
            cake::Column::UpdatedAt,
            SimpleExpr::from(Expr::current_timestamp()),
        );

        self.assignments
            .iter()
            .cloned()
            .fold(touched, |stmt, (column, value)| {
                stmt.col_expr(column, SimpleExpr::Value(value))
            })
            .filter(cake::Column::Id.eq(self.id))
    }
}
