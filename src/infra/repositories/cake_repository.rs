//! Cake repository implementation.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, Set};

use super::entities::cake::{ActiveModel, Entity as CakeEntity};
use super::query::CakeQuery;
use super::update::CakeUpdate;
use crate::domain::{Cake, CakeFilter, CakePatch, NewCake};
use crate::errors::{AppResult, OptionExt};
use crate::types::RequestContext;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Cake repository trait for dependency injection.
///
/// Every method runs its store call under the given [`RequestContext`] and
/// fails with `AppError::Cancelled` when the context is cancelled or expires.
/// Update and delete do not check that the cake exists; callers that need a
/// not-found signal look the cake up first.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CakeRepository: Send + Sync {
    /// Page of cakes matching the filter, plus the total match count
    async fn list(&self, ctx: &RequestContext, filter: &CakeFilter) -> AppResult<(Vec<Cake>, u64)>;

    /// Cake by ID, or `AppError::NotFound`
    async fn get(&self, ctx: &RequestContext, id: i32) -> AppResult<Cake>;

    /// Insert a cake and return its store-assigned ID
    async fn create(&self, ctx: &RequestContext, cake: NewCake) -> AppResult<i32>;

    /// Apply a sparse update; returns the number of rows affected
    async fn update(&self, ctx: &RequestContext, id: i32, patch: CakePatch) -> AppResult<u64>;

    /// Hard delete by ID; returns the number of rows affected
    async fn delete(&self, ctx: &RequestContext, id: i32) -> AppResult<u64>;
}

/// Concrete implementation of CakeRepository
pub struct CakeStore {
    db: Arc<DatabaseConnection>,
}

impl CakeStore {
    /// Create new repository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CakeRepository for CakeStore {
    async fn list(&self, ctx: &RequestContext, filter: &CakeFilter) -> AppResult<(Vec<Cake>, u64)> {
        let query = CakeQuery::from_filter(filter);

        let total = ctx.run(query.count_statement().count(self.db.as_ref())).await?;
        if total <= query.offset() || query.limit() == 0 {
            tracing::debug!(total, offset = query.offset(), "Cake page is empty");
            return Ok((Vec::new(), total));
        }

        let models = ctx.run(query.page_statement().all(self.db.as_ref())).await?;
        tracing::debug!(total, returned = models.len(), "Cakes listed");

        Ok((models.into_iter().map(Cake::from).collect(), total))
    }

    async fn get(&self, ctx: &RequestContext, id: i32) -> AppResult<Cake> {
        let model = ctx.run(CakeQuery::by_id(id).one(self.db.as_ref())).await?;
        model.map(Cake::from).ok_or_not_found()
    }

    async fn create(&self, ctx: &RequestContext, cake: NewCake) -> AppResult<i32> {
        // created_at comes from the column default
        let active_model = ActiveModel {
            title: Set(cake.title),
            description: Set(cake.description),
            rating: Set(cake.rating),
            image: Set(cake.image),
            ..Default::default()
        };

        let result = ctx.run(CakeEntity::insert(active_model).exec(self.db.as_ref())).await?;
        tracing::debug!(id = result.last_insert_id, "Cake created");

        Ok(result.last_insert_id)
    }

    async fn update(&self, ctx: &RequestContext, id: i32, patch: CakePatch) -> AppResult<u64> {
        let update = CakeUpdate::new(id, &patch);
        let result = ctx.run(update.statement().exec(self.db.as_ref())).await?;
        tracing::debug!(
            id,
            fields = update.assignments().len(),
            rows_affected = result.rows_affected,
            "Cake updated"
        );

        Ok(result.rows_affected)
    }

    async fn delete(&self, ctx: &RequestContext, id: i32) -> AppResult<u64> {
        let result = ctx.run(CakeEntity::delete_by_id(id).exec(self.db.as_ref())).await?;
        tracing::debug!(id, rows_affected = result.rows_affected, "Cake deleted");

        Ok(result.rows_affected)
    }
}
