//! Cake handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::extractors::{ValidatedJson, ValidatedJsonOrDefault, ValidatedQuery};
use crate::api::AppState;
use crate::config::{DEFAULT_PAGE_SIZE, MSG_CAKE_CREATED, MSG_CAKE_DELETED, MSG_CAKE_UPDATED};
use crate::domain::{Cake, CakeFilter, CakePatch, NewCake};
use crate::errors::{AppError, AppResult, ErrorResponse};
use crate::types::{Created, CreatedResponse, MessageResponse, Paged, RequestContext};

/// List query: substring filters and pagination window
#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListCakesQuery {
    /// Case-sensitivity follows the store collation
    pub title: Option<String>,
    pub description: Option<String>,
    /// Rows to skip
    #[validate(range(min = 0, message = "offset must be greater than or equal to 0"))]
    #[param(minimum = 0)]
    pub offset: Option<i64>,
    /// Page size; 0 or absent means 10
    #[validate(range(min = 0, message = "limit must be greater than or equal to 0"))]
    #[param(minimum = 0)]
    pub limit: Option<i64>,
}

impl ListCakesQuery {
    fn into_filter(self) -> CakeFilter {
        let offset = self.offset.unwrap_or(0).max(0) as u64;
        let limit = match self.limit {
            Some(limit) if limit > 0 => limit as u64,
            _ => DEFAULT_PAGE_SIZE,
        };

        CakeFilter::new(self.title, self.description, offset, limit)
    }
}

/// Cake creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCakeRequest {
    #[validate(
        required(message = "title is required"),
        length(min = 1, message = "title is required")
    )]
    #[schema(example = "Lemon cheesecake")]
    pub title: Option<String>,
    #[schema(example = "A cheesecake made of lemon")]
    pub description: Option<String>,
    #[schema(example = 7.0)]
    pub rating: Option<f64>,
    #[validate(url(message = "image is not valid url"))]
    #[schema(example = "https://img.example.com/lemon-cheesecake.jpeg")]
    pub image: Option<String>,
}

impl CreateCakeRequest {
    fn into_new_cake(self) -> AppResult<NewCake> {
        let title = self
            .title
            .ok_or_else(|| AppError::invalid_field("title", "title is required"))?;

        Ok(NewCake::new(title, self.description, self.rating, self.image))
    }
}

/// Cake update request; omitted fields keep their stored value
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCakeRequest {
    #[validate(length(min = 1, message = "title cannot be empty"))]
    #[schema(example = "Lemon cheesecake")]
    pub title: Option<String>,
    pub description: Option<String>,
    #[schema(example = 9.0)]
    pub rating: Option<f64>,
    #[validate(url(message = "image is not valid url"))]
    pub image: Option<String>,
}

impl From<UpdateCakeRequest> for CakePatch {
    fn from(req: UpdateCakeRequest) -> Self {
        CakePatch {
            title: req.title,
            description: req.description,
            rating: req.rating,
            image: req.image,
        }
    }
}

/// Create cake routes
pub fn cake_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_cakes).post(create_cake))
        .route("/:id", get(get_cake).patch(update_cake).delete(delete_cake))
}

fn parse_id(raw: &str) -> AppResult<i32> {
    raw.parse()
        .map_err(|_| AppError::unprocessable(format!("Invalid id: {raw}")))
}

/// List cakes, best rated first
#[utoipa::path(
    get,
    path = "/cakes",
    tag = "Cakes",
    params(ListCakesQuery),
    responses(
        (status = 200, description = "Page of cakes", body = [Cake],
            headers(
                ("Pagination-Rows" = u64, description = "Total matching cakes"),
                ("Pagination-Page" = u64, description = "Number of pages"),
                ("Pagination-Limit" = u64, description = "Page size")
            )
        ),
        (status = 422, description = "Invalid query", body = ErrorResponse)
    )
)]
pub async fn list_cakes(
    State(state): State<AppState>,
    ctx: RequestContext,
    ValidatedQuery(query): ValidatedQuery<ListCakesQuery>,
) -> AppResult<Paged<Cake>> {
    let filter = query.into_filter();
    let (cakes, total) = state.cakes.list(&ctx, &filter).await?;

    Ok(Paged::new(cakes, total, filter.limit))
}

/// Get a cake by ID
#[utoipa::path(
    get,
    path = "/cakes/{id}",
    tag = "Cakes",
    params(
        ("id" = i32, Path, description = "Cake ID")
    ),
    responses(
        (status = 200, description = "Cake", body = Cake),
        (status = 204, description = "Cake not found"),
        (status = 422, description = "Invalid ID", body = ErrorResponse)
    )
)]
pub async fn get_cake(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ctx: RequestContext,
) -> AppResult<Json<Cake>> {
    let id = parse_id(&id)?;
    let cake = state.cakes.get(&ctx, id).await?;

    Ok(Json(cake))
}

/// Create a cake
#[utoipa::path(
    post,
    path = "/cakes",
    tag = "Cakes",
    request_body = CreateCakeRequest,
    responses(
        (status = 201, description = "Cake created", body = CreatedResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    )
)]
pub async fn create_cake(
    State(state): State<AppState>,
    ctx: RequestContext,
    ValidatedJson(payload): ValidatedJson<CreateCakeRequest>,
) -> AppResult<Created<CreatedResponse>> {
    let id = state.cakes.create(&ctx, payload.into_new_cake()?).await?;
    tracing::info!(id, "Cake created");

    Ok(Created(CreatedResponse {
        message: MSG_CAKE_CREATED.to_string(),
        id,
    }))
}

/// Update the supplied fields of a cake
///
/// An empty body is a zero-field patch that only refreshes `updated_at`.
#[utoipa::path(
    patch,
    path = "/cakes/{id}",
    tag = "Cakes",
    params(
        ("id" = i32, Path, description = "Cake ID")
    ),
    request_body = UpdateCakeRequest,
    responses(
        (status = 200, description = "Cake updated", body = MessageResponse),
        (status = 204, description = "Cake not found"),
        (status = 422, description = "Validation error", body = ErrorResponse)
    )
)]
pub async fn update_cake(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ctx: RequestContext,
    ValidatedJsonOrDefault(payload): ValidatedJsonOrDefault<UpdateCakeRequest>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_id(&id)?;

    // Not atomic with the update below; a concurrent delete wins silently
    state.cakes.get(&ctx, id).await?;
    state.cakes.update(&ctx, id, payload.into()).await?;

    Ok(Json(MessageResponse::new(MSG_CAKE_UPDATED)))
}

/// Delete a cake
#[utoipa::path(
    delete,
    path = "/cakes/{id}",
    tag = "Cakes",
    params(
        ("id" = i32, Path, description = "Cake ID")
    ),
    responses(
        (status = 200, description = "Cake deleted", body = MessageResponse),
        (status = 204, description = "Cake not found"),
        (status = 422, description = "Invalid ID", body = ErrorResponse)
    )
)]
pub async fn delete_cake(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ctx: RequestContext,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_id(&id)?;

    state.cakes.get(&ctx, id).await?;
    state.cakes.delete(&ctx, id).await?;
    tracing::info!(id, "Cake deleted");

    Ok(Json(MessageResponse::new(MSG_CAKE_DELETED)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    use super::*;
    use crate::infra::{Database, MockCakeRepository};

    fn state_with(repo: MockCakeRepository) -> AppState {
        let database = Database::from_connection(
            MockDatabase::new(DatabaseBackend::MySql).into_connection(),
        );
        AppState::new(Arc::new(repo), Arc::new(database), Duration::from_secs(5))
    }

    fn lemon_cheesecake(id: i32) -> Cake {
        Cake {
            id,
            title: "Lemon cheesecake".into(),
            description: "A cheesecake made of lemon".into(),
            rating: 7.0,
            image: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_list_query_defaults_zero_limit_to_page_size() {
        let filter = ListCakesQuery {
            limit: Some(0),
            ..Default::default()
        }
        .into_filter();

        assert_eq!(filter.limit, DEFAULT_PAGE_SIZE);
        assert_eq!(filter.offset, 0);
    }

    #[test]
    fn test_list_query_rejects_negative_window() {
        let query = ListCakesQuery {
            offset: Some(-1),
            limit: Some(-5),
            ..Default::default()
        };

        let errors = query.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("offset"));
        assert!(fields.contains_key("limit"));
    }

    #[test]
    fn test_create_request_requires_non_empty_title() {
        let missing = CreateCakeRequest {
            title: None,
            description: None,
            rating: None,
            image: None,
        };
        let empty = CreateCakeRequest {
            title: Some(String::new()),
            description: None,
            rating: None,
            image: None,
        };

        assert!(missing.validate().is_err());
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_update_request_maps_only_supplied_fields() {
        let patch: CakePatch = UpdateCakeRequest {
            rating: Some(9.0),
            ..Default::default()
        }
        .into();

        assert_eq!(patch, CakePatch::default().rating(9.0));
    }

    #[tokio::test]
    async fn test_list_cakes_passes_default_limit() {
        let mut repo = MockCakeRepository::new();
        repo.expect_list()
            .withf(|_, filter| filter.limit == DEFAULT_PAGE_SIZE && filter.offset == 0)
            .returning(|_, _| Ok((vec![lemon_cheesecake(1)], 11)));

        let response = list_cakes(
            State(state_with(repo)),
            RequestContext::new(),
            ValidatedQuery(ListCakesQuery::default()),
        )
        .await
        .unwrap()
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["pagination-rows"], "11");
        assert_eq!(response.headers()["pagination-page"], "2");
        assert_eq!(response.headers()["pagination-limit"], "10");
    }

    #[tokio::test]
    async fn test_get_cake_rejects_non_numeric_id() {
        let repo = MockCakeRepository::new();

        let result = get_cake(
            State(state_with(repo)),
            Path("abc".to_string()),
            RequestContext::new(),
        )
        .await;

        assert!(matches!(result, Err(AppError::Unprocessable(_))));
    }

    #[tokio::test]
    async fn test_update_missing_cake_skips_update() {
        let mut repo = MockCakeRepository::new();
        repo.expect_get().returning(|_, _| Err(AppError::NotFound));
        repo.expect_update().never();

        let result = update_cake(
            State(state_with(repo)),
            Path("42".to_string()),
            RequestContext::new(),
            ValidatedJsonOrDefault(UpdateCakeRequest::default()),
        )
        .await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_existing_cake() {
        let mut repo = MockCakeRepository::new();
        repo.expect_get()
            .withf(|_, id| *id == 3)
            .returning(|_, id| Ok(lemon_cheesecake(id)));
        repo.expect_delete()
            .withf(|_, id| *id == 3)
            .times(1)
            .returning(|_, _| Ok(1));

        let Json(body) = delete_cake(
            State(state_with(repo)),
            Path("3".to_string()),
            RequestContext::new(),
        )
        .await
        .unwrap();

        assert_eq!(body.message, MSG_CAKE_DELETED);
    }

    #[tokio::test]
    async fn test_create_cake_returns_new_id() {
        let mut repo = MockCakeRepository::new();
        repo.expect_create()
            .withf(|_, cake| cake.title == "Lemon cheesecake" && cake.rating == 0.0)
            .returning(|_, _| Ok(17));

        let response = create_cake(
            State(state_with(repo)),
            RequestContext::new(),
            ValidatedJson(CreateCakeRequest {
                title: Some("Lemon cheesecake".into()),
                description: None,
                rating: None,
                image: None,
            }),
        )
        .await
        .unwrap()
        .into_response();

        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
