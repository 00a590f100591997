//! Cake repository integration tests.
//!
//! Each test runs the real migrations against a private in-memory SQLite
//! database, so statements are executed end to end.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use sea_orm::{DatabaseBackend, DbErr, MockDatabase};

use cake_store::config::{DatabaseConfig, PoolSettings};
use cake_store::domain::{Cake, CakeFilter, CakePatch, NewCake};
use cake_store::errors::AppError;
use cake_store::infra::{CakeRepository, CakeStore, Database};
use cake_store::types::RequestContext;

// =============================================================================
// Test Helpers
// =============================================================================

/// One pooled connection keeps the in-memory database alive for the test.
async fn setup() -> CakeStore {
    let config = DatabaseConfig::from_url("sqlite::memory:").with_pool(PoolSettings {
        max_connections: 1,
        min_connections: 1,
        idle_timeout: None,
        max_lifetime: None,
        acquire_timeout: Duration::from_secs(5),
    });
    let db = Database::connect(&config)
        .await
        .expect("in-memory database should migrate");

    CakeStore::new(db.get_connection())
}

async fn insert(store: &CakeStore, title: &str, rating: f64) -> i32 {
    store
        .create(
            &RequestContext::new(),
            NewCake::new(title, Some(format!("{title} description")), Some(rating), None),
        )
        .await
        .expect("insert should succeed")
}

async fn list(store: &CakeStore, filter: CakeFilter) -> (Vec<Cake>, u64) {
    store
        .list(&RequestContext::new(), &filter)
        .await
        .expect("list should succeed")
}

fn assert_ordered(cakes: &[Cake]) {
    for pair in cakes.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            a.rating > b.rating || (a.rating == b.rating && a.title <= b.title),
            "{} ({}) listed before {} ({})",
            a.title,
            a.rating,
            b.title,
            b.rating
        );
    }
}

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test]
async fn test_cake_lifecycle() {
    let store = setup().await;
    let ctx = RequestContext::new();

    let id = store
        .create(
            &ctx,
            NewCake::new(
                "Lemon cheesecake",
                Some("A cheesecake made of lemon".into()),
                Some(7.0),
                Some("https://img.example.com/lemon.jpeg".into()),
            ),
        )
        .await
        .unwrap();

    let (listed, total) = list(&store, CakeFilter::default()).await;
    assert_eq!(total, 1);
    assert_eq!(listed[0].id, id);

    let created = store.get(&ctx, id).await.unwrap();
    assert_eq!(created, listed[0]);
    assert_eq!(created.title, "Lemon cheesecake");
    assert_eq!(created.rating, 7.0);
    assert!(!created.is_modified());

    let affected = store
        .update(&ctx, id, CakePatch::default().rating(9.0))
        .await
        .unwrap();
    assert_eq!(affected, 1);

    let updated = store.get(&ctx, id).await.unwrap();
    assert_eq!(updated.rating, 9.0);
    assert_eq!(updated.title, created.title);
    assert_eq!(updated.description, created.description);
    assert_eq!(updated.image, created.image);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.is_modified());

    assert_eq!(store.delete(&ctx, id).await.unwrap(), 1);
    assert!(matches!(store.get(&ctx, id).await, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_create_applies_defaults() {
    let store = setup().await;
    let ctx = RequestContext::new();

    let id = store
        .create(&ctx, NewCake::new("Plain sponge", None, None, None))
        .await
        .unwrap();
    let cake = store.get(&ctx, id).await.unwrap();

    assert_eq!(cake.description, "");
    assert_eq!(cake.rating, 0.0);
    assert_eq!(cake.image, None);
    assert_eq!(cake.updated_at, None);
}

#[tokio::test]
async fn test_ids_are_distinct() {
    let store = setup().await;

    let first = insert(&store, "Black forest", 8.0).await;
    let second = insert(&store, "Black forest", 8.0).await;

    assert_ne!(first, second);
}

// =============================================================================
// Listing
// =============================================================================

#[tokio::test]
async fn test_list_orders_by_rating_then_title() {
    let store = setup().await;
    for (title, rating) in [
        ("Carrot cake", 6.5),
        ("Apple pie", 9.0),
        ("Banana bread", 6.5),
        ("Tiramisu", 9.0),
        ("Brownie", 3.0),
    ] {
        insert(&store, title, rating).await;
    }

    let (cakes, total) = list(&store, CakeFilter::default()).await;

    assert_eq!(total, 5);
    assert_ordered(&cakes);
    let titles: Vec<_> = cakes.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(
        titles,
        ["Apple pie", "Tiramisu", "Banana bread", "Carrot cake", "Brownie"]
    );
}

#[tokio::test]
async fn test_pages_cover_every_match_exactly_once() {
    let store = setup().await;
    for i in 0..7 {
        insert(&store, &format!("Cake {i}"), f64::from(i % 3)).await;
    }

    let mut seen = HashSet::new();
    let mut all = Vec::new();
    for offset in (0..7).step_by(3) {
        let (page, total) = list(&store, CakeFilter::default().page(offset, 3)).await;
        assert_eq!(total, 7);
        assert!(page.len() <= 3);
        for cake in page {
            assert!(seen.insert(cake.id), "cake {} returned twice", cake.id);
            all.push(cake);
        }
    }

    assert_eq!(all.len(), 7);
    assert_ordered(&all);
}

#[tokio::test]
async fn test_offset_past_end_returns_empty_page_with_total() {
    let store = setup().await;
    insert(&store, "Pavlova", 5.0).await;
    insert(&store, "Madeleine", 4.0).await;

    let (page, total) = list(&store, CakeFilter::default().page(2, 10)).await;

    assert!(page.is_empty());
    assert_eq!(total, 2);
}

#[tokio::test]
async fn test_filters_combine_with_and() {
    let store = setup().await;
    let ctx = RequestContext::new();
    store
        .create(&ctx, NewCake::new("Lemon tart", Some("zesty".into()), None, None))
        .await
        .unwrap();
    store
        .create(&ctx, NewCake::new("Lemon cheesecake", Some("creamy".into()), None, None))
        .await
        .unwrap();
    store
        .create(&ctx, NewCake::new("Cheesecake", Some("creamy".into()), None, None))
        .await
        .unwrap();

    let filter = CakeFilter::default()
        .with_title("Lemon")
        .with_description("cream");
    let (cakes, total) = list(&store, filter).await;

    assert_eq!(total, 1);
    assert_eq!(cakes[0].title, "Lemon cheesecake");
}

#[tokio::test]
async fn test_filter_text_is_matched_literally() {
    let store = setup().await;
    insert(&store, "100% cocoa", 8.0).await;
    insert(&store, "1000 layer crepe", 7.0).await;
    insert(&store, "Mille_feuille", 6.0).await;
    insert(&store, "Millexfeuille", 5.0).await;
    insert(&store, "Grandma's pound cake", 4.0).await;

    let (percent, _) = list(&store, CakeFilter::default().with_title("100%")).await;
    let (underscore, _) = list(&store, CakeFilter::default().with_title("e_f")).await;
    let (quote, _) = list(&store, CakeFilter::default().with_title("'s pound")).await;
    let (injection, total) = list(
        &store,
        CakeFilter::default().with_title("' OR '1'='1"),
    )
    .await;

    assert_eq!(percent.len(), 1);
    assert_eq!(percent[0].title, "100% cocoa");
    assert_eq!(underscore.len(), 1);
    assert_eq!(underscore[0].title, "Mille_feuille");
    assert_eq!(quote.len(), 1);
    assert!(injection.is_empty());
    assert_eq!(total, 0);
}

// =============================================================================
// Updates and deletes
// =============================================================================

#[tokio::test]
async fn test_partial_update_touches_only_supplied_fields() {
    let store = setup().await;
    let ctx = RequestContext::new();

    for mask in 0u8..16 {
        let id = store
            .create(
                &ctx,
                NewCake::new(
                    "Opera cake",
                    Some("layers of almond sponge".into()),
                    Some(6.0),
                    Some("https://img.example.com/opera.jpeg".into()),
                ),
            )
            .await
            .unwrap();
        let before = store.get(&ctx, id).await.unwrap();

        let mut patch = CakePatch::default();
        if mask & 1 != 0 {
            patch = patch.title("Opera gateau");
        }
        if mask & 2 != 0 {
            patch = patch.description("coffee and chocolate");
        }
        if mask & 4 != 0 {
            patch = patch.rating(8.5);
        }
        if mask & 8 != 0 {
            patch = patch.image("https://img.example.com/opera-2.jpeg");
        }

        store.update(&ctx, id, patch.clone()).await.unwrap();
        let after = store.get(&ctx, id).await.unwrap();

        assert_eq!(after.title, patch.title.unwrap_or(before.title), "mask {mask}");
        assert_eq!(
            after.description,
            patch.description.unwrap_or(before.description),
            "mask {mask}"
        );
        assert_eq!(after.rating, patch.rating.unwrap_or(before.rating), "mask {mask}");
        assert_eq!(after.image, patch.image.or(before.image), "mask {mask}");
        assert_eq!(after.created_at, before.created_at, "mask {mask}");
        assert!(after.is_modified(), "mask {mask}");
    }
}

#[tokio::test]
async fn test_update_and_delete_on_missing_id_affect_nothing() {
    let store = setup().await;
    let ctx = RequestContext::new();

    let updated = store
        .update(&ctx, 404, CakePatch::default().rating(1.0))
        .await
        .unwrap();
    let deleted = store.delete(&ctx, 404).await.unwrap();

    assert_eq!(updated, 0);
    assert_eq!(deleted, 0);
}

#[tokio::test]
async fn test_delete_twice_reports_not_found_afterwards() {
    let store = setup().await;
    let ctx = RequestContext::new();
    let id = insert(&store, "Red velvet", 7.5).await;

    assert_eq!(store.delete(&ctx, id).await.unwrap(), 1);
    assert_eq!(store.delete(&ctx, id).await.unwrap(), 0);
    assert!(matches!(store.get(&ctx, id).await, Err(AppError::NotFound)));
}

// =============================================================================
// Failure paths
// =============================================================================

#[tokio::test]
async fn test_store_failure_surfaces_as_database_error() {
    let connection = MockDatabase::new(DatabaseBackend::MySql)
        .append_query_errors([DbErr::Custom("connection reset".to_string())])
        .into_connection();
    let store = CakeStore::new(Arc::new(connection));

    let result = store.get(&RequestContext::new(), 1).await;

    assert!(matches!(result, Err(AppError::Database(_))));
}

#[tokio::test]
async fn test_cancelled_context_aborts_every_operation() {
    let store = setup().await;
    let id = insert(&store, "Sachertorte", 8.0).await;

    let ctx = RequestContext::new();
    ctx.cancel();

    assert!(matches!(
        store.list(&ctx, &CakeFilter::default()).await,
        Err(AppError::Cancelled)
    ));
    assert!(matches!(store.get(&ctx, id).await, Err(AppError::Cancelled)));
    assert!(matches!(
        store.delete(&ctx, id).await,
        Err(AppError::Cancelled)
    ));

    // Nothing ran, so the cake is still there
    let still_there = store.get(&RequestContext::new(), id).await.unwrap();
    assert_eq!(still_there.title, "Sachertorte");
}
