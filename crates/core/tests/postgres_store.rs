//! Exercises `PgArtworkStore` against a live database.
//!
//! Runs only when `DATABASE_URL` points at a PostgreSQL instance the test may
//! migrate; otherwise each test returns immediately.

use artwork_gallery_core::artwork::{validate, Artwork, ArtworkId};
use artwork_gallery_core::mutation::{FavoriteAction, UpdateResult};
use artwork_gallery_core::query::ArtworkFilter;
use artwork_gallery_core::store::{ArtworkStore, PgArtworkStore};
use chrono::Utc;
use serde_json::json;
use sqlx::postgres::PgPoolOptions;

async fn store() -> Option<PgArtworkStore> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let pool = PgPoolOptions::new()
        .max_connections(8)
        .connect(&url)
        .await
        .expect("connect to DATABASE_URL");
    let store = PgArtworkStore::new(pool);
    store.migrate().await.expect("migrate");
    Some(store)
}

fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", ArtworkId::generate())
}

async fn create(store: &PgArtworkStore, body: serde_json::Value) -> ArtworkId {
    let fields = validate::new_artwork(body).unwrap();
    store
        .insert(Artwork::create(fields, Utc::now()))
        .await
        .unwrap()
        .inserted_id
}

#[tokio::test]
async fn create_list_like_round() {
    let Some(store) = store().await else { return };
    let category = unique("cat");
    let id = create(
        &store,
        json!({
            "title": "Sunset Over Bay",
            "artistName": "B",
            "category": category,
            "visibility": "public",
            "likes": 40,
        }),
    )
    .await;

    let found = store
        .list(&ArtworkFilter::new(Some("sunset".into()), Some(category.clone())))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, id);
    assert_eq!(found[0].likes, 0);

    assert_eq!(store.like(&id).await.unwrap(), UpdateResult::new(1, 1));
    assert_eq!(store.get(&id).await.unwrap().unwrap().likes, 1);
}

#[tokio::test]
async fn private_and_near_miss_categories_are_hidden() {
    let Some(store) = store().await else { return };
    let category = unique("sculpture");
    create(
        &store,
        json!({ "title": "Hidden", "category": category, "visibility": "private" }),
    )
    .await;
    create(
        &store,
        json!({ "title": "Shown", "category": category, "visibility": "public" }),
    )
    .await;

    let found = store
        .list(&ArtworkFilter::new(None, Some(category.clone())))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].fields.title.as_deref(), Some("Shown"));

    let plural = store
        .list(&ArtworkFilter::new(None, Some(format!("{category}s"))))
        .await
        .unwrap();
    assert!(plural.is_empty());
}

#[tokio::test]
async fn concurrent_likes_and_favorites() {
    let Some(store) = store().await else { return };
    let id = create(&store, json!({ "title": "Busy", "visibility": "public" })).await;

    let mut tasks = Vec::new();
    for _ in 0..20 {
        let store = store.clone();
        tasks.push(tokio::spawn(async move {
            store.like(&id).await.unwrap();
            store
                .favorite(&id, "fan@example.com", FavoriteAction::Add)
                .await
                .unwrap();
        }));
    }
    for t in tasks {
        t.await.unwrap();
    }

    let art = store.get(&id).await.unwrap().unwrap();
    assert_eq!(art.likes, 20);
    assert_eq!(art.favorites, vec!["fan@example.com"]);

    let res = store
        .favorite(&id, "fan@example.com", FavoriteAction::Remove)
        .await
        .unwrap();
    assert_eq!(res, UpdateResult::new(1, 1));
    let res = store
        .favorite(&id, "fan@example.com", FavoriteAction::Remove)
        .await
        .unwrap();
    assert_eq!(res, UpdateResult::new(1, 0));
}

#[tokio::test]
async fn update_is_shallow_and_reports_counts() {
    let Some(store) = store().await else { return };
    let id = create(
        &store,
        json!({ "title": "Before", "category": "print", "tags": ["a", "b"] }),
    )
    .await;

    let patch = validate::artwork_patch(json!({ "title": "After", "tags": ["c"] })).unwrap();
    assert_eq!(store.update(&id, &patch).await.unwrap(), UpdateResult::new(1, 1));
    assert_eq!(store.update(&id, &patch).await.unwrap(), UpdateResult::new(1, 0));

    let art = store.get(&id).await.unwrap().unwrap();
    assert_eq!(art.fields.title.as_deref(), Some("After"));
    assert_eq!(art.fields.category.as_deref(), Some("print"));
    assert_eq!(art.fields.tags, Some(vec!["c".to_string()]));

    let missing = ArtworkId::generate();
    assert_eq!(
        store.update(&missing, &patch).await.unwrap(),
        UpdateResult::unmatched()
    );
    assert_eq!(store.get(&missing).await.unwrap(), None);
}

#[tokio::test]
async fn non_ascii_search_matches_memory_backend() {
    let Some(store) = store().await else { return };
    if !store.unicode_case_folding().await.unwrap() {
        // C/POSIX locale: lower() folds ASCII only, see the migration notes.
        return;
    }
    let category = unique("été");
    let id = create(
        &store,
        json!({ "title": "ÉTÉ À PARIS", "category": category, "visibility": "public" }),
    )
    .await;

    let found = store
        .list(&ArtworkFilter::new(Some("été à".into()), Some(category)))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, id);
}
