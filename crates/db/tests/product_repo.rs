//! Integration tests for the product repository.
//!
//! Exercises the repository layer against a real database:
//! - Transactional create (product row + category links)
//! - Filtered, paginated listing of active products
//! - Soft delete and its idempotency guard
//!
//! The seed migration provides categories 1..=4:
//! Electronics, Clothing, Computers, Mobile.

use assert_matches::assert_matches;
use pis_core::product::{NewProduct, ProductStatus, NAME_UNIQUE_CONSTRAINT};
use pis_core::types::DbId;
use pis_db::constraint::{is_foreign_key_violation, is_unique_violation};
use pis_db::models::product::{Product, ProductFilter};
use pis_db::repositories::ProductRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_product(name: &str, category_ids: &[DbId]) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        description: Some(format!("{name} description")),
        quantity: 3,
        category_ids: category_ids.to_vec(),
    }
}

/// Insert a product and its links in one committed transaction.
async fn create(pool: &PgPool, name: &str, category_ids: &[DbId]) -> Product {
    let input = new_product(name, category_ids);
    let mut tx = pool.begin().await.unwrap();
    let product = ProductRepo::insert(&mut tx, &input).await.unwrap();
    ProductRepo::link_categories(&mut tx, product.id, &input.category_ids)
        .await
        .unwrap();
    tx.commit().await.unwrap();
    product
}

async fn product_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn link_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM product_categories")
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_insert_creates_active_product(pool: PgPool) {
    let product = create(&pool, "Widget", &[1]).await;

    assert_eq!(product.name, "Widget");
    assert_eq!(product.quantity, 3);
    assert_eq!(product.status, ProductStatus::Active);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_link_categories_writes_one_row_per_id(pool: PgPool) {
    let product = create(&pool, "Linked", &[2, 4]).await;

    let ids = ProductRepo::category_ids(&pool, product.id).await.unwrap();
    assert_eq!(ids, vec![2, 4]);
    assert_eq!(link_count(&pool).await, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_name_is_unique_violation(pool: PgPool) {
    create(&pool, "Dup", &[1]).await;

    let mut tx = pool.begin().await.unwrap();
    let err = ProductRepo::insert(&mut tx, &new_product("Dup", &[1]))
        .await
        .unwrap_err();
    assert!(is_unique_violation(&err, NAME_UNIQUE_CONSTRAINT));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_name_uniqueness_is_case_sensitive(pool: PgPool) {
    create(&pool, "Gadget", &[1]).await;
    create(&pool, "gadget", &[1]).await;

    assert_eq!(product_count(&pool).await, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_dropped_transaction_leaves_nothing_behind(pool: PgPool) {
    {
        let mut tx = pool.begin().await.unwrap();
        let product = ProductRepo::insert(&mut tx, &new_product("Ghost", &[1]))
            .await
            .unwrap();
        ProductRepo::link_categories(&mut tx, product.id, &[1, 2])
            .await
            .unwrap();
        // Dropped without commit.
    }

    assert_eq!(product_count(&pool).await, 0);
    assert_eq!(link_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_category_is_foreign_key_violation(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let product = ProductRepo::insert(&mut tx, &new_product("Orphan", &[999]))
        .await
        .unwrap();
    let err = ProductRepo::link_categories(&mut tx, product.id, &[999])
        .await
        .unwrap_err();
    assert!(is_foreign_key_violation(&err));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_link_is_rejected(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let product = ProductRepo::insert(&mut tx, &new_product("Twice", &[1]))
        .await
        .unwrap();
    let err = ProductRepo::link_categories(&mut tx, product.id, &[1, 1])
        .await
        .unwrap_err();
    assert!(is_unique_violation(&err, "pk_product_categories"));
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_returns_newest_first_with_category_names(pool: PgPool) {
    create(&pool, "Older", &[1, 3]).await;
    create(&pool, "Newer", &[]).await;

    let items = ProductRepo::list_active(&pool, &ProductFilter::default(), 10, 0)
        .await
        .unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].name, "Newer");
    assert!(items[0].categories.is_empty());
    assert_eq!(items[1].name, "Older");
    assert_eq!(items[1].categories, vec!["Computers", "Electronics"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_search_is_case_insensitive_substring(pool: PgPool) {
    create(&pool, "Blue Widget", &[1]).await;
    create(&pool, "Gizmo", &[1]).await;

    let filter = ProductFilter {
        search: Some("widg".into()),
        category_ids: vec![],
    };
    let items = ProductRepo::list_active(&pool, &filter, 10, 0).await.unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Blue Widget");
    assert_eq!(ProductRepo::count_active(&pool, &filter).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_search_treats_wildcards_literally(pool: PgPool) {
    create(&pool, "100% Cotton", &[2]).await;
    create(&pool, "1000 Threads", &[2]).await;

    let filter = ProductFilter {
        search: Some("0%".into()),
        category_ids: vec![],
    };
    let items = ProductRepo::list_active(&pool, &filter, 10, 0).await.unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "100% Cotton");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_category_filter_is_union(pool: PgPool) {
    create(&pool, "Laptop", &[1, 3]).await;
    create(&pool, "Shirt", &[2]).await;
    create(&pool, "Phone", &[4]).await;

    let only_one = ProductFilter {
        search: None,
        category_ids: vec![1],
    };
    let items = ProductRepo::list_active(&pool, &only_one, 10, 0).await.unwrap();
    let names: Vec<_> = items.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Laptop"]);
    // The filter narrows rows, not the aggregated names.
    assert_eq!(items[0].categories, vec!["Computers", "Electronics"]);

    let either = ProductFilter {
        search: None,
        category_ids: vec![1, 2],
    };
    let items = ProductRepo::list_active(&pool, &either, 10, 0).await.unwrap();
    let names: Vec<_> = items.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Shirt", "Laptop"]);
    assert_eq!(ProductRepo::count_active(&pool, &either).await.unwrap(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_pagination_and_total_are_independent(pool: PgPool) {
    for i in 0..5 {
        create(&pool, &format!("Item {i}"), &[1, 2]).await;
    }

    let filter = ProductFilter::default();
    let first = ProductRepo::list_active(&pool, &filter, 2, 0).await.unwrap();
    let third = ProductRepo::list_active(&pool, &filter, 2, 4).await.unwrap();
    let beyond = ProductRepo::list_active(&pool, &filter, 2, 10).await.unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(first[0].name, "Item 4");
    assert_eq!(third.len(), 1);
    assert_eq!(third[0].name, "Item 0");
    assert!(beyond.is_empty());
    // Two links per product must not inflate the count.
    assert_eq!(ProductRepo::count_active(&pool, &filter).await.unwrap(), 5);
}

// ---------------------------------------------------------------------------
// Soft delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_delete_hides_from_list(pool: PgPool) {
    let product = create(&pool, "Short Lived", &[1]).await;

    assert!(ProductRepo::soft_delete(&pool, product.id).await.unwrap());

    let items = ProductRepo::list_active(&pool, &ProductFilter::default(), 10, 0)
        .await
        .unwrap();
    assert!(items.is_empty());
    assert_eq!(
        ProductRepo::count_active(&pool, &ProductFilter::default())
            .await
            .unwrap(),
        0
    );

    // The row and its links are kept.
    let stored = ProductRepo::find_by_id(&pool, product.id).await.unwrap();
    assert_matches!(stored, Some(p) if p.status == ProductStatus::Inactive);
    assert_eq!(link_count(&pool).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_delete_is_idempotent(pool: PgPool) {
    let product = create(&pool, "Once", &[1]).await;

    assert!(ProductRepo::soft_delete(&pool, product.id).await.unwrap());
    assert!(!ProductRepo::soft_delete(&pool, product.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_delete_nonexistent_returns_false(pool: PgPool) {
    assert!(!ProductRepo::soft_delete(&pool, 999_999).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleted_name_stays_reserved(pool: PgPool) {
    let product = create(&pool, "Reserved", &[1]).await;
    ProductRepo::soft_delete(&pool, product.id).await.unwrap();

    let mut tx = pool.begin().await.unwrap();
    let err = ProductRepo::insert(&mut tx, &new_product("Reserved", &[1]))
        .await
        .unwrap_err();
    assert!(is_unique_violation(&err, NAME_UNIQUE_CONSTRAINT));
}
