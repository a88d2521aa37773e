//! Integration tests for the advert browse repository.
//!
//! Exercises the shared filter builder against a real database: brand and
//! status scoping, free-text search, numeric ranges with the zero-ceiling
//! rule, feature-set membership, pagination windows, and relation expansion.

use sqlx::PgPool;

use garagem_core::text::normalize;
use garagem_core::vehicle::VehicleKind;
use garagem_db::models::advert::{AdvertFilter, CreateAdvert};
use garagem_db::models::user::CreateUser;
use garagem_db::repositories::{AdvertRepo, BrandRepo, ModelRepo, OptionalRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_seller(pool: &PgPool) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            name: "Ana".to_string(),
            lastname: Some("Souza".to_string()),
            email: "ana@example.com".to_string(),
            phone: Some("11999990000".to_string()),
            image: None,
            plan: None,
        },
    )
    .await
    .unwrap()
    .id
}

/// Seed one brand with one model; returns `(brand_id, model_id)`.
async fn seed_catalog(pool: &PgPool, brand: &str, model: &str) -> (i64, i64) {
    let brand = BrandRepo::create(pool, brand, VehicleKind::Cars).await.unwrap();
    let model = ModelRepo::create(pool, brand.id, model).await.unwrap();
    (brand.id, model.id)
}

fn advert_dto(user_id: i64, brand_id: i64, model_id: i64) -> CreateAdvert {
    CreateAdvert {
        user_id,
        brand_id,
        model_id,
        slug_base: "toyota-corolla".to_string(),
        price: 45_000,
        mileage: 30_000,
        year_model: 2019,
        color: "prata".to_string(),
        transmission: "manual".to_string(),
        doors: "4".to_string(),
        plate: Some("ABC1D23".to_string()),
        description: None,
        city: "São Paulo".to_string(),
        state: "SP".to_string(),
        formatted_city: normalize("São Paulo"),
        formatted_state: normalize("SP"),
        images: Vec::new(),
        optional_ids: Vec::new(),
    }
}

/// Insert an advert and flip it to ACTIVE so the browse query can see it.
async fn insert_active(pool: &PgPool, dto: &CreateAdvert) -> i64 {
    let advert = AdvertRepo::create(pool, dto).await.unwrap();
    sqlx::query("UPDATE adverts SET status = 'ACTIVE' WHERE id = $1")
        .bind(advert.id)
        .execute(pool)
        .await
        .unwrap();
    advert.id
}

fn toyota_filter() -> AdvertFilter {
    AdvertFilter {
        brand_slug: "toyota".to_string(),
        ..AdvertFilter::default()
    }
}

// ---------------------------------------------------------------------------
// Test: brand and status scoping
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_is_scoped_to_brand_and_active_status(pool: PgPool) {
    let user_id = seed_seller(&pool).await;
    let (toyota_id, corolla_id) = seed_catalog(&pool, "Toyota", "Corolla").await;
    let (honda_id, civic_id) = seed_catalog(&pool, "Honda", "Civic").await;

    let visible = insert_active(&pool, &advert_dto(user_id, toyota_id, corolla_id)).await;

    // Same brand but still pending moderation.
    AdvertRepo::create(&pool, &advert_dto(user_id, toyota_id, corolla_id))
        .await
        .unwrap();

    // Active but another brand.
    insert_active(&pool, &advert_dto(user_id, honda_id, civic_id)).await;

    let views = AdvertRepo::search(&pool, &toyota_filter()).await.unwrap();
    let total = AdvertRepo::count(&pool, &toyota_filter()).await.unwrap();

    assert_eq!(views.len(), 1);
    assert_eq!(views[0].id, visible);
    assert_eq!(total, 1);
}

// ---------------------------------------------------------------------------
// Test: pagination windows
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn pagination_windows_cover_all_rows_without_overlap(pool: PgPool) {
    let user_id = seed_seller(&pool).await;
    let (brand_id, model_id) = seed_catalog(&pool, "Toyota", "Corolla").await;

    let mut inserted = Vec::new();
    for _ in 0..23 {
        inserted.push(insert_active(&pool, &advert_dto(user_id, brand_id, model_id)).await);
    }

    let page = |offset| AdvertFilter {
        limit: 10,
        offset,
        ..toyota_filter()
    };

    let first = AdvertRepo::search(&pool, &page(0)).await.unwrap();
    let last = AdvertRepo::search(&pool, &page(20)).await.unwrap();
    let total = AdvertRepo::count(&pool, &page(0)).await.unwrap();

    assert_eq!(first.len(), 10);
    assert_eq!(last.len(), 3);
    assert_eq!(total, 23);

    // Oldest listings come first and the windows do not overlap.
    let first_ids: Vec<i64> = first.iter().map(|v| v.id).collect();
    assert_eq!(first_ids, inserted[..10].to_vec());
    assert!(last.iter().all(|v| !first_ids.contains(&v.id)));

    // A window past the end is empty, not an error.
    let beyond = AdvertRepo::search(&pool, &page(30)).await.unwrap();
    assert!(beyond.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn identical_queries_return_identical_pages(pool: PgPool) {
    let user_id = seed_seller(&pool).await;
    let (brand_id, model_id) = seed_catalog(&pool, "Toyota", "Corolla").await;
    for _ in 0..5 {
        insert_active(&pool, &advert_dto(user_id, brand_id, model_id)).await;
    }

    let filter = toyota_filter();
    let a: Vec<i64> = AdvertRepo::search(&pool, &filter)
        .await
        .unwrap()
        .iter()
        .map(|v| v.id)
        .collect();
    let b: Vec<i64> = AdvertRepo::search(&pool, &filter)
        .await
        .unwrap()
        .iter()
        .map(|v| v.id)
        .collect();

    assert_eq!(a, b);
}

// ---------------------------------------------------------------------------
// Test: price range with the zero-ceiling rule
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn zero_price_cap_excludes_nothing(pool: PgPool) {
    let user_id = seed_seller(&pool).await;
    let (brand_id, model_id) = seed_catalog(&pool, "Toyota", "Corolla").await;

    let mut cheap = advert_dto(user_id, brand_id, model_id);
    cheap.price = 30_000;
    insert_active(&pool, &cheap).await;

    let mut expensive = advert_dto(user_id, brand_id, model_id);
    expensive.price = 120_000;
    insert_active(&pool, &expensive).await;

    let unbounded = AdvertFilter {
        price_max: Some(0),
        ..toyota_filter()
    };
    assert_eq!(AdvertRepo::count(&pool, &unbounded).await.unwrap(), 2);

    let capped = AdvertFilter {
        price_max: Some(50_000),
        ..toyota_filter()
    };
    let views = AdvertRepo::search(&pool, &capped).await.unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].price, 30_000);
}

// ---------------------------------------------------------------------------
// Test: free-text search disjunction
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_terms_match_any_of_the_six_fields(pool: PgPool) {
    let user_id = seed_seller(&pool).await;
    let (brand_id, model_id) = seed_catalog(&pool, "Toyota", "Corolla").await;

    let mut white = advert_dto(user_id, brand_id, model_id);
    white.color = "branco".to_string();
    white.transmission = "automatico".to_string();
    let white_id = insert_active(&pool, &white).await;

    let mut manual = advert_dto(user_id, brand_id, model_id);
    manual.color = "preto".to_string();
    manual.transmission = "manual".to_string();
    let manual_id = insert_active(&pool, &manual).await;

    let mut neither = advert_dto(user_id, brand_id, model_id);
    neither.color = "prata".to_string();
    neither.transmission = "automatico".to_string();
    neither.city = "Curitiba".to_string();
    neither.formatted_city = normalize("Curitiba");
    let neither_id = insert_active(&pool, &neither).await;

    let filter = AdvertFilter {
        search_terms: vec!["branco".to_string(), "manual".to_string()],
        ..toyota_filter()
    };
    let ids: Vec<i64> = AdvertRepo::search(&pool, &filter)
        .await
        .unwrap()
        .iter()
        .map(|v| v.id)
        .collect();

    assert!(ids.contains(&white_id));
    assert!(ids.contains(&manual_id));
    assert!(!ids.contains(&neither_id));

    // A term can also hit the formatted city column.
    let by_city = AdvertFilter {
        search_terms: vec!["curitiba".to_string()],
        ..toyota_filter()
    };
    let ids: Vec<i64> = AdvertRepo::search(&pool, &by_city)
        .await
        .unwrap()
        .iter()
        .map(|v| v.id)
        .collect();
    assert_eq!(ids, vec![neither_id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn folded_needles_match_accented_locations(pool: PgPool) {
    let user_id = seed_seller(&pool).await;
    let (brand_id, model_id) = seed_catalog(&pool, "Toyota", "Corolla").await;

    let mut dto = advert_dto(user_id, brand_id, model_id);
    dto.city = "São José dos Campos".to_string();
    dto.formatted_city = normalize("São José dos Campos");
    let id = insert_active(&pool, &dto).await;

    let filter = AdvertFilter {
        city: Some(normalize("São José")),
        ..toyota_filter()
    };
    let views = AdvertRepo::search(&pool, &filter).await.unwrap();

    assert_eq!(views.len(), 1);
    assert_eq!(views[0].id, id);
    // The original spelling is preserved in the projection.
    assert_eq!(views[0].city, "São José dos Campos");
}

// ---------------------------------------------------------------------------
// Test: optional-feature membership
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn optionals_match_when_any_requested_feature_is_present(pool: PgPool) {
    let user_id = seed_seller(&pool).await;
    let (brand_id, model_id) = seed_catalog(&pool, "Toyota", "Corolla").await;

    let airbag = OptionalRepo::create(&pool, "airbag").await.unwrap();
    let abs = OptionalRepo::create(&pool, "abs").await.unwrap();

    let mut with_airbag = advert_dto(user_id, brand_id, model_id);
    with_airbag.optional_ids = vec![airbag.id];
    let airbag_id = insert_active(&pool, &with_airbag).await;

    let mut with_abs = advert_dto(user_id, brand_id, model_id);
    with_abs.optional_ids = vec![abs.id];
    let abs_id = insert_active(&pool, &with_abs).await;

    insert_active(&pool, &advert_dto(user_id, brand_id, model_id)).await;

    let filter = AdvertFilter {
        optionals: vec!["airbag".to_string(), "teto-solar".to_string()],
        ..toyota_filter()
    };
    let ids: Vec<i64> = AdvertRepo::search(&pool, &filter)
        .await
        .unwrap()
        .iter()
        .map(|v| v.id)
        .collect();

    assert_eq!(ids, vec![airbag_id]);
    assert!(!ids.contains(&abs_id));
}

// ---------------------------------------------------------------------------
// Test: narrowing monotonicity
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn adding_a_constraint_never_increases_the_count(pool: PgPool) {
    let user_id = seed_seller(&pool).await;
    let (brand_id, model_id) = seed_catalog(&pool, "Toyota", "Corolla").await;

    for doors in ["2", "4", "4"] {
        let mut dto = advert_dto(user_id, brand_id, model_id);
        dto.doors = doors.to_string();
        insert_active(&pool, &dto).await;
    }

    let base = AdvertRepo::count(&pool, &toyota_filter()).await.unwrap();

    let narrowed = AdvertFilter {
        doors: Some("4".to_string()),
        ..toyota_filter()
    };
    let narrowed_count = AdvertRepo::count(&pool, &narrowed).await.unwrap();

    assert_eq!(base, 3);
    assert_eq!(narrowed_count, 2);
    assert!(narrowed_count <= base);
}

// ---------------------------------------------------------------------------
// Test: relation expansion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn projection_expands_relations_and_redacts_internals(pool: PgPool) {
    let user_id = seed_seller(&pool).await;
    let (brand_id, model_id) = seed_catalog(&pool, "Toyota", "Corolla").await;

    let airbag = OptionalRepo::create(&pool, "airbag").await.unwrap();

    let mut dto = advert_dto(user_id, brand_id, model_id);
    dto.images = vec![
        "https://cdn.example.com/a.jpg".to_string(),
        "https://cdn.example.com/b.jpg".to_string(),
        "https://cdn.example.com/c.jpg".to_string(),
    ];
    dto.optional_ids = vec![airbag.id];
    insert_active(&pool, &dto).await;

    let views = AdvertRepo::search(&pool, &toyota_filter()).await.unwrap();
    assert_eq!(views.len(), 1);
    let view = &views[0];

    assert_eq!(view.brand.slug, "toyota");
    assert_eq!(view.model.name, "Corolla");

    // Images come back in insertion order.
    let urls: Vec<&str> = view.images.iter().map(|i| i.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://cdn.example.com/a.jpg",
            "https://cdn.example.com/b.jpg",
            "https://cdn.example.com/c.jpg",
        ]
    );

    assert_eq!(view.optionals.len(), 1);
    assert_eq!(view.optionals[0].name, "airbag");

    // The wire shape never carries the plate or seller internals.
    let json = serde_json::to_value(view).unwrap();
    assert!(json.get("plate").is_none());
    assert!(json["user"].get("plan").is_none());
    assert!(json["user"].get("password_hash").is_none());
    assert_eq!(json["user"]["name"], "Ana");
    assert_eq!(json["user"]["email"], "ana@example.com");
}

// ---------------------------------------------------------------------------
// Test: creation and detail lookup
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_embeds_the_id_in_the_slug_and_starts_pending(pool: PgPool) {
    let user_id = seed_seller(&pool).await;
    let (brand_id, model_id) = seed_catalog(&pool, "Toyota", "Corolla").await;

    let advert = AdvertRepo::create(&pool, &advert_dto(user_id, brand_id, model_id))
        .await
        .unwrap();

    assert_eq!(advert.slug, format!("toyota-corolla-{}", advert.id));
    assert_eq!(advert.status, "PENDING");

    let view = AdvertRepo::find_view_by_id(&pool, advert.id)
        .await
        .unwrap()
        .expect("created advert must be expandable");
    assert_eq!(view.slug, advert.slug);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn detail_lookup_sees_only_active_adverts(pool: PgPool) {
    let user_id = seed_seller(&pool).await;
    let (brand_id, model_id) = seed_catalog(&pool, "Toyota", "Corolla").await;

    let advert = AdvertRepo::create(&pool, &advert_dto(user_id, brand_id, model_id))
        .await
        .unwrap();

    assert!(AdvertRepo::find_active_by_slug(&pool, &advert.slug)
        .await
        .unwrap()
        .is_none());

    sqlx::query("UPDATE adverts SET status = 'ACTIVE' WHERE id = $1")
        .bind(advert.id)
        .execute(&pool)
        .await
        .unwrap();

    let view = AdvertRepo::find_active_by_slug(&pool, &advert.slug)
        .await
        .unwrap()
        .expect("active advert must be visible");
    assert_eq!(view.id, advert.id);
}
