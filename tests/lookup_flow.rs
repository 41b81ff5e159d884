use axum::extract::{Path, State};
use chrono::{Days, Local, NaiveDateTime};
use rust_decimal::Decimal;
use sqlx::PgPool;

use produto_lookup_api::{
    routes::produtos,
    services::produto_service::{self, LookupOutcome, NotFoundStage},
};

const EAN_LEITE: &str = "7891000100103";
const EAN_QUEIJO: &str = "7891000200101";
const EAN_VINHO: &str = "7891000300109";
const EAN_PAO: &str = "7891000400106";
const EAN_ORFAO: &str = "0000000000042";

// Integration flow over a real Postgres: barcode lookups, store scoping,
// activity filtering, and the changed-today listing.
#[tokio::test]
async fn lookup_and_changed_today_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let pool = setup_pool(&database_url).await?;
    seed(&pool).await?;

    // Unknown barcode fails at the mapping stage, never as Inactive or a fault.
    let outcome = produto_service::lookup_by_barcode(&pool, "9999999999999").await?;
    assert!(matches!(
        outcome,
        LookupOutcome::NotFound(NotFoundStage::Mapping)
    ));

    // A mapping whose product row is missing fails at the product stage.
    let outcome = produto_service::lookup_by_barcode(&pool, EAN_ORFAO).await?;
    assert!(matches!(
        outcome,
        LookupOutcome::NotFound(NotFoundStage::Product)
    ));

    // Plain lookup returns id and description only.
    let outcome = produto_service::lookup_by_barcode(&pool, EAN_LEITE).await?;
    let LookupOutcome::Found(produto) = outcome else {
        panic!("expected milk to resolve, got {outcome:?}");
    };
    assert_eq!(produto.id_produto, 42);
    assert_eq!(produto.descricao.as_deref(), Some("Milk 1L"));

    // Store-scoped lookup carries price, stock and the barcode back.
    let outcome = produto_service::lookup_by_barcode_for_store(&pool, 5, EAN_LEITE).await?;
    let LookupOutcome::Found(produto) = outcome else {
        panic!("expected milk to be active in store 5, got {outcome:?}");
    };
    assert_eq!(produto.id_produto, 42);
    assert_eq!(produto.precovenda, Some(Decimal::new(499, 2)));
    assert_eq!(produto.estoque, Some(Decimal::new(12, 0)));
    assert_eq!(produto.ean, EAN_LEITE);

    // Null price on an active complement stays null, never zero.
    let outcome = produto_service::lookup_by_barcode_for_store(&pool, 5, EAN_QUEIJO).await?;
    let LookupOutcome::Found(produto) = outcome else {
        panic!("expected cheese to be active in store 5, got {outcome:?}");
    };
    assert_eq!(produto.precovenda, None);
    assert_eq!(produto.estoque, None);

    // Inactive complement and missing complement both come back Inactive,
    // distinct from NotFound.
    let outcome = produto_service::lookup_by_barcode_for_store(&pool, 5, EAN_VINHO).await?;
    assert!(matches!(outcome, LookupOutcome::Inactive));
    let outcome = produto_service::lookup_by_barcode_for_store(&pool, 5, EAN_PAO).await?;
    assert!(matches!(outcome, LookupOutcome::Inactive));

    // The store listing contains exactly the active products.
    let mut ids: Vec<i32> = produto_service::list_active_for_store(&pool, 5)
        .await?
        .iter()
        .map(|p| p.id_produto)
        .collect();
    ids.sort();
    assert_eq!(ids, vec![42, 43]);
    assert!(produto_service::list_active_for_store(&pool, 6).await?.is_empty());

    // The unscoped wildcard lists every mapped product regardless of activity.
    let mut ids: Vec<i32> = produto_service::list_all(&pool)
        .await?
        .iter()
        .map(|p| p.id_produto)
        .collect();
    ids.sort();
    assert_eq!(ids, vec![42, 43, 44, 45]);

    // Changed today: milk was touched today, cheese yesterday.
    let hoje = Local::now().date_naive();
    let alterados = produto_service::list_changed_on(&pool, 5, hoje).await?;
    let ids: Vec<i32> = alterados.iter().map(|p| p.id_produto).collect();
    assert_eq!(ids, vec![42]);

    // A store with no changes gets the sentinel body with a 200.
    let response = produtos::produtos_alterados(State(pool.clone()), Path(6))
        .await
        .expect("empty changed-today must not be an error");
    assert_eq!(response.status(), 200);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body: serde_json::Value = serde_json::from_slice(&body)?;
    assert_eq!(body["mensagem"], "Nenhum produto alterado hoje.");

    Ok(())
}

async fn setup_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPool::connect(database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    // Clean tables between runs
    sqlx::query("TRUNCATE TABLE produto, produtoautomacao, produtocomplemento")
        .execute(&pool)
        .await?;

    Ok(pool)
}

async fn seed(pool: &PgPool) -> anyhow::Result<()> {
    let agora = Local::now().naive_local();
    let ontem = agora
        .checked_sub_days(Days::new(1))
        .expect("yesterday exists");

    insert_produto(pool, 42, "Milk 1L", agora).await?;
    insert_produto(pool, 43, "Cheese 500g", ontem).await?;
    insert_produto(pool, 44, "Wine 750ml", agora).await?;
    insert_produto(pool, 45, "Bread", agora).await?;
    // Product 46 has no barcode mapping and must never show up.
    insert_produto(pool, 46, "Unmapped", agora).await?;

    insert_mapping(pool, EAN_LEITE, 42).await?;
    insert_mapping(pool, EAN_QUEIJO, 43).await?;
    insert_mapping(pool, EAN_VINHO, 44).await?;
    insert_mapping(pool, EAN_PAO, 45).await?;
    // Mapping to a product id with no produto row.
    insert_mapping(pool, EAN_ORFAO, 77).await?;

    // Store 5: milk active with price/stock, cheese active with nulls,
    // wine present but inactive, bread absent entirely.
    insert_complemento(pool, 42, 5, Some(Decimal::new(499, 2)), Some(Decimal::new(12, 0)), 1)
        .await?;
    insert_complemento(pool, 43, 5, None, None, 1).await?;
    insert_complemento(pool, 44, 5, Some(Decimal::new(2990, 2)), Some(Decimal::new(3, 0)), 0)
        .await?;

    Ok(())
}

async fn insert_produto(
    pool: &PgPool,
    id: i32,
    descricao: &str,
    alterado: NaiveDateTime,
) -> anyhow::Result<()> {
    sqlx::query("INSERT INTO produto (id, descricaocompleta, ultimaalteracao) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(descricao)
        .bind(alterado)
        .execute(pool)
        .await?;
    Ok(())
}

async fn insert_mapping(pool: &PgPool, ean: &str, id_produto: i32) -> anyhow::Result<()> {
    sqlx::query("INSERT INTO produtoautomacao (codigobarras, id_produto) VALUES ($1, $2)")
        .bind(ean)
        .bind(id_produto)
        .execute(pool)
        .await?;
    Ok(())
}

async fn insert_complemento(
    pool: &PgPool,
    id_produto: i32,
    id_loja: i32,
    precovenda: Option<Decimal>,
    estoque: Option<Decimal>,
    situacao: i32,
) -> anyhow::Result<()> {
    sqlx::query(
        "INSERT INTO produtocomplemento (id_produto, id_loja, precovenda, estoque, situacao) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(id_produto)
    .bind(id_loja)
    .bind(precovenda)
    .bind(estoque)
    .bind(situacao)
    .execute(pool)
    .await?;
    Ok(())
}
