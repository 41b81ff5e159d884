use chrono::NaiveDate;

use crate::{
    db::DbPool,
    error::AppResult,
    models::{ProdutoDescricao, ProdutoLoja},
};

/// Literal identifier that switches a lookup into listing mode. Kept verbatim
/// for compatibility with existing callers.
pub const WILDCARD_EAN: &str = "all";

pub const MSG_INATIVO: &str = "Produto inativo para a loja informada";
pub const MSG_NENHUM_ALTERADO: &str = "Nenhum produto alterado hoje.";

pub fn is_wildcard(ean: &str) -> bool {
    ean.eq_ignore_ascii_case(WILDCARD_EAN)
}

/// Which stage of the lookup failed to resolve the identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundStage {
    /// No produtoautomacao row for the barcode.
    Mapping,
    /// Mapping exists but no produto row for the id.
    Product,
}

impl NotFoundStage {
    pub fn detail(self) -> &'static str {
        match self {
            NotFoundStage::Mapping => "Produto não encontrado no produtoautomacao",
            NotFoundStage::Product => "Produto não encontrado na tabela produtos",
        }
    }
}

/// Business outcome of a lookup. NotFound and Inactive are ordinary values
/// here; only data-store faults travel through `AppResult`'s error side.
#[derive(Debug)]
pub enum LookupOutcome<T> {
    Found(T),
    NotFound(NotFoundStage),
    Inactive,
}

/// Barcode lookup without store scope: barcode -> id, then id -> description.
pub async fn lookup_by_barcode(
    pool: &DbPool,
    ean: &str,
) -> AppResult<LookupOutcome<ProdutoDescricao>> {
    let id_produto: Option<i32> =
        sqlx::query_scalar("SELECT id_produto FROM produtoautomacao WHERE codigobarras = $1")
            .bind(ean)
            .fetch_optional(pool)
            .await?;

    let Some(id_produto) = id_produto else {
        return Ok(LookupOutcome::NotFound(NotFoundStage::Mapping));
    };

    let produto = sqlx::query_as::<_, ProdutoDescricao>(
        "SELECT id AS id_produto, descricaocompleta AS descricao FROM produto WHERE id = $1",
    )
    .bind(id_produto)
    .fetch_optional(pool)
    .await?;

    Ok(match produto {
        Some(p) => LookupOutcome::Found(p),
        None => LookupOutcome::NotFound(NotFoundStage::Product),
    })
}

/// Every product that has any barcode mapping, with its description. Store
/// activity is not consulted on this path.
pub async fn list_all(pool: &DbPool) -> AppResult<Vec<ProdutoDescricao>> {
    let itens = sqlx::query_as::<_, ProdutoDescricao>(
        r#"
        SELECT DISTINCT a.id_produto, p.descricaocompleta AS descricao
        FROM produtoautomacao a
        JOIN produto p ON p.id = a.id_produto
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(itens)
}

/// Store-scoped barcode lookup: mapping, then activity check, then detail.
/// The three queries are dependent and run sequentially. The detail fetch is a
/// LEFT JOIN, so price and stock stay individually nullable even though the
/// activity check already passed.
pub async fn lookup_by_barcode_for_store(
    pool: &DbPool,
    id_loja: i32,
    ean: &str,
) -> AppResult<LookupOutcome<ProdutoLoja>> {
    let id_produto: Option<i32> =
        sqlx::query_scalar("SELECT id_produto FROM produtoautomacao WHERE codigobarras = $1")
            .bind(ean)
            .fetch_optional(pool)
            .await?;

    let Some(id_produto) = id_produto else {
        return Ok(LookupOutcome::NotFound(NotFoundStage::Mapping));
    };

    let ativo: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM produtocomplemento
            WHERE id_produto = $1 AND id_loja = $2 AND situacao = 1
        )
        "#,
    )
    .bind(id_produto)
    .bind(id_loja)
    .fetch_one(pool)
    .await?;

    if !ativo {
        return Ok(LookupOutcome::Inactive);
    }

    let produto = sqlx::query_as::<_, ProdutoLoja>(
        r#"
        SELECT p.id AS id_produto,
               p.descricaocompleta AS descricao,
               c.precovenda,
               c.estoque,
               a.codigobarras AS ean
        FROM produtoautomacao a
        JOIN produto p ON p.id = a.id_produto
        LEFT JOIN produtocomplemento c
               ON c.id_produto = p.id AND c.id_loja = $2 AND c.situacao = 1
        WHERE a.codigobarras = $1
        "#,
    )
    .bind(ean)
    .bind(id_loja)
    .fetch_optional(pool)
    .await?;

    Ok(match produto {
        Some(p) => LookupOutcome::Found(p),
        None => LookupOutcome::NotFound(NotFoundStage::Product),
    })
}

/// Every product with an active complement for the store. Products without one
/// are excluded via the EXISTS filter rather than returned with nulls.
pub async fn list_active_for_store(pool: &DbPool, id_loja: i32) -> AppResult<Vec<ProdutoLoja>> {
    let itens = sqlx::query_as::<_, ProdutoLoja>(
        r#"
        SELECT p.id AS id_produto,
               p.descricaocompleta AS descricao,
               c.precovenda,
               c.estoque,
               a.codigobarras AS ean
        FROM produto p
        JOIN produtoautomacao a ON a.id_produto = p.id
        LEFT JOIN produtocomplemento c
               ON c.id_produto = p.id AND c.id_loja = $1 AND c.situacao = 1
        WHERE EXISTS (
            SELECT 1 FROM produtocomplemento x
            WHERE x.id_produto = p.id AND x.id_loja = $1 AND x.situacao = 1
        )
        "#,
    )
    .bind(id_loja)
    .fetch_all(pool)
    .await?;

    Ok(itens)
}

/// Products whose last-modified date equals `hoje` and which are active for
/// the store. The date comes in as a parameter so callers fix the timezone
/// (handlers use the service's local date).
pub async fn list_changed_on(
    pool: &DbPool,
    id_loja: i32,
    hoje: NaiveDate,
) -> AppResult<Vec<ProdutoLoja>> {
    let itens = sqlx::query_as::<_, ProdutoLoja>(
        r#"
        SELECT p.id AS id_produto,
               p.descricaocompleta AS descricao,
               c.precovenda,
               c.estoque,
               a.codigobarras AS ean
        FROM produto p
        JOIN produtoautomacao a ON a.id_produto = p.id
        LEFT JOIN produtocomplemento c
               ON c.id_produto = p.id AND c.id_loja = $1 AND c.situacao = 1
        WHERE p.ultimaalteracao::date = $2
          AND EXISTS (
            SELECT 1 FROM produtocomplemento x
            WHERE x.id_produto = p.id AND x.id_loja = $1 AND x.situacao = 1
          )
        "#,
    )
    .bind(id_loja)
    .bind(hoje)
    .fetch_all(pool)
    .await?;

    Ok(itens)
}
