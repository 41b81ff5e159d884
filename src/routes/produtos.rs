use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use chrono::Local;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    db::DbPool,
    error::{AppError, AppResult},
    models::{ProdutoDescricao, ProdutoLoja},
    services::produto_service::{self, LookupOutcome},
};

/// Body returned when the changed-today listing is empty. A 200, not an error.
#[derive(Debug, Serialize, ToSchema)]
pub struct Mensagem {
    pub mensagem: String,
}

#[utoipa::path(
    get,
    path = "/produto/{ean}",
    params(
        ("ean" = String, Path, description = "Barcode, or the literal \"all\" to list every mapped product")
    ),
    responses(
        (status = 200, description = "Product description, or a list when ean=\"all\"", body = ProdutoDescricao),
        (status = 404, description = "Barcode or product not found", body = crate::error::ErrorDetail),
    ),
    tag = "Produtos"
)]
pub async fn consultar_produto(
    State(pool): State<DbPool>,
    Path(ean): Path<String>,
) -> AppResult<Response> {
    if produto_service::is_wildcard(&ean) {
        let itens = produto_service::list_all(&pool).await?;
        return Ok(Json(itens).into_response());
    }

    match produto_service::lookup_by_barcode(&pool, &ean).await? {
        LookupOutcome::Found(produto) => Ok(Json(produto).into_response()),
        LookupOutcome::NotFound(stage) => Err(AppError::NotFound(stage.detail().to_string())),
        LookupOutcome::Inactive => Err(AppError::Inactive(
            produto_service::MSG_INATIVO.to_string(),
        )),
    }
}

#[utoipa::path(
    get,
    path = "/produtos/{id_loja}/{ean}",
    params(
        ("id_loja" = i32, Path, description = "Store id"),
        ("ean" = String, Path, description = "Barcode, or the literal \"all\" to list the store's active products")
    ),
    responses(
        (status = 200, description = "Store-scoped product view, or a list when ean=\"all\"", body = ProdutoLoja),
        (status = 404, description = "Not found, or inactive for this store", body = crate::error::ErrorDetail),
    ),
    tag = "Produtos"
)]
pub async fn consultar_produto_loja(
    State(pool): State<DbPool>,
    Path((id_loja, ean)): Path<(i32, String)>,
) -> AppResult<Response> {
    if produto_service::is_wildcard(&ean) {
        let itens = produto_service::list_active_for_store(&pool, id_loja).await?;
        return Ok(Json(itens).into_response());
    }

    match produto_service::lookup_by_barcode_for_store(&pool, id_loja, &ean).await? {
        LookupOutcome::Found(produto) => Ok(Json(produto).into_response()),
        LookupOutcome::NotFound(stage) => Err(AppError::NotFound(stage.detail().to_string())),
        LookupOutcome::Inactive => Err(AppError::Inactive(
            produto_service::MSG_INATIVO.to_string(),
        )),
    }
}

#[utoipa::path(
    get,
    path = "/produtosalterados/{id_loja}",
    params(
        ("id_loja" = i32, Path, description = "Store id")
    ),
    responses(
        (status = 200, description = "Products changed today for the store, or a message when none", body = [ProdutoLoja]),
    ),
    tag = "Produtos"
)]
pub async fn produtos_alterados(
    State(pool): State<DbPool>,
    Path(id_loja): Path<i32>,
) -> AppResult<Response> {
    let hoje = Local::now().date_naive();
    let itens = produto_service::list_changed_on(&pool, id_loja, hoje).await?;

    if itens.is_empty() {
        let body = Mensagem {
            mensagem: produto_service::MSG_NENHUM_ALTERADO.to_string(),
        };
        return Ok(Json(body).into_response());
    }

    Ok(Json(itens).into_response())
}
