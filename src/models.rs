use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Plain description lookup, no store scope.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct ProdutoDescricao {
    pub id_produto: i32,
    pub descricao: Option<String>,
}

/// Store-scoped view: description plus that store's price, stock and barcode.
/// Price and stock come off a LEFT JOIN and stay null when the complement row
/// does not carry them; they are never defaulted to zero.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct ProdutoLoja {
    pub id_produto: i32,
    pub descricao: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub precovenda: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub estoque: Option<Decimal>,
    pub ean: String,
}
