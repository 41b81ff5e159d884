use utoipa::OpenApi;
use utoipa::openapi::OpenApi as OpenApiSpec;
use utoipa_scalar::{Scalar, Servable};

use crate::{
    error::ErrorDetail,
    models::{ProdutoDescricao, ProdutoLoja},
    routes::{health, produtos},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        produtos::consultar_produto,
        produtos::consultar_produto_loja,
        produtos::produtos_alterados,
    ),
    components(
        schemas(
            ProdutoDescricao,
            ProdutoLoja,
            produtos::Mensagem,
            ErrorDetail,
            health::HealthData,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Produtos", description = "Barcode lookup and changed-today listing"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
