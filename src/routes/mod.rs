use axum::{Router, routing::get};

use crate::db::DbPool;

pub mod doc;
pub mod health;
pub mod produtos;

// Build the API router without binding state; it will be provided at the top level.
// Paths stay at the root, matching what existing callers request.
pub fn create_api_router() -> Router<DbPool> {
    Router::new()
        .route("/produto/{ean}", get(produtos::consultar_produto))
        .route(
            "/produtos/{id_loja}/{ean}",
            get(produtos::consultar_produto_loja),
        )
        .route(
            "/produtosalterados/{id_loja}",
            get(produtos::produtos_alterados),
        )
}
