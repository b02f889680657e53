use actix_web::{web, HttpResponse};

use super::super::db::{self, GetStore, Pool};
use super::super::error::Result;
use super::super::models::Store;
use super::{ApiResponse, ResponseObject, ORDERING_RANGE_PATH, RELEASE_PATH};

/// Context of a store's beer page. `listing` is where the page loads its
/// beers from.
#[derive(Serialize)]
pub struct StorePage {
    pub store: Store,
    pub view: &'static str,
    pub listing: &'static str,
}

impl ResponseObject for StorePage {
    const NAME: &'static str = "store_page";
}

async fn store_page(
    pool: &Pool,
    store_id: String,
    view: &'static str,
    listing: &'static str,
) -> Result<HttpResponse> {
    let store = db::execute(pool, GetStore { store_id }).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::new(StorePage {
        store,
        view,
        listing,
    })))
}

pub async fn release_page(pool: web::Data<Pool>, store_id: web::Path<String>) -> Result<HttpResponse> {
    store_page(&pool, store_id.into_inner(), "release", RELEASE_PATH).await
}

pub async fn ordering_range_page(
    pool: web::Data<Pool>,
    store_id: web::Path<String>,
) -> Result<HttpResponse> {
    store_page(
        &pool,
        store_id.into_inner(),
        "ordering_range",
        ORDERING_RANGE_PATH,
    )
    .await
}
