//! Read-only curation listings of the Untappd data, for administrators.

use actix_web::{web, HttpResponse};

use super::super::auth::CurrentUser;
use super::super::catalog::SearchTerm;
use super::super::db::{self, ListUntappd, ListUntappdMappings, ListUserCheckIns, Pool};
use super::super::error::Result;
use super::super::models::{CheckInEntry, UntappdEntry, UntappdMappingEntry};
use super::super::pagination::Page;
use super::{ApiResponse, ResponseObject};

#[derive(Deserialize)]
pub struct ListParams {
    /// Case-insensitive search on the beer name.
    q: Option<String>,
    page: Option<String>,
}

impl ListParams {
    fn search(&self) -> Option<SearchTerm> {
        self.q.as_deref().and_then(SearchTerm::parse)
    }
}

impl ResponseObject for Page<UntappdEntry> {
    const NAME: &'static str = "untappd";
}

impl ResponseObject for Page<UntappdMappingEntry> {
    const NAME: &'static str = "untappd_mappings";
}

impl ResponseObject for Page<CheckInEntry> {
    const NAME: &'static str = "checkins";
}

pub async fn untappd(
    pool: web::Data<Pool>,
    user: CurrentUser,
    params: web::Query<ListParams>,
) -> Result<HttpResponse> {
    user.admin()?;

    let params = params.into_inner();
    let page = db::execute(
        &pool,
        ListUntappd {
            search: params.search(),
            page: params.page,
        },
    )
    .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::new(page)))
}

pub async fn untappd_mappings(
    pool: web::Data<Pool>,
    user: CurrentUser,
    params: web::Query<ListParams>,
) -> Result<HttpResponse> {
    user.admin()?;

    let params = params.into_inner();
    let page = db::execute(
        &pool,
        ListUntappdMappings {
            search: params.search(),
            page: params.page,
        },
    )
    .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::new(page)))
}

pub async fn checkins(
    pool: web::Data<Pool>,
    user: CurrentUser,
    params: web::Query<ListParams>,
) -> Result<HttpResponse> {
    user.admin()?;

    let params = params.into_inner();
    let page = db::execute(
        &pool,
        ListUserCheckIns {
            search: params.search(),
            page: params.page,
        },
    )
    .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::new(page)))
}
