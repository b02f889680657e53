use actix_web::http::header::LOCATION;
use actix_web::{web, HttpResponse};

use super::super::auth::CurrentUser;
use super::super::catalog::{self, annotate, ListedBeer, Personal, SearchTerm};
use super::super::config::Config;
use super::super::db::{self, GetBeer, GetBeers, GetOrderingRange, GetPersonal, GetReleases, Pool};
use super::super::error::Result;
use super::super::pagination::Page;
use super::{ApiResponse, ResponseObject, ORDERING_RANGE_PATH};

#[derive(Deserialize)]
pub struct PageParams {
    /// 1-based page number. Anything unparseable means the first page.
    page: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchForm {
    query: String,
}

/// One page of a beer listing.
#[derive(Serialize)]
pub struct BeerListing {
    pub beers: Page<ListedBeer>,

    /// Set when the listing is the whole ordering range, not just releases.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub full_selection: bool,
}

impl ResponseObject for BeerListing {
    const NAME: &'static str = "listing";
}

/// Every ordering range beer matching a search. Not paginated.
#[derive(Serialize)]
pub struct SearchResults {
    pub beers: Vec<ListedBeer>,
    pub search: bool,
    pub query: String,
}

impl ResponseObject for SearchResults {
    const NAME: &'static str = "search";
}

/// Load `user`'s annotations for `beer_ids`. Anonymous users have none.
async fn personal(
    pool: &Pool,
    user: &CurrentUser,
    beer_ids: Vec<i64>,
    wishlist: bool,
) -> Result<Option<Personal>> {
    match user.person() {
        None => Ok(None),
        Some(person) => {
            let personal = db::execute(
                pool,
                GetPersonal {
                    person_id: person.id,
                    beer_ids,
                    wishlist,
                },
            )
            .await?;
            Ok(Some(personal))
        }
    }
}

/// Route handler for beers launching today or later, for infinite scroll.
pub async fn beer_release(
    pool: web::Data<Pool>,
    params: web::Query<PageParams>,
) -> Result<HttpResponse> {
    let page = db::execute(&pool, GetReleases::now(params.into_inner().page)).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::new(BeerListing {
        beers: page.map(|rows| annotate(rows, None)),
        full_selection: false,
    })))
}

/// Route handler for the ordering range, best rated first.
///
/// Signed-in users also get their own latest rating and whether the beer is
/// on their wishlist.
pub async fn ordering_range_beers(
    pool: web::Data<Pool>,
    user: CurrentUser,
    params: web::Query<PageParams>,
) -> Result<HttpResponse> {
    let page = db::execute(
        &pool,
        GetOrderingRange {
            page: params.into_inner().page,
        },
    )
    .await?;

    let personal = personal(&pool, &user, catalog::beer_ids(&page.items), true).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::new(BeerListing {
        beers: page.map(|rows| annotate(rows, personal.as_ref())),
        full_selection: true,
    })))
}

/// Route handler for the ordering range search bar.
///
/// Expects the POST field `query`. A blank query redirects to the full
/// listing. Signed-in users get their own rating, and their wishlist only
/// when `SEARCH_INCLUDES_WISHLIST` is set.
pub async fn ordering_range_search(
    pool: web::Data<Pool>,
    config: web::Data<Config>,
    user: CurrentUser,
    form: web::Form<SearchForm>,
) -> Result<HttpResponse> {
    let form = form.into_inner();

    let term = match SearchTerm::parse(&form.query) {
        Some(term) => term,
        None => {
            return Ok(HttpResponse::Found()
                .header(LOCATION, ORDERING_RANGE_PATH)
                .finish())
        }
    };

    let rows = db::execute(&pool, db::SearchOrderingRange { term }).await?;
    let personal = personal(
        &pool,
        &user,
        catalog::beer_ids(&rows),
        config.search_includes_wishlist,
    )
    .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::new(SearchResults {
        beers: annotate(rows, personal.as_ref()),
        search: true,
        query: form.query,
    })))
}

/// Every beer in the catalog, as a bare JSON array.
pub async fn beer_list(pool: web::Data<Pool>) -> Result<HttpResponse> {
    let beers = db::execute(&pool, GetBeers).await?;
    Ok(HttpResponse::Ok().json(beers))
}

pub async fn beer_detail(pool: web::Data<Pool>, beer_id: web::Path<i64>) -> Result<HttpResponse> {
    let beer = db::execute(
        &pool,
        GetBeer {
            beer_id: beer_id.into_inner(),
        },
    )
    .await?;
    Ok(HttpResponse::Ok().json(beer))
}
