use actix_web::{web, HttpResponse};
use serde::ser::{Serialize, SerializeStruct, Serializer};

mod admin;
mod beers;
mod stores;

pub const RELEASE_PATH: &str = "/beers/release";
pub const ORDERING_RANGE_PATH: &str = "/beers/ordering-range";
pub const SEARCH_PATH: &str = "/beers/ordering-range/search";

#[derive(Debug, Serialize)]
pub enum ResponseStatus {
    Success,
    Error,
    Fail,
}

/// A payload that can be returned inside an [`ApiResponse`].
///
/// `NAME` is the field of `data` that holds the payload.
pub trait ResponseObject: Serialize {
    const NAME: &'static str;
}

impl ResponseObject for () {
    const NAME: &'static str = "none";
}

/// Envelope type for API responses
///
/// When serializing as JSON, this will result in a JSON object with the inner
/// object stored under the payload's [`ResponseObject::NAME`].
pub struct ApiResponseEnvelope<T: ResponseObject>(T);

#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: ResponseObject,
{
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ApiResponseEnvelope<T>>,
    pub messages: Option<Vec<String>>,
}

impl<T> Serialize for ApiResponseEnvelope<T>
where
    T: ResponseObject,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("ApiResponseEnvelope", 1)?;
        state.serialize_field(T::NAME, &self.0)?;
        state.end()
    }
}

impl<T> ApiResponse<T>
where
    T: ResponseObject,
{
    pub fn new(data: T) -> ApiResponse<T> {
        ApiResponse {
            status: ResponseStatus::Success,
            data: Some(ApiResponseEnvelope(data)),
            messages: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn failure(status: ResponseStatus, messages: Vec<String>) -> ApiResponse<()> {
        ApiResponse {
            status,
            data: None,
            messages: Some(messages),
        }
    }
}

#[derive(Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
}

impl ResponseObject for ServiceInfo {
    const NAME: &'static str = "service";
}

async fn index() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::new(ServiceInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    }))
}

/// Register every route of the service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route(RELEASE_PATH, web::get().to(beers::beer_release))
        .route(ORDERING_RANGE_PATH, web::get().to(beers::ordering_range_beers))
        .route(SEARCH_PATH, web::post().to(beers::ordering_range_search))
        .route("/stores/{store_id}/release", web::get().to(stores::release_page))
        .route(
            "/stores/{store_id}/ordering-range",
            web::get().to(stores::ordering_range_page),
        )
        .route("/api/beers", web::get().to(beers::beer_list))
        .route("/api/beers/{beer_id}", web::get().to(beers::beer_detail))
        .route("/admin/untappd", web::get().to(admin::untappd))
        .route("/admin/untappd-mappings", web::get().to(admin::untappd_mappings))
        .route("/admin/checkins", web::get().to(admin::checkins));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::db::{testing, Pool};
    use actix_web::http::header::{AUTHORIZATION, CONTENT_TYPE, LOCATION};
    use actix_web::http::StatusCode;
    use actix_web::test::{self, TestRequest};
    use actix_web::App;
    use diesel::pg::PgConnection;
    use diesel::r2d2::ConnectionManager;
    use serde_json::Value;

    /// A pool that never connects; only routes that answer before touching
    /// the database can be exercised with it.
    fn unreachable_pool() -> Pool {
        let manager =
            ConnectionManager::<PgConnection>::new("postgres://127.0.0.1:1/beer_catalog");
        Pool::builder().min_idle(Some(0)).build_unchecked(manager)
    }

    fn config() -> Config {
        Config {
            listen_addr: "127.0.0.1:1234".parse().unwrap(),
            database_url: "postgres://127.0.0.1:1/beer_catalog".to_owned(),
            pool_size: 1,
            search_includes_wishlist: false,
        }
    }

    /// Session of the fixture user Kari, who checked in Konrads Stout at 4.0
    /// and has Sour Cherry on her wishlist.
    const KARI: &str = "Bearer aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

    fn search(body: &'static str) -> TestRequest {
        TestRequest::post()
            .uri(SEARCH_PATH)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .set_payload(body)
    }

    #[test]
    fn envelope_names_the_payload() {
        let json = serde_json::to_value(ApiResponse::new(ServiceInfo {
            name: "beer-catalog",
            version: "0.1.0",
        }))
        .unwrap();

        assert_eq!(json["status"], "Success");
        assert_eq!(json["data"]["service"]["name"], "beer-catalog");
        assert_eq!(json["messages"], Value::Null);
    }

    #[test]
    fn failures_carry_no_data() {
        let json = serde_json::to_value(ApiResponse::failure(
            ResponseStatus::Fail,
            vec!["Beer not found".to_owned()],
        ))
        .unwrap();

        assert_eq!(json["status"], "Fail");
        assert!(json.get("data").is_none());
        assert_eq!(json["messages"][0], "Beer not found");
    }

    #[actix_rt::test]
    async fn index_describes_the_service() {
        let mut app = test::init_service(App::new().configure(configure)).await;

        let resp = test::call_service(&mut app, TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
        assert_eq!(body["data"]["service"]["name"], env!("CARGO_PKG_NAME"));
    }

    #[actix_rt::test]
    async fn blank_search_redirects_to_the_listing() {
        let mut app = test::init_service(
            App::new()
                .data(unreachable_pool())
                .data(config())
                .configure(configure),
        )
        .await;

        for body in &["query=", "query=+++"] {
            let resp = test::call_service(&mut app, search(*body).to_request()).await;
            assert_eq!(resp.status(), StatusCode::FOUND);
            assert_eq!(
                resp.headers().get(LOCATION).unwrap().to_str().unwrap(),
                ORDERING_RANGE_PATH
            );
        }
    }

    #[actix_rt::test]
    async fn search_without_query_field_is_a_bad_request() {
        let mut app = test::init_service(
            App::new()
                .data(unreachable_pool())
                .data(config())
                .configure(configure),
        )
        .await;

        let resp = test::call_service(&mut app, search("q=ipa").to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_rt::test]
    async fn non_numeric_beer_id_is_not_found() {
        let mut app = test::init_service(
            App::new()
                .data(unreachable_pool())
                .configure(configure),
        )
        .await;

        let req = TestRequest::get().uri("/api/beers/konrads").to_request();
        let resp = test::call_service(&mut app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_rt::test]
    async fn curation_listings_require_a_session() {
        let mut app = test::init_service(
            App::new()
                .data(unreachable_pool())
                .configure(configure),
        )
        .await;

        for uri in &["/admin/untappd", "/admin/untappd-mappings", "/admin/checkins?q=ipa"] {
            let req = TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&mut app, req).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

            let body: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
            assert_eq!(body["status"], "Fail");
            assert_eq!(body["messages"][0], "Authentication required");
        }
    }

    #[actix_rt::test]
    async fn listing_and_search_are_personalised_for_the_signed_in_user() {
        let pool = match testing::catalog_pool("test_http_personal") {
            Some(pool) => pool,
            None => return,
        };
        let mut app =
            test::init_service(App::new().data(pool).data(config()).configure(configure)).await;

        let req = TestRequest::get()
            .uri(ORDERING_RANGE_PATH)
            .header(AUTHORIZATION, KARI)
            .to_request();
        let resp = test::call_service(&mut app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
        let beers = &body["data"]["listing"]["beers"]["items"];
        assert_eq!(beers[0]["beer_id"], 1);
        assert_eq!(beers[0]["user_rating"], 4.0);
        assert_eq!(beers[0]["on_wishlist"], false);
        assert_eq!(beers[4]["beer_id"], 4);
        assert_eq!(beers[4]["on_wishlist"], true);
        assert!(beers[4].get("user_rating").is_none());

        let req = search("query=konrads").header(AUTHORIZATION, KARI).to_request();
        let resp = test::call_service(&mut app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
        let beers = body["data"]["search"]["beers"].as_array().unwrap();
        assert_eq!(beers.len(), 1);
        assert_eq!(beers[0]["user_rating"], 4.0);
        assert!(beers[0].get("on_wishlist").is_none());
    }

    #[actix_rt::test]
    async fn anonymous_listing_and_search_have_no_personal_fields() {
        let pool = match testing::catalog_pool("test_http_anonymous") {
            Some(pool) => pool,
            None => return,
        };
        let mut app =
            test::init_service(App::new().data(pool).data(config()).configure(configure)).await;

        let req = TestRequest::get().uri(ORDERING_RANGE_PATH).to_request();
        let resp = test::call_service(&mut app, req).await;
        let body: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
        let listed = body["data"]["listing"]["beers"]["items"].as_array().unwrap();
        assert_eq!(listed.len(), 5);

        let resp = test::call_service(&mut app, search("query=lervig").to_request()).await;
        let body: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
        let found = body["data"]["search"]["beers"].as_array().unwrap();
        assert_eq!(found.len(), 2);

        for beer in listed.iter().chain(found.iter()) {
            assert!(beer.get("user_rating").is_none());
            assert!(beer.get("on_wishlist").is_none());
        }
    }

    #[actix_rt::test]
    async fn search_wishlist_follows_the_setting() {
        let pool = match testing::catalog_pool("test_http_search_wishlist") {
            Some(pool) => pool,
            None => return,
        };
        let config = Config {
            search_includes_wishlist: true,
            ..config()
        };
        let mut app =
            test::init_service(App::new().data(pool).data(config).configure(configure)).await;

        let req = search("query=sour").header(AUTHORIZATION, KARI).to_request();
        let resp = test::call_service(&mut app, req).await;
        let body: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
        let beers = body["data"]["search"]["beers"].as_array().unwrap();

        assert_eq!(beers[0]["beer_id"], 4);
        assert_eq!(beers[0]["on_wishlist"], true);
        assert!(beers[0].get("user_rating").is_none());
    }
}
