use actix_web::web;
use chrono::naive::NaiveDate;
use chrono::{DateTime, Local, TimeZone, Utc};
use diesel::dsl::{IntoBoxed, LeftJoin};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::r2d2;

use super::catalog::{Personal, SearchTerm};
use super::error::{Error, Result};
use super::models;
use super::pagination::{Page, Paginator, ADMIN_PAGE_SIZE, PAGE_SIZE};
use super::schema::{
    beer, login_session, person, store, untappd, untappd_mapping, user_checkin, user_wishlist,
};

pub type Pool = r2d2::Pool<r2d2::ConnectionManager<PgConnection>>;

/// Build the connection pool. Fails if no connection can be established.
pub fn connect(database_url: &str, max_size: u32) -> Result<Pool> {
    let manager = r2d2::ConnectionManager::<PgConnection>::new(database_url);
    Ok(Pool::builder().max_size(max_size).build(manager)?)
}

pub trait Query {
    type Item: Send;

    fn execute(&self, conn: &PgConnection) -> Result<Self::Item>;
}

/// Run `query` on the blocking thread pool with a pooled connection.
pub async fn execute<T>(pool: &Pool, query: T) -> Result<T::Item>
where
    T: Query + Send + 'static,
    T::Item: 'static,
{
    let pool = pool.clone();

    Ok(web::block(move || {
        let conn = pool.get()?;
        query.execute(&conn)
    })
    .await?)
}

/// Beers joined with their aggregate rating.
type RatedBeerQuery = IntoBoxed<'static, LeftJoin<beer::table, untappd::table>, Pg>;

/// Everything in the ordering range that can currently be ordered.
fn ordering_range() -> RatedBeerQuery {
    beer::table
        .left_join(untappd::table)
        .filter(beer::selection.eq(models::ORDERING_RANGE))
        .filter(beer::buyable.eq(true))
        .filter(beer::status.eq(models::ACTIVE))
        .into_boxed()
}

/*************************************/
/** Upcoming releases               **/
/*************************************/

#[derive(Clone)]
pub struct GetReleases {
    /// Beers launching on or after this date are upcoming.
    pub today: NaiveDate,
    pub page: Option<String>,
}

impl GetReleases {
    /// Releases as of today in the local time zone (`TZ`), which is the
    /// time zone launch dates are given in.
    pub fn now(page: Option<String>) -> GetReleases {
        GetReleases {
            today: release_date(Local::now()),
            page,
        }
    }
}

/// The calendar date of `now` where it was observed.
pub fn release_date<Tz: TimeZone>(now: DateTime<Tz>) -> NaiveDate {
    now.naive_local().date()
}

impl Query for GetReleases {
    type Item = Page<models::RatedBeer>;

    fn execute(&self, conn: &PgConnection) -> Result<Self::Item> {
        let total = beer::table
            .filter(beer::launch_date.ge(self.today))
            .count()
            .get_result::<i64>(conn)?;

        let window = Paginator::new(total, PAGE_SIZE).page(self.page.as_deref());
        debug!("Releases from {}: page {} of {}", self.today, window.number, window.num_pages);

        let rows = beer::table
            .left_join(untappd::table)
            .filter(beer::launch_date.ge(self.today))
            .select((beer::all_columns, untappd::rating.nullable()))
            .order((
                beer::launch_date.asc(),
                beer::selection.asc(),
                beer::name.asc(),
                beer::beer_id.asc(),
            ))
            .limit(window.limit())
            .offset(window.offset())
            .load::<models::RatedBeer>(conn)?;

        Ok(window.with_items(rows))
    }
}

/*************************************/
/** Ordering range                  **/
/*************************************/

#[derive(Clone)]
pub struct GetOrderingRange {
    pub page: Option<String>,
}

impl Query for GetOrderingRange {
    type Item = Page<models::RatedBeer>;

    fn execute(&self, conn: &PgConnection) -> Result<Self::Item> {
        let total = ordering_range().count().get_result::<i64>(conn)?;

        let window = Paginator::new(total, PAGE_SIZE).page(self.page.as_deref());
        debug!("Ordering range: page {} of {}", window.number, window.num_pages);

        // Unrated beers go last, not treated as the lowest rating.
        let rows = ordering_range()
            .select((beer::all_columns, untappd::rating.nullable()))
            .order((
                untappd::rating.desc().nulls_last(),
                beer::name.asc(),
                beer::beer_id.asc(),
            ))
            .limit(window.limit())
            .offset(window.offset())
            .load::<models::RatedBeer>(conn)?;

        Ok(window.with_items(rows))
    }
}

/// Ordering range beers whose name or brewery contains the search term.
#[derive(Clone)]
pub struct SearchOrderingRange {
    pub term: SearchTerm,
}

impl Query for SearchOrderingRange {
    type Item = Vec<models::RatedBeer>;

    fn execute(&self, conn: &PgConnection) -> Result<Self::Item> {
        let pattern = self.term.contains_pattern();
        debug!("Searching ordering range for {:?}", self.term.as_str());

        Ok(ordering_range()
            .filter(
                beer::name
                    .ilike(pattern.clone())
                    .or(beer::brewery.ilike(pattern)),
            )
            .select((beer::all_columns, untappd::rating.nullable()))
            .order((
                untappd::rating.desc().nulls_last(),
                beer::name.asc(),
                beer::beer_id.asc(),
            ))
            .load::<models::RatedBeer>(conn)?)
    }
}

/*************************************/
/** Personal annotations            **/
/*************************************/

/// A user's check-ins and (optionally) wishlist entries for a set of beers.
#[derive(Clone)]
pub struct GetPersonal {
    pub person_id: i32,
    pub beer_ids: Vec<i64>,
    pub wishlist: bool,
}

impl Query for GetPersonal {
    type Item = Personal;

    fn execute(&self, conn: &PgConnection) -> Result<Self::Item> {
        if self.beer_ids.is_empty() {
            return Ok(Personal::new(Vec::new(), self.wishlist.then(Vec::new)));
        }

        // Newest first, so equal timestamps resolve to the latest check-in id.
        let checkins = user_checkin::table
            .filter(user_checkin::person_id.eq(self.person_id))
            .filter(user_checkin::beer_id.eq_any(&self.beer_ids))
            .select((
                user_checkin::beer_id,
                user_checkin::rating,
                user_checkin::checked_in_at,
            ))
            .order((
                user_checkin::checked_in_at.desc(),
                user_checkin::checkin_id.desc(),
            ))
            .load::<models::CheckInRating>(conn)?;

        let wishlist = if self.wishlist {
            Some(
                user_wishlist::table
                    .filter(user_wishlist::person_id.eq(self.person_id))
                    .filter(user_wishlist::beer_id.eq_any(&self.beer_ids))
                    .select(user_wishlist::beer_id)
                    .load::<i64>(conn)?,
            )
        } else {
            None
        };

        Ok(Personal::new(checkins, wishlist))
    }
}

/*************************************/
/** Beer API                        **/
/*************************************/

#[derive(Clone)]
pub struct GetBeers;

impl Query for GetBeers {
    type Item = Vec<models::Beer>;

    fn execute(&self, conn: &PgConnection) -> Result<Self::Item> {
        Ok(beer::table
            .order(beer::beer_id.asc())
            .load::<models::Beer>(conn)?)
    }
}

#[derive(Clone)]
pub struct GetBeer {
    pub beer_id: i64,
}

impl Query for GetBeer {
    type Item = models::Beer;

    fn execute(&self, conn: &PgConnection) -> Result<Self::Item> {
        beer::table
            .find(self.beer_id)
            .first::<models::Beer>(conn)
            .optional()?
            .ok_or(Error::NotFound("Beer"))
    }
}

/*************************************/
/** Stores                          **/
/*************************************/

#[derive(Clone)]
pub struct GetStore {
    pub store_id: String,
}

impl Query for GetStore {
    type Item = models::Store;

    fn execute(&self, conn: &PgConnection) -> Result<Self::Item> {
        store::table
            .find(&self.store_id)
            .first::<models::Store>(conn)
            .optional()?
            .ok_or(Error::NotFound("Store"))
    }
}

/********************************/
/** Get Logged-in Person       **/
/********************************/

/// Look up the person owning an unexpired session.
#[derive(Clone)]
pub struct GetLoggedInPerson {
    pub session_id: String,
    pub now: DateTime<Utc>,
}

impl GetLoggedInPerson {
    pub fn from_session(session_id: String) -> GetLoggedInPerson {
        GetLoggedInPerson {
            session_id,
            now: Utc::now(),
        }
    }
}

impl Query for GetLoggedInPerson {
    type Item = Option<models::Person>;

    fn execute(&self, conn: &PgConnection) -> Result<Self::Item> {
        Ok(person::table
            .inner_join(login_session::table)
            .filter(login_session::id.eq(&self.session_id))
            .filter(login_session::expires_at.gt(self.now))
            .select(person::all_columns)
            .first::<models::Person>(conn)
            .optional()?)
    }
}

/*************************************/
/** Curation listings               **/
/*************************************/

#[derive(Clone)]
pub struct ListUntappd {
    pub search: Option<SearchTerm>,
    pub page: Option<String>,
}

impl Query for ListUntappd {
    type Item = Page<models::UntappdEntry>;

    fn execute(&self, conn: &PgConnection) -> Result<Self::Item> {
        let query = || {
            let mut query = untappd::table.inner_join(beer::table).into_boxed();
            if let Some(term) = &self.search {
                query = query.filter(beer::name.ilike(term.contains_pattern()));
            }
            query
        };

        let total = query().count().get_result::<i64>(conn)?;
        let window = Paginator::new(total, ADMIN_PAGE_SIZE).page(self.page.as_deref());

        let rows = query()
            .select((
                untappd::beer_id,
                beer::name,
                untappd::brewery,
                untappd::style,
                untappd::rating,
                untappd::num_ratings,
                untappd::last_updated,
            ))
            .order((beer::name.asc(), untappd::beer_id.asc()))
            .limit(window.limit())
            .offset(window.offset())
            .load::<models::UntappdEntry>(conn)?;

        Ok(window.with_items(rows))
    }
}

#[derive(Clone)]
pub struct ListUntappdMappings {
    pub search: Option<SearchTerm>,
    pub page: Option<String>,
}

impl Query for ListUntappdMappings {
    type Item = Page<models::UntappdMappingEntry>;

    fn execute(&self, conn: &PgConnection) -> Result<Self::Item> {
        let query = || {
            let mut query = untappd_mapping::table.inner_join(beer::table).into_boxed();
            if let Some(term) = &self.search {
                query = query.filter(beer::name.ilike(term.contains_pattern()));
            }
            query
        };

        let total = query().count().get_result::<i64>(conn)?;
        let window = Paginator::new(total, ADMIN_PAGE_SIZE).page(self.page.as_deref());

        let rows = query()
            .select((
                untappd_mapping::beer_id,
                beer::name,
                untappd_mapping::untappd_id,
                untappd_mapping::auto_match,
                untappd_mapping::verified,
                untappd_mapping::last_updated,
            ))
            .order((beer::name.asc(), untappd_mapping::beer_id.asc()))
            .limit(window.limit())
            .offset(window.offset())
            .load::<models::UntappdMappingEntry>(conn)?;

        Ok(window.with_items(rows))
    }
}

#[derive(Clone)]
pub struct ListUserCheckIns {
    pub search: Option<SearchTerm>,
    pub page: Option<String>,
}

impl Query for ListUserCheckIns {
    type Item = Page<models::CheckInEntry>;

    fn execute(&self, conn: &PgConnection) -> Result<Self::Item> {
        let query = || {
            let mut query = user_checkin::table.inner_join(beer::table).into_boxed();
            if let Some(term) = &self.search {
                query = query.filter(beer::name.ilike(term.contains_pattern()));
            }
            query
        };

        let total = query().count().get_result::<i64>(conn)?;
        let window = Paginator::new(total, ADMIN_PAGE_SIZE).page(self.page.as_deref());

        let rows = query()
            .select((
                user_checkin::checkin_id,
                user_checkin::person_id,
                user_checkin::beer_id,
                beer::name,
                user_checkin::rating,
                user_checkin::checked_in_at,
            ))
            .order((beer::name.asc(), user_checkin::checkin_id.asc()))
            .limit(window.limit())
            .offset(window.offset())
            .load::<models::CheckInEntry>(conn)?;

        Ok(window.with_items(rows))
    }
}
