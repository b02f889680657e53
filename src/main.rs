#![allow(proc_macro_derive_resolution_fallback)] // See: https://github.com/diesel-rs/diesel/issues/1785

extern crate actix_web;
extern crate futures;
extern crate serde;
extern crate serde_json;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate diesel;
extern crate chrono;
extern crate dotenv;
extern crate env_logger;
#[macro_use]
extern crate log;

mod api;
mod auth;
mod catalog;
mod config;
mod db;
mod error;
mod models;
mod pagination;
mod schema;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer};
use std::io;

use self::config::Config;

#[actix_rt::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    // Create a connection pool to the database
    let pool = db::connect(&config.database_url, config.pool_size)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    let listen_addr = config.listen_addr;
    if config.search_includes_wishlist {
        info!("Search results include wishlist annotations");
    }

    let server = HttpServer::new(move || {
        App::new()
            .data(pool.clone())
            .data(config.clone())
            .wrap(Logger::default())
            .wrap(Cors::new().finish())
            .configure(api::configure)
    })
    .bind(&listen_addr)?;

    info!("Listening on {}", listen_addr);

    server.run().await
}
