//! Unified backend server.
//!
//! Mounts every API surface on one actix-web server:
//!
//! - `/api/auth` — registration, login, token verification
//! - `/api/games` — score submission, personal history, leaderboard
//! - `/api/lessons` — lesson CRUD and per-level listing
//! - `/api/progress` — per-lesson practice progress

use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use actix_web::middleware::Logger;
use actix_web::web;
use sgs_auth::Account;
use sgs_core::FieldError;
use sgs_database::Schema;
use sgs_dto::ApiError;
use sgs_games::Best;
use sgs_games::Tally;
use sgs_records::Lesson;
use sgs_records::ProgressRecord;
use sgs_records::ScoreRecord;
use std::sync::Arc;
use tokio_postgres::Client;

async fn health(client: web::Data<Arc<Client>>) -> impl Responder {
    match client
        .execute("SELECT 1", &[])
        .await
        .inspect_err(|e| log::error!("health check failed: {}", e))
    {
        Ok(_) => HttpResponse::Ok().body("ok"),
        Err(_) => HttpResponse::ServiceUnavailable().body("database unavailable"),
    }
}

/// Idempotent DDL: every table and index is `IF NOT EXISTS`, so this
/// runs on every boot. Accounts go first; everything else references
/// them.
pub async fn migrate(client: &Client) -> Result<(), tokio_postgres::Error> {
    let ddl = [
        Account::creates(),
        Account::indices(),
        ScoreRecord::creates(),
        ScoreRecord::indices(),
        Tally::creates(),
        Tally::indices(),
        Best::creates(),
        Best::indices(),
        Lesson::creates(),
        Lesson::indices(),
        ProgressRecord::creates(),
        ProgressRecord::indices(),
    ]
    .into_iter()
    .filter(|sql| !sql.is_empty())
    .collect::<Vec<_>>()
    .join("\n");
    client.batch_execute(&ddl).await
}

/// A body that does not deserialize is a validation failure in the
/// standard envelope, not actix's default plaintext 400.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _| {
        ApiError::Validation(vec![FieldError::new("body", err.to_string())]).into()
    })
}

#[rustfmt::skip]
pub async fn run() -> Result<(), std::io::Error> {
    let client = sgs_database::db().await;
    migrate(&client).await.expect("schema migration");
    let crypto = web::Data::new(sgs_auth::Crypto::from_env());
    let client = web::Data::new(client);
    log::info!("starting unified server");
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .app_data(crypto.clone())
            .app_data(client.clone())
            .app_data(json_config())
            .route("/health", web::get().to(health))
            .service(
                web::scope("/api/auth")
                    .route("/signup", web::post().to(sgs_auth::signup))
                    .route("/signin", web::post().to(sgs_auth::signin))
                    .route("/verify", web::get().to(sgs_auth::verify)),
            )
            .service(
                web::scope("/api/games")
                    .route("/scores", web::post().to(sgs_games::submit))
                    .route("/scores", web::get().to(sgs_games::history))
                    .route("/leaderboard", web::get().to(sgs_games::leaderboard)),
            )
            .service(
                // the literal /level prefix must register before /{id}
                web::scope("/api/lessons")
                    .route("", web::get().to(sgs_lessons::list))
                    .route("", web::post().to(sgs_lessons::create))
                    .route("/level/{level}", web::get().to(sgs_lessons::by_level))
                    .route("/{id}", web::get().to(sgs_lessons::get))
                    .route("/{id}", web::put().to(sgs_lessons::update))
                    .route("/{id}", web::delete().to(sgs_lessons::delete)),
            )
            .service(
                web::scope("/api/progress")
                    .route("", web::get().to(sgs_progress::all))
                    .route("/{lesson}/{level}", web::put().to(sgs_progress::save)),
            )
    })
    .workers(6)
    .bind(std::env::var("BIND_ADDR").expect("BIND_ADDR must be set"))?
    .run()
    .await
}
