mod api;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::env;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Get configuration from environment
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "5000".to_string());
    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
    let database_name =
        env::var("MONGODB_DATABASE").unwrap_or_else(|_| "class_booking".to_string());

    log::info!("🚀 Starting Booking Service...");

    // Initialize MongoDB connection
    let db = database::MongoDB::new(&database_url, &database_name)
        .await
        .expect("Failed to connect to MongoDB");

    log::info!("✅ MongoDB connected successfully");

    // Payment gateway client
    let stripe = services::stripe_service::StripeClient::from_env();

    let db_data = web::Data::new(db.clone());
    let stripe_data = web::Data::new(stripe);

    log::info!("🌐 Server starting on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(db_data.clone())
            .app_data(stripe_data.clone())
            // Registered first so it runs innermost: CORS and logging see
            // every request, auth gates before any handler.
            .wrap(middleware::AuthMiddleware)
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .route("/", web::get().to(api::health::root))
            .route("/health", web::get().to(api::health::health_check))
            // Auth
            .route("/jwt", web::post().to(api::auth::issue_token))
            // Users
            .service(
                web::resource("/users")
                    .route(web::get().to(api::users::list_users))
                    .route(web::post().to(api::users::create_user)),
            )
            .route("/checkuser", web::get().to(api::users::check_user))
            // Instructors
            .route(
                "/instructors",
                web::get().to(api::instructors::list_instructors),
            )
            // Classes
            .service(
                web::resource("/classes")
                    .route(web::get().to(api::classes::list_classes))
                    .route(web::post().to(api::classes::create_class)),
            )
            .route("/classes/{id}", web::get().to(api::classes::class_detail))
            .route("/myclasses", web::get().to(api::classes::my_classes))
            // Carts
            .service(
                web::resource("/carts")
                    .route(web::get().to(api::carts::get_cart))
                    .route(web::post().to(api::carts::add_to_cart)),
            )
            .route("/carts/{id}", web::delete().to(api::carts::remove_cart_item))
            // Admin: class review
            .route("/manageclasses", web::get().to(api::manage::manage_classes))
            .route(
                "/manageclass/approve/{id}",
                web::patch().to(api::manage::approve_class),
            )
            .route(
                "/manageclass/deny/{id}",
                web::patch().to(api::manage::deny_class),
            )
            .service(
                web::resource("/feedback/{id}")
                    .route(web::get().to(api::manage::get_feedback))
                    .route(web::patch().to(api::manage::set_feedback)),
            )
            // Admin: user roles
            .route("/manageusers", web::get().to(api::manage::manage_users))
            .route(
                "/manageusers/instructor/{id}",
                web::patch().to(api::manage::make_instructor),
            )
            .route(
                "/manageusers/admin/{id}",
                web::patch().to(api::manage::make_admin),
            )
            // Payments
            .route(
                "/create-payment-intent",
                web::post().to(api::payments::create_payment_intent),
            )
            .route("/payments", web::post().to(api::payments::record_payment))
            .route(
                "/paymenthistory",
                web::get().to(api::payments::payment_history),
            )
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await?;

    log::info!("👋 Server stopped, closing MongoDB connection");
    db.shutdown().await;

    Ok(())
}
