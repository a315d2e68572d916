use axum::{routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod access;
mod api;
mod auth;
mod config;
mod database;
mod error;
mod handlers;
mod middleware;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = crate::config::config();
    tracing::info!("Starting RecipeShare API in {:?} mode", config.environment);

    if config.database.run_migrations {
        if let Err(e) = crate::database::manager::DatabaseManager::migrate().await {
            tracing::error!("migration failed: {}", e);
            std::process::exit(1);
        }
    }

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("RECIPESHARE_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 RecipeShare API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        // Protected API behind JWT middleware
        .merge(protected_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn public_routes() -> Router {
    use axum::routing::post;
    use handlers::{auth, cookbooks, recipes};

    Router::new()
        // Token acquisition and registration
        .route("/api/auth/login", post(auth::login))
        .route("/api/authors", post(auth::register))
        // Public catalog (private entries filtered out)
        .route("/api/recipes", get(recipes::list_public))
        .route("/api/cookbooks", get(cookbooks::list_public))
}

fn protected_routes() -> Router {
    use axum::routing::{patch, post};
    use handlers::{admin, authors, cookbooks, favorites, recipes};

    Router::new()
        // Profile management
        .route("/api/authors/me", get(authors::my_profile).put(authors::update_profile))
        .route("/api/authors/me/password", patch(authors::update_password))
        // Recipes
        .route("/api/recipes/mine", get(recipes::list_mine))
        .route("/api/recipes", post(recipes::create))
        .route(
            "/api/recipes/:id",
            get(recipes::get_by_id).put(recipes::update).delete(recipes::delete),
        )
        // Cookbooks
        .route("/api/cookbooks/mine", get(cookbooks::list_mine))
        .route("/api/cookbooks", post(cookbooks::create))
        .route(
            "/api/cookbooks/:id",
            get(cookbooks::get_by_id)
                .put(cookbooks::update)
                .delete(cookbooks::delete),
        )
        .route(
            "/api/cookbooks/:id/recipes/:recipe_id",
            post(cookbooks::add_recipe).delete(cookbooks::remove_recipe),
        )
        // Favorites
        .route("/api/favorites", get(favorites::list_mine))
        .route(
            "/api/favorites/:recipe_id",
            post(favorites::favorite).delete(favorites::unfavorite),
        )
        // Admin surface (role re-checked inside each handler)
        .route("/api/admin/authors", get(admin::list_authors))
        .route("/api/admin/authors/:id", get(admin::get_author))
        .route("/api/admin/recipes", get(admin::list_recipes))
        .route(
            "/api/admin/recipes/:id",
            get(admin::get_recipe).delete(admin::delete_recipe),
        )
        .route("/api/admin/cookbooks", get(admin::list_cookbooks))
        .route(
            "/api/admin/cookbooks/:id",
            get(admin::get_cookbook).delete(admin::delete_cookbook),
        )
        .layer(axum::middleware::from_fn(
            crate::middleware::auth::jwt_auth_middleware,
        ))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "RecipeShare API",
            "version": version,
            "description": "Recipe sharing blog backend built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "auth": "/api/auth/login (public - token acquisition)",
                "register": "POST /api/authors (public)",
                "recipes": "/api/recipes (public catalog), /api/recipes/:id (protected)",
                "cookbooks": "/api/cookbooks (public catalog), /api/cookbooks/:id (protected)",
                "favorites": "/api/favorites[/:recipe_id] (protected)",
                "profile": "/api/authors/me (protected)",
                "admin": "/api/admin/* (restricted, requires admin role)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::manager::DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
