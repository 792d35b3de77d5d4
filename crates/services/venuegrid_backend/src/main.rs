// --- File: crates/services/venuegrid_backend/src/main.rs ---
use axum::{routing::get, Router};
use std::error::Error;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use venuegrid_config::load_config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = match load_config() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            // logging is not configured yet
            venuegrid_common::init();
            error!("Failed to load config: {}", e);
            return Err(e.into());
        }
    };
    // dropping the guard stops the file writer
    let _log_guard = venuegrid_common::init_from_config(&config.logging);

    let booking_router = venuegrid_booking::routes(config.clone())?;
    if !config.use_booking {
        info!("Booking is disabled; venue routes answer 503");
    }

    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to the VenueGrid API!" }))
        .merge(booking_router);

    #[allow(unused_mut)] // mutated only with the openapi feature
    let mut app = Router::new().nest("/api", api_router);

    #[cfg(feature = "openapi")]
    {
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;
        use venuegrid_booking::doc::BookingApiDoc;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "VenueGrid API",
                version = "0.1.0",
                description = "Venue schedule grid and booking API",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            components(),
            tags( (name = "VenueGrid", description = "Core service endpoints")),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(BookingApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        let swagger_ui = SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc);
        app = app.merge(swagger_ui);
    }

    let app = app.layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        error!("Failed to bind {}: {}", addr, e);
        e
    })?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
