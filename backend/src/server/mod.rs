//! Server construction and middleware wiring.

mod config;

pub use config::{ServerConfig, ServerSettings};

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use user_registry::Trace;
use user_registry::domain::UserStore;
#[cfg(debug_assertions)]
use user_registry::doc::ApiDoc;
use user_registry::inbound::http::health::{HealthState, live, ready};
use user_registry::inbound::http::state::HttpState;
use user_registry::inbound::http::users;
use user_registry::outbound::memory::InMemoryUserRepository;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Build the shared user state over a fresh in-memory repository.
///
/// The admin record is inserted when `seed_admin` is set.
///
/// # Errors
/// Returns [`std::io::Error`] when seeding fails.
pub async fn build_http_state(seed_admin: bool) -> std::io::Result<HttpState> {
    let store = UserStore::new(Arc::new(InMemoryUserRepository::new()));
    if seed_admin {
        store
            .seed_admin()
            .await
            .map_err(|e| std::io::Error::other(format!("failed to seed admin user: {e}")))?;
    }
    Ok(HttpState::from_store(store))
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(web::scope("/api").configure(users::configure))
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server over the shared user state.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the socket is bound.
/// - `http_state`: port implementations shared by every worker.
/// - `config`: resolved bind address, timeouts, and worker count.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let ServerConfig {
        bind_addr,
        client_request_timeout,
        client_disconnect_timeout,
        keep_alive,
        workers,
    } = config;

    let mut server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .client_request_timeout(client_request_timeout)
    .client_disconnect_timeout(client_disconnect_timeout)
    .keep_alive(keep_alive);
    if let Some(workers) = workers {
        server = server.workers(workers);
    }

    let server = server.bind(bind_addr)?.run();
    health_state.mark_ready();
    Ok(server)
}
