//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use actix_web::dev::Server;
use actix_web::{App, HttpServer};

use standup::Trace;
use standup::inbound::http::configure;

use state_builders::build_http_state;

/// Construct an Actix HTTP server from a pre-built [`ServerConfig`].
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let http_state = build_http_state(&config);
    let ServerConfig {
        session,
        bind_addr,
        ..
    } = config;

    let server = HttpServer::new(move || {
        App::new()
            .app_data(http_state.clone())
            .wrap(session.middleware())
            .wrap(Trace)
            .configure(configure)
    })
    .bind(bind_addr)?
    .run();
    Ok(server)
}
