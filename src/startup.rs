use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::net::TcpListener;
use std::sync::Arc;

use crate::auth::TokenBlacklist;
use crate::configuration::{CorsSettings, Settings};
use crate::error::{AppError, ValidationError};
use crate::logger::LoggerMiddleware;
use crate::middleware::JwtMiddleware;
use crate::repository::UserRepository;
use crate::routes::{get_current_user, health_check, login, logout, root, signup};
use crate::service::AuthService;

pub fn run(
    listener: TcpListener,
    users: Arc<dyn UserRepository>,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    let auth_service = web::Data::new(AuthService::new(
        users,
        TokenBlacklist::new(),
        settings.jwt.clone(),
        settings.security.bcrypt_cost,
    ));
    let app_settings = web::Data::new(settings.application.clone());
    let cors_settings = settings.cors.clone();

    let server = HttpServer::new(move || {
        // Malformed or incomplete JSON bodies go out in the same envelope as
        // every other validation failure.
        let json_config = web::JsonConfig::default().error_handler(|err, _req| {
            AppError::Validation(ValidationError::MalformedBody(err.to_string())).into()
        });

        App::new()
            // Global middleware
            .wrap(cors_layer(&cors_settings))
            .wrap(LoggerMiddleware)
            .wrap(Logger::default())

            // Shared state
            .app_data(json_config)
            .app_data(auth_service.clone())
            .app_data(app_settings.clone())

            .route("/", web::get().to(root))
            .route("/health", web::get().to(health_check))
            .service(
                web::scope("/auth")
                    .route("/signup", web::post().to(signup))
                    .route("/login", web::post().to(login))
                    // Protected routes (require a bearer token)
                    .service(
                        web::resource("/me")
                            .wrap(JwtMiddleware::new(auth_service.clone()))
                            .route(web::get().to(get_current_user)),
                    )
                    .service(
                        web::resource("/logout")
                            .wrap(JwtMiddleware::new(auth_service.clone()))
                            .route(web::post().to(logout)),
                    ),
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}

fn cors_layer(settings: &CorsSettings) -> Cors {
    let mut cors = Cors::default().allow_any_method().allow_any_header();

    if settings.allowed_origins.iter().any(|origin| origin == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in &settings.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    if settings.allow_credentials {
        cors = cors.supports_credentials();
    }

    cors
}
