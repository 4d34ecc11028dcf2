pub mod courses;
pub mod enrollments;
pub mod health;
pub mod news;
pub mod swagger;
pub mod users;


use actix_web::{guard, web};

use crate::{
    config::ProfileUpdatePolicy,
    middleware::AuthMiddleware,
    utils::AppError,
};

/// Malformed JSON bodies answer 400 `{ "message": ... }` like every other input error.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        log::warn!("⚠️  Rejected body for {} {}: {}", req.method(), req.path(), err);
        AppError::invalid(err.to_string()).into()
    })
}

/// Registers every route. Fixed segments (`/active`, `/search`, `/specific/..`)
/// are registered before `/{id}` so they are not captured as ids.
pub fn configure(cfg: &mut web::ServiceConfig, profile_policy: ProfileUpdatePolicy) {
    let user_routes = web::scope("/users")
        .route("/check-email", web::post().to(users::check_email))
        .route("/register", web::post().to(users::register))
        .route("/login", web::post().to(users::login))
        .route("/google", web::get().to(users::google_login))
        .route("/google/callback", web::get().to(users::google_callback))
        .route("/failed", web::get().to(users::login_failed))
        .service(
            web::resource("/details")
                .wrap(AuthMiddleware::bearer())
                .route(web::get().to(users::details)),
        )
        .service(
            web::resource("/get-enrollments")
                .wrap(AuthMiddleware::bearer())
                .route(web::get().to(users::get_enrollments)),
        )
        .service(
            web::resource("/reset-password")
                .wrap(AuthMiddleware::bearer())
                .route(web::post().to(users::reset_password)),
        )
        .service(
            web::resource("/updateAdmin")
                .wrap(AuthMiddleware::bearer())
                .route(web::put().to(users::update_admin)),
        );

    let user_routes = match profile_policy {
        ProfileUpdatePolicy::Authenticated => user_routes.service(
            web::resource("/profile")
                .wrap(AuthMiddleware::bearer())
                .route(web::put().to(users::update_profile)),
        ),
        ProfileUpdatePolicy::Public => {
            user_routes.route("/profile", web::put().to(users::update_profile))
        }
    };

    cfg.app_data(json_config())
        .route("/health", web::get().to(health::health_check))
        .service(user_routes)
        .service(
            web::scope("/courses")
                .service(
                    web::resource("")
                        .wrap(AuthMiddleware::admin())
                        .route(web::post().to(courses::add_course))
                        .route(web::get().to(courses::get_all_courses)),
                )
                .route("/active", web::get().to(courses::get_all_active))
                .route("/search", web::post().to(courses::search_by_price))
                .route("/specific/{course_id}", web::get().to(courses::get_course))
                .service(
                    web::resource("/{course_id}")
                        .wrap(AuthMiddleware::admin())
                        .route(web::patch().to(courses::update_course)),
                )
                .service(
                    web::resource("/{course_id}/archive")
                        .wrap(AuthMiddleware::admin())
                        .route(web::patch().to(courses::archive_course)),
                )
                .service(
                    web::resource("/{course_id}/activate")
                        .wrap(AuthMiddleware::admin())
                        .route(web::patch().to(courses::activate_course)),
                ),
        )
        .service(
            web::scope("/enrollments").service(
                web::resource("")
                    .wrap(AuthMiddleware::bearer())
                    .route(web::post().to(enrollments::enroll)),
            ),
        )
        .service(
            web::scope("/news")
                // POST and GET share the path but not the gate
                .service(
                    web::resource("")
                        .guard(guard::Post())
                        .wrap(AuthMiddleware::admin())
                        .route(web::post().to(news::add_news)),
                )
                .route("", web::get().to(news::get_all_active))
                .service(
                    web::resource("/all")
                        .wrap(AuthMiddleware::admin())
                        .route(web::get().to(news::get_all_news)),
                )
                .route("/specific/{news_id}", web::get().to(news::get_news))
                .service(
                    web::resource("/{news_id}")
                        .wrap(AuthMiddleware::admin())
                        .route(web::patch().to(news::update_news)),
                ),
        );
}
