//! HTTP handlers and route configuration.

mod auth;
mod blogs;
mod comments;
mod health;
mod users;
mod views;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            // Blog routes, with comments nested under a blog
            .service(
                web::scope("/blogs")
                    .route("", web::get().to(blogs::list_blogs))
                    .route("", web::post().to(blogs::create_blog))
                    .route("/{id}", web::get().to(blogs::get_blog))
                    .route("/{id}", web::put().to(blogs::update_blog))
                    .route("/{id}", web::delete().to(blogs::delete_blog))
                    .route("/{id}/clap", web::post().to(blogs::clap_blog))
                    .route("/{blog_id}/comments", web::get().to(comments::list_comments))
                    .route("/{blog_id}/comments", web::post().to(comments::create_comment)),
            )
            // Public profiles
            .service(
                web::scope("/users")
                    .route("/{id}", web::get().to(users::get_user))
                    .route("/{id}/blogs", web::get().to(users::get_user_blogs)),
            ),
    );
}
