use paperclip::actix::web;

use crate::handlers;

pub fn config_app(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/health").route(web::get().to(handlers::health)))
        .service(web::resource("/").route(web::get().to(handlers::home)))
        .service(
            web::scope("/api")
                .service(
                    web::resource("/books/{prefix}").route(web::get().to(handlers::list_books)),
                )
                .service(
                    web::scope("/book")
                        .service(
                            web::resource("/{title}/reviews")
                                .route(web::get().to(handlers::book_reviews)),
                        )
                        .service(
                            web::resource("/{book_id}")
                                .route(web::get().to(handlers::book_details)),
                        ),
                ),
        );
}
