use actix_web::http::header;
use actix_web::web::Data;
use actix_web::{Error, HttpRequest, HttpResponse};
use paperclip::actix::{
    api_v2_operation,
    web::{self},
    Apiv2Schema,
};
use serde::Deserialize;

use crate::api::HomePage;
use crate::books_repository::BookRepositoryError;
use crate::catalog::{CatalogService, PageAction};
use crate::details;
use crate::reviews::ReviewsClient;

/// The closed set of representations the detail operation can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Representation {
    Html,
    Json,
}

/// Resolves the requested representation from the Accept header. A bare or
/// absent Accept maps to the human-readable default; anything outside the
/// recognized set is a rejection, decided before any store work happens.
fn negotiate_representation(req: &HttpRequest) -> Option<Representation> {
    let accept = req
        .headers()
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("*/*");

    for entry in accept.split(',') {
        let media_type = entry.split(';').next().unwrap_or("").trim();
        match media_type {
            "text/html" | "text/*" | "*/*" => return Some(Representation::Html),
            "application/json" => return Some(Representation::Json),
            _ => continue,
        }
    }
    None
}

#[derive(Debug, Deserialize, Apiv2Schema)]
pub struct ListQuery {
    pub offset: Option<i64>,
    pub action: Option<PageAction>,
}

#[api_v2_operation]
pub async fn health() -> Result<HttpResponse, Error> {
    Ok(HttpResponse::Ok().finish())
}

#[api_v2_operation]
pub async fn home() -> Result<HttpResponse, Error> {
    Ok(HttpResponse::Ok().json(HomePage::new()))
}

#[api_v2_operation]
pub async fn list_books(
    catalog: Data<CatalogService>,
    prefix: web::Path<String>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, Error> {
    let query = query.into_inner();
    Ok(
        match catalog
            .list_by_prefix(&prefix, query.offset.unwrap_or(0), query.action)
            .await
        {
            Ok(page) => HttpResponse::Ok().json(page),
            Err(err) => {
                tracing::error!("List books failed {}", err);
                HttpResponse::InternalServerError()
                    .body("An internal server error occurred. Please try again.")
            }
        },
    )
}

#[api_v2_operation]
pub async fn book_details(
    catalog: Data<CatalogService>,
    book_id: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse, Error> {
    // Negotiate up front so an unacceptable request never reaches the store
    // or the formatter
    let Some(representation) = negotiate_representation(&req) else {
        return Ok(HttpResponse::NotAcceptable()
            .content_type("text/plain")
            .body("Requested content type is not acceptable. Please change."));
    };

    Ok(match catalog.get_by_id(&book_id).await {
        Ok(record) => match representation {
            Representation::Json => HttpResponse::Ok().json(details::machine_view(&record)),
            Representation::Html => {
                let view = details::human_view(&record);
                HttpResponse::Ok().content_type("text/html").body(format!(
                    "<h1>{}</h1>\
                     <img src=\"{}\" alt=\"cover\">\
                     <p>by {}</p>\
                     <p>{} pages &middot; rated {} from {} ratings</p>\
                     <p>{}</p>\
                     <p>{}</p>",
                    view.title,
                    view.image_src,
                    view.authors,
                    view.pages,
                    view.rating,
                    view.rating_count,
                    view.genres,
                    view.description
                ))
            }
        },
        Err(BookRepositoryError::NotFound(_)) => HttpResponse::NotFound().finish(),
        Err(err) => {
            tracing::error!("Get book details failed {}", err);
            HttpResponse::InternalServerError()
                .body("An internal server error occurred. Please try again.")
        }
    })
}

#[api_v2_operation]
pub async fn book_reviews(
    reviews_client: Data<ReviewsClient>,
    title: web::Path<String>,
) -> Result<HttpResponse, Error> {
    Ok(match reviews_client.reviews_for_title(&title).await {
        Ok(reviews) => HttpResponse::Ok().json(reviews),
        Err(err) => {
            tracing::error!("Fetching reviews for {:?} failed {}", title.as_str(), err);
            HttpResponse::InternalServerError()
                .body("An internal server error occurred. Please try again.")
        }
    })
}
