use actix_web::{HttpResponse, get, http::header::ContentType, web};

use crate::config::Config;

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Single-page client; the API prefix is baked in at request time.
#[get("/")]
pub async fn index(config: web::Data<Config>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(render(&config.api_prefix))
}

fn render(api_prefix: &str) -> String {
    INDEX_HTML.replace("{{API_PREFIX}}", api_prefix)
}
