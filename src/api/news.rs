use actix_web::{web, HttpResponse};

use crate::{
    database::Store,
    models::{CreateNewsRequest, NewsCreatedResponse, NewsResponse, UpdateNewsRequest},
    services::news_service,
    utils::AppError,
};

#[utoipa::path(
    post,
    path = "/news",
    tag = "News",
    request_body = CreateNewsRequest,
    responses(
        (status = 201, description = "Post created", body = NewsCreatedResponse),
        (status = 400, description = "Title and content are required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_news(
    store: web::Data<dyn Store>,
    request: web::Json<CreateNewsRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("📰 POST /news");

    let news = news_service::add_news(store.get_ref(), request.into_inner()).await?;

    Ok(HttpResponse::Created().json(NewsCreatedResponse {
        success: true,
        message: "News added successfully".to_string(),
        result: news,
    }))
}

#[utoipa::path(
    get,
    path = "/news/all",
    tag = "News",
    responses(
        (status = 200, description = "Every post", body = Vec<NewsResponse>),
        (status = 404, description = "No news found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_all_news(store: web::Data<dyn Store>) -> Result<HttpResponse, AppError> {
    log::info!("📰 GET /news/all");

    let news = news_service::get_all_news(store.get_ref()).await?;
    Ok(HttpResponse::Ok().json(news))
}

#[utoipa::path(
    get,
    path = "/news",
    tag = "News",
    responses(
        (status = 200, description = "Active posts", body = Vec<NewsResponse>),
        (status = 404, description = "No active post, body is `false`")
    )
)]
pub async fn get_all_active(store: web::Data<dyn Store>) -> Result<HttpResponse, AppError> {
    log::info!("📰 GET /news");

    let news = news_service::get_all_active(store.get_ref()).await?;
    Ok(HttpResponse::Ok().json(news))
}

#[utoipa::path(
    get,
    path = "/news/specific/{news_id}",
    tag = "News",
    params(("news_id" = String, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post", body = NewsResponse),
        (status = 404, description = "Unknown post, body is `false`")
    )
)]
pub async fn get_news(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let news_id = path.into_inner();
    log::info!("🔍 GET /news/specific/{}", news_id);

    let news = news_service::get_news(store.get_ref(), &news_id).await?;
    Ok(HttpResponse::Ok().json(news))
}

#[utoipa::path(
    patch,
    path = "/news/{news_id}",
    tag = "News",
    params(("news_id" = String, Path, description = "Post id")),
    request_body = UpdateNewsRequest,
    responses(
        (status = 200, description = "Updated, body is `true`"),
        (status = 404, description = "Unknown post, body is `false`")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_news(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
    request: web::Json<UpdateNewsRequest>,
) -> Result<HttpResponse, AppError> {
    let news_id = path.into_inner();
    log::info!("✏️  PATCH /news/{}", news_id);

    news_service::update_news(store.get_ref(), &news_id, request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(true))
}
