use actix_web::{http::header::ContentType, web, HttpResponse};

use crate::{
    database::Store,
    models::{
        CourseCreatedResponse, CourseResponse, CreateCourseRequest, PriceSearchRequest,
        UpdateCourseRequest,
    },
    services::course_service::{self, FlagChange},
    utils::AppError,
};

#[utoipa::path(
    post,
    path = "/courses",
    tag = "Courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseCreatedResponse),
        (status = 400, description = "Missing name or invalid price"),
        (status = 409, description = "Course already exists")
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_course(
    store: web::Data<dyn Store>,
    request: web::Json<CreateCourseRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("➕ POST /courses - name: {}", request.name.as_deref().unwrap_or("N/A"));

    let course = course_service::add_course(store.get_ref(), request.into_inner()).await?;

    Ok(HttpResponse::Created().json(CourseCreatedResponse {
        success: true,
        message: "Course added successfully".to_string(),
        result: course,
    }))
}

#[utoipa::path(
    get,
    path = "/courses",
    tag = "Courses",
    responses(
        (status = 200, description = "Every course, archived included", body = Vec<CourseResponse>),
        (status = 404, description = "No courses found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_all_courses(store: web::Data<dyn Store>) -> Result<HttpResponse, AppError> {
    log::info!("📚 GET /courses");

    let courses = course_service::get_all_courses(store.get_ref()).await?;
    Ok(HttpResponse::Ok().json(courses))
}

#[utoipa::path(
    get,
    path = "/courses/active",
    tag = "Courses",
    responses(
        (status = 200, description = "Active courses", body = Vec<CourseResponse>),
        (status = 404, description = "No active course, body is `false`")
    )
)]
pub async fn get_all_active(store: web::Data<dyn Store>) -> Result<HttpResponse, AppError> {
    log::info!("📚 GET /courses/active");

    let courses = course_service::get_all_active(store.get_ref()).await?;
    Ok(HttpResponse::Ok().json(courses))
}

#[utoipa::path(
    get,
    path = "/courses/specific/{course_id}",
    tag = "Courses",
    params(("course_id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course", body = CourseResponse),
        (status = 404, description = "Unknown course, body is `false`")
    )
)]
pub async fn get_course(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let course_id = path.into_inner();
    log::info!("🔍 GET /courses/specific/{}", course_id);

    let course = course_service::get_course(store.get_ref(), &course_id).await?;
    Ok(HttpResponse::Ok().json(course))
}

#[utoipa::path(
    patch,
    path = "/courses/{course_id}",
    tag = "Courses",
    params(("course_id" = String, Path, description = "Course id")),
    request_body = UpdateCourseRequest,
    responses(
        (status = 200, description = "Updated, body is `true`"),
        (status = 400, description = "Course price cannot be negative"),
        (status = 404, description = "Unknown course, body is `false`"),
        (status = 409, description = "Another course already has this name")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_course(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
    request: web::Json<UpdateCourseRequest>,
) -> Result<HttpResponse, AppError> {
    let course_id = path.into_inner();
    log::info!("✏️  PATCH /courses/{}", course_id);

    course_service::update_course(store.get_ref(), &course_id, request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(true))
}

/// `true` after a change, otherwise the plain-text `already` notice.
fn flag_response(change: FlagChange, already: &'static str) -> HttpResponse {
    match change {
        FlagChange::Changed => HttpResponse::Ok().json(true),
        FlagChange::AlreadySet => HttpResponse::Ok()
            .insert_header(ContentType::plaintext())
            .body(already),
    }
}

#[utoipa::path(
    patch,
    path = "/courses/{course_id}/archive",
    tag = "Courses",
    params(("course_id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "`true`, or the plain text \"Course already archived\""),
        (status = 404, description = "Unknown course, body is `false`")
    ),
    security(("bearer_auth" = []))
)]
pub async fn archive_course(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let course_id = path.into_inner();
    log::info!("📦 PATCH /courses/{}/archive", course_id);

    let change = course_service::archive_course(store.get_ref(), &course_id).await?;
    Ok(flag_response(change, "Course already archived"))
}

#[utoipa::path(
    patch,
    path = "/courses/{course_id}/activate",
    tag = "Courses",
    params(("course_id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "`true`, or the plain text \"Course already activated\""),
        (status = 404, description = "Unknown course, body is `false`")
    ),
    security(("bearer_auth" = []))
)]
pub async fn activate_course(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let course_id = path.into_inner();
    log::info!("✅ PATCH /courses/{}/activate", course_id);

    let change = course_service::activate_course(store.get_ref(), &course_id).await?;
    Ok(flag_response(change, "Course already activated"))
}

#[utoipa::path(
    post,
    path = "/courses/search",
    tag = "Courses",
    request_body = PriceSearchRequest,
    responses(
        (status = 200, description = "Courses priced within the range", body = Vec<CourseResponse>),
        (status = 400, description = "Missing, non-numeric or inverted bounds"),
        (status = 404, description = "No course in range")
    )
)]
pub async fn search_by_price(
    store: web::Data<dyn Store>,
    request: web::Json<PriceSearchRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔎 POST /courses/search");

    let courses = course_service::search_courses_by_price(store.get_ref(), &request).await?;
    Ok(HttpResponse::Ok().json(courses))
}
