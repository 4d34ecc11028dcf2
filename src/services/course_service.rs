// ==================== COURSE CATALOG ====================

use crate::{
    database::{Store, StoreError},
    models::{
        Course, CourseFilter, CourseResponse, CourseUpdate, CreateCourseRequest,
        PriceSearchRequest, UpdateCourseRequest,
    },
    utils::{
        validation::{non_blank, parse_price},
        AppError, ErrorBody,
    },
};

pub const COURSE_EXISTS: &str = "Course already exists";
pub const INVALID_PRICE_RANGE: &str =
    "Invalid price range. Ensure minPrice and maxPrice are valid numbers.";
pub const INVERTED_PRICE_RANGE: &str = "minPrice cannot be greater than maxPrice.";
pub const NEGATIVE_PRICE: &str = "Course price cannot be negative";

/// Result of flipping a course's `isActive` flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlagChange {
    Changed,
    /// The course was already in the requested state; nothing was written.
    AlreadySet,
}

fn name_conflict(err: StoreError) -> AppError {
    match err {
        StoreError::Duplicate(_) => AppError::conflict(COURSE_EXISTS),
        other => AppError::from(other),
    }
}

/// POST /courses
pub async fn add_course(
    store: &dyn Store,
    request: CreateCourseRequest,
) -> Result<CourseResponse, AppError> {
    let name = non_blank(request.name.as_deref())
        .ok_or_else(|| AppError::invalid("Course name is required"))?
        .to_string();
    let price = match request.price {
        Some(price) if price >= 0.0 => price,
        Some(_) => return Err(AppError::invalid(NEGATIVE_PRICE)),
        None => return Err(AppError::invalid("Course price is required")),
    };

    if store.find_course_by_name(&name).await?.is_some() {
        return Err(AppError::conflict(COURSE_EXISTS));
    }

    let course = Course {
        id: None,
        name,
        description: request.description.unwrap_or_default(),
        price,
        is_active: true,
        created_on: chrono::Utc::now().timestamp(),
    };

    // the unique index still catches a concurrent insert of the same name
    let stored = store.insert_course(course).await.map_err(name_conflict)?;

    log::info!(
        "📚 Course added: {} ({})",
        stored.name,
        stored.id.map(|id| id.to_hex()).unwrap_or_default()
    );
    Ok(CourseResponse::from(stored))
}

async fn list(store: &dyn Store, filter: CourseFilter) -> Result<Vec<CourseResponse>, AppError> {
    let courses = store.find_courses(filter).await?;
    Ok(courses.into_iter().map(CourseResponse::from).collect())
}

/// GET /courses - every course, archived ones included
pub async fn get_all_courses(store: &dyn Store) -> Result<Vec<CourseResponse>, AppError> {
    let courses = list(store, CourseFilter::default()).await?;
    if courses.is_empty() {
        return Err(AppError::not_found("No courses found"));
    }
    Ok(courses)
}

/// GET /courses/active
pub async fn get_all_active(store: &dyn Store) -> Result<Vec<CourseResponse>, AppError> {
    let courses = list(store, CourseFilter::active()).await?;
    if courses.is_empty() {
        return Err(AppError::NotFound(ErrorBody::False));
    }
    Ok(courses)
}

/// GET /courses/specific/{id}
pub async fn get_course(store: &dyn Store, course_id: &str) -> Result<CourseResponse, AppError> {
    store
        .find_course_by_id(course_id)
        .await?
        .map(CourseResponse::from)
        .ok_or(AppError::NotFound(ErrorBody::False))
}

/// PATCH /courses/{id}
pub async fn update_course(
    store: &dyn Store,
    course_id: &str,
    request: UpdateCourseRequest,
) -> Result<(), AppError> {
    if request.price.is_some_and(|price| price < 0.0) {
        return Err(AppError::invalid(NEGATIVE_PRICE));
    }

    let update = CourseUpdate {
        name: request.name,
        description: request.description,
        price: request.price,
        is_active: None,
    };

    store
        .update_course(course_id, update)
        .await
        .map_err(name_conflict)?
        .map(|_| ())
        .ok_or(AppError::NotFound(ErrorBody::False))
}

async fn set_active(
    store: &dyn Store,
    course_id: &str,
    is_active: bool,
) -> Result<FlagChange, AppError> {
    let update = CourseUpdate {
        is_active: Some(is_active),
        ..Default::default()
    };

    let previous = store
        .update_course(course_id, update)
        .await?
        .ok_or(AppError::NotFound(ErrorBody::False))?;

    if previous.is_active == is_active {
        Ok(FlagChange::AlreadySet)
    } else {
        Ok(FlagChange::Changed)
    }
}

/// PATCH /courses/{id}/archive
pub async fn archive_course(store: &dyn Store, course_id: &str) -> Result<FlagChange, AppError> {
    set_active(store, course_id, false).await
}

/// PATCH /courses/{id}/activate
pub async fn activate_course(store: &dyn Store, course_id: &str) -> Result<FlagChange, AppError> {
    set_active(store, course_id, true).await
}

/// POST /courses/search - inclusive on both bounds
pub async fn search_courses_by_price(
    store: &dyn Store,
    request: &PriceSearchRequest,
) -> Result<Vec<CourseResponse>, AppError> {
    let (min_price, max_price) = match (
        parse_price(request.min_price.as_ref()),
        parse_price(request.max_price.as_ref()),
    ) {
        (Some(min), Some(max)) => (min, max),
        _ => return Err(AppError::invalid(INVALID_PRICE_RANGE)),
    };

    if min_price > max_price {
        return Err(AppError::invalid(INVERTED_PRICE_RANGE));
    }

    let courses = list(store, CourseFilter::price_between(min_price, max_price)).await?;
    if courses.is_empty() {
        return Err(AppError::not_found("No courses found within the specified price range."));
    }
    Ok(courses)
}
