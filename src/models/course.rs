use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Course document (`courses` collection).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
    #[serde(default)]
    pub created_on: i64,
}

pub(crate) fn default_is_active() -> bool {
    true
}

#[derive(Debug, Clone, Default)]
pub struct CourseUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub is_active: Option<bool>,
}

impl CourseUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.is_active.is_none()
    }

    pub fn apply(&self, course: &mut Course) {
        if let Some(name) = &self.name {
            course.name = name.clone();
        }
        if let Some(description) = &self.description {
            course.description = description.clone();
        }
        if let Some(price) = self.price {
            course.price = price;
        }
        if let Some(is_active) = self.is_active {
            course.is_active = is_active;
        }
    }
}

/// Filter for course listings. The default matches every course.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CourseFilter {
    pub active_only: bool,
    /// Inclusive `(min, max)` price bounds.
    pub price_range: Option<(f64, f64)>,
}

impl CourseFilter {
    pub fn active() -> Self {
        CourseFilter {
            active_only: true,
            price_range: None,
        }
    }

    pub fn price_between(min: f64, max: f64) -> Self {
        CourseFilter {
            active_only: false,
            price_range: Some((min, max)),
        }
    }

    pub fn matches(&self, course: &Course) -> bool {
        if self.active_only && !course.is_active {
            return false;
        }
        match self.price_range {
            Some((min, max)) => course.price >= min && course.price <= max,
            None => true,
        }
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateCourseRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UpdateCourseRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
}

/// Price bounds arrive untyped: numbers and numeric strings are both accepted.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceSearchRequest {
    #[schema(value_type = Option<f64>)]
    pub min_price: Option<serde_json::Value>,
    #[schema(value_type = Option<f64>)]
    pub max_price: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub is_active: bool,
    pub created_on: i64,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        CourseResponse {
            id: course.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: course.name,
            description: course.description,
            price: course.price,
            is_active: course.is_active,
            created_on: course.created_on,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CourseCreatedResponse {
    pub success: bool,
    pub message: String,
    pub result: CourseResponse,
}
