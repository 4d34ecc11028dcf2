use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Enrollment document (`enrollments` collection). Written once, never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    pub enrolled_courses: Vec<EnrolledCourse>,
    pub total_price: f64,
    #[serde(default)]
    pub enrolled_on: i64,
    #[serde(default = "default_status")]
    pub status: String,
}

pub(crate) fn default_status() -> String {
    "Enrolled".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrolledCourse {
    pub course_id: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollRequest {
    #[serde(default)]
    pub enrolled_courses: Vec<EnrolledCourse>,
    #[serde(default)]
    pub total_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub enrolled_courses: Vec<EnrolledCourse>,
    pub total_price: f64,
    pub enrolled_on: i64,
    pub status: String,
}

impl From<Enrollment> for EnrollmentResponse {
    fn from(enrollment: Enrollment) -> Self {
        EnrollmentResponse {
            id: enrollment.id.map(|id| id.to_hex()).unwrap_or_default(),
            user_id: enrollment.user_id,
            enrolled_courses: enrollment.enrolled_courses,
            total_price: enrollment.total_price,
            enrolled_on: enrollment.enrolled_on,
            status: enrollment.status,
        }
    }
}
