use async_trait::async_trait;
use std::fmt;

use crate::models::{
    Course, CourseFilter, CourseUpdate, Enrollment, News, NewsUpdate, User, UserUpdate,
};

#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// A unique index rejected the write.
    Duplicate(String),
    Backend(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Duplicate(msg) => write!(f, "Duplicate key: {}", msg),
            StoreError::Backend(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence port used by every service.
///
/// Ids are the hex form of the document's ObjectId. An id that does not
/// parse behaves like an id with no document behind it.
#[async_trait]
pub trait Store: Send + Sync {
    async fn ping(&self) -> StoreResult<()>;

    // Users
    async fn count_users_by_email(&self, email: &str) -> StoreResult<u64>;
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    async fn find_user_by_id(&self, id: &str) -> StoreResult<Option<User>>;
    /// Assigns an id when the user has none and returns the stored document.
    async fn insert_user(&self, user: User) -> StoreResult<User>;
    /// Returns the user as it is after the update.
    async fn update_user(&self, id: &str, update: UserUpdate) -> StoreResult<Option<User>>;

    // Courses
    async fn find_course_by_name(&self, name: &str) -> StoreResult<Option<Course>>;
    async fn find_course_by_id(&self, id: &str) -> StoreResult<Option<Course>>;
    async fn find_courses(&self, filter: CourseFilter) -> StoreResult<Vec<Course>>;
    /// Fails with [`StoreError::Duplicate`] when the name is already taken.
    async fn insert_course(&self, course: Course) -> StoreResult<Course>;
    /// Returns the course as it was *before* the update, so callers can tell
    /// whether a flag actually changed.
    async fn update_course(&self, id: &str, update: CourseUpdate) -> StoreResult<Option<Course>>;

    // Enrollments
    async fn insert_enrollment(&self, enrollment: Enrollment) -> StoreResult<Enrollment>;
    async fn find_enrollments_by_user(&self, user_id: &str) -> StoreResult<Vec<Enrollment>>;

    // News
    async fn insert_news(&self, news: News) -> StoreResult<News>;
    async fn find_news(&self, active_only: bool) -> StoreResult<Vec<News>>;
    async fn find_news_by_id(&self, id: &str) -> StoreResult<Option<News>>;
    /// Returns the post as it is after the update.
    async fn update_news(&self, id: &str, update: NewsUpdate) -> StoreResult<Option<News>>;
}
