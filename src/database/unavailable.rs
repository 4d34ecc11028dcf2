use async_trait::async_trait;

use super::{Store, StoreError, StoreResult};
use crate::models::{
    Course, CourseFilter, CourseUpdate, Enrollment, News, NewsUpdate, User, UserUpdate,
};

/// Store whose every call fails like a dropped database connection.
pub struct UnavailableStore;

pub const UNAVAILABLE_DETAIL: &str = "connection reset by peer";

fn down<T>() -> StoreResult<T> {
    Err(StoreError::Backend(UNAVAILABLE_DETAIL.to_string()))
}

#[async_trait]
impl Store for UnavailableStore {
    async fn ping(&self) -> StoreResult<()> {
        down()
    }

    async fn count_users_by_email(&self, _email: &str) -> StoreResult<u64> {
        down()
    }

    async fn find_user_by_email(&self, _email: &str) -> StoreResult<Option<User>> {
        down()
    }

    async fn find_user_by_id(&self, _id: &str) -> StoreResult<Option<User>> {
        down()
    }

    async fn insert_user(&self, _user: User) -> StoreResult<User> {
        down()
    }

    async fn update_user(&self, _id: &str, _update: UserUpdate) -> StoreResult<Option<User>> {
        down()
    }

    async fn find_course_by_name(&self, _name: &str) -> StoreResult<Option<Course>> {
        down()
    }

    async fn find_course_by_id(&self, _id: &str) -> StoreResult<Option<Course>> {
        down()
    }

    async fn find_courses(&self, _filter: CourseFilter) -> StoreResult<Vec<Course>> {
        down()
    }

    async fn insert_course(&self, _course: Course) -> StoreResult<Course> {
        down()
    }

    async fn update_course(
        &self,
        _id: &str,
        _update: CourseUpdate,
    ) -> StoreResult<Option<Course>> {
        down()
    }

    async fn insert_enrollment(&self, _enrollment: Enrollment) -> StoreResult<Enrollment> {
        down()
    }

    async fn find_enrollments_by_user(&self, _user_id: &str) -> StoreResult<Vec<Enrollment>> {
        down()
    }

    async fn insert_news(&self, _news: News) -> StoreResult<News> {
        down()
    }

    async fn find_news(&self, _active_only: bool) -> StoreResult<Vec<News>> {
        down()
    }

    async fn find_news_by_id(&self, _id: &str) -> StoreResult<Option<News>> {
        down()
    }

    async fn update_news(&self, _id: &str, _update: NewsUpdate) -> StoreResult<Option<News>> {
        down()
    }
}
