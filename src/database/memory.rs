use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::{Store, StoreError, StoreResult};
use crate::models::{
    Course, CourseFilter, CourseUpdate, Enrollment, News, NewsUpdate, User, UserUpdate,
};

#[derive(Default)]
struct Collections {
    users: Vec<User>,
    courses: Vec<Course>,
    enrollments: Vec<Enrollment>,
    news: Vec<News>,
}

/// Process-local store with the same observable behaviour as the MongoDB
/// adapter, including the unique course name. Data is lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn has_id(id: Option<ObjectId>, wanted: &str) -> bool {
    id.map_or(false, |oid| oid.to_hex() == wanted)
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn count_users_by_email(&self, email: &str) -> StoreResult<u64> {
        let data = self.inner.read().await;
        Ok(data.users.iter().filter(|u| u.email == email).count() as u64)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let data = self.inner.read().await;
        Ok(data.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        let data = self.inner.read().await;
        Ok(data.users.iter().find(|u| has_id(u.id, id)).cloned())
    }

    async fn insert_user(&self, mut user: User) -> StoreResult<User> {
        user.id.get_or_insert_with(ObjectId::new);
        self.inner.write().await.users.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: &str, update: UserUpdate) -> StoreResult<Option<User>> {
        let mut data = self.inner.write().await;
        Ok(data.users.iter_mut().find(|u| has_id(u.id, id)).map(|user| {
            update.apply(user);
            user.clone()
        }))
    }

    async fn find_course_by_name(&self, name: &str) -> StoreResult<Option<Course>> {
        let data = self.inner.read().await;
        Ok(data.courses.iter().find(|c| c.name == name).cloned())
    }

    async fn find_course_by_id(&self, id: &str) -> StoreResult<Option<Course>> {
        let data = self.inner.read().await;
        Ok(data.courses.iter().find(|c| has_id(c.id, id)).cloned())
    }

    async fn find_courses(&self, filter: CourseFilter) -> StoreResult<Vec<Course>> {
        let data = self.inner.read().await;
        Ok(data.courses.iter().filter(|c| filter.matches(c)).cloned().collect())
    }

    async fn insert_course(&self, mut course: Course) -> StoreResult<Course> {
        let mut data = self.inner.write().await;
        if data.courses.iter().any(|c| c.name == course.name) {
            return Err(StoreError::Duplicate(format!(
                "course name '{}' already exists",
                course.name
            )));
        }
        course.id.get_or_insert_with(ObjectId::new);
        data.courses.push(course.clone());
        Ok(course)
    }

    async fn update_course(&self, id: &str, update: CourseUpdate) -> StoreResult<Option<Course>> {
        let mut data = self.inner.write().await;
        let Some(index) = data.courses.iter().position(|c| has_id(c.id, id)) else {
            return Ok(None);
        };
        if let Some(name) = &update.name {
            if data.courses.iter().any(|c| &c.name == name && !has_id(c.id, id)) {
                return Err(StoreError::Duplicate(format!(
                    "course name '{}' already exists",
                    name
                )));
            }
        }
        let course = &mut data.courses[index];
        let before = course.clone();
        update.apply(course);
        Ok(Some(before))
    }

    async fn insert_enrollment(&self, mut enrollment: Enrollment) -> StoreResult<Enrollment> {
        enrollment.id.get_or_insert_with(ObjectId::new);
        self.inner.write().await.enrollments.push(enrollment.clone());
        Ok(enrollment)
    }

    async fn find_enrollments_by_user(&self, user_id: &str) -> StoreResult<Vec<Enrollment>> {
        let data = self.inner.read().await;
        Ok(data.enrollments.iter().filter(|e| e.user_id == user_id).cloned().collect())
    }

    async fn insert_news(&self, mut news: News) -> StoreResult<News> {
        news.id.get_or_insert_with(ObjectId::new);
        self.inner.write().await.news.push(news.clone());
        Ok(news)
    }

    async fn find_news(&self, active_only: bool) -> StoreResult<Vec<News>> {
        let data = self.inner.read().await;
        Ok(data.news.iter().filter(|n| !active_only || n.is_active).cloned().collect())
    }

    async fn find_news_by_id(&self, id: &str) -> StoreResult<Option<News>> {
        let data = self.inner.read().await;
        Ok(data.news.iter().find(|n| has_id(n.id, id)).cloned())
    }

    async fn update_news(&self, id: &str, update: NewsUpdate) -> StoreResult<Option<News>> {
        let mut data = self.inner.write().await;
        Ok(data.news.iter_mut().find(|n| has_id(n.id, id)).map(|news| {
            update.apply(news);
            news.clone()
        }))
    }
}
