use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::ReturnDocument;

use super::{MongoDB, Store, StoreError, StoreResult, COURSES, ENROLLMENTS, NEWS, USERS};
use crate::models::{
    Course, CourseFilter, CourseUpdate, Enrollment, News, NewsUpdate, User, UserUpdate,
};

const DUPLICATE_KEY: i32 = 11000;

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        let duplicate = match err.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY,
            ErrorKind::Command(e) => e.code == DUPLICATE_KEY,
            _ => false,
        };
        if duplicate {
            StoreError::Duplicate(err.to_string())
        } else {
            StoreError::Backend(err.to_string())
        }
    }
}

fn parse_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}

fn course_filter_doc(filter: &CourseFilter) -> Document {
    let mut query = doc! {};
    if filter.active_only {
        query.insert("isActive", true);
    }
    if let Some((min, max)) = filter.price_range {
        query.insert("price", doc! { "$gte": min, "$lte": max });
    }
    query
}

fn user_set_doc(update: &UserUpdate) -> Document {
    let mut set = doc! {};
    if let Some(first_name) = &update.first_name {
        set.insert("firstName", first_name);
    }
    if let Some(last_name) = &update.last_name {
        set.insert("lastName", last_name);
    }
    if let Some(mobile_no) = &update.mobile_no {
        set.insert("mobileNo", mobile_no);
    }
    if let Some(password) = &update.password {
        set.insert("password", password);
    }
    if let Some(is_admin) = update.is_admin {
        set.insert("isAdmin", is_admin);
    }
    set
}

fn course_set_doc(update: &CourseUpdate) -> Document {
    let mut set = doc! {};
    if let Some(name) = &update.name {
        set.insert("name", name);
    }
    if let Some(description) = &update.description {
        set.insert("description", description);
    }
    if let Some(price) = update.price {
        set.insert("price", price);
    }
    if let Some(is_active) = update.is_active {
        set.insert("isActive", is_active);
    }
    set
}

fn news_set_doc(update: &NewsUpdate) -> Document {
    let mut set = doc! {};
    if let Some(title) = &update.title {
        set.insert("title", title);
    }
    if let Some(content) = &update.content {
        set.insert("content", content);
    }
    if let Some(is_active) = update.is_active {
        set.insert("isActive", is_active);
    }
    set
}

#[async_trait]
impl Store for MongoDB {
    async fn ping(&self) -> StoreResult<()> {
        self.database().run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    async fn count_users_by_email(&self, email: &str) -> StoreResult<u64> {
        let count = self
            .collection::<User>(USERS)
            .count_documents(doc! { "email": email })
            .await?;
        Ok(count)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self.collection::<User>(USERS).find_one(doc! { "email": email }).await?)
    }

    async fn find_user_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        let Some(oid) = parse_id(id) else { return Ok(None) };
        Ok(self.collection::<User>(USERS).find_one(doc! { "_id": oid }).await?)
    }

    async fn insert_user(&self, mut user: User) -> StoreResult<User> {
        user.id.get_or_insert_with(ObjectId::new);
        self.collection::<User>(USERS).insert_one(&user).await?;
        Ok(user)
    }

    async fn update_user(&self, id: &str, update: UserUpdate) -> StoreResult<Option<User>> {
        let Some(oid) = parse_id(id) else { return Ok(None) };
        if update.is_empty() {
            return self.find_user_by_id(id).await;
        }
        let set = user_set_doc(&update);
        Ok(self
            .collection::<User>(USERS)
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?)
    }

    async fn find_course_by_name(&self, name: &str) -> StoreResult<Option<Course>> {
        Ok(self.collection::<Course>(COURSES).find_one(doc! { "name": name }).await?)
    }

    async fn find_course_by_id(&self, id: &str) -> StoreResult<Option<Course>> {
        let Some(oid) = parse_id(id) else { return Ok(None) };
        Ok(self.collection::<Course>(COURSES).find_one(doc! { "_id": oid }).await?)
    }

    async fn find_courses(&self, filter: CourseFilter) -> StoreResult<Vec<Course>> {
        let cursor = self
            .collection::<Course>(COURSES)
            .find(course_filter_doc(&filter))
            .await?;
        Ok(cursor.try_collect::<Vec<_>>().await?)
    }

    async fn insert_course(&self, mut course: Course) -> StoreResult<Course> {
        course.id.get_or_insert_with(ObjectId::new);
        self.collection::<Course>(COURSES).insert_one(&course).await?;
        Ok(course)
    }

    async fn update_course(&self, id: &str, update: CourseUpdate) -> StoreResult<Option<Course>> {
        let Some(oid) = parse_id(id) else { return Ok(None) };
        if update.is_empty() {
            return self.find_course_by_id(id).await;
        }
        let set = course_set_doc(&update);
        Ok(self
            .collection::<Course>(COURSES)
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": set })
            .return_document(ReturnDocument::Before)
            .await?)
    }

    async fn insert_enrollment(&self, mut enrollment: Enrollment) -> StoreResult<Enrollment> {
        enrollment.id.get_or_insert_with(ObjectId::new);
        self.collection::<Enrollment>(ENROLLMENTS).insert_one(&enrollment).await?;
        Ok(enrollment)
    }

    async fn find_enrollments_by_user(&self, user_id: &str) -> StoreResult<Vec<Enrollment>> {
        let cursor = self
            .collection::<Enrollment>(ENROLLMENTS)
            .find(doc! { "userId": user_id })
            .await?;
        Ok(cursor.try_collect::<Vec<_>>().await?)
    }

    async fn insert_news(&self, mut news: News) -> StoreResult<News> {
        news.id.get_or_insert_with(ObjectId::new);
        self.collection::<News>(NEWS).insert_one(&news).await?;
        Ok(news)
    }

    async fn find_news(&self, active_only: bool) -> StoreResult<Vec<News>> {
        let filter = if active_only { doc! { "isActive": true } } else { doc! {} };
        let cursor = self.collection::<News>(NEWS).find(filter).await?;
        Ok(cursor.try_collect::<Vec<_>>().await?)
    }

    async fn find_news_by_id(&self, id: &str) -> StoreResult<Option<News>> {
        let Some(oid) = parse_id(id) else { return Ok(None) };
        Ok(self.collection::<News>(NEWS).find_one(doc! { "_id": oid }).await?)
    }

    async fn update_news(&self, id: &str, update: NewsUpdate) -> StoreResult<Option<News>> {
        let Some(oid) = parse_id(id) else { return Ok(None) };
        if update.is_empty() {
            return self.find_news_by_id(id).await;
        }
        let set = news_set_doc(&update);
        Ok(self
            .collection::<News>(NEWS)
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?)
    }
}
