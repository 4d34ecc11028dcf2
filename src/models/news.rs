use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::course::default_is_active;

/// News post (`news` collection).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct News {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub content: String,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
    #[serde(default)]
    pub created_on: i64,
}

#[derive(Debug, Clone, Default)]
pub struct NewsUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_active: Option<bool>,
}

impl NewsUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.is_active.is_none()
    }

    pub fn apply(&self, news: &mut News) {
        if let Some(title) = &self.title {
            news.title = title.clone();
        }
        if let Some(content) = &self.content {
            news.content = content.clone();
        }
        if let Some(is_active) = self.is_active {
            news.is_active = is_active;
        }
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateNewsRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNewsRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewsResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub content: String,
    pub is_active: bool,
    pub created_on: i64,
}

impl From<News> for NewsResponse {
    fn from(news: News) -> Self {
        NewsResponse {
            id: news.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: news.title,
            content: news.content,
            is_active: news.is_active,
            created_on: news.created_on,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct NewsCreatedResponse {
    pub success: bool,
    pub message: String,
    pub result: NewsResponse,
}
