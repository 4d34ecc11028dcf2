// ==================== NEWS BOARD ====================
// Admin-managed announcements; readers only see active posts

use crate::{
    database::Store,
    models::{CreateNewsRequest, News, NewsResponse, NewsUpdate, UpdateNewsRequest},
    utils::{validation::non_blank, AppError, ErrorBody},
};

/// POST /news
pub async fn add_news(
    store: &dyn Store,
    request: CreateNewsRequest,
) -> Result<NewsResponse, AppError> {
    let title = non_blank(request.title.as_deref())
        .ok_or_else(|| AppError::invalid("News title is required"))?;
    let content = non_blank(request.content.as_deref())
        .ok_or_else(|| AppError::invalid("News content is required"))?;

    let news = News {
        id: None,
        title: title.to_string(),
        content: content.to_string(),
        is_active: true,
        created_on: chrono::Utc::now().timestamp(),
    };

    let stored = store.insert_news(news).await?;
    log::info!("📰 News posted: {}", stored.title);
    Ok(NewsResponse::from(stored))
}

/// GET /news/all
pub async fn get_all_news(store: &dyn Store) -> Result<Vec<NewsResponse>, AppError> {
    let news = store.find_news(false).await?;
    if news.is_empty() {
        return Err(AppError::not_found("No news found"));
    }
    Ok(news.into_iter().map(NewsResponse::from).collect())
}

/// GET /news
pub async fn get_all_active(store: &dyn Store) -> Result<Vec<NewsResponse>, AppError> {
    let news = store.find_news(true).await?;
    if news.is_empty() {
        return Err(AppError::NotFound(ErrorBody::False));
    }
    Ok(news.into_iter().map(NewsResponse::from).collect())
}

/// GET /news/specific/{id}
pub async fn get_news(store: &dyn Store, news_id: &str) -> Result<NewsResponse, AppError> {
    store
        .find_news_by_id(news_id)
        .await?
        .map(NewsResponse::from)
        .ok_or(AppError::NotFound(ErrorBody::False))
}

/// PATCH /news/{id}
pub async fn update_news(
    store: &dyn Store,
    news_id: &str,
    request: UpdateNewsRequest,
) -> Result<(), AppError> {
    let update = NewsUpdate {
        title: request.title,
        content: request.content,
        is_active: request.is_active,
    };

    store
        .update_news(news_id, update)
        .await?
        .map(|_| ())
        .ok_or(AppError::NotFound(ErrorBody::False))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;

    fn post(title: &str) -> CreateNewsRequest {
        CreateNewsRequest {
            title: Some(title.into()),
            content: Some("Enrollment opens Monday".into()),
        }
    }

    #[tokio::test]
    async fn add_news_requires_title_and_content() {
        let store = MemoryStore::new();

        let untitled = CreateNewsRequest { title: None, content: Some("text".into()) };
        assert!(matches!(add_news(&store, untitled).await, Err(AppError::InvalidInput(_))));

        let empty = CreateNewsRequest { title: Some("Hello".into()), content: Some(" ".into()) };
        assert!(matches!(add_news(&store, empty).await, Err(AppError::InvalidInput(_))));

        let created = add_news(&store, post("Hello")).await.unwrap();
        assert!(created.is_active);
    }

    #[tokio::test]
    async fn hidden_posts_stay_visible_to_admin_listing() {
        let store = MemoryStore::new();

        let err = get_all_news(&store).await.unwrap_err();
        assert_eq!(err.body(), ErrorBody::Message("No news found".into()));
        assert_eq!(get_all_active(&store).await.unwrap_err().body(), ErrorBody::False);

        let first = add_news(&store, post("First")).await.unwrap();
        add_news(&store, post("Second")).await.unwrap();

        let hide = UpdateNewsRequest { title: None, content: None, is_active: Some(false) };
        update_news(&store, &first.id, hide).await.unwrap();

        assert_eq!(get_all_news(&store).await.unwrap().len(), 2);
        let active = get_all_active(&store).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].title, "Second");
    }

    #[tokio::test]
    async fn unknown_post_is_false_not_found() {
        let store = MemoryStore::new();
        let update = UpdateNewsRequest { title: Some("x".into()), content: None, is_active: None };

        assert_eq!(get_news(&store, "nope").await.unwrap_err().body(), ErrorBody::False);
        assert_eq!(
            update_news(&store, "65f000000000000000000000", update).await.unwrap_err().body(),
            ErrorBody::False
        );
    }
}
