use crate::dto::{ArticleDto, BookDto, SeriesDto};
use crate::{context::AppContext, error::AppError, query::Query, query_handler::QueryHandler};
use async_trait::async_trait;
use cms_domain::article::{ArticleId, ArticleRepository};
use cms_domain::book::{BookId, BookRepository};
use cms_domain::series::{SeriesId, SeriesRepository};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct GetBook {
    pub book_id: BookId,
}

impl Query for GetBook {
    const NAME: &'static str = "book.get";
    type Dto = Option<BookDto>;
}

pub struct GetBookHandler {
    books: Arc<dyn BookRepository>,
}

impl GetBookHandler {
    pub fn new(books: Arc<dyn BookRepository>) -> Self {
        Self { books }
    }
}

#[async_trait]
impl QueryHandler<GetBook> for GetBookHandler {
    async fn handle(&self, _ctx: &AppContext, q: GetBook) -> Result<Option<BookDto>, AppError> {
        Ok(self.books.find_by_id(&q.book_id).await?.as_ref().map(BookDto::from))
    }
}

#[derive(Debug, Clone)]
pub struct GetArticle {
    pub article_id: ArticleId,
}

impl Query for GetArticle {
    const NAME: &'static str = "article.get";
    type Dto = Option<ArticleDto>;
}

pub struct GetArticleHandler {
    articles: Arc<dyn ArticleRepository>,
}

impl GetArticleHandler {
    pub fn new(articles: Arc<dyn ArticleRepository>) -> Self {
        Self { articles }
    }
}

#[async_trait]
impl QueryHandler<GetArticle> for GetArticleHandler {
    async fn handle(
        &self,
        _ctx: &AppContext,
        q: GetArticle,
    ) -> Result<Option<ArticleDto>, AppError> {
        Ok(self
            .articles
            .find_by_id(&q.article_id)
            .await?
            .as_ref()
            .map(ArticleDto::from))
    }
}

/// 当前引用某本书的文章（按文章标识排序）
#[derive(Debug, Clone)]
pub struct ListArticlesByBook {
    pub book_id: BookId,
}

impl Query for ListArticlesByBook {
    const NAME: &'static str = "article.list_by_book";
    type Dto = Vec<ArticleDto>;
}

pub struct ListArticlesByBookHandler {
    articles: Arc<dyn ArticleRepository>,
}

impl ListArticlesByBookHandler {
    pub fn new(articles: Arc<dyn ArticleRepository>) -> Self {
        Self { articles }
    }
}

#[async_trait]
impl QueryHandler<ListArticlesByBook> for ListArticlesByBookHandler {
    async fn handle(
        &self,
        _ctx: &AppContext,
        q: ListArticlesByBook,
    ) -> Result<Vec<ArticleDto>, AppError> {
        let articles = self.articles.find_articles_referencing_book(&q.book_id).await?;
        Ok(articles.iter().map(ArticleDto::from).collect())
    }
}

#[derive(Debug, Clone)]
pub struct GetSeries {
    pub series_id: SeriesId,
}

impl Query for GetSeries {
    const NAME: &'static str = "article_series.get";
    type Dto = Option<SeriesDto>;
}

pub struct GetSeriesHandler {
    series: Arc<dyn SeriesRepository>,
}

impl GetSeriesHandler {
    pub fn new(series: Arc<dyn SeriesRepository>) -> Self {
        Self { series }
    }
}

#[async_trait]
impl QueryHandler<GetSeries> for GetSeriesHandler {
    async fn handle(&self, _ctx: &AppContext, q: GetSeries) -> Result<Option<SeriesDto>, AppError> {
        Ok(self
            .series
            .find_by_id(&q.series_id)
            .await?
            .as_ref()
            .map(SeriesDto::from))
    }
}
