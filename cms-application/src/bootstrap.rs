//! 应用装配
//!
//! 只构造一条进程内事件总线，所有订阅者在总线冻结为 `Arc<dyn EventBus>` 之前注册，
//! 之后再用该总线构造用例并注册到命令/查询总线。装配完成后无法再追加订阅者。
//!
use crate::command::Command;
use crate::command_bus::CommandBus;
use crate::config::CmsConfig;
use crate::context::AppContext;
use crate::error::AppError;
use crate::inmemory_command_bus::InMemoryCommandBus;
use crate::inmemory_query_bus::InMemoryQueryBus;
use crate::persistence::{
    InMemoryArticleRepository, InMemoryBookRepository, InMemorySeriesRepository,
};
use crate::query::Query;
use crate::query_bus::QueryBus;
use crate::subscribers::{ReferentialIntegritySubscriber, SeriesMembershipSubscriber};
use crate::use_cases::*;
use cms_domain::article::ArticleRepository;
use cms_domain::book::BookRepository;
use cms_domain::eventing::{EventBus, EventSubscriber, InProcessEventBus};
use cms_domain::series::SeriesRepository;
use std::sync::Arc;
use tracing::info;

/// 仓储集合
#[derive(Clone)]
pub struct Repositories {
    pub books: Arc<dyn BookRepository>,
    pub articles: Arc<dyn ArticleRepository>,
    pub series: Arc<dyn SeriesRepository>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Self {
            books: Arc::new(InMemoryBookRepository::new()),
            articles: Arc::new(InMemoryArticleRepository::new()),
            series: Arc::new(InMemorySeriesRepository::new()),
        }
    }
}

pub struct Application {
    commands: InMemoryCommandBus,
    queries: InMemoryQueryBus,
    event_bus: Arc<dyn EventBus>,
    repositories: Repositories,
}

impl Application {
    pub fn bootstrap(config: &CmsConfig, repositories: Repositories) -> Result<Self, AppError> {
        Self::bootstrap_with(config, repositories, Vec::new())
    }

    /// 在内置订阅者之后追加额外订阅者（例如审计、测试探针）
    pub fn bootstrap_with(
        config: &CmsConfig,
        repositories: Repositories,
        extra_subscribers: Vec<Arc<dyn EventSubscriber>>,
    ) -> Result<Self, AppError> {
        let mut subscribers: Vec<Arc<dyn EventSubscriber>> = vec![
            Arc::new(ReferentialIntegritySubscriber::new(
                repositories.articles.clone(),
            )),
            Arc::new(SeriesMembershipSubscriber::new(repositories.series.clone())),
        ];
        subscribers.extend(extra_subscribers);

        let event_bus = InProcessEventBus::builder()
            .subscribers(subscribers)
            .config(config.event_bus())
            .build();
        info!(
            subscribers = event_bus.subscriber_count(),
            policy = ?config.dispatch_policy,
            "event bus ready"
        );
        let event_bus = event_bus.into_shared();

        let commands = InMemoryCommandBus::new();
        let Repositories {
            books,
            articles,
            series,
        } = &repositories;

        commands.register::<CreateBook, _>(Arc::new(CreateBookHandler::new(
            books.clone(),
            event_bus.clone(),
        )))?;
        commands.register::<DeleteBook, _>(Arc::new(DeleteBookHandler::new(
            books.clone(),
            event_bus.clone(),
        )))?;
        commands.register::<CreateArticle, _>(Arc::new(CreateArticleHandler::new(
            articles.clone(),
            books.clone(),
            event_bus.clone(),
        )))?;
        commands.register::<UpdateArticle, _>(Arc::new(UpdateArticleHandler::new(
            articles.clone(),
            books.clone(),
            event_bus.clone(),
        )))?;
        commands.register::<DeleteArticle, _>(Arc::new(DeleteArticleHandler::new(
            articles.clone(),
            event_bus.clone(),
        )))?;
        commands.register::<CreateSeries, _>(Arc::new(CreateSeriesHandler::new(
            series.clone(),
            articles.clone(),
            event_bus.clone(),
        )))?;

        let queries = InMemoryQueryBus::new();
        queries.register::<GetBook, _>(Arc::new(GetBookHandler::new(books.clone())))?;
        queries.register::<GetArticle, _>(Arc::new(GetArticleHandler::new(articles.clone())))?;
        queries.register::<ListArticlesByBook, _>(Arc::new(ListArticlesByBookHandler::new(
            articles.clone(),
        )))?;
        queries.register::<GetSeries, _>(Arc::new(GetSeriesHandler::new(series.clone())))?;

        Ok(Self {
            commands,
            queries,
            event_bus,
            repositories,
        })
    }

    pub async fn execute<C: Command>(&self, ctx: &AppContext, cmd: C) -> Result<(), AppError> {
        self.commands.dispatch(ctx, cmd).await
    }

    pub async fn query<Q: Query>(&self, ctx: &AppContext, q: Q) -> Result<Q::Dto, AppError> {
        self.queries.dispatch(ctx, q).await
    }

    pub fn repositories(&self) -> &Repositories {
        &self.repositories
    }

    pub fn event_bus(&self) -> Arc<dyn EventBus> {
        self.event_bus.clone()
    }

    pub fn commands(&self) -> &InMemoryCommandBus {
        &self.commands
    }

    pub fn queries(&self) -> &InMemoryQueryBus {
        &self.queries
    }
}
