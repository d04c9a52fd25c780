use super::publish_pending;
use crate::{command::Command, command_handler::CommandHandler, context::AppContext, error::AppError};
use async_trait::async_trait;
use cms_domain::article::{ArticleId, ArticleRepository};
use cms_domain::eventing::EventBus;
use cms_domain::series::{Series, SeriesId, SeriesRepository};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct CreateSeries {
    pub series_id: SeriesId,
    pub title: String,
    pub article_ids: Vec<ArticleId>,
}

impl Command for CreateSeries {
    const NAME: &'static str = "article_series.create";
}

pub struct CreateSeriesHandler {
    series: Arc<dyn SeriesRepository>,
    articles: Arc<dyn ArticleRepository>,
    bus: Arc<dyn EventBus>,
}

impl CreateSeriesHandler {
    pub fn new(
        series: Arc<dyn SeriesRepository>,
        articles: Arc<dyn ArticleRepository>,
        bus: Arc<dyn EventBus>,
    ) -> Self {
        Self {
            series,
            articles,
            bus,
        }
    }
}

#[async_trait]
impl CommandHandler<CreateSeries> for CreateSeriesHandler {
    async fn handle(&self, ctx: &AppContext, cmd: CreateSeries) -> Result<(), AppError> {
        if self.series.find_by_id(&cmd.series_id).await?.is_some() {
            return Err(AppError::Validation(format!(
                "series {} already exists",
                cmd.series_id
            )));
        }

        let mut missing = Vec::new();
        for id in &cmd.article_ids {
            if self.articles.find_by_id(id).await?.is_none() {
                missing.push(id.to_string());
            }
        }
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "article(s) not found: {}",
                missing.join(", ")
            )));
        }

        let mut series = Series::create(cmd.series_id, cmd.title, cmd.article_ids, ctx.biz.clone())?;
        self.series.save(&series).await?;
        publish_pending(self.bus.as_ref(), &mut series).await
    }
}
