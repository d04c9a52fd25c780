use super::save_versioned;
use async_trait::async_trait;
use cms_domain::article::ArticleId;
use cms_domain::entity::Entity;
use cms_domain::error::DomainResult;
use cms_domain::series::{Series, SeriesId, SeriesRepository};
use dashmap::DashMap;

#[derive(Default)]
pub struct InMemorySeriesRepository {
    series: DashMap<SeriesId, Series>,
}

impl InMemorySeriesRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SeriesRepository for InMemorySeriesRepository {
    async fn find_by_id(&self, id: &SeriesId) -> DomainResult<Option<Series>> {
        Ok(self.series.get(id).map(|s| s.value().clone()))
    }

    async fn find_series_containing_article(
        &self,
        article_id: &ArticleId,
    ) -> DomainResult<Vec<Series>> {
        let mut found: Vec<Series> = self
            .series
            .iter()
            .filter(|s| s.value().contains_article(article_id))
            .map(|s| s.value().clone())
            .collect();
        found.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(found)
    }

    async fn save(&self, series: &Series) -> DomainResult<()> {
        save_versioned(&self.series, series)
    }
}
