//! Remote-inference strategy: ask the language-model endpoint.

use async_trait::async_trait;
use llm_client::LlmRecommenderClient;

use super::REMOTE_STRATEGY;
use crate::traits::{check_title, RecommendError, Recommender};

#[async_trait]
impl Recommender for LlmRecommenderClient {
    fn name(&self) -> &str {
        REMOTE_STRATEGY
    }

    async fn recommend(&self, title: &str) -> Result<Vec<String>, RecommendError> {
        check_title(title)?;
        Ok(self.recommend_by_remote(title).await?)
    }
}
