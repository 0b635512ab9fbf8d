//! The RecommenderSet runs several strategies for one title.
//!
//! Strategies run one after the other, in the order they were added. Each
//! one's result is kept separately, so a failing strategy never hides what
//! the others found.

use crate::traits::{RecommendError, Recommender};

/// Result of running one strategy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyOutcome {
    pub strategy: String,
    pub result: Result<Vec<String>, RecommendError>,
}

impl StrategyOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Ordered collection of recommendation strategies.
///
/// ## Usage
/// ```ignore
/// let set = RecommenderSet::new()
///     .add_recommender(GraphRecommender::new(connector.clone()))
///     .add_recommender(LlmRecommenderClient::new(endpoint, timeout)?);
///
/// for outcome in set.recommend_all("Harry Potter").await {
///     println!("{}: {:?}", outcome.strategy, outcome.result);
/// }
/// ```
pub struct RecommenderSet {
    recommenders: Vec<Box<dyn Recommender>>,
}

impl RecommenderSet {
    /// Create a new empty RecommenderSet.
    pub fn new() -> Self {
        Self {
            recommenders: Vec::new(),
        }
    }

    /// Add a strategy (builder pattern).
    ///
    /// # Arguments
    /// * `recommender` - Any type implementing the Recommender trait
    ///
    /// # Returns
    /// Self for method chaining
    pub fn add_recommender(mut self, recommender: impl Recommender + 'static) -> Self {
        self.recommenders.push(Box::new(recommender));
        self
    }

    pub fn len(&self) -> usize {
        self.recommenders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recommenders.is_empty()
    }

    /// Run every strategy for `title`, sequentially.
    ///
    /// ## Algorithm
    /// 1. For each strategy in order:
    ///    a. Ask it for recommendations
    ///    b. Log the count, or the failure at `warn`
    ///    c. Record the outcome
    /// 2. Return one outcome per strategy, in the same order
    pub async fn recommend_all(&self, title: &str) -> Vec<StrategyOutcome> {
        let mut outcomes = Vec::with_capacity(self.recommenders.len());
        for recommender in &self.recommenders {
            tracing::debug!("Running strategy: {} for {:?}", recommender.name(), title);
            let result = recommender.recommend(title).await;
            match &result {
                Ok(titles) => tracing::info!(
                    "Strategy {} returned {} recommendations",
                    recommender.name(),
                    titles.len()
                ),
                Err(e) => tracing::warn!("Strategy {} failed: {}", recommender.name(), e),
            }
            outcomes.push(StrategyOutcome {
                strategy: recommender.name().to_string(),
                result,
            });
        }
        outcomes
    }
}

impl Default for RecommenderSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use llm_client::LlmClientError;

    /// Strategy with a canned answer
    struct Fixed {
        name: &'static str,
        answer: Result<Vec<String>, RecommendError>,
    }

    #[async_trait]
    impl Recommender for Fixed {
        fn name(&self) -> &str {
            self.name
        }

        async fn recommend(&self, _title: &str) -> Result<Vec<String>, RecommendError> {
            self.answer.clone()
        }
    }

    fn ok(name: &'static str, titles: &[&str]) -> Fixed {
        Fixed {
            name,
            answer: Ok(titles.iter().map(|t| t.to_string()).collect()),
        }
    }

    #[tokio::test]
    async fn test_empty_set() {
        let set = RecommenderSet::new();
        assert!(set.is_empty());
        assert!(set.recommend_all("Dune").await.is_empty());
    }

    #[tokio::test]
    async fn test_outcomes_keep_insertion_order() {
        let set = RecommenderSet::new()
            .add_recommender(ok("first", &["A"]))
            .add_recommender(ok("second", &["B", "C"]));

        let outcomes = set.recommend_all("Dune").await;

        assert_eq!(set.len(), 2);
        assert_eq!(outcomes[0].strategy, "first");
        assert_eq!(outcomes[1].strategy, "second");
        assert_eq!(outcomes[1].result, Ok(vec!["B".to_string(), "C".to_string()]));
    }

    #[tokio::test]
    async fn test_failure_does_not_hide_other_results() {
        let set = RecommenderSet::new()
            .add_recommender(Fixed {
                name: "broken",
                answer: Err(RecommendError::Remote(LlmClientError::InvalidResponse(
                    "garbage".into(),
                ))),
            })
            .add_recommender(ok("working", &["Hyperion"]));

        let outcomes = set.recommend_all("Dune").await;

        assert!(!outcomes[0].is_ok());
        assert!(outcomes[1].is_ok());
        assert_eq!(outcomes[1].result, Ok(vec!["Hyperion".to_string()]));
    }
}
