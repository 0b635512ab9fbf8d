//! Graph-traversal strategy: books one `SIMILAR_TO` hop away.

use async_trait::async_trait;
use graph_store::{GraphConnector, GraphRecommender};

use super::GRAPH_STRATEGY;
use crate::traits::{check_title, RecommendError, Recommender};

#[async_trait]
impl<C> Recommender for GraphRecommender<C>
where
    C: GraphConnector + 'static,
{
    fn name(&self) -> &str {
        GRAPH_STRATEGY
    }

    async fn recommend(&self, title: &str) -> Result<Vec<String>, RecommendError> {
        check_title(title)?;
        Ok(self.recommend_by_graph(title).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::Book;
    use graph_store::MemoryGraph;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_graph_strategy() {
        let graph = Arc::new(MemoryGraph::new());
        graph.add_similar(
            &Book::new("Dune", "Frank Herbert"),
            &Book::new("Hyperion", "Dan Simmons"),
        );
        let strategy = GraphRecommender::new(graph);

        assert_eq!(strategy.name(), "graph");
        assert_eq!(strategy.recommend("Dune").await.unwrap(), vec!["Hyperion"]);
        assert!(strategy.recommend("Unknown").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_title_rejected_before_connecting() {
        let graph = Arc::new(MemoryGraph::new());
        graph.set_unreachable();
        let strategy = GraphRecommender::new(graph);

        assert_eq!(strategy.recommend("  ").await, Err(RecommendError::EmptyTitle));
    }

    #[tokio::test]
    async fn test_store_failure_is_typed() {
        let graph = Arc::new(MemoryGraph::new());
        graph.set_unreachable();
        let strategy = GraphRecommender::new(graph);

        let err = strategy.recommend("Dune").await.unwrap_err();
        assert!(matches!(err, RecommendError::Store(_)));
    }
}
