//! Integration tests for the recommendation strategies.
//!
//! These tests run the graph and remote strategies together through a
//! RecommenderSet, against an in-memory graph and a mock HTTP endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::post;
use catalog::Book;
use graph_store::{CatalogStore, GraphRecommender, MemoryGraph};
use llm_client::{LlmClientError, LlmRecommenderClient};
use pipeline::{RecommendError, RecommenderSet};
use tokio::net::TcpListener;

/// Start an endpoint that always answers with `status` and `body`
async fn start_endpoint(
    status: StatusCode,
    body: &'static str,
) -> (String, tokio::task::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().route("/recommend", post(move || async move { (status, body) }));

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}/recommend", addr), handle)
}

async fn seeded_graph() -> Arc<MemoryGraph> {
    let graph = Arc::new(MemoryGraph::new());
    let hp = Book::new("Harry Potter", "J.K. Rowling");
    CatalogStore::new(graph.clone())
        .upsert(&[hp.clone(), Book::new("Percy Jackson", "Rick Riordan")])
        .await
        .unwrap();
    graph.add_similar(&hp, &Book::new("Percy Jackson", "Rick Riordan"));
    graph
}

fn remote(url: Option<String>) -> LlmRecommenderClient {
    LlmRecommenderClient::new(url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_both_strategies_succeed() {
    let graph = seeded_graph().await;
    let (url, handle) = start_endpoint(
        StatusCode::OK,
        r#"{"recommendations": ["The Hobbit", "Eragon"]}"#,
    )
    .await;

    let set = RecommenderSet::new()
        .add_recommender(GraphRecommender::new(graph.clone()))
        .add_recommender(remote(Some(url)));

    let outcomes = set.recommend_all("Harry Potter").await;

    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].strategy, "graph");
    assert_eq!(outcomes[0].result, Ok(vec!["Percy Jackson".to_string()]));
    assert_eq!(outcomes[1].strategy, "remote");
    assert_eq!(
        outcomes[1].result,
        Ok(vec!["The Hobbit".to_string(), "Eragon".to_string()])
    );
    assert_eq!(graph.open_sessions(), 0);

    handle.abort();
}

#[tokio::test]
async fn test_remote_failure_keeps_graph_results() {
    let graph = seeded_graph().await;
    let (url, handle) = start_endpoint(StatusCode::OK, r#"{"status": "ok"}"#).await;

    let set = RecommenderSet::new()
        .add_recommender(GraphRecommender::new(graph.clone()))
        .add_recommender(remote(Some(url)));

    let outcomes = set.recommend_all("Harry Potter").await;

    assert_eq!(outcomes[0].result, Ok(vec!["Percy Jackson".to_string()]));
    assert!(matches!(
        outcomes[1].result,
        Err(RecommendError::Remote(LlmClientError::InvalidResponse(_)))
    ));

    handle.abort();
}

#[tokio::test]
async fn test_graph_failure_keeps_remote_results() {
    let graph = seeded_graph().await;
    graph.set_unreachable();
    let (url, handle) =
        start_endpoint(StatusCode::OK, r#"{"recommendations": ["Eragon"]}"#).await;

    let set = RecommenderSet::new()
        .add_recommender(GraphRecommender::new(graph.clone()))
        .add_recommender(remote(Some(url)));

    let outcomes = set.recommend_all("Harry Potter").await;

    assert!(matches!(outcomes[0].result, Err(RecommendError::Store(_))));
    assert_eq!(outcomes[1].result, Ok(vec!["Eragon".to_string()]));

    handle.abort();
}

#[tokio::test]
async fn test_unknown_book_gives_empty_graph_list() {
    let graph = seeded_graph().await;

    let set = RecommenderSet::new()
        .add_recommender(GraphRecommender::new(graph))
        .add_recommender(remote(None));

    let outcomes = set.recommend_all("Not A Real Book").await;

    assert_eq!(outcomes[0].result, Ok(Vec::new()));
    assert!(matches!(
        outcomes[1].result,
        Err(RecommendError::Remote(LlmClientError::EndpointUnreachable(_)))
    ));
}
