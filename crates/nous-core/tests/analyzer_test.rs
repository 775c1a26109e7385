mod common;

use std::sync::Arc;

use common::{Scripted, StubClient};
use nous_core::StateAnalyzer;

const MODEL: &str = "primary-model";

fn analyzer(reply: Scripted) -> StateAnalyzer {
    StateAnalyzer::new(Arc::new(StubClient::new(vec![(MODEL, reply)])), MODEL)
}

#[tokio::test]
async fn missing_metrics_default_to_neutral_midpoint() {
    let analyzer = analyzer(Scripted::Reply(
        r#"{"metrics": {"dopamine": 8}, "analysis": "ok"}"#,
    ));

    let result = analyzer.analyze("journal text").await.unwrap().unwrap();
    assert_eq!(result.metrics.dopamine, 8.0);
    assert_eq!(result.metrics.serotonin, 5.0);
    assert_eq!(result.metrics.motivation, 5.0);
    assert_eq!(result.analysis, "ok");
}

#[tokio::test]
async fn chatty_reply_with_fences_still_parses() {
    let analyzer = analyzer(Scripted::Reply(
        "Here you go:\n```json\n{\"metrics\": {\"cortisol\": 7.5}, \"analysis\": \"You sound stressed.\"}\n```",
    ));

    let result = analyzer.analyze("journal text").await.unwrap().unwrap();
    assert_eq!(result.metrics.cortisol, 7.5);
    assert_eq!(result.analysis, "You sound stressed.");
}

#[tokio::test]
async fn reply_without_braces_yields_no_result() {
    let analyzer = analyzer(Scripted::Reply("Sure! Here's your analysis"));
    let result = analyzer.analyze("journal text").await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn object_without_metrics_is_all_neutral() {
    let analyzer = analyzer(Scripted::Reply(r#"{"analysis": "calm day"}"#));
    let result = analyzer.analyze("journal text").await.unwrap().unwrap();
    assert_eq!(result.metrics.dopamine, 5.0);
    assert_eq!(result.metrics.energy, 5.0);
    assert_eq!(result.analysis, "calm day");
}

#[tokio::test]
async fn transport_failure_propagates() {
    let analyzer = analyzer(Scripted::Fail);
    assert!(analyzer.analyze("journal text").await.is_err());
}
