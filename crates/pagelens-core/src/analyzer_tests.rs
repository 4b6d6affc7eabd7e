use super::*;
use crate::error::WARNING_MARKER;
use crate::test_support::ScriptedProvider;
use tokio::time::Instant;

fn analyzer(provider: &Arc<ScriptedProvider>) -> ContentAnalyzer {
    ContentAnalyzer::new(provider.clone(), AnalyzerSettings::default())
}

#[tokio::test]
async fn test_empty_content_warns_without_network_call() {
    let provider = Arc::new(ScriptedProvider::answering("unused"));
    let analyzer = analyzer(&provider);

    let answer = analyzer
        .analyze("", "What is this?", &[])
        .await
        .unwrap_err()
        .to_string();
    assert!(answer.starts_with(WARNING_MARKER));
    assert!(answer.contains("No website content"));
    assert_eq!(provider.calls(), 0);
}

#[test]
fn test_check_input_order() {
    assert_eq!(ContentAnalyzer::check_input("", " "), Err(AnalysisError::NoContent));
    assert_eq!(ContentAnalyzer::check_input("text", "\t"), Err(AnalysisError::EmptyQuery));
    assert_eq!(ContentAnalyzer::check_input("text", "q"), Ok(()));
}

#[tokio::test]
async fn test_empty_query_warns_without_network_call() {
    let provider = Arc::new(ScriptedProvider::answering("unused"));
    let analyzer = analyzer(&provider);

    let result = analyzer.analyze("page text", "  ", &[]).await;
    assert_eq!(result, Err(AnalysisError::EmptyQuery));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_success_is_trimmed() {
    let provider = Arc::new(ScriptedProvider::answering("\n  The page is about cats.  \n"));
    let analyzer = analyzer(&provider);

    let result = analyzer.analyze("Cats are great.", "Topic?", &[]).await;
    assert_eq!(result, Ok("The page is about cats.".to_string()));
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_request_carries_model_and_sampling_params() {
    let provider = Arc::new(ScriptedProvider::answering("ok"));
    let analyzer = analyzer(&provider);
    analyzer.analyze("text", "q", &[]).await.unwrap();

    let request = provider.last_request().unwrap();
    assert_eq!(request.model, "gemini-1.5-flash-latest");
    assert!((request.params.temperature - 0.3).abs() < f32::EPSILON);
    assert!((request.params.top_p - 0.95).abs() < f32::EPSILON);
    assert_eq!(request.params.candidate_count, 1);
    assert_eq!(request.params.timeout_seconds, 120);
}

#[tokio::test(start_paused = true)]
async fn test_two_timeouts_then_success() {
    let provider = Arc::new(ScriptedProvider::new(vec![
        Err(ProviderError::Timeout(120)),
        Err(ProviderError::Timeout(120)),
        Ok(Generation::text("Finally")),
    ]));
    let analyzer = analyzer(&provider);
    let start = Instant::now();

    let result = analyzer.analyze("text", "q", &[]).await;
    assert_eq!(result, Ok("Finally".to_string()));
    assert_eq!(provider.calls(), 3);
    assert_eq!(start.elapsed(), Duration::from_secs(15));
}

#[tokio::test(start_paused = true)]
async fn test_quota_exhaustion_fails_after_one_attempt() {
    let provider = Arc::new(ScriptedProvider::new(vec![Err(
        ProviderError::ResourceExhausted("Quota exceeded".to_string()),
    )]));
    let analyzer = analyzer(&provider);
    let start = Instant::now();

    let result = analyzer.analyze("text", "q", &[]).await;
    assert!(matches!(result, Err(AnalysisError::QuotaExhausted(_))));
    assert_eq!(provider.calls(), 1);
    assert_eq!(start.elapsed(), Duration::ZERO);
    assert!(result.unwrap_err().to_string().starts_with(WARNING_MARKER));
}

#[tokio::test(start_paused = true)]
async fn test_blocked_generation_is_not_retried() {
    let provider = Arc::new(ScriptedProvider::new(vec![Ok(Generation::blocked("SAFETY"))]));
    let analyzer = analyzer(&provider);

    let result = analyzer.analyze("text", "q", &[]).await;
    assert_eq!(result, Err(AnalysisError::Blocked("SAFETY".to_string())));
    assert_eq!(provider.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_categorical_api_error_is_not_retried() {
    let provider = Arc::new(ScriptedProvider::new(vec![Err(
        ProviderError::InvalidRequest("bad argument".to_string()),
    )]));
    let analyzer = analyzer(&provider);

    let result = analyzer.analyze("text", "q", &[]).await;
    assert!(matches!(result, Err(AnalysisError::Api(ref m)) if m.contains("bad argument")));
    assert_eq!(provider.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_empty_responses_exhaust_retries() {
    let provider = Arc::new(ScriptedProvider::new(vec![
        Ok(Generation::default()),
        Ok(Generation::text("   ")),
        Err(ProviderError::ServiceUnavailable("overloaded".to_string())),
    ]));
    let analyzer = analyzer(&provider);
    let start = Instant::now();

    let answer = analyzer.analyze("text", "q", &[]).await.unwrap_err().to_string();
    assert_eq!(
        answer,
        "⚠️ Analysis failed after multiple retries or returned no relevant content."
    );
    assert_eq!(provider.calls(), 3);
    assert_eq!(start.elapsed(), Duration::from_secs(15));
}

#[tokio::test(start_paused = true)]
async fn test_provider_panic_is_contained() {
    let provider = Arc::new(ScriptedProvider::panicking());
    let analyzer = analyzer(&provider);

    let result = analyzer.analyze("text", "q", &[]).await;
    assert_eq!(result, Err(AnalysisError::RetriesExhausted { attempts: 3 }));
    assert_eq!(provider.calls(), 3);
}

#[tokio::test]
async fn test_oversized_content_is_truncated_in_prompt() {
    let provider = Arc::new(ScriptedProvider::answering("ok"));
    let analyzer = analyzer(&provider);
    let content = format!("{}{}", "x".repeat(MAX_CONTENT_CHARS), "TAIL_MARKER");

    analyzer.analyze(&content, "q", &[]).await.unwrap();

    let prompt = provider.last_prompt().unwrap();
    let expected = format!("--- START ---\n{}\n--- END ---", "x".repeat(MAX_CONTENT_CHARS));
    assert!(prompt.contains(&expected));
    assert!(!prompt.contains("TAIL_MARKER"));
}

#[tokio::test]
async fn test_history_reaches_prompt() {
    let provider = Arc::new(ScriptedProvider::answering("ok"));
    let analyzer = analyzer(&provider);
    let history = vec!["Who wrote it?".to_string(), "Jane.".to_string()];

    analyzer.analyze("text", "When?", &history).await.unwrap();

    let prompt = provider.last_prompt().unwrap();
    assert!(prompt.contains("User: Who wrote it?\nAssistant: Jane."));
}

#[test]
fn test_settings_from_config() {
    let mut analyzer_config = AnalyzerConfig::default();
    analyzer_config.max_retries = 5;
    analyzer_config.retry_delay_secs = 2;
    analyzer_config.model = "gemini-2.0-flash".to_string();
    let mut session_config = SessionConfig::default();
    session_config.history_window = 6;

    let settings = AnalyzerSettings::from_config(&analyzer_config, &session_config);
    assert_eq!(settings.model, "gemini-2.0-flash");
    assert_eq!(settings.retry, RetryPolicy::new(5, Duration::from_secs(2)));
    assert_eq!(settings.history_window, 6);
    assert_eq!(settings.params.candidate_count, 1);
}

#[test]
fn test_classify_attempt() {
    assert_eq!(
        classify_attempt(Ok(Generation::text(" hi "))),
        RetryDecision::Succeed("hi".to_string())
    );
    assert!(matches!(
        classify_attempt(Err(ProviderError::Network("reset".into()))),
        RetryDecision::Retry(_)
    ));
    assert!(matches!(
        classify_attempt(Err(ProviderError::AuthenticationFailed("key".into()))),
        RetryDecision::Abort(AnalysisError::Api(_))
    ));
    assert!(matches!(
        classify_attempt(Err(ProviderError::Blocked("OTHER".into()))),
        RetryDecision::Abort(AnalysisError::Blocked(_))
    ));
}

#[test]
fn test_reports_provider_and_settings() {
    let provider = Arc::new(ScriptedProvider::answering("unused"));
    let analyzer = analyzer(&provider);
    assert_eq!(analyzer.provider_id(), "scripted");
    assert_eq!(analyzer.settings().history_window, HISTORY_WINDOW);
}
