use super::*;

#[test]
fn test_provider_error_api_error() {
    let err = ProviderError::ApiError {
        status: 400,
        message: "API key not valid".to_string(),
    };
    assert!(err.to_string().contains("400"));
    assert!(err.to_string().contains("API key not valid"));
}

#[test]
fn test_provider_error_resource_exhausted() {
    let err = ProviderError::ResourceExhausted("Quota exceeded".to_string());
    assert!(err.to_string().contains("Resource exhausted"));
    assert!(err.to_string().contains("Quota exceeded"));
}

#[test]
fn test_provider_error_blocked() {
    let err = ProviderError::Blocked("SAFETY".to_string());
    assert!(err.to_string().contains("SAFETY"));
}

#[test]
fn test_provider_error_timeout() {
    let err = ProviderError::Timeout(120);
    assert!(err.to_string().contains("Timeout"));
    assert!(err.to_string().contains("120"));
}

#[test]
fn test_transient_errors() {
    assert!(ProviderError::Timeout(120).is_transient());
    assert!(ProviderError::ServiceUnavailable("overloaded".to_string()).is_transient());
    assert!(ProviderError::Network("connection reset".to_string()).is_transient());
    assert!(ProviderError::InvalidResponse("not json".to_string()).is_transient());
}

#[test]
fn test_categorical_errors() {
    assert!(!ProviderError::ResourceExhausted("quota".to_string()).is_transient());
    assert!(!ProviderError::Blocked("SAFETY".to_string()).is_transient());
    assert!(!ProviderError::AuthenticationFailed("bad key".to_string()).is_transient());
    assert!(!ProviderError::InvalidRequest("bad".to_string()).is_transient());
    assert!(!ProviderError::ApiError {
        status: 404,
        message: "model not found".to_string()
    }
    .is_transient());
}

#[test]
fn test_provider_error_debug() {
    let err = ProviderError::Network("test".to_string());
    let debug_str = format!("{:?}", err);
    assert!(debug_str.contains("Network"));
}
