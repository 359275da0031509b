use djsportscli::spotify::ApiError;
use reqwest::StatusCode;

#[test]
fn test_unauthorized_is_not_retryable() {
    assert!(!ApiError::Unauthorized.is_retryable());
}

#[test]
fn test_rate_limited_is_retryable() {
    assert!(
        ApiError::RateLimited {
            retry_after_secs: Some(30)
        }
        .is_retryable()
    );
    assert!(
        ApiError::RateLimited {
            retry_after_secs: None
        }
        .is_retryable()
    );
}

#[test]
fn test_server_errors_are_retryable_client_errors_are_not() {
    let server = ApiError::Api {
        status: StatusCode::BAD_GATEWAY,
        message: "upstream hiccup".to_string(),
    };
    assert!(server.is_retryable());

    let client = ApiError::Api {
        status: StatusCode::NOT_FOUND,
        message: "no such playlist".to_string(),
    };
    assert!(!client.is_retryable());
}

#[test]
fn test_display_includes_the_useful_detail() {
    let err = ApiError::Api {
        status: StatusCode::FORBIDDEN,
        message: "premium required".to_string(),
    };
    let rendered = err.to_string();
    assert!(rendered.contains("403"));
    assert!(rendered.contains("premium required"));

    let rate = ApiError::RateLimited {
        retry_after_secs: Some(30),
    };
    assert!(rate.to_string().contains("30"));
}
