use djsportscli::management::TokenManager;

// Clearing the token is idempotent: a missing token file is not an error,
// so signing out twice in a row succeeds both times.
#[tokio::test]
async fn test_clear_token_is_idempotent() {
    assert!(TokenManager::clear().await.is_ok());
    assert!(TokenManager::clear().await.is_ok());
}
