use djsportscli::types::{PlaylistRole, Theme, TrackArtist};
use djsportscli::utils::*;

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // Should not be empty
    assert!(!challenge.is_empty());

    // Should be deterministic - same input produces same output
    let challenge2 = generate_code_challenge(verifier);
    assert_eq!(challenge, challenge2);

    // Different input should produce different output
    let challenge3 = generate_code_challenge("different_verifier");
    assert_ne!(challenge, challenge3);

    // URL-safe base64 without padding
    assert!(!challenge.contains('='));
    assert!(!challenge.contains('+'));
    assert!(!challenge.contains('/'));
}

#[test]
fn test_parse_playlist_role_accepts_all_roles() {
    assert_eq!(parse_playlist_role("none"), Ok(PlaylistRole::None));
    assert_eq!(parse_playlist_role("hotspot"), Ok(PlaylistRole::Hotspot));
    assert_eq!(parse_playlist_role("match"), Ok(PlaylistRole::Match));
    assert_eq!(parse_playlist_role("fun-stuff"), Ok(PlaylistRole::FunStuff));
    assert_eq!(parse_playlist_role("funstuff"), Ok(PlaylistRole::FunStuff));
    assert_eq!(parse_playlist_role("pre-match"), Ok(PlaylistRole::PreMatch));
    assert_eq!(parse_playlist_role("prematch"), Ok(PlaylistRole::PreMatch));
}

#[test]
fn test_parse_playlist_role_is_case_insensitive() {
    assert_eq!(parse_playlist_role("Hotspot"), Ok(PlaylistRole::Hotspot));
    assert_eq!(parse_playlist_role("MATCH"), Ok(PlaylistRole::Match));
}

#[test]
fn test_parse_playlist_role_rejects_unknown() {
    assert!(parse_playlist_role("warmup").is_err());
    assert!(parse_playlist_role("").is_err());
}

#[test]
fn test_parse_theme() {
    assert_eq!(parse_theme("light"), Ok(Theme::Light));
    assert_eq!(parse_theme("Dark"), Ok(Theme::Dark));
    assert_eq!(parse_theme("system"), Ok(Theme::System));
    assert!(parse_theme("solarized").is_err());
}

#[test]
fn test_parse_polling_interval_accepts_supported_values() {
    for ms in [0, 1000, 2000, 3000, 5000, 10000, 15000] {
        assert_eq!(parse_polling_interval(&ms.to_string()), Ok(ms));
    }
}

#[test]
fn test_parse_polling_interval_rejects_unsupported_values() {
    assert!(parse_polling_interval("500").is_err());
    assert!(parse_polling_interval("4000").is_err());
    assert!(parse_polling_interval("abc").is_err());
    assert!(parse_polling_interval("-1").is_err());
}

#[test]
fn test_parse_start_offset_plain_number_is_milliseconds() {
    assert_eq!(parse_start_offset("0"), Ok(0));
    assert_eq!(parse_start_offset("45000"), Ok(45_000));
    assert_eq!(parse_start_offset("125000"), Ok(125_000));
}

#[test]
fn test_parse_start_offset_accepts_minutes_and_seconds() {
    assert_eq!(parse_start_offset("0:45"), Ok(45_000));
    assert_eq!(parse_start_offset("1:05"), Ok(65_000));
    assert_eq!(parse_start_offset("10:00"), Ok(600_000));
}

#[test]
fn test_parse_start_offset_rejects_malformed_input() {
    assert!(parse_start_offset("abc").is_err());
    assert!(parse_start_offset("1:60").is_err());
    assert!(parse_start_offset("1:xx").is_err());
    assert!(parse_start_offset("-500").is_err());
    assert!(parse_start_offset("").is_err());
}

#[test]
fn test_format_ms() {
    assert_eq!(format_ms(0), "0:00");
    assert_eq!(format_ms(999), "0:00");
    assert_eq!(format_ms(1000), "0:01");
    assert_eq!(format_ms(65_000), "1:05");
    assert_eq!(format_ms(600_000), "10:00");
}

#[test]
fn test_format_artists() {
    let artists = vec![
        TrackArtist {
            id: Some("a1".to_string()),
            name: "First".to_string(),
        },
        TrackArtist {
            id: None,
            name: "Second".to_string(),
        },
    ];

    assert_eq!(format_artists(&artists), "First, Second");
    assert_eq!(format_artists(&[]), "");
}
