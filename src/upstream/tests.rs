use super::*;

#[test]
fn test_parse_buckets() {
    let body = br#"[
        {"games": [
            {"conceptId": 1, "name": "Alpha", "imageUrl": "https://img/1.png"},
            {"conceptId": 2, "name": "Beta", "imageUrl": "https://img/2.png", "extra": true}
        ]},
        {"title": "second", "games": [
            {"conceptId": 3, "name": "Gamma", "imageUrl": "https://img/3.png"}
        ]}
    ]"#;

    let buckets = parse_buckets(body).unwrap();

    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0].games.len(), 2);
    assert_eq!(
        buckets[0].games[1],
        RawGame {
            concept_id: 2,
            name: "Beta".to_string(),
            image_url: "https://img/2.png".to_string(),
        }
    );
    assert_eq!(buckets[1].games[0].concept_id, 3);
}

#[test]
fn test_missing_or_malformed_games_is_empty_bucket() {
    let body = br#"[
        {"title": "no games here"},
        {"games": null},
        {"games": "nope"},
        {"games": [{"conceptId": "x"}]},
        42
    ]"#;

    let buckets = parse_buckets(body).unwrap();

    assert_eq!(buckets.len(), 5);
    assert!(buckets.iter().all(|b| b.games.is_empty()));
}

#[test]
fn test_malformed_entries_are_skipped_individually() {
    let body = br#"[
        {"games": [
            {"conceptId": 1, "name": "Alpha", "imageUrl": "https://img/1.png"},
            {"conceptId": 2, "name": "Beta", "imageUrl": null},
            {"name": "no id", "imageUrl": "https://img/x.png"},
            "not a game",
            {"conceptId": 3, "name": "Gamma", "imageUrl": "https://img/3.png"}
        ]}
    ]"#;

    let buckets = parse_buckets(body).unwrap();

    assert_eq!(buckets.len(), 1);
    let ids: Vec<u64> = buckets[0].games.iter().map(|g| g.concept_id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn test_null_body_is_empty() {
    assert!(parse_buckets(b"null").unwrap().is_empty());
    assert!(parse_buckets(b"[]").unwrap().is_empty());
}

#[test]
fn test_non_array_body_is_malformed() {
    let err = parse_buckets(br#"{"games": []}"#).unwrap_err();
    assert!(matches!(err, UpstreamError::Decode(_)));
    assert!(err.to_string().contains("an object"));

    let err = parse_buckets(b"<html>oops</html>").unwrap_err();
    assert!(matches!(err, UpstreamError::Decode(_)));
}
