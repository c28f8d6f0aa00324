//! Integration tests for decoding Twitch response bodies

mod common;

use twitch_clip::twitch::{classify_response, AuthResponse, ClipCreateResponse, ClipsResponse};
use twitch_clip::ClipError;

#[test]
fn clip_record_decodes_field_for_field() {
    let body = common::clip_body("FancyClip", 1500);

    let clips: ClipsResponse = serde_json::from_str(&body).unwrap();
    let clip = &clips.data[0];

    assert_eq!(clip.id, "FancyClip");
    assert_eq!(clip.broadcaster_id, "44445592");
    assert_eq!(clip.creator_id, "12826");
    assert_eq!(clip.embed_url, "https://clips.twitch.tv/embed?clip=FancyClip");
    assert_eq!(clip.game_id, "509658");
    assert_eq!(clip.language, "en");
    assert_eq!(
        clip.thumbnail_url,
        "https://clips-media-assets2.twitch.tv/FancyClip-preview-480x272.jpg"
    );
    assert_eq!(clip.title, "Test Clip");
    assert_eq!(clip.url, "https://clips.twitch.tv/FancyClip");
    assert_eq!(clip.video_id, "");
    assert_eq!(clip.view_count, 1500);
    assert_eq!(clip.created_at.to_rfc3339(), "2024-03-01T12:00:00+00:00");

    let reencoded: ClipsResponse =
        serde_json::from_str(&serde_json::to_string(&clips).unwrap()).unwrap();
    assert_eq!(reencoded, clips);
}

#[test]
fn auth_response_decodes() {
    let auth: AuthResponse = serde_json::from_str(
        r#"{"access_token":"abc","refresh_token":"def","scope":["clips:edit"]}"#,
    )
    .unwrap();

    assert_eq!(auth.access_token, "abc");
    assert_eq!(auth.refresh_token, "def");
    assert_eq!(auth.scope, vec!["clips:edit".to_string()]);
}

#[test]
fn clip_create_response_decodes() {
    let created: ClipCreateResponse =
        serde_json::from_str(r#"{"data":[{"id":"X","edit_url":"Y"}]}"#).unwrap();

    assert_eq!(created.data.len(), 1);
    assert_eq!(created.data[0].id, "X");
    assert_eq!(created.data[0].edit_url, "Y");
}

#[test]
fn classify_is_usable_on_its_own() {
    assert_eq!(classify_response(202, "{}", 202).unwrap(), "{}");

    let err = classify_response(
        401,
        r#"{"error":"Unauthorized","message":"Token invalid","status":401}"#,
        200,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ClipError::Api { ref message, status: 401, .. } if message == "Token invalid"
    ));
}
