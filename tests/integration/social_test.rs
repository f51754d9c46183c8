//! Playlist, like and subscription tests.

use http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_playlist_lifecycle() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.create_user("pl").await;
    let video_id = app.publish_video(&owner, "Track one").await;

    let created = app
        .request(
            "POST",
            "/api/v1/playlist",
            Some(json!({ "name": "Favourites", "description": "Best of" })),
            Some(&owner.access_token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let playlist_id = created.data()["id"].as_str().expect("playlist id").to_string();

    let add_path = format!("/api/v1/playlist/add/{video_id}/{playlist_id}");
    let added = app
        .request("PATCH", &add_path, None, Some(&owner.access_token))
        .await;
    assert_eq!(added.status, StatusCode::OK);
    assert_eq!(added.data()["totalVideos"], 1);

    let duplicate = app
        .request("PATCH", &add_path, None, Some(&owner.access_token))
        .await;
    assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);
    assert_eq!(duplicate.body["message"], "Video already exists in playlist");

    let detail = app
        .request(
            "GET",
            &format!("/api/v1/playlist/{playlist_id}"),
            None,
            Some(&owner.access_token),
        )
        .await;
    assert_eq!(detail.status, StatusCode::OK);
    let videos = detail.data()["videos"].as_array().expect("videos");
    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0]["id"], video_id.to_string());
    assert_eq!(detail.data()["owner"]["userName"], owner.user_name);

    let removed = app
        .request(
            "PATCH",
            &format!("/api/v1/playlist/remove/{video_id}/{playlist_id}"),
            None,
            Some(&owner.access_token),
        )
        .await;
    assert_eq!(removed.status, StatusCode::OK);
    assert_eq!(removed.data()["totalVideos"], 0);
}

#[tokio::test]
async fn test_playlist_ownership() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.create_user("plown").await;
    let other = app.create_user("plother").await;
    let video_id = app.publish_video(&other, "Their video").await;

    let created = app
        .request(
            "POST",
            "/api/v1/playlist",
            Some(json!({ "name": "Private", "description": "Mine only" })),
            Some(&owner.access_token),
        )
        .await;
    let playlist_id = created.data()["id"].as_str().expect("playlist id").to_string();

    let foreign_add = app
        .request(
            "PATCH",
            &format!("/api/v1/playlist/add/{video_id}/{playlist_id}"),
            None,
            Some(&other.access_token),
        )
        .await;
    assert_eq!(foreign_add.status, StatusCode::FORBIDDEN);

    let foreign_list = app
        .request(
            "GET",
            &format!("/api/v1/playlist/user/{}", owner.id),
            None,
            Some(&other.access_token),
        )
        .await;
    assert_eq!(foreign_list.status, StatusCode::FORBIDDEN);

    let own_list = app
        .request(
            "GET",
            &format!("/api/v1/playlist/user/{}", owner.id),
            None,
            Some(&owner.access_token),
        )
        .await;
    assert_eq!(own_list.status, StatusCode::OK);
    assert_eq!(own_list.data().as_array().map(Vec::len), Some(1));

    let missing = app
        .request(
            "POST",
            "/api/v1/playlist",
            Some(json!({ "name": "No description" })),
            Some(&owner.access_token),
        )
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_like_toggle() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.create_user("likeown").await;
    let fan = app.create_user("fan").await;
    let video_id = app.publish_video(&owner, "Likeable").await;
    let path = format!("/api/v1/likes/toggle/v/{video_id}");

    let liked = app.request("POST", &path, None, Some(&fan.access_token)).await;
    assert_eq!(liked.status, StatusCode::OK);
    assert_eq!(liked.data()["isLiked"], true);

    let list = app
        .request("GET", "/api/v1/likes/videos", None, Some(&fan.access_token))
        .await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(list.data()["videosCount"], 1);

    let unliked = app.request("POST", &path, None, Some(&fan.access_token)).await;
    assert_eq!(unliked.data()["isLiked"], false);

    let missing = app
        .request(
            "POST",
            &format!("/api/v1/likes/toggle/v/{}", uuid::Uuid::new_v4()),
            None,
            Some(&fan.access_token),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_subscriptions() {
    let Some(app) = TestApp::new().await else { return };
    let channel = app.create_user("chan").await;
    let viewer = app.create_user("sub").await;

    let own = app
        .request(
            "POST",
            &format!("/api/v1/subscriptions/c/{}", channel.id),
            None,
            Some(&channel.access_token),
        )
        .await;
    assert_eq!(own.status, StatusCode::BAD_REQUEST);

    let subscribed = app
        .request(
            "POST",
            &format!("/api/v1/subscriptions/c/{}", channel.id),
            None,
            Some(&viewer.access_token),
        )
        .await;
    assert_eq!(subscribed.status, StatusCode::OK);
    assert_eq!(subscribed.data()["subscribed"], true);

    let profile = app
        .request(
            "GET",
            &format!("/api/v1/users/c/{}", channel.user_name),
            None,
            Some(&viewer.access_token),
        )
        .await;
    assert_eq!(profile.status, StatusCode::OK);
    assert_eq!(profile.data()["subscribersCount"], 1);
    assert_eq!(profile.data()["isSubscribed"], true);

    let stats = app
        .request(
            "GET",
            &format!("/api/v1/dashboard/stats/{}", channel.id),
            None,
            Some(&viewer.access_token),
        )
        .await;
    assert_eq!(stats.status, StatusCode::OK);
    assert_eq!(stats.data()["totalSubscribers"], 1);
}
