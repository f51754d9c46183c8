//! Tweets, channel dashboards, liked videos, subscribed channels and
//! account updates.

use http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_tweet_lifecycle() {
    let Some(app) = TestApp::new().await else { return };
    let author = app.create_user("tweeter").await;
    let other = app.create_user("reader").await;

    let empty = app
        .request(
            "POST",
            "/api/v1/tweets",
            Some(json!({ "content": "   " })),
            Some(&author.access_token),
        )
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
    assert_eq!(empty.body["success"], false);

    let created = app
        .request(
            "POST",
            "/api/v1/tweets",
            Some(json!({ "content": "First post" })),
            Some(&author.access_token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.data()["content"], "First post");
    let tweet_id = created.data()["id"].as_str().unwrap().to_string();

    let list = app
        .request(
            "GET",
            &format!("/api/v1/tweets/user/{}", author.id),
            None,
            Some(&other.access_token),
        )
        .await;
    assert_eq!(list.status, StatusCode::OK);
    let tweets = list.data().as_array().unwrap();
    assert_eq!(tweets.len(), 1);
    assert_eq!(tweets[0]["id"], tweet_id.as_str());
    assert_eq!(tweets[0]["owner"]["userName"], author.user_name);
    assert_eq!(tweets[0]["likesCount"], 0);
    assert_eq!(tweets[0]["isLiked"], false);

    let path = format!("/api/v1/tweets/{tweet_id}");
    let foreign_edit = app
        .request(
            "PATCH",
            &path,
            Some(json!({ "content": "Hijacked" })),
            Some(&other.access_token),
        )
        .await;
    assert_eq!(foreign_edit.status, StatusCode::FORBIDDEN);

    let foreign_delete = app
        .request("DELETE", &path, None, Some(&other.access_token))
        .await;
    assert_eq!(foreign_delete.status, StatusCode::FORBIDDEN);

    let edited = app
        .request(
            "PATCH",
            &path,
            Some(json!({ "content": "Edited post" })),
            Some(&author.access_token),
        )
        .await;
    assert_eq!(edited.status, StatusCode::OK);
    assert_eq!(edited.data()["content"], "Edited post");

    let deleted = app
        .request("DELETE", &path, None, Some(&author.access_token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let gone = app
        .request("DELETE", &path, None, Some(&author.access_token))
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_user_tweets_unknown_user() {
    let Some(app) = TestApp::new().await else { return };
    let user = app.create_user("tweetless").await;

    let response = app
        .request(
            "GET",
            &format!("/api/v1/tweets/user/{}", uuid::Uuid::new_v4()),
            None,
            Some(&user.access_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_dashboard_channel_videos() {
    let Some(app) = TestApp::new().await else { return };
    let channel = app.create_user("dash").await;
    let viewer = app.create_user("dashview").await;
    let video_id = app.publish_video(&channel, "Dashboard clip").await;

    app.request(
        "POST",
        &format!("/api/v1/likes/toggle/v/{video_id}"),
        None,
        Some(&viewer.access_token),
    )
    .await;

    let response = app
        .request(
            "GET",
            &format!("/api/v1/dashboard/videos/{}", channel.id),
            None,
            Some(&channel.access_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let videos = response.data().as_array().unwrap();
    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0]["id"], video_id.to_string());
    assert_eq!(videos[0]["likesCount"], 1);
    assert_eq!(videos[0]["commentsCount"], 0);

    let missing = app
        .request(
            "GET",
            &format!("/api/v1/dashboard/videos/{}", uuid::Uuid::new_v4()),
            None,
            Some(&channel.access_token),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_liked_videos_listing() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.create_user("likedown").await;
    let fan = app.create_user("likedfan").await;
    let video_id = app.publish_video(&owner, "Liked clip").await;

    let empty = app
        .request("GET", "/api/v1/likes/videos", None, Some(&fan.access_token))
        .await;
    assert_eq!(empty.status, StatusCode::OK);
    assert_eq!(empty.data()["videosCount"], 0);
    assert_eq!(empty.data()["likedVideos"].as_array().unwrap().len(), 0);

    app.request(
        "POST",
        &format!("/api/v1/likes/toggle/v/{video_id}"),
        None,
        Some(&fan.access_token),
    )
    .await;

    let list = app
        .request("GET", "/api/v1/likes/videos", None, Some(&fan.access_token))
        .await;
    assert_eq!(list.data()["videosCount"], 1);
    let liked = list.data()["likedVideos"].as_array().unwrap();
    assert_eq!(liked.len(), 1);
    assert_eq!(liked[0]["id"], video_id.to_string());
}

#[tokio::test]
async fn test_subscribed_channels_include_latest_video() {
    let Some(app) = TestApp::new().await else { return };
    let channel = app.create_user("latest").await;
    let viewer = app.create_user("follower").await;
    app.publish_video(&channel, "Older upload").await;
    let newest = app.publish_video(&channel, "Newest upload").await;

    app.request(
        "POST",
        &format!("/api/v1/subscriptions/c/{}", channel.id),
        None,
        Some(&viewer.access_token),
    )
    .await;

    let response = app
        .request(
            "GET",
            &format!("/api/v1/subscriptions/u/{}", viewer.id),
            None,
            Some(&viewer.access_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let channels = response.data().as_array().unwrap();
    assert_eq!(channels.len(), 1);
    assert_eq!(channels[0]["channel"]["userName"], channel.user_name);
    assert_eq!(channels[0]["subscribersCount"], 1);
    assert_eq!(channels[0]["latestVideo"]["id"], newest.to_string());
    assert_eq!(channels[0]["latestVideo"]["title"], "Newest upload");
}

#[tokio::test]
async fn test_update_account() {
    let Some(app) = TestApp::new().await else { return };
    let user = app.create_user("acct").await;
    let other = app.create_user("taken").await;

    let missing = app
        .request(
            "PATCH",
            "/api/v1/users/update-account",
            Some(json!({ "fullName": "Only Name" })),
            Some(&user.access_token),
        )
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);

    let taken = app
        .request(
            "PATCH",
            "/api/v1/users/update-account",
            Some(json!({
                "fullName": "New Name",
                "email": format!("{}@example.com", other.user_name),
            })),
            Some(&user.access_token),
        )
        .await;
    assert_eq!(taken.status, StatusCode::CONFLICT);
    assert_eq!(taken.body["success"], false);

    let new_email = format!("{}-new@example.com", user.user_name);
    let updated = app
        .request(
            "PATCH",
            "/api/v1/users/update-account",
            Some(json!({ "fullName": "New Name", "email": new_email.to_uppercase() })),
            Some(&user.access_token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.data()["fullName"], "New Name");
    assert_eq!(updated.data()["email"], new_email);
}
