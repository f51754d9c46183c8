//! Video publishing, visibility and ownership tests.

use http::StatusCode;
use serde_json::json;

use crate::helpers::{PNG_BYTES, Part, TestApp};

#[tokio::test]
async fn test_publish_and_list_by_owner() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.create_user("pub").await;
    let video_id = app.publish_video(&owner, "First upload").await;

    let response = app
        .request(
            "GET",
            &format!("/api/v1/videos?userId={}&sortBy=createdAt&sortType=desc", owner.id),
            None,
            Some(&owner.access_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let items = response.data()["items"].as_array().expect("items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], video_id.to_string());
    assert_eq!(items[0]["owner"]["userName"], owner.user_name);
    assert_eq!(items[0]["duration"], 12.5);
    assert_eq!(response.data()["totalItems"], 1);
}

#[tokio::test]
async fn test_view_increments_count() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.create_user("views").await;
    let viewer = app.create_user("viewer").await;
    let video_id = app.publish_video(&owner, "Watch me").await;
    let path = format!("/api/v1/videos/{video_id}");

    let first = app
        .request("GET", &path, None, Some(&viewer.access_token))
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.data()["views"], 1);

    let second = app
        .request("GET", &path, None, Some(&viewer.access_token))
        .await;
    assert_eq!(second.data()["views"], 2);

    let history = app
        .request("GET", "/api/v1/users/history", None, Some(&viewer.access_token))
        .await;
    assert_eq!(history.status, StatusCode::OK);
    let watched = history.data().as_array().expect("history array");
    assert_eq!(watched.len(), 1);
    assert_eq!(watched[0]["id"], video_id.to_string());
}

#[tokio::test]
async fn test_unpublished_video_hidden_from_others() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.create_user("hide").await;
    let other = app.create_user("peek").await;
    let video_id = app.publish_video(&owner, "Draft").await;

    let toggled = app
        .request(
            "PATCH",
            &format!("/api/v1/videos/toggle/publish/{video_id}"),
            None,
            Some(&owner.access_token),
        )
        .await;
    assert_eq!(toggled.status, StatusCode::OK);
    assert_eq!(toggled.data()["isPublished"], false);

    let hidden = app
        .request(
            "GET",
            &format!("/api/v1/videos/{video_id}"),
            None,
            Some(&other.access_token),
        )
        .await;
    assert_eq!(hidden.status, StatusCode::NOT_FOUND);

    let own = app
        .request(
            "GET",
            &format!("/api/v1/videos/{video_id}"),
            None,
            Some(&owner.access_token),
        )
        .await;
    assert_eq!(own.status, StatusCode::OK);

    let listed = app
        .request(
            "GET",
            &format!("/api/v1/videos?userId={}", owner.id),
            None,
            Some(&other.access_token),
        )
        .await;
    assert_eq!(listed.data()["items"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_only_owner_can_modify() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.create_user("own").await;
    let other = app.create_user("intruder").await;
    let video_id = app.publish_video(&owner, "Mine").await;
    let path = format!("/api/v1/videos/{video_id}");

    let patch = app
        .multipart(
            "PATCH",
            &path,
            &[Part::Text("title", "Stolen")],
            Some(&other.access_token),
        )
        .await;
    assert_eq!(patch.status, StatusCode::FORBIDDEN);

    let delete = app
        .request("DELETE", &path, None, Some(&other.access_token))
        .await;
    assert_eq!(delete.status, StatusCode::FORBIDDEN);

    let renamed = app
        .multipart(
            "PATCH",
            &path,
            &[
                Part::Text("title", "Renamed"),
                Part::File {
                    name: "thumbnail",
                    file_name: "new.png",
                    content_type: "image/png",
                    data: PNG_BYTES,
                },
            ],
            Some(&owner.access_token),
        )
        .await;
    assert_eq!(renamed.status, StatusCode::OK);
    assert_eq!(renamed.data()["title"], "Renamed");

    let deleted = app
        .request("DELETE", &path, None, Some(&owner.access_token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let gone = app
        .request("GET", &path, None, Some(&owner.access_token))
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_video_id() {
    let Some(app) = TestApp::new().await else { return };
    let user = app.create_user("badid").await;

    let response = app
        .request("GET", "/api/v1/videos/not-a-uuid", None, Some(&user.access_token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Invalid video id");
}

#[tokio::test]
async fn test_comments_on_video() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.create_user("talk").await;
    let commenter = app.create_user("reply").await;
    let video_id = app.publish_video(&owner, "Discuss").await;
    let path = format!("/api/v1/comments/{video_id}");

    let empty = app
        .request("POST", &path, Some(json!({ "content": "  " })), Some(&commenter.access_token))
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);

    let added = app
        .request(
            "POST",
            &path,
            Some(json!({ "content": "Nice video" })),
            Some(&commenter.access_token),
        )
        .await;
    assert_eq!(added.status, StatusCode::CREATED);
    let comment_id = added.data()["id"].as_str().expect("comment id").to_string();

    let foreign_edit = app
        .request(
            "PATCH",
            &format!("/api/v1/comments/c/{comment_id}"),
            Some(json!({ "content": "Edited" })),
            Some(&owner.access_token),
        )
        .await;
    assert_eq!(foreign_edit.status, StatusCode::FORBIDDEN);

    let listed = app
        .request("GET", &path, None, Some(&owner.access_token))
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    let items = listed.data()["items"].as_array().expect("items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["content"], "Nice video");
    assert_eq!(items[0]["owner"]["userName"], commenter.user_name);
}

#[tokio::test]
async fn test_list_search_sort_and_pages() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.create_user("lister").await;
    let tag = crate::helpers::unique("tag");
    let banana = app.publish_video(&owner, &format!("Banana {tag}")).await;
    let apple = app.publish_video(&owner, &format!("Apple {tag}")).await;
    app.publish_video(&owner, "Unrelated upload").await;

    let sorted = app
        .request(
            "GET",
            &format!("/api/v1/videos?query={tag}&sortBy=title&sortType=asc"),
            None,
            Some(&owner.access_token),
        )
        .await;
    assert_eq!(sorted.status, StatusCode::OK);
    let items = sorted.data()["items"].as_array().expect("items");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], apple.to_string());
    assert_eq!(items[1]["id"], banana.to_string());

    let first_page = app
        .request(
            "GET",
            &format!("/api/v1/videos?query={tag}&sortBy=title&sortType=desc&limit=1"),
            None,
            Some(&owner.access_token),
        )
        .await;
    let data = first_page.data();
    assert_eq!(data["items"].as_array().unwrap().len(), 1);
    assert_eq!(data["items"][0]["id"], banana.to_string());
    assert_eq!(data["totalItems"], 2);
    assert_eq!(data["totalPages"], 2);
    assert_eq!(data["hasNextPage"], true);
    assert_eq!(data["hasPrevPage"], false);

    let second_page = app
        .request(
            "GET",
            &format!("/api/v1/videos?query={tag}&sortBy=title&sortType=desc&limit=1&page=2"),
            None,
            Some(&owner.access_token),
        )
        .await;
    let data = second_page.data();
    assert_eq!(data["items"][0]["id"], apple.to_string());
    assert_eq!(data["hasNextPage"], false);
    assert_eq!(data["hasPrevPage"], true);
}

#[tokio::test]
async fn test_list_rejects_unrepresentable_pages() {
    let Some(app) = TestApp::new().await else { return };
    let user = app.create_user("pager").await;

    for page in ["100000000000000000", "18446744073709551615"] {
        let response = app
            .request(
                "GET",
                &format!("/api/v1/videos?page={page}&limit=100"),
                None,
                Some(&user.access_token),
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "page {page}");
        assert_eq!(response.body["success"], false);
    }

    let overflow = app
        .request(
            "GET",
            "/api/v1/videos?page=18446744073709551616",
            None,
            Some(&user.access_token),
        )
        .await;
    assert_eq!(overflow.status, StatusCode::BAD_REQUEST);
    assert_eq!(overflow.body["success"], false);
}
