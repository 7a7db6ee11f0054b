//! Content managers and banner uploads against the mock service

mod common;

use common::Harness;
use reqwest::{Method, StatusCode};
use reward_client::{ClientError, ContentDraft, ContentKind, MediaConfig, RewardForm, Toast};

fn draft(title: &str, body: &str) -> ContentDraft {
    ContentDraft {
        title: title.to_string(),
        body: Some(body.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_create_toggle_and_filter() {
    let h = Harness::start().await;
    let posts = h.client.content(ContentKind::Post);

    posts.create(&draft("Launch week", "Five new features")).await.unwrap();
    posts.create(&draft("Hiring", "Backend engineers wanted")).await.unwrap();
    assert_eq!(posts.items().len(), 2);

    let hiring = posts.filter("BACKEND", false);
    assert_eq!(hiring.len(), 1);
    let id = hiring[0].id.clone();

    posts.toggle_visibility(&id).await.unwrap();
    assert!(!posts.get(&id).unwrap().is_visible);
    assert_eq!(posts.filter("", true).len(), 1);
    assert_eq!(posts.filter("", false).len(), 2);
    assert_eq!(h.notifier.last(), Some(Toast::success("Now hidden")));
}

#[tokio::test]
async fn test_kinds_are_separate_collections() {
    let h = Harness::start().await;
    h.client
        .content(ContentKind::Webinar)
        .create(&draft("Rust 101", "Live session"))
        .await
        .unwrap();

    let ads = h.client.content(ContentKind::Ad);
    assert!(ads.refresh().await.unwrap().is_empty());
    assert_eq!(h.state().count(Method::POST, "/api/webinars"), 1);
    assert_eq!(h.state().count(Method::GET, "/api/ads"), 1);
}

#[tokio::test]
async fn test_like_is_optimistic() {
    let h = Harness::start().await;
    let posts = h.client.content(ContentKind::Post);
    posts.create(&draft("Launch week", "")).await.unwrap();
    let id = posts.items()[0].id.clone();
    let gets = h.state().count(Method::GET, "/api/posts");

    assert_eq!(posts.like(&id).await.unwrap(), 1);
    assert_eq!(posts.share(&id).await.unwrap(), 1);

    let item = posts.get(&id).unwrap();
    assert_eq!((item.likes, item.shares), (1, 1));
    // No refetch for engagement
    assert_eq!(h.state().count(Method::GET, "/api/posts"), gets);
    assert_eq!(h.state().list_content(ContentKind::Post)[0].likes, 1);
}

#[tokio::test]
async fn test_failed_like_rolls_back() {
    let h = Harness::start().await;
    let posts = h.client.content(ContentKind::Post);
    posts.create(&draft("Launch week", "")).await.unwrap();
    let id = posts.items()[0].id.clone();
    h.state().fail_next(
        Method::POST,
        format!("/api/posts/{id}/like"),
        StatusCode::INTERNAL_SERVER_ERROR,
        None,
    );

    let result = posts.like(&id).await;

    assert!(result.is_err());
    assert_eq!(posts.get(&id).unwrap().likes, 0);
    assert_eq!(h.state().list_content(ContentKind::Post)[0].likes, 0);
    assert_eq!(h.notifier.last().map(|t| t.kind), Some(reward_client::ToastKind::Error));
}

#[tokio::test]
async fn test_delete_content_requires_confirmation() {
    let h = Harness::start().await;
    let pages = h.client.content(ContentKind::CareerPage);
    pages.create(&draft("Backend engineer", "")).await.unwrap();
    let id = pages.items()[0].id.clone();

    let declined = pages.delete(&id, &|_: &str| false).await;
    assert!(matches!(declined, Err(ClientError::Cancelled)));
    assert_eq!(pages.items().len(), 1);

    pages.delete(&id, &|_: &str| true).await.unwrap();
    assert!(pages.items().is_empty());
    assert_eq!(
        h.state()
            .count(Method::DELETE, &format!("/api/career-pages/{id}")),
        1
    );
}

#[tokio::test]
async fn test_banner_upload_stores_file_path() {
    let h = Harness::start().await;
    let media = MediaConfig::new(format!("{}/upload", h.server.url()), "public_mock_key");
    let uploader = h.client.media(media).unwrap();
    let mut form = RewardForm::new();

    let uploaded = uploader
        .upload_banner(&mut form, "banner.png", vec![0x89, 0x50, 0x4e, 0x47])
        .await
        .unwrap();

    assert_eq!(uploaded.file_path, "/rewards/banner.png");
    assert_eq!(form.banner_url, "/rewards/banner.png");
    assert_eq!(h.state().count(Method::GET, "/api/imagekit-auth"), 1);
    assert_eq!(h.notifier.last(), Some(Toast::success("Image uploaded")));
}

#[tokio::test]
async fn test_upload_with_wrong_key_reports_server_message() {
    let h = Harness::start().await;
    let media = MediaConfig::new(format!("{}/upload", h.server.url()), "someone_elses_key");
    let uploader = h.client.media(media).unwrap();
    let mut form = RewardForm::new();
    form.banner_url = "https://cdn.example.com/old.png".into();

    let result = uploader.upload_banner(&mut form, "banner.png", vec![1, 2, 3]).await;

    assert!(result.is_err());
    assert_eq!(form.banner_url, "https://cdn.example.com/old.png");
    assert_eq!(h.notifier.last(), Some(Toast::error("Invalid public key")));
}

#[tokio::test]
async fn test_media_config_requires_public_key() {
    let h = Harness::start().await;
    let result = h.client.media(MediaConfig::new("http://cdn.local/upload", ""));
    assert!(matches!(result, Err(ClientError::Config(_))));
}
