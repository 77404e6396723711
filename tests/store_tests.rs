mod common;

use common::{seed, spawn_app};
use lectern::domain::Price;
use lectern::models::blog::{NewPost, PostStatus};
use lectern::models::course::NewCourse;

#[tokio::test]
async fn test_ordered_lessons_follow_module_then_lesson_order() {
    let app = spawn_app().await;
    let seed = seed(&app).await;

    let lessons = app.store().ordered_lessons(seed.course.id).await.unwrap();
    let titles: Vec<&str> = lessons.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(titles, ["Welcome", "Syntax", "Types", "Ownership"]);

    let outline = app.store().course_outline(seed.course.id).await.unwrap();
    assert_eq!(outline.len(), 2);
    assert_eq!(outline[0].module.title, "Basics");
    assert_eq!(outline[0].lessons.len(), 3);
    assert_eq!(outline[1].module.title, "Advanced");
}

#[tokio::test]
async fn test_list_published_courses_excludes_hidden() {
    let app = spawn_app().await;
    let seed = seed(&app).await;

    let courses = app.store().list_published_courses().await.unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].slug, "rust-101");

    app.store()
        .set_course_published(seed.hidden.id, true)
        .await
        .unwrap();
    let courses = app.store().list_published_courses().await.unwrap();
    assert_eq!(courses.len(), 2);
    assert_eq!(app.store().list_all_courses().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_enroll_is_idempotent() {
    let app = spawn_app().await;
    let seed = seed(&app).await;
    let alice = app.create_user("alice").await;

    assert!(app.store().enroll(alice.id, seed.course.id).await.unwrap());
    assert!(!app.store().enroll(alice.id, seed.course.id).await.unwrap());
    assert!(app.store().is_enrolled(alice.id, seed.course.id).await.unwrap());
    assert!(!app.store().is_enrolled(alice.id, seed.hidden.id).await.unwrap());
    assert_eq!(app.store().count_enrollments(seed.course.id).await.unwrap(), 1);
}

#[tokio::test]
async fn test_toggle_progress() {
    let app = spawn_app().await;
    let seed = seed(&app).await;
    let alice = app.create_user("alice").await;
    let lesson = seed.locked();

    assert!(app.store().toggle_lesson_progress(alice.id, lesson.id).await.unwrap());
    assert_eq!(
        app.store()
            .completed_lesson_ids(alice.id, seed.course.id)
            .await
            .unwrap(),
        vec![lesson.id]
    );

    assert!(!app.store().toggle_lesson_progress(alice.id, lesson.id).await.unwrap());
    assert!(
        app.store()
            .completed_lesson_ids(alice.id, seed.course.id)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_completed_ids_scoped_to_course() {
    let app = spawn_app().await;
    let seed = seed(&app).await;
    let alice = app.create_user("alice").await;

    app.store()
        .toggle_lesson_progress(alice.id, seed.lessons[3].id)
        .await
        .unwrap();

    let ids = app
        .store()
        .completed_lesson_ids(alice.id, seed.hidden.id)
        .await
        .unwrap();
    assert!(ids.is_empty());
}

#[tokio::test]
async fn test_find_lesson_by_course_and_slug() {
    let app = spawn_app().await;
    let seed = seed(&app).await;

    let lesson = app
        .store()
        .find_lesson(seed.course.id, "types")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(lesson.title, "Types");

    assert!(
        app.store()
            .find_lesson(seed.hidden.id, "types")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_duplicate_lesson_slug_in_module_rejected() {
    let app = spawn_app().await;
    let seed = seed(&app).await;
    let module_id = seed.preview().module_id;

    let result = app
        .store()
        .create_lesson(lectern::models::course::NewLesson {
            module_id,
            title: "Welcome".to_string(),
            slug: String::new(),
            content: String::new(),
            video_url: None,
            order: 9,
            is_free_preview: false,
        })
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_verify_password() {
    let app = spawn_app().await;
    app.create_user("alice").await;

    let user = app
        .store()
        .verify_user_password("alice", common::PASSWORD)
        .await
        .unwrap();
    assert_eq!(user.unwrap().username, "alice");

    assert!(
        app.store()
            .verify_user_password("alice", "nope")
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        app.store()
            .verify_user_password("ghost", "nope")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_blog_posts_in_admin_order() {
    let app = spawn_app().await;
    let author = app.create_user("writer").await;
    let blog = &app.state.shared.blog_service;

    let category = blog.create_category("News & Updates", "").await.unwrap();
    assert_eq!(category.slug, "news-updates");
    let tag = blog.create_tag("Rust", "").await.unwrap();

    let post = |title: &str, status| NewPost {
        title: title.to_string(),
        slug: String::new(),
        author_id: author.id,
        category_id: Some(category.id),
        content: "Body".to_string(),
        status,
    };

    blog.create_post(post("Draft Notes", PostStatus::Draft), &[])
        .await
        .unwrap();
    blog.create_post(post("First Release", PostStatus::Published), &[tag.id])
        .await
        .unwrap();

    let duplicate = blog
        .create_post(post("First Release", PostStatus::Draft), &[])
        .await;
    assert!(duplicate.is_err());

    let posts = blog.list_posts().await.unwrap();
    let order: Vec<(&str, &str)> = posts
        .iter()
        .map(|p| (p.post.slug.as_str(), p.post.status))
        .collect();
    assert_eq!(
        order,
        [("draft-notes", "draft"), ("first-release", "published")]
    );
    assert!(posts[0].post.published_at.is_none());
    assert!(posts[1].post.published_at.is_some());
    assert_eq!(posts[1].tags.len(), 1);
    assert_eq!(posts[1].tags[0].slug, "rust");

    let published = blog.publish("draft-notes").await.unwrap();
    assert_eq!(published.status, "published");
    assert!(published.published_at.is_some());
}

#[tokio::test]
async fn test_update_bio() {
    let app = spawn_app().await;
    let alice = app.create_user("alice").await;
    assert_eq!(alice.bio, "");

    app.store().update_user_bio(alice.id, "Rustacean").await.unwrap();
    let alice = app.store().get_user(alice.id).await.unwrap().unwrap();
    assert_eq!(alice.bio, "Rustacean");
}

#[tokio::test]
async fn test_course_slug_cannot_shadow_fixed_routes() {
    let app = spawn_app().await;
    let seed = seed(&app).await;

    let course = |title: &str, slug: &str| NewCourse {
        title: title.to_string(),
        slug: slug.to_string(),
        description: String::new(),
        instructor_id: seed.course.instructor_id,
        price: Price::FREE,
        is_published: true,
        image: None,
    };

    for slug in ["media", "static", "accounts", "metrics"] {
        let err = app.store().create_course(course("Clash", slug)).await.unwrap_err();
        assert!(err.to_string().contains("reserved"), "{slug}: {err}");
    }
    assert!(app.store().create_course(course("Media", "")).await.is_err());
    assert_eq!(app.store().list_all_courses().await.unwrap().len(), 2);

    let ok = app
        .store()
        .create_course(course("Media Literacy", ""))
        .await
        .unwrap();
    assert_eq!(ok.slug, "media-literacy");
}

#[tokio::test]
async fn test_post_tag_pairs_are_unique() {
    let app = spawn_app().await;
    let author = app.create_user("writer").await;
    let blog = &app.state.shared.blog_service;
    let tag = blog.create_tag("Rust", "").await.unwrap();

    blog.create_post(
        NewPost {
            title: "Tagged Twice".to_string(),
            slug: String::new(),
            author_id: author.id,
            category_id: None,
            content: "Body".to_string(),
            status: PostStatus::Published,
        },
        &[tag.id, tag.id],
    )
    .await
    .unwrap();

    let posts = blog.list_posts().await.unwrap();
    assert_eq!(posts[0].tags.len(), 1);
}
