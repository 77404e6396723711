//! Demo content seeding. Safe to run repeatedly: each record is keyed by slug
//! or username and skipped when present.

use crate::db::repositories::user::generate_password;
use crate::domain::Price;
use crate::models::blog::{NewPost, PostStatus};
use crate::models::course::{NewCourse, NewLesson, NewModule};
use crate::services::NewUser;
use crate::state::SharedState;

const INSTRUCTOR: &str = "instructor";
const COURSE_SLUG: &str = "rust-fundamentals";
const POST_SLUG: &str = "welcome-to-lectern";

struct DemoLesson {
    title: &'static str,
    content: &'static str,
    is_free_preview: bool,
}

struct DemoModule {
    title: &'static str,
    description: &'static str,
    lessons: &'static [DemoLesson],
}

const MODULES: &[DemoModule] = &[
    DemoModule {
        title: "Getting Started",
        description: "Install the toolchain and write a first program.",
        lessons: &[
            DemoLesson {
                title: "Welcome",
                content: "What this course covers and how to follow along.",
                is_free_preview: true,
            },
            DemoLesson {
                title: "Installing Rust",
                content: "Install rustup, then check `cargo --version`.",
                is_free_preview: false,
            },
        ],
    },
    DemoModule {
        title: "Ownership",
        description: "Moves, borrows and lifetimes.",
        lessons: &[
            DemoLesson {
                title: "Moves and Copies",
                content: "Every value has a single owner.",
                is_free_preview: false,
            },
            DemoLesson {
                title: "Borrowing",
                content: "References let code use a value without owning it.",
                is_free_preview: false,
            },
        ],
    },
];

pub async fn cmd_demo(state: &SharedState) -> anyhow::Result<()> {
    let store = &state.store;

    let instructor = if let Some(user) = store.get_user_by_username(INSTRUCTOR).await? {
        println!("• User '{INSTRUCTOR}' already exists");
        user
    } else {
        let password = generate_password();
        let user = state
            .auth_service
            .register(NewUser {
                username: INSTRUCTOR.to_string(),
                password: password.clone(),
                is_staff: true,
                bio: "Writes the demo courses.".to_string(),
            })
            .await?;
        println!("✓ Created user '{INSTRUCTOR}' with password {password}");
        user
    };

    if store.get_course_by_slug(COURSE_SLUG).await?.is_some() {
        println!("• Course '{COURSE_SLUG}' already exists");
    } else {
        let course = store
            .create_course(NewCourse {
                title: "Rust Fundamentals".to_string(),
                slug: COURSE_SLUG.to_string(),
                description: "A short tour of the language, from installation to ownership."
                    .to_string(),
                instructor_id: instructor.id,
                price: Price::FREE,
                is_published: true,
                image: None,
            })
            .await?;

        for (module_order, demo_module) in (1u32..).zip(MODULES) {
            let module = store
                .create_module(NewModule {
                    course_id: course.id,
                    title: demo_module.title.to_string(),
                    order: module_order,
                    description: demo_module.description.to_string(),
                })
                .await?;

            for (lesson_order, demo_lesson) in (1u32..).zip(demo_module.lessons) {
                store
                    .create_lesson(NewLesson {
                        module_id: module.id,
                        title: demo_lesson.title.to_string(),
                        slug: String::new(),
                        content: demo_lesson.content.to_string(),
                        video_url: None,
                        order: lesson_order,
                        is_free_preview: demo_lesson.is_free_preview,
                    })
                    .await?;
            }
        }

        println!("✓ Created course '{}' at /{}/", course.title, course.slug);
    }

    if store.get_post_by_slug(POST_SLUG).await?.is_some() {
        println!("• Post '{POST_SLUG}' already exists");
    } else {
        let category = state.blog_service.create_category("Announcements", "").await?;
        let tag = state.blog_service.create_tag("Rust", "").await?;

        let post = state
            .blog_service
            .create_post(
                NewPost {
                    title: "Welcome to Lectern".to_string(),
                    slug: POST_SLUG.to_string(),
                    author_id: instructor.id,
                    category_id: Some(category.id),
                    content: "The first course is open for enrollment.".to_string(),
                    status: PostStatus::Published,
                },
                &[tag.id],
            )
            .await?;

        println!("✓ Created post '{}'", post.title);
    }

    Ok(())
}
