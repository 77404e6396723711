//! Course command handlers

use anyhow::Context;

use crate::state::SharedState;

pub async fn cmd_list_courses(state: &SharedState) -> anyhow::Result<()> {
    let courses = state.store.list_all_courses().await?;

    if courses.is_empty() {
        println!("No courses yet.");
        println!();
        println!("Seed an example with: lectern demo");
        return Ok(());
    }

    println!("Courses ({} total)", courses.len());
    println!("{:-<70}", "");

    for course in courses {
        let lessons = state.store.ordered_lessons(course.id).await?.len();
        let enrolled = state.store.count_enrollments(course.id).await?;
        let status = if course.is_published { "✓" } else { "•" };

        println!("{status} {} [{}]", course.title, course.slug);
        println!(
            "  Price: {} | Lessons: {lessons} | Enrolled: {enrolled}",
            course.price
        );
    }

    println!();
    println!("Legend: ✓ Published | • Hidden");

    Ok(())
}

pub async fn cmd_publish_course(state: &SharedState, slug: &str, hide: bool) -> anyhow::Result<()> {
    let course = state
        .store
        .get_course_by_slug(slug)
        .await?
        .with_context(|| format!("Course not found: {slug}"))?;

    state.store.set_course_published(course.id, !hide).await?;

    if hide {
        println!("Course '{}' is now hidden", course.title);
    } else {
        println!("Course '{}' is now published", course.title);
    }

    Ok(())
}
