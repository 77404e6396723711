//! Blog post listing command handler

use crate::state::SharedState;

pub async fn cmd_list_posts(state: &SharedState) -> anyhow::Result<()> {
    let posts = state.blog_service.list_posts().await?;

    if posts.is_empty() {
        println!("No posts yet.");
        return Ok(());
    }

    println!("Posts ({} total)", posts.len());
    println!("{:-<70}", "");

    for summary in posts {
        let post = &summary.post;
        let tags: Vec<&str> = summary.tags.iter().map(|t| t.name.as_str()).collect();

        println!("[{}] {} ({})", post.status, post.title, post.slug);
        println!(
            "  Published: {} | Tags: {}",
            post.published_at.as_deref().unwrap_or("-"),
            if tags.is_empty() {
                "-".to_string()
            } else {
                tags.join(", ")
            }
        );
    }

    Ok(())
}
