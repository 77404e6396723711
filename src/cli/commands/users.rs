//! Account command handlers

use anyhow::Context;

use crate::db::repositories::user::generate_password;
use crate::services::NewUser;
use crate::state::SharedState;

pub async fn cmd_create_user(
    state: &SharedState,
    username: &str,
    password: Option<String>,
    is_staff: bool,
    bio: &str,
) -> anyhow::Result<()> {
    let generated = password.is_none();
    let password = password.unwrap_or_else(generate_password);

    let user = state
        .auth_service
        .register(NewUser {
            username: username.to_string(),
            password: password.clone(),
            is_staff,
            bio: bio.to_string(),
        })
        .await
        .with_context(|| format!("Failed to create user {username}"))?;

    println!("Created user '{}' (id {})", user.username, user.id);
    if user.is_staff {
        println!("  Staff: yes");
    }
    if generated {
        println!("  Password: {password}");
        println!("  Store it now, it will not be shown again.");
    }

    Ok(())
}

pub async fn cmd_set_bio(state: &SharedState, username: &str, bio: &str) -> anyhow::Result<()> {
    let user = state
        .store
        .get_user_by_username(username)
        .await?
        .with_context(|| format!("User not found: {username}"))?;

    state.store.update_user_bio(user.id, bio).await?;
    println!("Updated biography for '{}'", user.username);

    Ok(())
}
