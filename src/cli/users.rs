use std::path::PathBuf;

use tabled::Table;

use crate::{
    error,
    management::UserManager,
    success,
    types::{User, UserTableRow},
};

pub async fn users(path: PathBuf) {
    let manager = match UserManager::load(path.clone()).await {
        Ok(m) => m,
        Err(e) => error!("Failed to load user store {}: {}", path.display(), e),
    };

    let mut users = manager.all().await;
    if users.is_empty() {
        success!("No accounts registered yet.");
        return;
    }

    users.sort_by(|a, b| a.username.to_lowercase().cmp(&b.username.to_lowercase()));
    let rows: Vec<UserTableRow> = users.into_iter().map(table_row).collect();

    println!("{}", Table::new(rows));
}

fn table_row(user: User) -> UserTableRow {
    let joined = chrono::DateTime::parse_from_rfc3339(&user.date_joined)
        .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or(user.date_joined);

    UserTableRow {
        username: user.username,
        email: user.email,
        joined,
    }
}
