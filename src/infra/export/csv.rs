use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::entities::user::User;

pub const EXPORT_HEADERS: [&str; 8] = [
    "id",
    "name",
    "email",
    "age",
    "gender",
    "role",
    "department",
    "status",
];

pub fn write_users<W: Write>(writer: W, users: &[User]) -> Result<usize> {
    let mut writer = csv::Writer::from_writer(writer);
    writer
        .write_record(EXPORT_HEADERS)
        .context("failed to write csv header")?;

    for user in users {
        writer
            .write_record([
                user.id.to_string(),
                user.name.clone(),
                user.email.clone(),
                user.age.to_string(),
                user.gender.clone(),
                user.role.clone(),
                user.department.clone(),
                user.status.label().to_string(),
            ])
            .with_context(|| format!("failed to write csv row for user #{}", user.id))?;
    }

    writer.flush().context("failed to flush csv writer")?;
    Ok(users.len())
}

pub fn export_users_to_csv(csv_path: &Path, users: &[User]) -> Result<usize> {
    if let Some(parent) = csv_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create export dir: {}", parent.display()))?;
    }
    let file = std::fs::File::create(csv_path)
        .with_context(|| format!("failed to create csv: {}", csv_path.display()))?;
    write_users(file, users)
}
