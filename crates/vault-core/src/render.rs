//! HTML for `GET /`, rendered from `templates/index.html`.

use crate::auth::Role;
use crate::error::VaultError;
use crate::gateway::encode_key;
use crate::storage::ObjectRecord;
use askama::Template;

/// The listing page. Askama escapes every interpolated value.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub user: String,
    pub is_admin: bool,
    pub rows: Vec<FileRow>,
}

pub struct FileRow {
    pub key: String,
    /// Percent-encoded key for the download link.
    pub href: String,
    pub size_kb: String,
}

impl FileRow {
    fn from_record(record: &ObjectRecord) -> Self {
        Self {
            key: record.key.clone(),
            href: encode_key(&record.key),
            size_kb: format_kb(record.size),
        }
    }
}

/// Render the file listing. `records` are shown in the order given.
///
/// Admins get the upload card and a delete button per row; guests get
/// neither.
pub fn index_page(records: &[ObjectRecord], role: Role, user: &str) -> Result<String, VaultError> {
    let template = IndexTemplate {
        user: user.to_string(),
        is_admin: role == Role::Admin,
        rows: records.iter().map(FileRow::from_record).collect(),
    };
    Ok(template.render()?)
}

fn format_kb(bytes: u64) -> String {
    format!("{:.1}", bytes as f64 / 1024.0)
}
