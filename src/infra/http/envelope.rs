use serde::Deserialize;
use tracing::warn;

use crate::domain::entities::user::RemoteUser;
use crate::usecase::ports::source::SourceEnvelope;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UsersPayload {
    users: Vec<serde_json::Value>,
    total: usize,
    skip: usize,
    limit: usize,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct UserPayload {
    id: u64,
    first_name: String,
    last_name: String,
    email: String,
    age: u32,
    gender: String,
    image: String,
    role: Option<String>,
    company: CompanyPayload,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CompanyPayload {
    department: String,
    title: String,
}

impl From<UserPayload> for RemoteUser {
    fn from(payload: UserPayload) -> Self {
        let name = format!("{} {}", payload.first_name.trim(), payload.last_name.trim())
            .trim()
            .to_string();
        let role = payload
            .role
            .filter(|role| !role.trim().is_empty())
            .unwrap_or(payload.company.title);
        RemoteUser {
            source_id: payload.id,
            name,
            email: payload.email,
            age: payload.age,
            gender: payload.gender,
            role,
            department: payload.company.department,
            image: payload.image,
        }
    }
}

fn decode_user(entry: serde_json::Value) -> Option<RemoteUser> {
    serde_json::from_value::<UserPayload>(entry)
        .inspect_err(|err| warn!(%err, "skipping malformed user entry"))
        .ok()
        .map(RemoteUser::from)
}

/// Decodes a `/users` response body. A body that does not match the
/// envelope shape counts as an empty page rather than an error.
pub fn decode_envelope(body: &str, offset: usize, limit: usize) -> SourceEnvelope {
    match serde_json::from_str::<UsersPayload>(body) {
        Ok(payload) => SourceEnvelope {
            records: payload.users.into_iter().filter_map(decode_user).collect(),
            total: payload.total,
            offset: payload.skip,
            limit: if payload.limit == 0 { limit } else { payload.limit },
        },
        Err(err) => {
            warn!(%err, "malformed users envelope, treating page as empty");
            SourceEnvelope {
                records: Vec::new(),
                total: 0,
                offset,
                limit,
            }
        }
    }
}
