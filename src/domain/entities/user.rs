#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub u64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user exactly as the remote source returned it. `source_id` is not
/// unique: the source recycles ids across requests.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemoteUser {
    pub source_id: u64,
    pub name: String,
    pub email: String,
    pub age: u32,
    pub gender: String,
    pub role: String,
    pub department: String,
    pub image: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserStatus {
    Active,
    Away,
    Offline,
}

impl UserStatus {
    pub fn from_source_id(source_id: u64) -> Self {
        match source_id % 3 {
            0 => UserStatus::Active,
            1 => UserStatus::Away,
            _ => UserStatus::Offline,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Away => "away",
            UserStatus::Offline => "offline",
        }
    }
}

/// A user as held by the page cache, keyed by a session-unique id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub age: u32,
    pub gender: String,
    pub role: String,
    pub department: String,
    pub image: String,
    pub status: UserStatus,
}

impl User {
    pub fn from_remote(id: UserId, remote: RemoteUser) -> Self {
        let status = UserStatus::from_source_id(remote.source_id);
        Self {
            id,
            name: remote.name,
            email: remote.email,
            age: remote.age,
            gender: remote.gender,
            role: remote.role,
            department: remote.department,
            image: remote.image,
            status,
        }
    }
}
