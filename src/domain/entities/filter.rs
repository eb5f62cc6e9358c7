#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchType {
    #[default]
    All,
    FirstName,
    LastName,
}

impl SearchType {
    pub fn token(self) -> &'static str {
        match self {
            SearchType::All => "all",
            SearchType::FirstName => "firstName",
            SearchType::LastName => "lastName",
        }
    }

    /// Unknown tokens fall back to `All`.
    pub fn from_token(token: &str) -> Self {
        match token {
            "firstName" => SearchType::FirstName,
            "lastName" => SearchType::LastName,
            _ => SearchType::All,
        }
    }

    /// Remote field name for targeted searches; `None` means free-text search.
    pub fn field(self) -> Option<&'static str> {
        match self {
            SearchType::All => None,
            SearchType::FirstName => Some("firstName"),
            SearchType::LastName => Some("lastName"),
        }
    }
}

/// Client-side age bucket. Never sent to the remote source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AgeRange {
    #[default]
    Any,
    From18To25,
    From26To35,
    From36To45,
    From46To60,
    Over60,
}

impl AgeRange {
    pub const BUCKETS: [AgeRange; 5] = [
        AgeRange::From18To25,
        AgeRange::From26To35,
        AgeRange::From36To45,
        AgeRange::From46To60,
        AgeRange::Over60,
    ];

    /// Unknown or empty tokens mean no age constraint.
    pub fn from_token(token: &str) -> Self {
        match token.trim() {
            "18-25" => AgeRange::From18To25,
            "26-35" => AgeRange::From26To35,
            "36-45" => AgeRange::From36To45,
            "46-60" => AgeRange::From46To60,
            "60+" => AgeRange::Over60,
            _ => AgeRange::Any,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            AgeRange::Any => "",
            AgeRange::From18To25 => "18-25",
            AgeRange::From26To35 => "26-35",
            AgeRange::From36To45 => "36-45",
            AgeRange::From46To60 => "46-60",
            AgeRange::Over60 => "60+",
        }
    }

    pub fn is_any(self) -> bool {
        matches!(self, AgeRange::Any)
    }

    /// Inclusive on both ends; `Over60` has no upper bound.
    pub fn contains(self, age: u32) -> bool {
        match self {
            AgeRange::Any => true,
            AgeRange::From18To25 => (18..=25).contains(&age),
            AgeRange::From26To35 => (26..=35).contains(&age),
            AgeRange::From36To45 => (36..=45).contains(&age),
            AgeRange::From46To60 => (46..=60).contains(&age),
            AgeRange::Over60 => age >= 60,
        }
    }
}

/// The part of the filter that defines a remote query session. Any change
/// to it invalidates the page cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FilterIdentity {
    pub search_query: String,
    pub search_type: SearchType,
    pub gender: String,
}

impl FilterIdentity {
    pub fn new(search_query: &str, search_type: SearchType, gender: &str) -> Self {
        Self {
            search_query: search_query.trim().to_string(),
            search_type,
            gender: gender.trim().to_string(),
        }
    }

    pub fn has_search(&self) -> bool {
        !self.search_query.trim().is_empty()
    }

    pub fn has_gender(&self) -> bool {
        !self.gender.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub identity: FilterIdentity,
    pub age_range: AgeRange,
}

impl FilterState {
    pub fn new(identity: FilterIdentity, age_range: AgeRange) -> Self {
        Self {
            identity,
            age_range,
        }
    }
}
