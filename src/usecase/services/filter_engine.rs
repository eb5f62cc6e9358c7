use crate::domain::entities::filter::{AgeRange, FilterState};
use crate::domain::entities::page::ServerCriteria;
use crate::domain::entities::user::User;
use crate::usecase::services::page_cache::{CachedPage, PageCache};

/// Conditions evaluated locally on cached users.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResidualPredicate {
    pub gender: Option<String>,
    pub age_range: AgeRange,
}

impl ResidualPredicate {
    pub fn is_noop(&self) -> bool {
        self.gender.is_none() && self.age_range.is_any()
    }

    pub fn matches(&self, user: &User) -> bool {
        if let Some(gender) = &self.gender {
            if !user.gender.eq_ignore_ascii_case(gender) {
                return false;
            }
        }
        self.age_range.contains(user.age)
    }
}

/// The search endpoints cannot combine text with a field filter, so gender
/// only reaches the server when no search text is present.
pub fn split(filter: &FilterState) -> (ServerCriteria, ResidualPredicate) {
    let identity = &filter.identity;
    let search_query = identity
        .has_search()
        .then(|| identity.search_query.trim().to_string());
    let gender = identity
        .has_gender()
        .then(|| identity.gender.trim().to_string());

    let (server_gender, residual_gender) = if search_query.is_some() {
        (None, gender)
    } else {
        (gender, None)
    };

    let criteria = ServerCriteria {
        search_query,
        search_type: identity.search_type,
        gender: server_gender,
    };
    let residual = ResidualPredicate {
        gender: residual_gender,
        age_range: filter.age_range,
    };
    (criteria, residual)
}

pub fn has_residual_work(filter: &FilterState) -> bool {
    !filter.age_range.is_any() || (filter.identity.has_gender() && filter.identity.has_search())
}

pub fn apply<'a, I>(records: I, residual: &ResidualPredicate) -> Vec<User>
where
    I: IntoIterator<Item = &'a User>,
{
    records
        .into_iter()
        .filter(|user| residual.matches(user))
        .cloned()
        .collect()
}

/// Visible users for the current cache and filter.
pub fn materialize(cache: &PageCache, filter: &FilterState) -> Vec<User> {
    let (_, residual) = split(filter);
    if residual.is_noop() {
        return cache.flatten().cloned().collect();
    }
    apply(cache.flatten(), &residual)
}

/// Appends the matching users of a freshly cached page to an already
/// materialized list. Equivalent to `materialize` over the grown cache as
/// long as `filter` is unchanged.
pub fn extend_visible(visible: &mut Vec<User>, page: &CachedPage, filter: &FilterState) {
    let (_, residual) = split(filter);
    visible.extend(
        page.users
            .iter()
            .filter(|user| residual.matches(user))
            .cloned(),
    );
}
