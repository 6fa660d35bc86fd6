use std::collections::VecDeque;
use std::sync::Arc;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use dashmap::{DashMap, DashSet};
use uuid::Uuid;

use crate::error::AppError;

pub const SESSION_HEADER: &str = "x-session-id";
pub const USER_HEADER: &str = "x-user-id";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    pub session_id: Option<String>,
    pub user_id: Option<Uuid>,
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| -> Result<Option<String>, AppError> {
            match parts.headers.get(name) {
                None => Ok(None),
                Some(value) => value
                    .to_str()
                    .map(|raw| Some(raw.trim().to_string()).filter(|raw| !raw.is_empty()))
                    .map_err(|_| AppError::BadRequest(format!("{name} must be visible ASCII"))),
            }
        };

        let session_id = header(SESSION_HEADER)?;
        let user_id = header(USER_HEADER)?
            .map(|raw| {
                Uuid::parse_str(&raw)
                    .map_err(|err| AppError::BadRequest(format!("invalid {USER_HEADER}: {err}")))
            })
            .transpose()?;

        Ok(Self {
            session_id,
            user_id,
        })
    }
}

pub struct SessionRegistry {
    in_flight: Arc<DashSet<String>>,
    history: DashMap<String, VecDeque<String>>,
    history_limit: usize,
}

pub struct SearchGuard {
    in_flight: Arc<DashSet<String>>,
    session_id: String,
}

impl Drop for SearchGuard {
    fn drop(&mut self) {
        self.in_flight.remove(&self.session_id);
    }
}

impl SessionRegistry {
    pub fn new(history_limit: usize) -> Self {
        Self {
            in_flight: Arc::new(DashSet::new()),
            history: DashMap::new(),
            history_limit,
        }
    }

    pub fn begin_search(&self, session_id: &str) -> Option<SearchGuard> {
        if !self.in_flight.insert(session_id.to_string()) {
            return None;
        }

        Some(SearchGuard {
            in_flight: self.in_flight.clone(),
            session_id: session_id.to_string(),
        })
    }

    pub fn searches_in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn record_search(&self, session_id: &str, tracking_number: &str) {
        if self.history_limit == 0 {
            return;
        }

        let mut entries = self.history.entry(session_id.to_string()).or_default();
        entries.retain(|existing| existing != tracking_number);
        entries.push_front(tracking_number.to_string());
        entries.truncate(self.history_limit);
    }

    pub fn history(&self, session_id: &str) -> Vec<String> {
        self.history
            .get(session_id)
            .map(|entries| entries.iter().cloned().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::SessionRegistry;

    #[test]
    fn second_search_is_rejected_while_first_runs() {
        let registry = SessionRegistry::new(5);

        let guard = registry.begin_search("s-1").unwrap();
        assert!(registry.begin_search("s-1").is_none());
        assert!(registry.begin_search("s-2").is_some());
        assert_eq!(registry.searches_in_flight(), 1);

        drop(guard);
        assert!(registry.begin_search("s-1").is_some());
    }

    #[test]
    fn history_coalesces_repeats_and_caps_length() {
        let registry = SessionRegistry::new(3);
        for code in ["A", "B", "A", "C", "D"] {
            registry.record_search("s-1", code);
        }

        assert_eq!(registry.history("s-1"), vec!["D", "C", "A"]);
        assert!(registry.history("s-2").is_empty());
    }
}
