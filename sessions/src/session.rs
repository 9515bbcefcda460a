use crate::{Result, SessionId};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use std::time::{Duration, Instant, SystemTime};

/// Named session attributes, e.g. the authenticated username
pub type Attributes = Map<String, Value>;

/**
A server-side session record.

Values handed out by [`SessionStore`](crate::SessionStore) are
snapshots; mutating one does not change the stored session. Use
[`SessionStore::update`](crate::SessionStore::update) for that.
*/
#[derive(Clone, Debug)]
pub struct Session {
    id: SessionId,
    attributes: Attributes,
    created_at: SystemTime,
    last_activity: Instant,
}

impl Session {
    pub(crate) fn new(id: SessionId, attributes: Attributes) -> Self {
        Self {
            id,
            attributes,
            created_at: SystemTime::now(),
            last_activity: Instant::now(),
        }
    }

    /// this session's identifier
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /**
    deserializes the attribute at `key`. returns None if it is absent
    or has a different shape than `T`
    */
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.attributes
            .get(key)
            .cloned()
            .and_then(|value| serde_json::from_value(value).ok())
    }

    /// borrows a string attribute
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }

    /// sets an attribute from anything serde-serializable
    pub fn insert(&mut self, key: impl Into<String>, value: impl Serialize) -> Result<()> {
        self.attributes
            .insert(key.into(), serde_json::to_value(value)?);
        Ok(())
    }

    /// removes an attribute, returning its previous value
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.attributes.remove(key)
    }

    /// all attributes
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// wall-clock creation time
    pub fn created_at(&self) -> SystemTime {
        self.created_at
    }

    /// monotonic time of the last touch
    pub fn last_activity(&self) -> Instant {
        self.last_activity
    }

    /// time since the last touch
    pub fn idle_time(&self) -> Duration {
        self.last_activity.elapsed()
    }

    pub(crate) fn touch(&mut self) {
        self.last_activity = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Prefs {
        theme: String,
        page_size: u32,
    }

    #[test]
    fn typed_attributes() {
        let mut session = Session::new(SessionId::generate(), Attributes::new());
        session.insert("username", "admin").unwrap();
        session
            .insert(
                "prefs",
                Prefs {
                    theme: "dark".into(),
                    page_size: 20,
                },
            )
            .unwrap();

        assert_eq!(session.get_str("username"), Some("admin"));
        assert_eq!(session.get::<String>("username").as_deref(), Some("admin"));
        assert_eq!(session.get::<u32>("username"), None);
        assert_eq!(
            session.get::<Prefs>("prefs"),
            Some(Prefs {
                theme: "dark".into(),
                page_size: 20
            })
        );

        assert!(session.remove("prefs").is_some());
        assert_eq!(session.attributes().len(), 1);
    }

    #[test]
    fn touch_resets_idle_time() {
        let mut session = Session::new(SessionId::generate(), Attributes::new());
        std::thread::sleep(Duration::from_millis(5));
        let before = session.idle_time();
        session.touch();
        assert!(session.idle_time() < before);
    }
}
