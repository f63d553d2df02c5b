//! User entity and indexed user list

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use super::{Channels, Record};
use crate::api::Api;
use crate::error::{Error, Result};

/// A workspace member bound to the client that fetched it.
#[derive(Clone)]
pub struct User {
    api: Api,
    id: String,
    record: Record,
}

impl User {
    /// Wrap a user record. Fails when the record has no string `id`.
    pub fn new(api: Api, record: Record) -> Result<Self> {
        let id = record.require_str("id")?.to_string();
        Ok(Self { api, id, record })
    }

    pub(crate) fn from_value(api: &Api, value: &Value) -> Result<Self> {
        let record = Record::object(value, "member")?;
        Self::new(api.clone(), record)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Handle (`name`), not the display name
    pub fn name(&self) -> Option<&str> {
        self.record.str_field("name")
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.record.get(key)
    }

    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.record.str_field(key)
    }

    /// Nested objects such as `profile`, wrapped fresh each call.
    pub fn nested(&self, key: &str) -> Option<Record> {
        self.record.nested(key)
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Channels this user belongs to (first page only).
    pub async fn conversations(&self) -> Result<Channels> {
        self.api.user().conversations(self).await
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.record == other.record
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name())
            .finish()
    }
}

/// A user given either by id or as an entity.
#[derive(Debug, Clone, Copy)]
pub enum UserRef<'a> {
    Id(&'a str),
    User(&'a User),
}

impl<'a> UserRef<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            UserRef::Id(id) => id,
            UserRef::User(user) => user.id(),
        }
    }
}

impl<'a> From<&'a str> for UserRef<'a> {
    fn from(id: &'a str) -> Self {
        UserRef::Id(id)
    }
}

impl<'a> From<&'a String> for UserRef<'a> {
    fn from(id: &'a String) -> Self {
        UserRef::Id(id)
    }
}

impl<'a> From<&'a User> for UserRef<'a> {
    fn from(user: &'a User) -> Self {
        UserRef::User(user)
    }
}

/// Users in response order, indexed by id and by name.
#[derive(Debug, Clone, PartialEq)]
pub struct Users {
    items: Vec<User>,
    by_id: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl Users {
    pub fn new(items: Vec<User>) -> Self {
        let mut by_id = HashMap::with_capacity(items.len());
        let mut by_name = HashMap::with_capacity(items.len());
        for (i, user) in items.iter().enumerate() {
            by_id.insert(user.id().to_string(), i);
            if let Some(name) = user.name() {
                by_name.insert(name.to_string(), i);
            }
        }
        Self {
            items,
            by_id,
            by_name,
        }
    }

    pub(crate) fn from_values(api: &Api, values: &[Value]) -> Result<Self> {
        let items = values
            .iter()
            .map(|v| User::from_value(api, v))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(items))
    }

    pub fn by_id(&self, id: &str) -> Result<&User> {
        self.by_id
            .get(id)
            .map(|&i| &self.items[i])
            .ok_or_else(|| Error::not_found("user", id))
    }

    pub fn by_name(&self, name: &str) -> Result<&User> {
        self.by_name
            .get(name)
            .map(|&i| &self.items[i])
            .ok_or_else(|| Error::not_found("user", name))
    }

    pub fn get(&self, index: usize) -> Option<&User> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, User> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<User> {
        self.items
    }
}

impl<'a> IntoIterator for &'a Users {
    type Item = &'a User;
    type IntoIter = std::slice::Iter<'a, User>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Client;
    use crate::transport::MockTransport;
    use serde_json::json;

    fn users() -> Users {
        let api = Api::from(Client::new(MockTransport::new()));
        let values = json!([
            {"id": "U1", "name": "alice", "profile": {"real_name": "Alice A"}},
            {"id": "U2", "name": "bob"},
            {"id": "USLACKBOT"}
        ]);
        Users::from_values(&api, values.as_array().unwrap()).unwrap()
    }

    #[test]
    fn test_indices() {
        let users = users();
        assert_eq!(users.len(), 3);
        assert_eq!(users.by_id("U2").unwrap().name(), Some("bob"));
        assert_eq!(users.by_name("alice").unwrap().id(), "U1");
        // Members without a name are listed and reachable by id only.
        assert_eq!(users.by_id("USLACKBOT").unwrap().name(), None);
        assert!(matches!(
            users.by_name("carol"),
            Err(Error::NotFound { kind: "user", .. })
        ));
        assert!(users.by_id("U404").is_err());
    }

    #[test]
    fn test_profile_is_record() {
        let users = users();
        let profile = users.by_id("U1").unwrap().nested("profile").unwrap();
        assert_eq!(profile.str_field("real_name"), Some("Alice A"));
    }

    #[test]
    fn test_user_ref() {
        let users = users();
        assert_eq!(UserRef::from("U7").id(), "U7");
        assert_eq!(UserRef::from(users.by_id("U1").unwrap()).id(), "U1");
    }
}
