// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

use scim2_client::Resource;

/// A non-optimized user store for use with tests. Every write assigns a new
/// weak version to the user.
pub struct InMemoryUserStore {
    users: Mutex<BTreeMap<String, User>>,
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

fn new_version() -> String {
    format!("W/\"{}\"", Uuid::new_v4().simple())
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self { users: Mutex::new(BTreeMap::new()) }
    }

    pub fn get_user(&self, user_id: &str) -> Result<User, ErrorResponse> {
        let users = self.users.lock().unwrap();

        users
            .get(user_id)
            .cloned()
            .ok_or(ErrorResponse::not_found(user_id.to_string()))
    }

    /// Store `request` as a new user. `base_url` is the service URL used to
    /// build `meta.location`.
    pub fn create_user(
        &self,
        base_url: &str,
        request: User,
    ) -> Result<User, ErrorResponse> {
        let mut users = self.users.lock().unwrap();

        if users.values().any(|user| user.name == request.name) {
            return Err(ErrorResponse::conflict(request.name));
        }

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let mut user = request;
        user.common.schemas = vec![User::schema()];
        user.common.id = Some(id.clone());
        user.common.meta.resource_type =
            Some(User::resource_type().to_string());
        user.common.meta.created = Some(now);
        user.common.meta.last_modified = Some(now);
        user.common.meta.version = Some(new_version());
        user.common.meta.location = Some(format!("{base_url}/Users/{id}"));

        users.insert(id, user.clone());

        Ok(user)
    }

    /// Replace the client-assigned attributes of a user. When `if_match` is
    /// given it must name the current version (or be `*`).
    pub fn replace_user(
        &self,
        user_id: &str,
        if_match: Option<&str>,
        request: User,
    ) -> Result<User, ErrorResponse> {
        let mut users = self.users.lock().unwrap();

        if users
            .iter()
            .any(|(id, user)| id != user_id && user.name == request.name)
        {
            return Err(ErrorResponse::conflict(request.name));
        }

        let Some(existing) = users.get_mut(user_id) else {
            return Err(ErrorResponse::not_found(user_id.to_string()));
        };

        let current = existing.common.meta.version.clone().unwrap_or_default();
        if let Some(if_match) = if_match {
            if if_match != "*" && if_match != current {
                return Err(ErrorResponse::precondition_failed(current));
            }
        }

        existing.name = request.name;
        existing.display_name = request.display_name;
        existing.active = request.active;
        existing.emails = request.emails;
        existing.common.external_id = request.common.external_id;
        existing.common.meta.last_modified = Some(Utc::now());
        existing.common.meta.version = Some(new_version());

        Ok(existing.clone())
    }

    pub fn delete_user(&self, user_id: &str) -> Result<(), ErrorResponse> {
        let mut users = self.users.lock().unwrap();

        match users.remove(user_id) {
            Some(_) => Ok(()),
            None => Err(ErrorResponse::not_found(user_id.to_string())),
        }
    }
}
