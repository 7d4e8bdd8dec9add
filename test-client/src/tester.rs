// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use anyhow::Context;
use anyhow::bail;
use scim2_client::Client;
use scim2_client::Error;
use scim2_client::ErrorResponse;
use scim2_client::ErrorType;
use scim2_client::Resource;
use scim2_client::User;

/// Runs a sequence of checks against a live SCIM provider
pub struct Tester {
    client: Client,
}

fn expect_scim_error<R: std::fmt::Debug>(
    result: Result<R, Error>,
    status: u16,
) -> anyhow::Result<ErrorResponse> {
    match result {
        Ok(resource) => {
            bail!("expected a {status} response, got {resource:?}")
        }

        Err(Error::Scim(error)) => {
            if error.status()? != status {
                bail!(
                    "SCIM error struct's status is {} instead of {status}",
                    error.status,
                );
            }

            Ok(error)
        }

        Err(error) => Err(anyhow::Error::new(error)
            .context(format!("expected a SCIM error with status {status}"))),
    }
}

impl Tester {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn run(&self) -> anyhow::Result<()> {
        self.nonexistent_resource_tests()
            .context("nonexistent_resource_tests")?;

        let dwight = self.create_user_tests().context("create_user_tests")?;

        let dwight =
            self.replace_user_tests(dwight).context("replace_user_tests")?;

        self.delete_user_tests(&dwight).context("delete_user_tests")?;

        Ok(())
    }

    fn user_path(user: &User) -> anyhow::Result<String> {
        let Some(id) = user.id() else {
            bail!("user {} has no id", user.name);
        };

        Ok(format!("/Users/{id}"))
    }

    fn nonexistent_resource_tests(&self) -> anyhow::Result<()> {
        let random_id = "999999";

        // A GET of nonexistent user = 404
        expect_scim_error(
            self.client.get::<User>(&format!("/Users/{random_id}")),
            404,
        )?;

        // DELETE of nonexistent user = 404
        expect_scim_error(
            self.client.delete(&format!("/Users/{random_id}")),
            404,
        )?;

        Ok(())
    }

    fn create_user_tests(&self) -> anyhow::Result<User> {
        let mut request = User::new("dschrute");
        request.common.external_id =
            Some(String::from("dschrute@dundermifflin.com"));

        let user = self.client.create("/Users", &request)?;

        if user.name != "dschrute" {
            bail!("user name of test user is {}, not dschrute", user.name);
        }

        let Some(external_id) = &user.common.external_id else {
            bail!("external id of test user is None");
        };

        if external_id != "dschrute@dundermifflin.com" {
            bail!(
                "external id of test user is {external_id}, not {}",
                "dschrute@dundermifflin.com",
            );
        }

        if user.version().is_none() {
            bail!("test user has no meta.version");
        }

        // RFC 7664 § 3.3:
        // If the service provider determines that the creation of the requested
        // resource conflicts with existing resources (e.g., a "User" resource
        // with a duplicate "userName"), the service provider MUST return HTTP
        // status code 409 (Conflict) with a "scimType" error code of
        // "uniqueness", as per Section 3.12.
        let error =
            expect_scim_error(self.client.create("/Users", &request), 409)?;

        if error.error_type() != Some(ErrorType::Uniqueness) {
            bail!(
                "SCIM error struct's error type is {:?} instead of {:?}",
                error.scim_type,
                ErrorType::Uniqueness
            );
        }

        Ok(user)
    }

    fn replace_user_tests(&self, user: User) -> anyhow::Result<User> {
        let path = Self::user_path(&user)?;

        let mut update = user.clone();
        update.display_name = Some(String::from("Dwight Schrute"));

        let replaced = self.client.replace(&path, &update)?;

        if replaced.display_name != update.display_name {
            bail!(
                "display name of replaced user is {:?}, not {:?}",
                replaced.display_name,
                update.display_name
            );
        }

        if replaced.version() == user.version() {
            bail!("PUT did not change the version of the test user");
        }

        // RFC 7644 § 3.14:
        // If the version does not match, the service provider MUST return
        // HTTP status code 412 (Precondition Failed).
        if !self.client.config().disable_etag() {
            expect_scim_error(self.client.replace(&path, &update), 412)?;
        }

        Ok(replaced)
    }

    fn delete_user_tests(&self, user: &User) -> anyhow::Result<()> {
        let path = Self::user_path(user)?;

        self.client.delete(&path)?;

        expect_scim_error(self.client.get::<User>(&path), 404)?;

        Ok(())
    }
}
