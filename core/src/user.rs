// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Email {
    pub value: String,

    #[serde(rename = "type")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<bool>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(flatten)]
    pub common: CommonAttributes,

    #[serde(rename = "userName")]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,

    #[serde(skip_serializing_if = "skip_serializing_list")]
    pub emails: Option<Vec<Email>>,
}

impl User {
    /// A user ready to be POSTed: only the client-assigned attributes are set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            common: CommonAttributes {
                schemas: vec![User::schema()],
                ..Default::default()
            },
            name: name.into(),
            ..Default::default()
        }
    }
}

impl Resource for User {
    fn schema() -> String {
        String::from(USER_URN)
    }

    fn resource_type() -> ResourceType {
        ResourceType::User
    }

    fn common(&self) -> &CommonAttributes {
        &self.common
    }
}
