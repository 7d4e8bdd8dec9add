// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GroupMember {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    #[serde(rename = "$ref")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Group {
    #[serde(flatten)]
    pub common: CommonAttributes,

    #[serde(rename = "displayName")]
    pub display_name: String,

    #[serde(skip_serializing_if = "skip_serializing_list")]
    pub members: Option<Vec<GroupMember>>,
}

impl Resource for Group {
    fn schema() -> String {
        String::from(GROUP_URN)
    }

    fn resource_type() -> ResourceType {
        ResourceType::Group
    }

    fn common(&self) -> &CommonAttributes {
        &self.common
    }
}
