// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

pub trait Resource: std::fmt::Debug + Serialize + DeserializeOwned {
    fn schema() -> String;
    fn resource_type() -> ResourceType;
    fn common(&self) -> &CommonAttributes;

    fn id(&self) -> Option<&str> {
        self.common().id.as_deref()
    }

    /// The concurrency token presented back to the provider in `If-Match`
    fn version(&self) -> Option<&str> {
        self.common().meta.version.as_deref()
    }
}
