//! Name / id allow-lists.

use nsxt_client::GatewayKind;
use serde::{Deserialize, Serialize};

/// Returns true if `allowlist` is empty or names the resource by display
/// name or id.
pub fn include(display_name: Option<&str>, id: &str, allowlist: &[String]) -> bool {
    allowlist.is_empty()
        || allowlist
            .iter()
            .any(|entry| entry == id || Some(entry.as_str()) == display_name)
}

/// A list of display names and ids; empty means everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllowList(Vec<String>);

impl AllowList {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(entries.into_iter().map(Into::into).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn includes(&self, display_name: Option<&str>, id: &str) -> bool {
        include(display_name, id, &self.0)
    }
}

/// Allow-lists per resource family.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    #[serde(default)]
    pub tier0: AllowList,

    #[serde(default)]
    pub tier1: AllowList,

    #[serde(default)]
    pub load_balancer: AllowList,

    #[serde(default)]
    pub virtual_server: AllowList,
}

impl Filters {
    pub fn gateways(&self, kind: GatewayKind) -> &AllowList {
        match kind {
            GatewayKind::Tier0 => &self.tier0,
            GatewayKind::Tier1 => &self.tier1,
        }
    }
}
