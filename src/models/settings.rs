use serde::{Deserialize, Serialize};

use super::Unit;

/// User preferences, persisted as one JSON object.
///
/// `default_unit` only decides which unit new sets are entered in and which
/// unit statistics are displayed in. Recorded sets keep their own unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub default_unit: Unit,
}

impl Settings {
    pub fn unit_label(&self) -> &'static str {
        self.default_unit.as_str()
    }
}
