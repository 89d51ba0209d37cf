use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Overlay", inline)]
#[serde(default)]
/// Text overlay and last-visit gimmick.
pub struct OverlayOptions {
    /// JSON endpoint answering `{ city, country_name }` for the caller.
    pub location_endpoint: String,
    /// Key the last visit is stored under.
    pub storage_key: String,
    /// Brand text in the top-right corner.
    pub brand: String,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            location_endpoint: "https://ipapi.co/json/".to_owned(),
            storage_key: "ugd:last-visit".to_owned(),
            brand: "UGD".to_owned(),
        }
    }
}
