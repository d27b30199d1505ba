//! Site-wide options from the `custom/v1` plugin namespace.

use super::{ContentGateway, degrade};
use crate::error::GatewayError;
use crate::types::Options;

impl ContentGateway {
    /// Get site options. The body must be a JSON object.
    pub fn try_get_options(&self) -> Result<Options, GatewayError> {
        let url = format!("{}/wp-json/custom/v1/options", self.site_root);
        self.fetch_json(&url)
    }

    /// Get site options, or an empty map on failure.
    pub fn get_options(&self) -> Options {
        degrade("get_options", self.try_get_options())
    }
}
