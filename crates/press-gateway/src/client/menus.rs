//! Navigation menu lookup with id fallback.
//!
//! Menus come from the `menus/v1` plugin namespace under the site root.
//! The configured primary/fallback ids form a pair: the requested id is
//! tried first, then its partner. Each id is requested once, in order, and
//! the first non-empty menu wins.

use tracing::{debug, info, warn};

use super::{ContentGateway, degrade};
use crate::error::GatewayError;
use crate::types::{MenuItem, MenuResponse};

impl ContentGateway {
    /// Ids to try for a menu request, in order.
    ///
    /// With no id: `[primary, fallback]`. With an id: `[id, partner]`, where
    /// the partner of the primary id is the fallback id and every other id
    /// falls back to the primary one.
    pub fn menu_candidates(&self, requested: Option<u64>) -> [u64; 2] {
        let (primary, fallback) = (self.menu.primary_id, self.menu.fallback_id);
        match requested {
            None => [primary, fallback],
            Some(id) if id == primary => [id, fallback],
            Some(id) => [id, primary],
        }
    }

    /// Get menu items, trying candidate ids in order.
    ///
    /// Returns `Ok` with an empty list when at least one menu answered but
    /// none had items, and the last error when every request failed.
    pub fn try_get_menu(&self, requested: Option<u64>) -> Result<Vec<MenuItem>, GatewayError> {
        let mut last_error = None;
        let mut answered = false;

        for id in self.menu_candidates(requested) {
            let url = format!("{}/wp-json/menus/v1/menus/{}", self.site_root, id);
            match self.fetch_json::<MenuResponse>(&url) {
                Ok(menu) => {
                    let items = menu.items.unwrap_or_default();
                    if !items.is_empty() {
                        info!("Fetched menu {} with {} items", id, items.len());
                        return Ok(items);
                    }
                    debug!("Menu {} is empty", id);
                    answered = true;
                }
                Err(err) => {
                    warn!(menu_id = id, kind = %err.kind(), "menu request failed: {err}");
                    last_error = Some(err);
                }
            }
        }

        match last_error {
            Some(err) if !answered => Err(err),
            _ => Ok(Vec::new()),
        }
    }

    /// Get menu items, or an empty list when no candidate menu has items.
    pub fn get_menu(&self, requested: Option<u64>) -> Vec<MenuItem> {
        degrade("get_menu", self.try_get_menu(requested))
    }
}
