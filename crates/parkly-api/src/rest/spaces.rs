// Space and rate-template endpoints

use tracing::debug;

use crate::error::Error;
use crate::rest::client::RestClient;
use crate::rest::models::{SpaceRow, TemplateRow};
use crate::rest::query::Query;

impl RestClient {
    /// List all spaces of a lot, ordered by space number.
    ///
    /// `GET /plazas?est_id=eq.{lot}&order=pla_numero.asc`
    pub async fn list_spaces(&self, lot_id: i64) -> Result<Vec<SpaceRow>, Error> {
        debug!(lot_id, "listing spaces");
        let query = Query::new().eq("est_id", lot_id).order_asc("pla_numero");
        self.select("plazas", &query).await
    }

    /// Fetch one space by (lot, number).
    pub async fn get_space(&self, lot_id: i64, number: i32) -> Result<Option<SpaceRow>, Error> {
        debug!(lot_id, number, "fetching space");
        let query = Query::new().eq("est_id", lot_id).eq("pla_numero", number);
        self.select_one("plazas", query).await
    }

    /// List the rate templates defined for a lot.
    ///
    /// `GET /plantillas?est_id=eq.{lot}`
    pub async fn list_templates(&self, lot_id: i64) -> Result<Vec<TemplateRow>, Error> {
        debug!(lot_id, "listing rate templates");
        let query = Query::new().eq("est_id", lot_id).order_asc("plantilla_id");
        self.select("plantillas", &query).await
    }
}
