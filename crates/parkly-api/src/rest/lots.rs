// Lot endpoints
//
// `estacionamientos` is read-only from this client's point of view.

use tracing::debug;

use crate::error::Error;
use crate::rest::client::RestClient;
use crate::rest::models::LotRow;
use crate::rest::query::Query;

impl RestClient {
    /// List every lot visible to the current credentials.
    ///
    /// `GET /estacionamientos?order=est_id.asc`
    pub async fn list_lots(&self) -> Result<Vec<LotRow>, Error> {
        debug!("listing lots");
        self.select("estacionamientos", &Query::new().order_asc("est_id"))
            .await
    }

    /// Fetch a single lot by id.
    ///
    /// `GET /estacionamientos?est_id=eq.{id}&limit=1`
    pub async fn get_lot(&self, lot_id: i64) -> Result<Option<LotRow>, Error> {
        debug!(lot_id, "fetching lot");
        self.select_one("estacionamientos", Query::new().eq("est_id", lot_id))
            .await
    }
}
