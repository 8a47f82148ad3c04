// Occupancy endpoints
//
// Entry inserts a row with a null exit; exit patches the timestamp in and,
// once the payment exists, links its number. These are separate requests:
// the backend sees no transaction spanning them.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::json;
use tracing::debug;

use crate::error::Error;
use crate::rest::client::RestClient;
use crate::rest::models::{NewOccupancy, OccupancyRow};
use crate::rest::query::Query;

const TABLE: &str = "ocupacion";

impl RestClient {
    /// All occupancies of a lot that have no exit yet.
    ///
    /// `GET /ocupacion?est_id=eq.{lot}&ocu_fh_salida=is.null&order=pla_numero.asc`
    pub async fn list_open_occupancies(&self, lot_id: i64) -> Result<Vec<OccupancyRow>, Error> {
        debug!(lot_id, "listing open occupancies");
        let query = Query::new()
            .eq("est_id", lot_id)
            .is_null("ocu_fh_salida")
            .order_asc("pla_numero");
        self.select(TABLE, &query).await
    }

    /// The open occupancy of a plate in a lot, if the vehicle is inside.
    pub async fn find_open_occupancy_by_plate(
        &self,
        lot_id: i64,
        plate: &str,
    ) -> Result<Option<OccupancyRow>, Error> {
        debug!(lot_id, plate, "looking up open occupancy by plate");
        let query = Query::new()
            .eq("est_id", lot_id)
            .eq("veh_patente", plate)
            .is_null("ocu_fh_salida")
            .order_desc("ocu_fh_entrada");
        self.select_one(TABLE, query).await
    }

    /// The open occupancy of a space, if the space is taken.
    pub async fn find_open_occupancy_by_space(
        &self,
        lot_id: i64,
        space_number: i32,
    ) -> Result<Option<OccupancyRow>, Error> {
        debug!(lot_id, space_number, "looking up open occupancy by space");
        let query = Query::new()
            .eq("est_id", lot_id)
            .eq("pla_numero", space_number)
            .is_null("ocu_fh_salida");
        self.select_one(TABLE, query).await
    }

    /// Closed occupancies that ended at or after `since`, newest first.
    pub async fn list_occupancy_history(
        &self,
        lot_id: i64,
        since: DateTime<Utc>,
        limit: u32,
    ) -> Result<Vec<OccupancyRow>, Error> {
        debug!(lot_id, %since, limit, "listing occupancy history");
        let query = Query::new()
            .eq("est_id", lot_id)
            .gte(
                "ocu_fh_salida",
                since.to_rfc3339_opts(SecondsFormat::Secs, true),
            )
            .order_desc("ocu_fh_salida")
            .limit(limit);
        self.select(TABLE, &query).await
    }

    /// Record a vehicle entering a space.
    ///
    /// `POST /ocupacion`
    pub async fn insert_occupancy(&self, row: &NewOccupancy) -> Result<OccupancyRow, Error> {
        debug!(
            lot_id = row.est_id,
            space = row.pla_numero,
            plate = %row.veh_patente,
            "inserting occupancy"
        );
        self.insert(TABLE, row).await
    }

    /// Stamp the exit time on an open occupancy.
    ///
    /// `PATCH /ocupacion?ocu_id=eq.{id}&ocu_fh_salida=is.null`. The null
    /// filter makes a second close a no-op that surfaces as `EmptyResult`.
    pub async fn close_occupancy(
        &self,
        occupancy_id: i64,
        exit: DateTime<Utc>,
    ) -> Result<OccupancyRow, Error> {
        debug!(occupancy_id, %exit, "closing occupancy");
        let query = Query::new()
            .eq("ocu_id", occupancy_id)
            .is_null("ocu_fh_salida");
        self.update_one(TABLE, &query, &json!({ "ocu_fh_salida": exit }))
            .await
    }

    /// Link a payment number to an occupancy.
    ///
    /// `PATCH /ocupacion?ocu_id=eq.{id}` with `{"pag_nro": n}`
    pub async fn link_occupancy_payment(
        &self,
        occupancy_id: i64,
        payment_id: i64,
    ) -> Result<OccupancyRow, Error> {
        debug!(occupancy_id, payment_id, "linking payment to occupancy");
        let query = Query::new().eq("ocu_id", occupancy_id);
        self.update_one(TABLE, &query, &json!({ "pag_nro": payment_id }))
            .await
    }
}
