// Reservation endpoints

use serde_json::json;
use tracing::debug;

use crate::error::Error;
use crate::rest::client::RestClient;
use crate::rest::models::{NewReservation, ReservationRow};
use crate::rest::query::Query;

const TABLE: &str = "reservas";

impl RestClient {
    /// Reservations of a lot, soonest start first, optionally in given states.
    pub async fn list_reservations(
        &self,
        lot_id: i64,
        states: &[&str],
    ) -> Result<Vec<ReservationRow>, Error> {
        debug!(lot_id, ?states, "listing reservations");
        let mut query = Query::new().eq("est_id", lot_id);
        if !states.is_empty() {
            query = query.in_list("res_estado", states.iter());
        }
        let query = query.order_asc("res_fh_ingreso");
        self.select(TABLE, &query).await
    }

    /// Fetch a reservation by code within a lot.
    pub async fn get_reservation(
        &self,
        lot_id: i64,
        code: &str,
    ) -> Result<Option<ReservationRow>, Error> {
        debug!(lot_id, code, "fetching reservation");
        let query = Query::new().eq("est_id", lot_id).eq("res_codigo", code);
        self.select_one(TABLE, query).await
    }

    /// `POST /reservas`
    pub async fn insert_reservation(&self, row: &NewReservation) -> Result<ReservationRow, Error> {
        debug!(lot_id = row.est_id, code = %row.res_codigo, "inserting reservation");
        self.insert(TABLE, row).await
    }

    /// Move a reservation from `from` to `to`.
    ///
    /// The `from` filter guards against racing a concurrent transition:
    /// if the row already moved, nothing matches and `EmptyResult` comes back.
    pub async fn update_reservation_state(
        &self,
        code: &str,
        from: &str,
        to: &str,
    ) -> Result<ReservationRow, Error> {
        debug!(code, from, to, "updating reservation state");
        let query = Query::new().eq("res_codigo", code).eq("res_estado", from);
        self.update_one(TABLE, &query, &json!({ "res_estado": to }))
            .await
    }
}
