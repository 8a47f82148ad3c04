// Shift (turno) endpoints

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use crate::error::Error;
use crate::rest::client::RestClient;
use crate::rest::models::{NewShift, ShiftRow};
use crate::rest::query::Query;

const TABLE: &str = "turnos";

impl RestClient {
    /// Shifts of a lot, newest first, optionally for one employee.
    pub async fn list_shifts(
        &self,
        lot_id: i64,
        employee: Option<Uuid>,
        limit: u32,
    ) -> Result<Vec<ShiftRow>, Error> {
        debug!(lot_id, ?employee, "listing shifts");
        let mut query = Query::new().eq("est_id", lot_id);
        if let Some(employee) = employee {
            query = query.eq("play_id", employee);
        }
        let query = query.order_desc("tur_fh_apertura").limit(limit);
        self.select(TABLE, &query).await
    }

    /// The employee's shift in the given state (`abierto` / `cerrado`), newest first.
    pub async fn find_shift_in_state(
        &self,
        lot_id: i64,
        employee: Uuid,
        state: &str,
    ) -> Result<Option<ShiftRow>, Error> {
        debug!(lot_id, %employee, state, "looking up shift");
        let query = Query::new()
            .eq("est_id", lot_id)
            .eq("play_id", employee)
            .eq("tur_estado", state)
            .order_desc("tur_fh_apertura");
        self.select_one(TABLE, query).await
    }

    /// `POST /turnos`
    pub async fn insert_shift(&self, row: &NewShift) -> Result<ShiftRow, Error> {
        debug!(lot_id = row.est_id, employee = %row.play_id, "opening shift");
        self.insert(TABLE, row).await
    }

    /// Close a shift that is still in `open_state`.
    ///
    /// `PATCH /turnos?tur_id=eq.{id}&tur_estado=eq.{open_state}`
    pub async fn close_shift(
        &self,
        shift_id: i64,
        open_state: &str,
        closed_state: &str,
        closed_at: DateTime<Utc>,
        closing_cash: Decimal,
        notes: Option<&str>,
    ) -> Result<ShiftRow, Error> {
        debug!(shift_id, %closing_cash, "closing shift");
        let query = Query::new()
            .eq("tur_id", shift_id)
            .eq("tur_estado", open_state);
        self.update_one(
            TABLE,
            &query,
            &json!({
                "tur_fh_cierre": closed_at,
                "tur_caja_final": closing_cash,
                "tur_estado": closed_state,
                "tur_observaciones": notes,
            }),
        )
        .await
    }
}
