// Payment endpoints

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::debug;

use crate::error::Error;
use crate::rest::client::RestClient;
use crate::rest::models::{NewPayment, PaymentRow};
use crate::rest::query::Query;

impl RestClient {
    /// Insert a payment and return it with its assigned number.
    ///
    /// `POST /pagos`
    pub async fn insert_payment(&self, row: &NewPayment) -> Result<PaymentRow, Error> {
        debug!(lot_id = row.est_id, amount = %row.pag_monto, method = %row.mepa_metodo, "inserting payment");
        self.insert("pagos", row).await
    }

    /// Payments of a lot, newest first, optionally from `since` onwards.
    pub async fn list_payments(
        &self,
        lot_id: i64,
        since: Option<DateTime<Utc>>,
        limit: u32,
    ) -> Result<Vec<PaymentRow>, Error> {
        debug!(lot_id, ?since, limit, "listing payments");
        let mut query = Query::new().eq("est_id", lot_id);
        if let Some(since) = since {
            query = query.gte("pag_fh", since.to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let query = query.order_desc("pag_fh").limit(limit);
        self.select("pagos", &query).await
    }
}
