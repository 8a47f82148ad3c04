// Subscription (abono) endpoints

use chrono::NaiveDate;
use serde_json::json;
use tracing::debug;

use crate::error::Error;
use crate::rest::client::RestClient;
use crate::rest::models::{NewSubscription, SubscriptionRow};
use crate::rest::query::Query;

const TABLE: &str = "abonos";

impl RestClient {
    /// Subscriptions of a lot, latest expiry first.
    ///
    /// With `active_on`, only rows whose end date is on or after that day.
    pub async fn list_subscriptions(
        &self,
        lot_id: i64,
        active_on: Option<NaiveDate>,
    ) -> Result<Vec<SubscriptionRow>, Error> {
        debug!(lot_id, ?active_on, "listing subscriptions");
        let mut query = Query::new().eq("est_id", lot_id);
        if let Some(day) = active_on {
            query = query.gte("abo_fecha_fin", day);
        }
        let query = query.order_desc("abo_fecha_fin").order_asc("abo_nro");
        self.select(TABLE, &query).await
    }

    /// Fetch one subscription by number within a lot.
    pub async fn get_subscription(
        &self,
        lot_id: i64,
        number: i64,
    ) -> Result<Option<SubscriptionRow>, Error> {
        debug!(lot_id, number, "fetching subscription");
        let query = Query::new().eq("est_id", lot_id).eq("abo_nro", number);
        self.select_one(TABLE, query).await
    }

    /// `POST /abonos`
    pub async fn insert_subscription(
        &self,
        row: &NewSubscription,
    ) -> Result<SubscriptionRow, Error> {
        debug!(lot_id = row.est_id, plate = %row.veh_patente, "inserting subscription");
        self.insert(TABLE, row).await
    }

    /// Move a subscription's end date and record the payment that paid for it.
    ///
    /// `PATCH /abonos?abo_nro=eq.{n}` with `{"abo_fecha_fin": d, "pag_nro": p}`
    pub async fn extend_subscription(
        &self,
        number: i64,
        new_end: NaiveDate,
        payment_id: i64,
    ) -> Result<SubscriptionRow, Error> {
        debug!(number, %new_end, payment_id, "extending subscription");
        let query = Query::new().eq("abo_nro", number);
        self.update_one(
            TABLE,
            &query,
            &json!({ "abo_fecha_fin": new_end, "pag_nro": payment_id }),
        )
        .await
    }
}
