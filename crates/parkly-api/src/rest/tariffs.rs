// Tariff endpoints
//
// Only filtering and ordering happen server-side; choosing the applicable
// row is left to the caller so the rule stays testable without a backend.

use tracing::debug;

use crate::error::Error;
use crate::rest::client::RestClient;
use crate::rest::models::TariffRow;
use crate::rest::query::Query;

/// Which tariff rows to fetch for a lot.
#[derive(Debug, Clone, Default)]
pub struct TariffFilter {
    /// Restrict to one rate template.
    pub template_id: Option<i64>,
    /// Restrict to rows keyed directly by segment tag.
    pub segment: Option<String>,
    /// Restrict to one period code (`tiptar_nro`).
    pub period_code: Option<i32>,
}

impl RestClient {
    /// List tariff rows for a lot, newest effective date first.
    ///
    /// `GET /tarifas?est_id=eq.{lot}[&plantilla_id=eq.{t}][&catv_segmento=eq.{s}]
    /// [&tiptar_nro=eq.{p}]&order=tar_f_desde.desc,tar_id.desc`
    pub async fn list_tariffs(
        &self,
        lot_id: i64,
        filter: &TariffFilter,
    ) -> Result<Vec<TariffRow>, Error> {
        debug!(lot_id, ?filter, "listing tariffs");
        let mut query = Query::new().eq("est_id", lot_id);
        if let Some(template_id) = filter.template_id {
            query = query.eq("plantilla_id", template_id);
        }
        if let Some(ref segment) = filter.segment {
            query = query.eq("catv_segmento", segment);
        }
        if let Some(code) = filter.period_code {
            query = query.eq("tiptar_nro", code);
        }
        let query = query.order_desc("tar_f_desde").order_desc("tar_id");
        self.select("tarifas", &query).await
    }
}
