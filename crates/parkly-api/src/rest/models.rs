// Wire types for the backend tables.
//
// Field names match the database columns exactly. Tags such as segment,
// period code and status stay as raw strings/integers here; `parkly-core`
// parses them into strong types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Lots & spaces ───────────────────────────────────────────────────

/// `estacionamientos`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LotRow {
    pub est_id: i64,
    pub est_nombre: String,
    #[serde(default)]
    pub est_direccion: Option<String>,
    #[serde(default)]
    pub est_capacidad: Option<i32>,
}

/// `plazas`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceRow {
    pub est_id: i64,
    pub pla_numero: i32,
    #[serde(default)]
    pub pla_zona: Option<String>,
    #[serde(default)]
    pub catv_segmento: Option<String>,
    #[serde(default)]
    pub plantilla_id: Option<i64>,
}

/// `plantillas`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateRow {
    pub plantilla_id: i64,
    pub est_id: i64,
    pub nombre_plantilla: String,
    #[serde(default)]
    pub catv_segmento: Option<String>,
}

// ── Tariffs ─────────────────────────────────────────────────────────

/// `tarifas` -- keyed either by template or directly by segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TariffRow {
    pub tar_id: i64,
    pub est_id: i64,
    #[serde(default)]
    pub plantilla_id: Option<i64>,
    #[serde(default)]
    pub catv_segmento: Option<String>,
    /// 1 = hour, 2 = day, 3 = month, 4 = week.
    pub tiptar_nro: i32,
    pub tar_precio: Decimal,
    pub tar_f_desde: DateTime<Utc>,
}

// ── Occupancy & payments ────────────────────────────────────────────

/// `ocupacion` -- a null `ocu_fh_salida` means the vehicle is still inside.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccupancyRow {
    pub ocu_id: i64,
    pub est_id: i64,
    pub pla_numero: i32,
    pub veh_patente: String,
    pub ocu_fh_entrada: DateTime<Utc>,
    #[serde(default)]
    pub ocu_fh_salida: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tiptar_nro: Option<i32>,
    #[serde(default)]
    pub pag_nro: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewOccupancy {
    pub est_id: i64,
    pub pla_numero: i32,
    pub veh_patente: String,
    pub ocu_fh_entrada: DateTime<Utc>,
    pub tiptar_nro: i32,
}

/// `pagos`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRow {
    pub pag_nro: i64,
    pub est_id: i64,
    pub pag_monto: Decimal,
    pub pag_fh: DateTime<Utc>,
    pub mepa_metodo: String,
    #[serde(default)]
    pub veh_patente: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewPayment {
    pub est_id: i64,
    pub pag_monto: Decimal,
    pub pag_fh: DateTime<Utc>,
    pub mepa_metodo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub veh_patente: Option<String>,
}

// ── Subscriptions (abonos) ──────────────────────────────────────────

/// `abonos`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionRow {
    pub abo_nro: i64,
    pub est_id: i64,
    pub abo_titular: String,
    pub veh_patente: String,
    #[serde(default)]
    pub catv_segmento: Option<String>,
    /// `semanal` / `mensual`; null on rows created before the column existed.
    #[serde(default)]
    pub tipo_abono: Option<String>,
    pub abo_fecha_inicio: NaiveDate,
    pub abo_fecha_fin: NaiveDate,
    #[serde(default)]
    pub pag_nro: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewSubscription {
    pub est_id: i64,
    pub abo_titular: String,
    pub veh_patente: String,
    pub catv_segmento: String,
    pub tipo_abono: String,
    pub abo_fecha_inicio: NaiveDate,
    pub abo_fecha_fin: NaiveDate,
    pub pag_nro: i64,
}

// ── Shifts (turnos) ─────────────────────────────────────────────────

/// `turnos`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftRow {
    pub tur_id: i64,
    pub est_id: i64,
    pub play_id: Uuid,
    pub tur_fh_apertura: DateTime<Utc>,
    #[serde(default)]
    pub tur_fh_cierre: Option<DateTime<Utc>>,
    pub tur_caja_inicial: Decimal,
    #[serde(default)]
    pub tur_caja_final: Option<Decimal>,
    pub tur_estado: String,
    #[serde(default)]
    pub tur_observaciones: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewShift {
    pub est_id: i64,
    pub play_id: Uuid,
    pub tur_fh_apertura: DateTime<Utc>,
    pub tur_caja_inicial: Decimal,
    pub tur_estado: String,
}

// ── Reservations ────────────────────────────────────────────────────

/// `reservas`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationRow {
    pub res_codigo: String,
    pub est_id: i64,
    pub pla_numero: i32,
    pub veh_patente: String,
    pub res_fh_ingreso: DateTime<Utc>,
    pub res_fh_fin: DateTime<Utc>,
    pub res_estado: String,
    pub res_monto: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewReservation {
    pub res_codigo: String,
    pub est_id: i64,
    pub pla_numero: i32,
    pub veh_patente: String,
    pub res_fh_ingreso: DateTime<Utc>,
    pub res_fh_fin: DateTime<Utc>,
    pub res_estado: String,
    pub res_monto: Decimal,
}
