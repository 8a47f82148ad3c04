// ── API-to-domain type conversions ──
//
// Bridges raw `parkly_api` rows into canonical `parkly_core::model` types.
// Tags are parsed into strong types here; rows whose tags cannot be
// parsed fail conversion instead of being guessed.

use parkly_api::models::{
    LotRow, OccupancyRow, PaymentRow, ReservationRow, ShiftRow, SpaceRow, SubscriptionRow,
    TariffRow, TemplateRow,
};

use crate::error::CoreError;
use crate::model::{
    LotId, Occupancy, ParkingLot, Payment, PaymentMethod, PeriodType, RateTemplate, Reservation,
    Shift, Space, Subscription, SubscriptionPeriod, TariffEntry, TariffTarget, VehicleSegment,
};

impl From<LotRow> for ParkingLot {
    fn from(row: LotRow) -> Self {
        Self {
            id: LotId::new(row.est_id),
            name: row.est_nombre,
            address: row.est_direccion.filter(|a| !a.trim().is_empty()),
            capacity: row.est_capacidad.and_then(|c| u32::try_from(c).ok()),
        }
    }
}

impl From<SpaceRow> for Space {
    fn from(row: SpaceRow) -> Self {
        Self {
            lot: LotId::new(row.est_id),
            number: row.pla_numero,
            segment: VehicleSegment::from_tag(row.catv_segmento.as_deref()),
            template_id: row.plantilla_id,
            zone: row.pla_zona,
        }
    }
}

impl From<TemplateRow> for RateTemplate {
    fn from(row: TemplateRow) -> Self {
        Self {
            id: row.plantilla_id,
            lot: LotId::new(row.est_id),
            name: row.nombre_plantilla,
            segment: VehicleSegment::from_tag(row.catv_segmento.as_deref()),
        }
    }
}

impl TryFrom<TariffRow> for TariffEntry {
    type Error = CoreError;

    fn try_from(row: TariffRow) -> Result<Self, Self::Error> {
        let period = PeriodType::from_code(row.tiptar_nro).ok_or_else(|| {
            CoreError::InvalidPeriod {
                tag: row.tiptar_nro.to_string(),
            }
        })?;
        // Template-keyed rows take precedence; the segment column is only
        // meaningful on rows without a template, and must name a segment.
        let target = match row.plantilla_id {
            Some(template) => TariffTarget::Template(template),
            None => {
                let segment = row
                    .catv_segmento
                    .as_deref()
                    .and_then(|tag| tag.trim().parse::<VehicleSegment>().ok())
                    .ok_or_else(|| {
                        CoreError::Internal(format!(
                            "tariff {} has neither a template nor a known segment ({:?})",
                            row.tar_id, row.catv_segmento
                        ))
                    })?;
                TariffTarget::Segment(segment)
            }
        };
        Ok(Self {
            id: row.tar_id,
            lot: LotId::new(row.est_id),
            target,
            period,
            price: row.tar_precio,
            effective_from: row.tar_f_desde,
        })
    }
}

impl From<OccupancyRow> for Occupancy {
    fn from(row: OccupancyRow) -> Self {
        Self {
            id: row.ocu_id,
            lot: LotId::new(row.est_id),
            space: row.pla_numero,
            plate: row.veh_patente,
            entered_at: row.ocu_fh_entrada,
            exited_at: row.ocu_fh_salida,
            period: row
                .tiptar_nro
                .and_then(PeriodType::from_code)
                .unwrap_or_default(),
            payment_id: row.pag_nro,
        }
    }
}

impl From<PaymentRow> for Payment {
    fn from(row: PaymentRow) -> Self {
        Self {
            id: row.pag_nro,
            lot: LotId::new(row.est_id),
            amount: row.pag_monto,
            paid_at: row.pag_fh,
            method: PaymentMethod::from_tag(&row.mepa_metodo),
            plate: row.veh_patente,
        }
    }
}

impl TryFrom<SubscriptionRow> for Subscription {
    type Error = CoreError;

    fn try_from(row: SubscriptionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            number: row.abo_nro,
            lot: LotId::new(row.est_id),
            holder: row.abo_titular,
            plate: row.veh_patente,
            segment: VehicleSegment::from_tag(row.catv_segmento.as_deref()),
            period: SubscriptionPeriod::from_tag(row.tipo_abono.as_deref())?,
            starts_on: row.abo_fecha_inicio,
            ends_on: row.abo_fecha_fin,
            payment_id: row.pag_nro,
        })
    }
}

impl TryFrom<ShiftRow> for Shift {
    type Error = CoreError;

    fn try_from(row: ShiftRow) -> Result<Self, Self::Error> {
        let state = row.tur_estado.parse().map_err(|_| {
            CoreError::Internal(format!(
                "shift {} has unknown state '{}'",
                row.tur_id, row.tur_estado
            ))
        })?;
        Ok(Self {
            id: row.tur_id,
            lot: LotId::new(row.est_id),
            employee: row.play_id,
            opened_at: row.tur_fh_apertura,
            closed_at: row.tur_fh_cierre,
            opening_cash: row.tur_caja_inicial,
            closing_cash: row.tur_caja_final,
            state,
            notes: row.tur_observaciones,
        })
    }
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = CoreError;

    fn try_from(row: ReservationRow) -> Result<Self, Self::Error> {
        let status = row.res_estado.parse().map_err(|_| {
            CoreError::Internal(format!(
                "reservation {} has unknown status '{}'",
                row.res_codigo, row.res_estado
            ))
        })?;
        Ok(Self {
            code: row.res_codigo,
            lot: LotId::new(row.est_id),
            space: row.pla_numero,
            plate: row.veh_patente,
            starts_at: row.res_fh_ingreso,
            ends_at: row.res_fh_fin,
            status,
            amount: row.res_monto,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;

    fn tariff_row(plantilla_id: Option<i64>, segment: Option<&str>, code: i32) -> TariffRow {
        TariffRow {
            tar_id: 1,
            est_id: 1,
            plantilla_id,
            catv_segmento: segment.map(str::to_owned),
            tiptar_nro: code,
            tar_precio: Decimal::from(100),
            tar_f_desde: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn tariff_target_prefers_template() {
        let entry = TariffEntry::try_from(tariff_row(Some(4), Some("MOT"), 1)).unwrap();
        assert_eq!(entry.target, TariffTarget::Template(4));

        let entry = TariffEntry::try_from(tariff_row(None, Some("MOT"), 4)).unwrap();
        assert_eq!(entry.target, TariffTarget::Segment(VehicleSegment::Motorcycle));
        assert_eq!(entry.period, PeriodType::Week);
    }

    #[test]
    fn segment_tariff_needs_a_known_segment() {
        let err = TariffEntry::try_from(tariff_row(None, Some("BUS"), 1)).unwrap_err();
        assert!(matches!(err, CoreError::Internal(ref msg) if msg.contains("BUS")));
        assert!(TariffEntry::try_from(tariff_row(None, None, 1)).is_err());

        // The segment column is ignored once a template is set.
        let entry = TariffEntry::try_from(tariff_row(Some(2), Some("BUS"), 1)).unwrap();
        assert_eq!(entry.target, TariffTarget::Template(2));
    }

    #[test]
    fn tariff_with_unknown_period_code_fails() {
        let err = TariffEntry::try_from(tariff_row(None, Some("AUT"), 9)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidPeriod { ref tag } if tag == "9"));
    }

    #[test]
    fn space_without_segment_is_car() {
        let space = Space::from(SpaceRow {
            est_id: 1,
            pla_numero: 3,
            pla_zona: None,
            catv_segmento: None,
            plantilla_id: None,
        });
        assert_eq!(space.segment, VehicleSegment::Car);
    }

    #[test]
    fn subscription_without_period_is_monthly() {
        let row = SubscriptionRow {
            abo_nro: 8,
            est_id: 1,
            abo_titular: "Ana".into(),
            veh_patente: "AB123CD".into(),
            catv_segmento: Some("AUT".into()),
            tipo_abono: None,
            abo_fecha_inicio: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            abo_fecha_fin: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            pag_nro: None,
        };
        let sub = Subscription::try_from(row).unwrap();
        assert_eq!(sub.period, SubscriptionPeriod::Monthly);
    }
}
