// ── Parking service ──
//
// Facade over `RestClient`: loads rows, converts them to domain types and
// runs the pure pricing/aggregation logic on top. One instance per CLI
// invocation; requests are issued one after another with no retries and
// no transaction spanning multi-step writes.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use parkly_api::models::{NewOccupancy, NewPayment, NewReservation, NewShift, NewSubscription};
use parkly_api::{RestClient, TariffFilter, TransportConfig};

use crate::aggregate::aggregate_occupancy;
use crate::calendar::extend_period;
use crate::config::BackendConfig;
use crate::error::CoreError;
use crate::model::{
    LotId, Occupancy, OccupancySummary, ParkingLot, Payment, PaymentMethod, PeriodType,
    RateTemplate, Reservation, ReservationStatus, Shift, ShiftState, Space, Subscription,
    TariffEntry, TariffTarget, normalize_plate,
};
use crate::pricing::{self, Fee, calculate_fee};
use crate::requests::{
    CloseShiftRequest, CreateReservationRequest, CreateSubscriptionRequest, EntryRequest,
    ExitRequest, OpenShiftRequest, RenewSubscriptionRequest,
};

/// Price of a pending exit, before anything is written.
#[derive(Debug, Clone, Serialize)]
pub struct ExitQuote {
    pub occupancy: Occupancy,
    pub space: Space,
    pub tariff: TariffEntry,
    pub exit_at: DateTime<Utc>,
    pub fee: Fee,
}

impl ExitQuote {
    pub fn elapsed(&self) -> TimeDelta {
        self.occupancy.duration(self.exit_at)
    }
}

/// Outcome of a completed exit.
#[derive(Debug, Clone, Serialize)]
pub struct ExitReceipt {
    pub occupancy: Occupancy,
    pub payment: Payment,
    pub fee: Fee,
}

/// Outcome of creating or renewing a subscription.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionReceipt {
    pub subscription: Subscription,
    pub payment: Payment,
    pub fee: Fee,
}

/// Tariff key for a space: its rate template if it has one, else its segment.
pub fn pricing_target(space: &Space) -> TariffTarget {
    space
        .template_id
        .map_or(TariffTarget::Segment(space.segment), TariffTarget::Template)
}

/// Convert list rows, skipping (and logging) rows with unreadable tags so
/// one bad row does not hide the rest.
fn convert_rows<R, T>(rows: Vec<R>, kind: &'static str) -> Vec<T>
where
    T: TryFrom<R, Error = CoreError>,
{
    rows.into_iter()
        .filter_map(|row| match T::try_from(row) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(kind, error = %e, "skipping unreadable row");
                None
            }
        })
        .collect()
}

fn reservation_code() -> String {
    let id: String = Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(8)
        .collect();
    format!("RES-{}", id.to_uppercase())
}

pub struct ParkingService {
    client: RestClient,
}

impl ParkingService {
    // ── Construction ─────────────────────────────────────────────────

    pub fn new(config: &BackendConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            tls: (&config.tls).into(),
            timeout: config.timeout,
        };
        let credentials = parkly_api::Credentials::from(&config.auth);
        let client = RestClient::new(config.url.as_str(), &credentials, &transport)?;
        Ok(Self { client })
    }

    // ── Lots & spaces ────────────────────────────────────────────────

    pub async fn lots(&self) -> Result<Vec<ParkingLot>, CoreError> {
        let rows = self.client.list_lots().await?;
        Ok(rows.into_iter().map(ParkingLot::from).collect())
    }

    pub async fn lot(&self, lot: LotId) -> Result<ParkingLot, CoreError> {
        self.client
            .get_lot(lot.get())
            .await?
            .map(ParkingLot::from)
            .ok_or_else(|| CoreError::not_found("Lot", lot))
    }

    pub async fn spaces(&self, lot: LotId) -> Result<Vec<Space>, CoreError> {
        let rows = self.client.list_spaces(lot.get()).await?;
        Ok(rows.into_iter().map(Space::from).collect())
    }

    pub async fn space(&self, lot: LotId, number: i32) -> Result<Space, CoreError> {
        self.client
            .get_space(lot.get(), number)
            .await?
            .map(Space::from)
            .ok_or_else(|| CoreError::not_found("Space", format!("{number} in lot {lot}")))
    }

    pub async fn templates(&self, lot: LotId) -> Result<Vec<RateTemplate>, CoreError> {
        let rows = self.client.list_templates(lot.get()).await?;
        Ok(rows.into_iter().map(RateTemplate::from).collect())
    }

    // ── Tariffs ──────────────────────────────────────────────────────

    /// All tariff rows of a lot, newest first, optionally for one period.
    pub async fn tariffs(
        &self,
        lot: LotId,
        period: Option<PeriodType>,
    ) -> Result<Vec<TariffEntry>, CoreError> {
        let filter = TariffFilter {
            period_code: period.map(PeriodType::code),
            ..TariffFilter::default()
        };
        let rows = self.client.list_tariffs(lot.get(), &filter).await?;
        Ok(convert_rows(rows, "tariff"))
    }

    /// The tariff in force for `(lot, target, period)` at `now`.
    pub async fn resolve_tariff(
        &self,
        lot: LotId,
        target: TariffTarget,
        period: PeriodType,
        now: DateTime<Utc>,
    ) -> Result<TariffEntry, CoreError> {
        let filter = match target {
            TariffTarget::Template(id) => TariffFilter {
                template_id: Some(id),
                segment: None,
                period_code: Some(period.code()),
            },
            TariffTarget::Segment(segment) => TariffFilter {
                template_id: None,
                segment: Some(segment.tag()),
                period_code: Some(period.code()),
            },
        };
        let rows = self.client.list_tariffs(lot.get(), &filter).await?;
        let entries: Vec<TariffEntry> = convert_rows(rows, "tariff");
        let entry = pricing::resolve_tariff(&entries, lot, target, period, now)?;
        debug!(lot = %lot, %target, %period, tariff_id = entry.id, price = %entry.price, "resolved tariff");
        Ok(entry.clone())
    }

    // ── Occupancy ────────────────────────────────────────────────────

    pub async fn open_occupancies(&self, lot: LotId) -> Result<Vec<Occupancy>, CoreError> {
        let rows = self.client.list_open_occupancies(lot.get()).await?;
        Ok(rows.into_iter().map(Occupancy::from).collect())
    }

    /// Stays that ended at or after `since`, newest first.
    pub async fn occupancy_history(
        &self,
        lot: LotId,
        since: DateTime<Utc>,
        limit: u32,
    ) -> Result<Vec<Occupancy>, CoreError> {
        let rows = self
            .client
            .list_occupancy_history(lot.get(), since, limit)
            .await?;
        Ok(rows.into_iter().map(Occupancy::from).collect())
    }

    /// Per-segment totals for a lot.
    pub async fn occupancy_summary(&self, lot: LotId) -> Result<OccupancySummary, CoreError> {
        let spaces = self.spaces(lot).await?;
        let open = self.open_occupancies(lot).await?;
        Ok(aggregate_occupancy(lot, &spaces, &open))
    }

    /// Record a vehicle entering a space.
    ///
    /// Rejects the entry when the space already holds a vehicle or the
    /// plate is already inside the lot. The checks and the insert are
    /// separate requests, so two simultaneous entries can still race.
    pub async fn register_entry(&self, req: &EntryRequest) -> Result<Occupancy, CoreError> {
        let plate = normalize_plate(&req.plate);
        if plate.is_empty() {
            return Err(CoreError::ValidationFailed {
                message: "plate must not be empty".into(),
            });
        }

        let space = self.space(req.lot, req.space).await?;

        if let Some(current) = self
            .client
            .find_open_occupancy_by_space(req.lot.get(), space.number)
            .await?
        {
            return Err(CoreError::conflict(format!(
                "space {} is occupied by {}",
                space.number, current.veh_patente
            )));
        }
        if let Some(current) = self
            .client
            .find_open_occupancy_by_plate(req.lot.get(), &plate)
            .await?
        {
            return Err(CoreError::conflict(format!(
                "vehicle {plate} is already parked in space {}",
                current.pla_numero
            )));
        }

        let row = self
            .client
            .insert_occupancy(&NewOccupancy {
                est_id: req.lot.get(),
                pla_numero: space.number,
                veh_patente: plate,
                ocu_fh_entrada: req.at,
                tiptar_nro: req.period.code(),
            })
            .await?;
        let occupancy = Occupancy::from(row);
        info!(
            lot = %req.lot,
            space = occupancy.space,
            plate = %occupancy.plate,
            occupancy_id = occupancy.id,
            "vehicle entered"
        );
        Ok(occupancy)
    }

    /// Price the exit of `plate` at `at` without writing anything.
    pub async fn quote_exit(
        &self,
        lot: LotId,
        plate: &str,
        at: DateTime<Utc>,
    ) -> Result<ExitQuote, CoreError> {
        let plate = normalize_plate(plate);
        let occupancy = self
            .client
            .find_open_occupancy_by_plate(lot.get(), &plate)
            .await?
            .map(Occupancy::from)
            .ok_or_else(|| CoreError::not_found("Open occupancy", &plate))?;

        let space = self.space(lot, occupancy.space).await?;
        let tariff = self
            .resolve_tariff(lot, pricing_target(&space), occupancy.period, at)
            .await?;
        let fee = calculate_fee(occupancy.entered_at, at, tariff.price, occupancy.period)?;

        Ok(ExitQuote {
            occupancy,
            space,
            tariff,
            exit_at: at,
            fee,
        })
    }

    /// Close the stay, record the payment and link it to the stay.
    ///
    /// Three sequential writes. If a later step fails the earlier ones stay
    /// in place; the failure is logged with the ids involved and returned
    /// as `PartialWrite`.
    pub async fn register_exit(&self, req: &ExitRequest) -> Result<ExitReceipt, CoreError> {
        let quote = self.quote_exit(req.lot, &req.plate, req.at).await?;
        let occupancy_id = quote.occupancy.id;

        self.client
            .close_occupancy(occupancy_id, req.at)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    CoreError::conflict(format!("occupancy {occupancy_id} was already closed"))
                } else {
                    CoreError::from(e)
                }
            })?;

        let payment = match self
            .record_payment(
                req.lot,
                quote.fee.amount,
                &req.method,
                &quote.occupancy.plate,
                req.at,
            )
            .await
        {
            Ok(payment) => payment,
            Err(e) => {
                warn!(occupancy_id, error = %e, "occupancy closed but payment was not recorded");
                return Err(CoreError::PartialWrite {
                    message: format!("occupancy {occupancy_id} closed but the payment failed: {e}"),
                });
            }
        };

        let occupancy = match self
            .client
            .link_occupancy_payment(occupancy_id, payment.id)
            .await
        {
            Ok(row) => Occupancy::from(row),
            Err(e) => {
                warn!(
                    occupancy_id,
                    payment_id = payment.id,
                    error = %e,
                    "payment recorded but not linked to occupancy"
                );
                return Err(CoreError::PartialWrite {
                    message: format!(
                        "payment {} recorded but linking it to occupancy {occupancy_id} failed: {}",
                        payment.id,
                        CoreError::from(e)
                    ),
                });
            }
        };

        info!(
            lot = %req.lot,
            plate = %occupancy.plate,
            occupancy_id,
            payment_id = payment.id,
            amount = %payment.amount,
            "vehicle exited"
        );
        Ok(ExitReceipt {
            occupancy,
            payment,
            fee: quote.fee,
        })
    }

    // ── Payments ─────────────────────────────────────────────────────

    pub async fn payments(
        &self,
        lot: LotId,
        since: Option<DateTime<Utc>>,
        limit: u32,
    ) -> Result<Vec<Payment>, CoreError> {
        let rows = self.client.list_payments(lot.get(), since, limit).await?;
        Ok(rows.into_iter().map(Payment::from).collect())
    }

    async fn record_payment(
        &self,
        lot: LotId,
        amount: Decimal,
        method: &PaymentMethod,
        plate: &str,
        at: DateTime<Utc>,
    ) -> Result<Payment, CoreError> {
        let row = self
            .client
            .insert_payment(&NewPayment {
                est_id: lot.get(),
                pag_monto: amount,
                pag_fh: at,
                mepa_metodo: method.tag().to_owned(),
                veh_patente: Some(plate.to_owned()),
            })
            .await?;
        Ok(Payment::from(row))
    }

    // ── Subscriptions ────────────────────────────────────────────────

    /// Subscriptions of a lot; with `active_on`, only those not yet expired
    /// on that day.
    pub async fn subscriptions(
        &self,
        lot: LotId,
        active_on: Option<NaiveDate>,
    ) -> Result<Vec<Subscription>, CoreError> {
        let rows = self.client.list_subscriptions(lot.get(), active_on).await?;
        Ok(convert_rows(rows, "subscription"))
    }

    pub async fn subscription(&self, lot: LotId, number: i64) -> Result<Subscription, CoreError> {
        let row = self
            .client
            .get_subscription(lot.get(), number)
            .await?
            .ok_or_else(|| CoreError::not_found("Subscription", number))?;
        Subscription::try_from(row)
    }

    async fn subscription_fee(
        &self,
        lot: LotId,
        target: TariffTarget,
        period: PeriodType,
        quantity: u32,
        at: DateTime<Utc>,
    ) -> Result<Fee, CoreError> {
        let tariff = self.resolve_tariff(lot, target, period, at).await?;
        let units = i64::from(quantity);
        Ok(Fee {
            period,
            units,
            unit_price: tariff.price,
            amount: pricing::charge(tariff.price, units)?,
        })
    }

    /// Sell a new subscription: price it, take the payment, store the pass.
    pub async fn create_subscription(
        &self,
        req: &CreateSubscriptionRequest,
    ) -> Result<SubscriptionReceipt, CoreError> {
        let plate = normalize_plate(&req.plate);
        if plate.is_empty() || req.holder.trim().is_empty() {
            return Err(CoreError::ValidationFailed {
                message: "holder and plate are required".into(),
            });
        }
        let ends_on = extend_period(req.starts_on, req.period, req.quantity)?;
        let fee = self
            .subscription_fee(
                req.lot,
                TariffTarget::Segment(req.segment),
                req.period.tariff_period(),
                req.quantity,
                req.at,
            )
            .await?;

        let payment = self
            .record_payment(req.lot, fee.amount, &req.method, &plate, req.at)
            .await?;

        let row = self
            .client
            .insert_subscription(&NewSubscription {
                est_id: req.lot.get(),
                abo_titular: req.holder.trim().to_owned(),
                veh_patente: plate.clone(),
                catv_segmento: req.segment.tag(),
                tipo_abono: req.period.to_string(),
                abo_fecha_inicio: req.starts_on,
                abo_fecha_fin: ends_on,
                pag_nro: payment.id,
            })
            .await
            .map_err(|e| {
                warn!(payment_id = payment.id, plate = %plate, error = %e, "payment recorded but subscription not created");
                CoreError::PartialWrite {
                    message: format!(
                        "payment {} recorded but creating the subscription failed: {}",
                        payment.id,
                        CoreError::from(e)
                    ),
                }
            })?;
        let subscription = Subscription::try_from(row)?;

        info!(
            lot = %req.lot,
            number = subscription.number,
            plate = %subscription.plate,
            ends_on = %subscription.ends_on,
            "subscription created"
        );
        Ok(SubscriptionReceipt {
            subscription,
            payment,
            fee,
        })
    }

    /// Extend a subscription by `quantity` periods.
    ///
    /// Counts from the current end date while the pass is valid, otherwise
    /// from the day of the renewal.
    pub async fn renew_subscription(
        &self,
        req: &RenewSubscriptionRequest,
    ) -> Result<SubscriptionReceipt, CoreError> {
        let current = self.subscription(req.lot, req.number).await?;
        let base = current.renewal_base(req.at.date_naive());
        let new_end = extend_period(base, current.period, req.quantity)?;
        let fee = self
            .subscription_fee(
                req.lot,
                TariffTarget::Segment(current.segment),
                current.period.tariff_period(),
                req.quantity,
                req.at,
            )
            .await?;

        let payment = self
            .record_payment(req.lot, fee.amount, &req.method, &current.plate, req.at)
            .await?;

        let row = self
            .client
            .extend_subscription(current.number, new_end, payment.id)
            .await
            .map_err(|e| {
                warn!(
                    number = current.number,
                    payment_id = payment.id,
                    error = %e,
                    "payment recorded but subscription not extended"
                );
                CoreError::PartialWrite {
                    message: format!(
                        "payment {} recorded but extending subscription {} failed: {}",
                        payment.id,
                        current.number,
                        CoreError::from(e)
                    ),
                }
            })?;
        let subscription = Subscription::try_from(row)?;

        info!(
            lot = %req.lot,
            number = subscription.number,
            from = %current.ends_on,
            to = %subscription.ends_on,
            "subscription renewed"
        );
        Ok(SubscriptionReceipt {
            subscription,
            payment,
            fee,
        })
    }

    // ── Shifts ───────────────────────────────────────────────────────

    pub async fn shifts(
        &self,
        lot: LotId,
        employee: Option<Uuid>,
        limit: u32,
    ) -> Result<Vec<Shift>, CoreError> {
        let rows = self.client.list_shifts(lot.get(), employee, limit).await?;
        Ok(convert_rows(rows, "shift"))
    }

    /// Open a shift. An employee holds at most one open shift per lot.
    pub async fn open_shift(&self, req: &OpenShiftRequest) -> Result<Shift, CoreError> {
        if req.opening_cash.is_sign_negative() {
            return Err(CoreError::ValidationFailed {
                message: "opening cash cannot be negative".into(),
            });
        }
        let open_state = ShiftState::Open.to_string();
        if let Some(existing) = self
            .client
            .find_shift_in_state(req.lot.get(), req.employee, &open_state)
            .await?
        {
            return Err(CoreError::conflict(format!(
                "employee {} already has shift {} open since {}",
                req.employee, existing.tur_id, existing.tur_fh_apertura
            )));
        }

        let row = self
            .client
            .insert_shift(&NewShift {
                est_id: req.lot.get(),
                play_id: req.employee,
                tur_fh_apertura: req.at,
                tur_caja_inicial: req.opening_cash,
                tur_estado: open_state,
            })
            .await?;
        let shift = Shift::try_from(row)?;
        info!(lot = %req.lot, employee = %req.employee, shift_id = shift.id, "shift opened");
        Ok(shift)
    }

    /// Close the employee's open shift. Fails when none is open.
    pub async fn close_shift(&self, req: &CloseShiftRequest) -> Result<Shift, CoreError> {
        if req.closing_cash.is_sign_negative() {
            return Err(CoreError::ValidationFailed {
                message: "closing cash cannot be negative".into(),
            });
        }
        let open_state = ShiftState::Open.to_string();
        let open = self
            .client
            .find_shift_in_state(req.lot.get(), req.employee, &open_state)
            .await?
            .ok_or_else(|| {
                CoreError::conflict(format!("employee {} has no open shift", req.employee))
            })?;

        let row = self
            .client
            .close_shift(
                open.tur_id,
                &open_state,
                &ShiftState::Closed.to_string(),
                req.at,
                req.closing_cash,
                req.notes.as_deref(),
            )
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    CoreError::conflict(format!("shift {} was already closed", open.tur_id))
                } else {
                    CoreError::from(e)
                }
            })?;
        let shift = Shift::try_from(row)?;
        info!(
            lot = %req.lot,
            employee = %req.employee,
            shift_id = shift.id,
            closing_cash = %req.closing_cash,
            "shift closed"
        );
        Ok(shift)
    }

    // ── Reservations ─────────────────────────────────────────────────

    pub async fn reservations(
        &self,
        lot: LotId,
        status: Option<ReservationStatus>,
    ) -> Result<Vec<Reservation>, CoreError> {
        let tag = status.map(|s| s.to_string());
        let states: Vec<&str> = tag.as_deref().into_iter().collect();
        let rows = self.client.list_reservations(lot.get(), &states).await?;
        Ok(convert_rows(rows, "reservation"))
    }

    /// Book a space for a time window, priced with the hourly tariff.
    pub async fn create_reservation(
        &self,
        req: &CreateReservationRequest,
    ) -> Result<Reservation, CoreError> {
        if req.ends_at <= req.starts_at {
            return Err(CoreError::ValidationFailed {
                message: "reservation must end after it starts".into(),
            });
        }
        let plate = normalize_plate(&req.plate);
        if plate.is_empty() {
            return Err(CoreError::ValidationFailed {
                message: "plate must not be empty".into(),
            });
        }
        let space = self.space(req.lot, req.space).await?;

        let live = [
            ReservationStatus::Pending,
            ReservationStatus::Confirmed,
            ReservationStatus::Active,
        ]
        .map(|s| s.to_string());
        let live: Vec<&str> = live.iter().map(String::as_str).collect();
        let existing = self.client.list_reservations(req.lot.get(), &live).await?;
        if let Some(clash) = convert_rows::<_, Reservation>(existing, "reservation")
            .into_iter()
            .find(|r| r.space == space.number && r.overlaps(req.starts_at, req.ends_at))
        {
            return Err(CoreError::conflict(format!(
                "space {} is already reserved by {} ({} to {})",
                space.number, clash.code, clash.starts_at, clash.ends_at
            )));
        }

        let tariff = self
            .resolve_tariff(req.lot, pricing_target(&space), PeriodType::Hour, req.at)
            .await?;
        let fee = calculate_fee(req.starts_at, req.ends_at, tariff.price, PeriodType::Hour)?;

        let row = self
            .client
            .insert_reservation(&NewReservation {
                res_codigo: reservation_code(),
                est_id: req.lot.get(),
                pla_numero: space.number,
                veh_patente: plate,
                res_fh_ingreso: req.starts_at,
                res_fh_fin: req.ends_at,
                res_estado: ReservationStatus::Pending.to_string(),
                res_monto: fee.amount,
            })
            .await?;
        let reservation = Reservation::try_from(row)?;
        info!(
            lot = %req.lot,
            code = %reservation.code,
            space = reservation.space,
            amount = %reservation.amount,
            "reservation created"
        );
        Ok(reservation)
    }

    /// Cancel a reservation that is still pending or confirmed.
    pub async fn cancel_reservation(
        &self,
        lot: LotId,
        code: &str,
    ) -> Result<Reservation, CoreError> {
        let row = self
            .client
            .get_reservation(lot.get(), code)
            .await?
            .ok_or_else(|| CoreError::not_found("Reservation", code))?;
        let current = Reservation::try_from(row)?;

        let target = ReservationStatus::Cancelled;
        if !current.status.can_transition_to(target) {
            return Err(CoreError::InvalidTransition {
                from: current.status,
                to: target,
            });
        }

        let row = self
            .client
            .update_reservation_state(code, &current.status.to_string(), &target.to_string())
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    CoreError::conflict(format!("reservation {code} changed state concurrently"))
                } else {
                    CoreError::from(e)
                }
            })?;
        let reservation = Reservation::try_from(row)?;
        info!(lot = %lot, code, from = %current.status, "reservation cancelled");
        Ok(reservation)
    }
}
