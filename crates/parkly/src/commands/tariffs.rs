//! Tariff command handlers.

use tabled::Tabled;

use parkly_core::{
    LotId, ParkingService, PeriodType, RateTemplate, TariffEntry, TariffTarget, VehicleSegment,
    pricing_target,
};

use crate::cli::{GlobalOpts, TariffsArgs, TariffsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct TariffRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Applies to")]
    target: String,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Effective from")]
    effective_from: String,
}

impl From<&TariffEntry> for TariffRow {
    fn from(t: &TariffEntry) -> Self {
        Self {
            id: t.id,
            target: t.target.to_string(),
            period: t.period.to_string(),
            price: t.price.to_string(),
            effective_from: util::format_instant(t.effective_from),
        }
    }
}

#[derive(Tabled)]
struct TemplateRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Segment")]
    segment: &'static str,
}

impl From<&RateTemplate> for TemplateRow {
    fn from(t: &RateTemplate) -> Self {
        Self {
            id: t.id,
            name: t.name.clone(),
            segment: t.segment.label(),
        }
    }
}

fn detail(t: &TariffEntry) -> String {
    [
        format!("Tariff:         {}", t.id),
        format!("Lot:            {}", t.lot),
        format!("Applies to:     {}", t.target),
        format!("Period:         {}", t.period),
        format!("Price:          {}", t.price),
        format!("Effective from: {}", util::format_instant(t.effective_from)),
    ]
    .join("\n")
}

pub async fn handle(
    service: &ParkingService,
    lot: Option<LotId>,
    args: TariffsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let lot = util::require_lot(lot)?;
    match args.command {
        TariffsCommand::List { period } => {
            let tariffs = service.tariffs(lot, period.map(PeriodType::from)).await?;
            let out = output::render_list(
                &global.output,
                &tariffs,
                |t| TariffRow::from(t),
                |t| t.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        TariffsCommand::Templates => {
            let templates = service.templates(lot).await?;
            let out = output::render_list(
                &global.output,
                &templates,
                |t| TemplateRow::from(t),
                |t| t.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        TariffsCommand::Resolve {
            space,
            template,
            segment,
            period,
            at,
        } => {
            let now = util::parse_instant("at", at.as_deref())?;
            let target = match (space, template, segment) {
                (Some(number), _, _) => pricing_target(&service.space(lot, number).await?),
                (None, Some(id), _) => TariffTarget::Template(id),
                (None, None, Some(seg)) => TariffTarget::Segment(VehicleSegment::from(seg)),
                (None, None, None) => {
                    return Err(CliError::Validation {
                        field: "target".into(),
                        reason: "pass one of --space, --template or --segment".into(),
                    });
                }
            };
            let tariff = service
                .resolve_tariff(lot, target, PeriodType::from(period), now)
                .await?;
            let out = output::render_single(&global.output, &tariff, detail, |t| {
                t.price.to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
