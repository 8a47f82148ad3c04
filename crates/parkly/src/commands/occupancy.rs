//! Occupancy summary handler.

use tabled::Tabled;

use parkly_core::{LotId, OccupancySummary, ParkingService, SegmentOccupancy};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{self, Tone};

use super::util;

#[derive(Tabled)]
struct SegmentRow {
    #[tabled(rename = "Segment")]
    segment: &'static str,
    #[tabled(rename = "Total")]
    total: u32,
    #[tabled(rename = "Occupied")]
    occupied: u32,
    #[tabled(rename = "Free")]
    free: String,
}

fn segment_row(s: &SegmentOccupancy, color: bool) -> SegmentRow {
    let tone = match s.free {
        0 if s.total > 0 => Tone::Bad,
        0 => Tone::Muted,
        f if f * 5 <= s.total => Tone::Warn,
        _ => Tone::Good,
    };
    SegmentRow {
        segment: s.segment.label(),
        total: s.total,
        occupied: s.occupied,
        free: output::paint(&s.free.to_string(), tone, color),
    }
}

fn detail(summary: &OccupancySummary, color: bool) -> String {
    let mut rows: Vec<SegmentRow> = summary
        .segments
        .iter()
        .map(|s| segment_row(s, color))
        .collect();
    rows.push(SegmentRow {
        segment: "All",
        total: summary.total(),
        occupied: summary.occupied(),
        free: summary.free().to_string(),
    });
    tabled::Table::new(rows)
        .with(tabled::settings::Style::rounded())
        .to_string()
}

pub async fn handle(
    service: &ParkingService,
    lot: Option<LotId>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let lot = util::require_lot(lot)?;
    let summary = service.occupancy_summary(lot).await?;
    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &summary,
        |s| detail(s, color),
        |s| s.free().to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
