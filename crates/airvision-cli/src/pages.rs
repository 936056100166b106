use airvision_core::{AdvisoryTier, ForecastDay};
use ncr_feed::snapshot::{LiveSummary, PolicySummary, PollutantShareRow, SourceShareRow};
use ncr_feed::{GeoPoint, Station};
use std::fmt::Write;

fn advisory_block(out: &mut String, tier: &AdvisoryTier) {
    let _ = writeln!(out, "  status:  {} ({})", tier.label(), tier.color_hint);
    let _ = writeln!(out, "  advice:  {}", tier.advice);
    let _ = writeln!(out, "  mask:    {}", tier.mask_guidance);
    let _ = writeln!(out, "  outdoor: {}", tier.outdoor_guidance);
}

pub fn live(summary: &LiveSummary, token_configured: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} live AQI", summary.city);
    match (summary.reading.index, &summary.advisory) {
        (Some(aqi), Some(tier)) => {
            let _ = writeln!(out, "  AQI:     {aqi:.0}");
            advisory_block(&mut out, tier);
        }
        _ if !token_configured => {
            let _ = writeln!(out, "  no live data: WAQI_TOKEN is not configured");
        }
        _ => {
            let _ = writeln!(out, "  no live data: feed unavailable");
        }
    }
    if let Some(geo) = summary.reading.coordinates {
        let _ = writeln!(out, "  station: {:.4}, {:.4}", geo.lat, geo.lon);
    }
    out
}

pub fn forecast(days: &[ForecastDay], calibrated: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Forecast ({})",
        if calibrated { "anchored to live reading" } else { "uncalibrated" }
    );
    for day in days {
        let _ = writeln!(
            out,
            "  {:<10} {:>4.0}  {}  {}",
            day.label,
            day.aqi,
            day.tier.label(),
            day.tier.mask_guidance
        );
    }
    out
}

pub fn sources(rows: &[SourceShareRow], pollutants: &[PollutantShareRow]) -> String {
    let mut out = String::from("Source contribution\n");
    for row in rows {
        let _ = writeln!(out, "  {:<30} {:>5.1}%", row.label, row.percent);
    }
    if !pollutants.is_empty() {
        out.push_str("Pollutant importance\n");
        for row in pollutants {
            let _ = writeln!(out, "  {:<30} {:>5.1}%", row.name, row.percent);
        }
    }
    out
}

pub fn policy(summary: &PolicySummary) -> String {
    let mut out = String::new();
    let o = &summary.outcome;
    let l = &summary.levers;
    let _ = writeln!(
        out,
        "Levers: traffic {:.0}%, dust {:.0}%, industry {:.0}%, photochemical {:.0}%",
        l.traffic, l.dust_stubble, l.industry, l.photochemical
    );
    let _ = writeln!(
        out,
        "  baseline:  {:.0} ({})",
        o.baseline,
        if summary.baseline_is_live { "live" } else { "default" }
    );
    let _ = writeln!(out, "  projected: {:.0}  {}", o.projected_index, o.tier.label());
    let _ = writeln!(
        out,
        "  reduction: {:.0} points ({:.1}%)",
        o.reduction(),
        o.effectiveness * 100.0
    );
    out
}

pub fn map(stations: &[Station], center: Option<GeoPoint>) -> String {
    let mut out = String::new();
    match center {
        Some(c) => {
            let _ = writeln!(out, "NCR stations (center {:.4}, {:.4})", c.lat, c.lon);
        }
        None => {
            let _ = writeln!(out, "NCR stations: no live station data");
        }
    }
    for s in stations {
        let _ = writeln!(
            out,
            "  {:<10} {:>4.0}  {:<13} {}  ({:.4}, {:.4})",
            s.city,
            s.aqi,
            s.status(),
            s.marker_color(),
            s.lat,
            s.lon
        );
    }
    out
}
