//! Terminal rendering of a report.

use crate::conditions::snow_depth_inches;
use crate::evaluator::{MowStatus, Verdict};
use crate::flavor::FlavorText;
use crate::report::Report;
use crossterm::style::{Color, Stylize};
use std::fmt;

fn paint(text: &str, color: Color, enabled: bool) -> String {
    if enabled {
        text.with(color).bold().to_string()
    } else {
        text.to_string()
    }
}

fn status_color(status: MowStatus) -> Color {
    match status {
        MowStatus::Go => Color::Green,
        MowStatus::Caution => Color::Yellow,
        MowStatus::NoGo => Color::Red,
    }
}

fn status_marker(status: MowStatus) -> &'static str {
    match status {
        MowStatus::Go => "[ok]",
        MowStatus::Caution => "[!]",
        MowStatus::NoGo => "[X]",
    }
}

/// A report paired with its presentation settings.
struct Panel<'a> {
    report: &'a Report,
    flavor: &'a dyn FlavorText,
    color: bool,
}

impl Panel<'_> {
    fn header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.report;
        writeln!(f, "THE LAWN ENFORCER")?;
        writeln!(
            f,
            "Radar locked: {}",
            r.location.as_deref().unwrap_or("(no sector)")
        )?;
        if let Some(notice) = &r.notice {
            writeln!(f, "{}", paint(notice, Color::Yellow, self.color))?;
        }
        if !r.snapshot.authoritative {
            writeln!(
                f,
                "{}",
                paint(
                    "Default sensors shown - not based on live data.",
                    Color::DarkYellow,
                    self.color
                )
            )?;
        }
        Ok(())
    }

    fn dashboard(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.report;
        let s = &r.snapshot;
        let a = &r.assessment;

        writeln!(
            f,
            "  Sky {} | Temp {:.0}°F | Wind {:.0} mph (gusts {:.0}) | Rain {:.2} in",
            r.sky.label(),
            s.temperature_f,
            s.wind_speed_mph,
            s.wind_gust_mph,
            s.current_rain_in
        )?;

        write!(
            f,
            "  24h precip {:.2} in | Snow {:.1} in | ",
            s.past_24h_precip_in,
            snow_depth_inches(s)
        )?;
        match (r.pollen_reported, r.pollen_species) {
            (0, _) => writeln!(f, "Pollen not reported")?,
            (_, Some(species)) => writeln!(
                f,
                "Pollen {:.0} ({}, {})",
                s.max_pollen_index,
                a.pollen.label(),
                species
            )?,
            (_, None) => writeln!(f, "Pollen {:.0} ({})", s.max_pollen_index, a.pollen.label())?,
        }

        write!(
            f,
            "  Ground: {} | Leaves: {}",
            a.ground.label(),
            a.leaves.label()
        )?;
        if let Some(reported) = s.manual_ground {
            write!(f, " | Reported: {}", reported.label())?;
        }
        writeln!(f)
    }

    fn verdict(&self, f: &mut fmt::Formatter<'_>, verdict: &Verdict) -> fmt::Result {
        let live = self.report.snapshot.authoritative;
        let status = verdict.status;
        let heading = match status {
            MowStatus::Go => "GREEN LIGHT",
            MowStatus::Caution => "CAUTION",
            MowStatus::NoGo => "NO GO",
        };

        write!(
            f,
            "MISSION STATUS: {}",
            paint(heading, status_color(status), self.color)
        )?;
        if !live {
            write!(f, " (unverified)")?;
        }
        writeln!(f)?;

        match status {
            MowStatus::Go if live => writeln!(f, "{}", self.flavor.go_quote())?,
            MowStatus::Go | MowStatus::Caution => {}
            MowStatus::NoGo => writeln!(f, "Stand Down.")?,
        }

        for reason in &verdict.reasons {
            let marker = paint(
                status_marker(reason.severity),
                status_color(reason.severity),
                self.color,
            );
            writeln!(f, "  {} {}", marker, reason)?;
        }
        Ok(())
    }
}

impl fmt::Display for Panel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.header(f)?;
        writeln!(f)?;
        self.dashboard(f)?;
        writeln!(f)?;

        match &self.report.verdict {
            Some(verdict) => self.verdict(f, verdict),
            None => writeln!(f, "No verdict: resolve a location to get a mowing call."),
        }
    }
}

/// Render `report` as a multi-line panel.
///
/// `flavor` only contributes the closing line of a GO verdict on live data.
pub fn render_panel(report: &Report, flavor: &dyn FlavorText, color: bool) -> String {
    Panel {
        report,
        flavor,
        color,
    }
    .to_string()
}
