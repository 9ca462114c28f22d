//! Output document assembly
//!
//! The body is the sanitized (and possibly rescaled) text with every
//! non-comment line labelled `N<n>` and a `G04` dwell injected after each
//! move that ends a segment. Labels are shared between moves and dwells.
//! The header and footer come from the template with placeholders
//! substituted; the footer statistics block is then enriched with the total
//! time and, when scaling was applied, the scale line.

use std::sync::OnceLock;

use chrono::{DateTime, Local};
use regex::{Captures, Regex};
use tapkit_core::template::{
    DATE, ESTIMATED_TIME, FEED_RATE, FILENAME, LONG_PAUSES, MATERIAL, MEDIUM_PAUSES,
    PAUSE_SECONDS, SHORT_PAUSES, TOTAL_COMMANDS, TOTAL_DISTANCE, TOTAL_PAUSES,
};
use tapkit_core::{MaterialProfile, ScaleRequest, Template};

use crate::classifier::PausePlan;
use crate::filename::split_extension;
use crate::stats::ProcessingStatistics;
use crate::tokenizer::is_comment_line;

/// Date and time format of the `{DATE}` placeholder
pub const DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Everything the header and footer placeholders draw on
#[derive(Debug, Clone, Copy)]
pub struct AssemblyContext<'a> {
    /// Input file name as supplied by the caller
    pub filename: &'a str,
    pub timestamp: DateTime<Local>,
    pub material: &'a MaterialProfile,
    pub statistics: &'a ProcessingStatistics,
    pub scale: Option<&'a ScaleRequest>,
}

/// Number every non-comment line and inject the planned dwells
pub fn label_body(text: &str, plan: &PausePlan) -> Vec<String> {
    let mut out = Vec::with_capacity(text.len() / 8 + plan.len());
    let mut label = 1usize;

    for (index, line) in text.split('\n').enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        if is_comment_line(line) {
            out.push(line.to_string());
        } else {
            out.push(format!("N{label} {line}"));
            label += 1;
        }

        if let Some(dwell) = plan.get(&index) {
            out.push(format!("N{label} G04 {dwell}"));
            label += 1;
        }
    }

    out
}

/// Substitute the header placeholders
///
/// `{FEED_RATE}` is replaced everywhere; the others at their first
/// occurrence only.
pub fn render_header(header: &str, ctx: &AssemblyContext<'_>) -> String {
    let (base, _) = split_extension(ctx.filename);
    header
        .replacen(FILENAME, base, 1)
        .replacen(DATE, &ctx.timestamp.format(DATE_FORMAT).to_string(), 1)
        .replacen(MATERIAL, &ctx.material.name, 1)
        .replace(FEED_RATE, &ctx.material.feed_rate.to_string())
}

/// Substitute the footer placeholders and enrich the statistics block
pub fn render_footer(footer: &str, ctx: &AssemblyContext<'_>, body_lines: usize) -> String {
    let stats = ctx.statistics;
    let pauses = &stats.pauses_inserted;

    let substituted = footer
        .replacen(TOTAL_DISTANCE, &format!("{:.2}", stats.total_distance), 1)
        .replacen(ESTIMATED_TIME, &stats.cut_time().to_string(), 1)
        .replacen(TOTAL_COMMANDS, &body_lines.to_string(), 1)
        .replacen(TOTAL_PAUSES, &pauses.total.to_string(), 1)
        .replacen(SHORT_PAUSES, &pauses.short.to_string(), 1)
        .replacen(MEDIUM_PAUSES, &pauses.medium.to_string(), 1)
        .replacen(LONG_PAUSES, &pauses.long.to_string(), 1)
        .replacen(PAUSE_SECONDS, &format!("{:.1}", stats.pause_seconds), 1);

    enrich_footer(&substituted, stats, ctx.scale)
}

fn pause_line_regex() -> &'static Regex {
    static PAUSE_LINE: OnceLock<Regex> = OnceLock::new();
    PAUSE_LINE.get_or_init(|| {
        Regex::new(r"; Tempo de pausas: [\d.]+\s+segundos[ \t]*\r?\n((?:[ \t]*\r?\n)+); G-CODE gerado por:")
            .expect("invalid regex pattern")
    })
}

/// Insert the scale line and the total time after the pause time line
///
/// Only applies when the pause line is followed by blank lines and the
/// credit line; other footers are returned unchanged.
pub fn enrich_footer(
    footer: &str,
    stats: &ProcessingStatistics,
    scale: Option<&ScaleRequest>,
) -> String {
    let scale_line = match scale {
        Some(req) if req.apply => format!(
            "; Escala aplicada: {}mm → {}mm ({:.6}x)\n",
            req.current_length, req.desired_length, req.factor
        ),
        _ => String::new(),
    };

    pause_line_regex()
        .replacen(footer, 1, |caps: &Captures<'_>| {
            format!(
                "; Tempo de pausas: {:.1} segundos\n{}; TEMPO TOTAL ESTIMADO: {} minutos\n{}; G-CODE gerado por:",
                stats.pause_seconds,
                scale_line,
                stats.total_minutes_ceil(),
                &caps[1]
            )
        })
        .into_owned()
}

/// `header + blank + body + blank + footer`
pub fn assemble(
    text: &str,
    plan: &PausePlan,
    template: &Template,
    ctx: &AssemblyContext<'_>,
) -> String {
    let body_lines = if text.is_empty() {
        0
    } else {
        text.split('\n').count()
    };

    let mut lines: Vec<String> = render_header(&template.header, ctx)
        .split('\n')
        .map(str::to_string)
        .collect();
    lines.push(String::new());
    lines.extend(label_body(text, plan));
    lines.push(String::new());
    lines.extend(
        render_footer(&template.footer, ctx, body_lines)
            .split('\n')
            .map(str::to_string),
    );

    lines.join("\n")
}
