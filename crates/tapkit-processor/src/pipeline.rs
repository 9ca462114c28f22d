//! Processing entry points
//!
//! `process` runs the stages in order: idempotence check, sanitization,
//! optional rescaling, geometry extraction, classification, statistics and
//! assembly. It never fails once it has the content as a string.

use std::time::Instant;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tapkit_core::{MaterialProfile, ScaleRequest, Template};

use crate::assembler::{assemble, AssemblyContext};
use crate::classifier::classify;
use crate::detector::is_already_processed;
use crate::filename::sanitize_filename;
use crate::geometry::{extract_moves, segments, total_distance};
use crate::sanitizer::sanitize;
use crate::scale::apply_scale;
use crate::stats::{
    count_pauses, count_removed_commands, estimated_cut_minutes, pause_seconds,
    ProcessingStatistics,
};

/// Output of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedResult {
    pub original_content: String,
    pub processed_content: String,
    pub statistics: ProcessingStatistics,
    /// Sanitized, date-stamped output file name
    pub filename: String,
}

/// A named input already read as text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub name: String,
    pub content: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Process `content` with the current local time
pub fn process(
    content: &str,
    template: &Template,
    original_filename: &str,
    material: &MaterialProfile,
    scale: Option<&ScaleRequest>,
) -> ProcessedResult {
    process_at(
        content,
        template,
        original_filename,
        material,
        scale,
        Local::now(),
    )
}

/// Process `content` as if run at `now`
///
/// `now` feeds the `{DATE}` placeholder and the file name suffix.
pub fn process_at(
    content: &str,
    template: &Template,
    original_filename: &str,
    material: &MaterialProfile,
    scale: Option<&ScaleRequest>,
    now: DateTime<Local>,
) -> ProcessedResult {
    let started = Instant::now();
    let filename = sanitize_filename(original_filename, now.date_naive());

    if is_already_processed(content) {
        tracing::info!(file = original_filename, "input is already processed, returning it unchanged");
        return ProcessedResult {
            original_content: content.to_string(),
            processed_content: content.to_string(),
            statistics: ProcessingStatistics::reprocessed(),
            filename,
        };
    }

    let sanitized = sanitize(content);
    let scale = scale.filter(|req| req.apply);
    let text = match scale {
        Some(req) => apply_scale(&sanitized, req.factor),
        None => sanitized,
    };

    let moves = extract_moves(&text);
    let segs = segments(&moves);
    let classification = classify(&segs, &material.tiers);

    let distance = segs.iter().fold(0.0, |acc, s| acc + s.distance);
    let cut_minutes = estimated_cut_minutes(distance, material);
    let pauses = pause_seconds(&classification.plan);

    let mut statistics = ProcessingStatistics {
        total_distance: distance,
        estimated_time_minutes: cut_minutes,
        total_commands: if moves.is_empty() { 0 } else { segs.len() + 1 },
        pauses_inserted: count_pauses(&classification.plan, &material.tiers),
        removed_commands: count_removed_commands(content),
        processing_time_ms: 0.0,
        pause_seconds: pauses,
        estimated_total_time: cut_minutes * 60.0 + pauses,
        is_reprocessed_file: false,
    };

    let processed_content = {
        let ctx = AssemblyContext {
            filename: original_filename,
            timestamp: now,
            material,
            statistics: &statistics,
            scale,
        };
        assemble(&text, &classification.plan, template, &ctx)
    };

    statistics.processing_time_ms = started.elapsed().as_secs_f64() * 1000.0;

    tracing::debug!(
        file = original_filename,
        moves = moves.len(),
        distance = statistics.total_distance,
        pauses = statistics.pauses_inserted.total,
        removed = statistics.removed_commands.total,
        elapsed_ms = statistics.processing_time_ms,
        "processed file"
    );

    ProcessedResult {
        original_content: content.to_string(),
        processed_content,
        statistics,
        filename,
    }
}

/// Process several files one after another with the same settings
pub fn process_many(
    files: &[SourceFile],
    template: &Template,
    material: &MaterialProfile,
) -> Vec<ProcessedResult> {
    files
        .iter()
        .map(|file| process(&file.content, template, &file.name, material, None))
        .collect()
}

/// Total Chebyshev path length of a file after sanitization
pub fn measure_path_length(content: &str) -> f64 {
    total_distance(&extract_moves(&sanitize(content)))
}

/// Material, template and optional scale bundled for repeated runs
#[derive(Debug, Clone, Default)]
pub struct TapProcessor {
    material: MaterialProfile,
    template: Template,
    scale: Option<ScaleRequest>,
}

impl TapProcessor {
    pub fn new(material: MaterialProfile, template: Template) -> Self {
        Self {
            material,
            template,
            scale: None,
        }
    }

    /// Rescale every processed file with `scale`
    pub fn with_scale(mut self, scale: ScaleRequest) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn material(&self) -> &MaterialProfile {
        &self.material
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn process(&self, content: &str, original_filename: &str) -> ProcessedResult {
        self.process_at(content, original_filename, Local::now())
    }

    pub fn process_at(
        &self,
        content: &str,
        original_filename: &str,
        now: DateTime<Local>,
    ) -> ProcessedResult {
        process_at(
            content,
            &self.template,
            original_filename,
            &self.material,
            self.scale.as_ref(),
            now,
        )
    }

    pub fn process_many(&self, files: &[SourceFile]) -> Vec<ProcessedResult> {
        files
            .iter()
            .map(|file| self.process(&file.content, &file.name))
            .collect()
    }
}
