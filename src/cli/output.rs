//! Output formatting utilities

use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{format_point, truncate_str};
use crate::cli::OutputFormat;
use crate::entities::analysis::{AnalysisResult, FaceLabel};

/// Column headers for feature tables
const FEATURE_HEADERS: [&str; 8] = [
    "ID",
    "TYPE",
    "CONFIDENCE",
    "POSITION",
    "DIMENSIONS",
    "TOOL",
    "TOOL_DIA",
    "FACES",
];

/// Determine the effective output format based on context
pub fn effective_format(format: OutputFormat, is_list: bool) -> OutputFormat {
    match format {
        OutputFormat::Auto => {
            if is_list {
                OutputFormat::Tsv
            } else {
                OutputFormat::Yaml
            }
        }
        other => other,
    }
}

/// Write to a file, or stdout when no path is given
pub fn write_output(content: &str, output_path: Option<&Path>, quiet: bool) -> Result<()> {
    match output_path {
        Some(path) => {
            let file = File::create(path).into_diagnostic()?;
            let mut writer = BufWriter::new(file);
            writer.write_all(content.as_bytes()).into_diagnostic()?;
            writer.flush().into_diagnostic()?;
            if !quiet {
                eprintln!("Output written to: {}", path.display());
            }
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}

/// Serialize any value as YAML or JSON
pub fn to_structured<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(value).into_diagnostic()?;
            json.push('\n');
            Ok(json)
        }
        _ => serde_yml::to_string(value).into_diagnostic(),
    }
}

/// One feature table row per feature
fn feature_rows(result: &AnalysisResult) -> Vec<[String; 8]> {
    result
        .features
        .iter()
        .map(|f| {
            let faces: Vec<String> = f.face_ids.iter().map(|id| id.to_string()).collect();
            [
                f.id.clone(),
                f.feature_type.to_string(),
                format!("{:.3}", f.confidence),
                format_point(&f.position),
                f.dimensions.summary(),
                f.machining_parameters.tool_type.to_string(),
                format!("{:.2}", f.machining_parameters.tool_diameter),
                faces.join(" "),
            ]
        })
        .collect()
}

/// Render an analysis result in the requested format
pub fn render_result(result: &AnalysisResult, format: OutputFormat) -> Result<String> {
    match effective_format(format, false) {
        OutputFormat::Tsv => {
            let mut out = FEATURE_HEADERS.join("\t");
            out.push('\n');
            for row in feature_rows(result) {
                out.push_str(&row.join("\t"));
                out.push('\n');
            }
            Ok(out)
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record(FEATURE_HEADERS).into_diagnostic()?;
            for row in feature_rows(result) {
                writer.write_record(&row).into_diagnostic()?;
            }
            let bytes = writer.into_inner().into_diagnostic()?;
            String::from_utf8(bytes).into_diagnostic()
        }
        OutputFormat::Md => Ok(render_markdown(result)),
        other => to_structured(result, other),
    }
}

fn render_markdown(result: &AnalysisResult) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "# Feature Analysis {}\n\n",
        result.metadata.analysis_id
    ));

    let mut builder = Builder::default();
    builder.push_record(FEATURE_HEADERS);
    for row in feature_rows(result) {
        builder.push_record(row);
    }
    output.push_str(&builder.build().with(Style::markdown()).to_string());

    output.push_str("\n\n## Summary\n\n");
    output.push_str(&format!(
        "- **Total Features:** {}\n",
        result.statistics.total_features
    ));
    output.push_str(&format!(
        "- **Average Confidence:** {:.3}\n",
        result.statistics.average_confidence
    ));
    for (feature_type, count) in &result.statistics.feature_types {
        output.push_str(&format!("- **{}:** {}\n", feature_type, count));
    }
    output.push_str(&format!(
        "- **Above Threshold ({}):** {}\n",
        result.metadata.confidence_threshold,
        result.confident_features().count()
    ));
    output.push_str(&format!(
        "- **Model:** {}\n- **Processing Time:** {} ms\n",
        truncate_str(&result.metadata.model_version, 40),
        result.metadata.processing_time
    ));

    output
}

/// Render a face-label map in the requested format
pub fn render_labels(labels: &BTreeMap<u32, FaceLabel>, format: OutputFormat) -> Result<String> {
    match effective_format(format, true) {
        OutputFormat::Tsv => Ok(labels
            .iter()
            .map(|(face, label)| format!("{}\t{}\n", face, label))
            .collect()),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record(["face", "label"]).into_diagnostic()?;
            for (face, label) in labels {
                writer
                    .write_record([face.to_string(), label.to_string()])
                    .into_diagnostic()?;
            }
            let bytes = writer.into_inner().into_diagnostic()?;
            String::from_utf8(bytes).into_diagnostic()
        }
        OutputFormat::Md => {
            let mut builder = Builder::default();
            builder.push_record(["Face", "Label"]);
            for (face, label) in labels {
                builder.push_record([face.to_string(), label.to_string()]);
            }
            let mut out = builder.build().with(Style::markdown()).to_string();
            out.push('\n');
            Ok(out)
        }
        other => to_structured(labels, other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::analyze;
    use crate::entities::analysis::AnalysisParams;

    fn abc() -> AnalysisResult {
        analyze("abc", &AnalysisParams::default())
    }

    #[test]
    fn test_effective_format() {
        assert_eq!(effective_format(OutputFormat::Auto, true), OutputFormat::Tsv);
        assert_eq!(effective_format(OutputFormat::Auto, false), OutputFormat::Yaml);
        assert_eq!(effective_format(OutputFormat::Json, true), OutputFormat::Json);
    }

    #[test]
    fn test_render_json_roundtrips_to_value() {
        let out = render_result(&abc(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["metadata"]["analysis_id"], "analysis_22ci");
        assert_eq!(value["features"][4]["type"], "triangular_passage");
        assert_eq!(value["features"][4]["dimensions"]["depth"], "through");
        assert_eq!(value["face_labels"]["2"], "stock");
        assert_eq!(value["statistics"]["feature_types"]["round"], 3);
    }

    #[test]
    fn test_render_tsv_has_row_per_feature() {
        let out = render_result(&abc(), OutputFormat::Tsv).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 9);
        assert!(lines[0].starts_with("ID\tTYPE"));
        assert!(lines[1].starts_with("feature_0\tround\t0.977"));
    }

    #[test]
    fn test_render_csv() {
        let out = render_result(&abc(), OutputFormat::Csv).unwrap();
        assert!(out.starts_with("ID,TYPE,CONFIDENCE"));
        assert_eq!(out.lines().count(), 9);
    }

    #[test]
    fn test_render_markdown_summary() {
        let out = render_result(&abc(), OutputFormat::Md).unwrap();
        assert!(out.contains("# Feature Analysis analysis_22ci"));
        assert!(out.contains("- **Total Features:** 8"));
        assert!(out.contains("- **round:** 3"));
    }

    #[test]
    fn test_render_labels_tsv() {
        let out = render_labels(&abc().face_labels, OutputFormat::Auto).unwrap();
        assert!(out.starts_with("0\tround\n1\tround\n2\tstock\n"));
    }
}
