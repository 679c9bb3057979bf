use std::fmt::Write;

use clinical_analysis::{ClassifiedAnalysis, ClassifiedError};

pub const NO_INDICATORS: &str = "No clinical indicators available";

/// Plain-text report with the summary, indicator list and risk badge
pub fn render_analysis(analysis: &ClassifiedAnalysis) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Patient Summary");
    let _ = writeln!(out, "---------------");
    if let Some(summary) = &analysis.summary_text {
        let _ = writeln!(out, "{}", summary);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Key Clinical Indicators");
    let _ = writeln!(out, "-----------------------");
    if analysis.indicators.is_empty() {
        let _ = writeln!(out, "{}", NO_INDICATORS);
    } else {
        for indicator in &analysis.indicators {
            let _ = writeln!(out, "  * {}", indicator);
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Risk Assessment");
    let _ = writeln!(out, "---------------");
    let _ = writeln!(out, "[{}]", analysis.tier_label);

    out
}

pub fn render_error(error: &ClassifiedError) -> String {
    format!("Error\n-----\n{}\n", error.message)
}
