use crate::core::config::ReflowConfig;
use crate::core::model::AssembledLine;
use crate::script::ScriptProfile;

/// Leading spaces for a line starting at normalized `x0`.
pub fn indent_width(x0: f32, indent_multiplier: f32) -> usize {
    (x0 * indent_multiplier).floor().max(0.0) as usize
}

/// Median vertical gap between consecutive lines.
///
/// Falls back to `default_gap` when fewer than two gaps exist, not only for
/// fewer than two lines. A single gap is its own median and could never
/// exceed itself scaled by the ratio, so a two-line page with words centered
/// at 0.10 / 0.11 and 0.50 would never split (see `breaks_before_distant_line`).
pub fn median_line_gap(lines: &[AssembledLine], default_gap: f32) -> f32 {
    let mut gaps: Vec<f32> = lines
        .windows(2)
        .map(|pair| pair[1].bbox.y0 - pair[0].bbox.y1)
        .collect();
    if gaps.len() < 2 {
        return default_gap;
    }
    gaps.sort_by(|a, b| a.total_cmp(b));
    let mid = gaps.len() / 2;
    if gaps.len() % 2 == 0 {
        (gaps[mid - 1] + gaps[mid]) / 2.0
    } else {
        gaps[mid]
    }
}

/// Lays assembled lines out as text with indentation and paragraph breaks.
pub fn compose_paragraphs(
    lines: &[AssembledLine],
    config: &ReflowConfig,
    profile: &ScriptProfile,
) -> String {
    let avg_gap = median_line_gap(lines, config.default_line_gap);
    let break_above = avg_gap * config.paragraph_gap_ratio;

    let mut out = String::new();
    let mut last_bottom = 0.0f32;

    for (idx, line) in lines.iter().enumerate() {
        if idx > 0 && line.bbox.y0 - last_bottom > break_above {
            out.push('\n');
        }

        let indent = indent_width(line.bbox.x0, config.indent_multiplier);
        out.push_str(&" ".repeat(indent));
        out.push_str(&line.text);

        // lets a consumer rejoin a sentence wrapped across lines
        if idx + 1 < lines.len() && !profile.ends_sentence(&line.text) {
            out.push(' ');
        }
        out.push('\n');
        last_bottom = line.bbox.y1;
    }

    collapse_blank_runs(&out).trim().to_string()
}

/// Squeezes three or more consecutive newlines down to two.
fn collapse_blank_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = 0usize;
    for c in text.chars() {
        if c == '\n' {
            run += 1;
            if run > 2 {
                continue;
            }
        } else {
            run = 0;
        }
        out.push(c);
    }
    out
}
