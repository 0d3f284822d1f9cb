/// Column width applied to every field of the quantities view.
pub const FIELD_WIDTH: usize = 15;

/// Reformat CSV-like text into fixed-width columns.
///
/// Blank and whitespace-only lines are dropped. Each remaining line is split
/// naively on `,` (no quote awareness); fields are trimmed and those that end
/// up empty are discarded, then each survivor is left-justified to
/// [`FIELD_WIDTH`] characters (longer fields stay unpadded, never truncated)
/// and concatenated without a separator. A line that reduces to zero fields
/// still contributes an empty output line. The result carries a trailing
/// newline only when at least one line survived, so empty input stays empty.
pub fn format_quantities(raw: &str) -> String {
    let mut out_lines = Vec::new();
    for line in raw.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let mut padded = String::new();
        for field in line.split(',') {
            let field = field.trim();
            if field.is_empty() {
                continue;
            }
            padded.push_str(field);
            let width = field.chars().count();
            if width < FIELD_WIDTH {
                padded.push_str(&" ".repeat(FIELD_WIDTH - width));
            }
        }
        out_lines.push(padded);
    }
    if out_lines.is_empty() {
        String::new()
    } else {
        let mut out = out_lines.join("\n");
        out.push('\n');
        out
    }
}
