use std::path::Path;

/// Extensions treated as source code when summarizing a change set.
const CODE_EXTENSIONS: &[&str] = &[
    "py", "js", "ts", "java", "cpp", "c", "go", "rs", "php", "rb", "cs", "scala", "kt", "swift",
];

const ELLIPSIS: &str = "...";

/// Extension of the final path component, without the dot ("" if none).
pub fn file_extension(filename: &str) -> &str {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
}

/// Whether a path looks like a source file, judged by extension only.
pub fn is_code_file(filename: &str) -> bool {
    CODE_EXTENSIONS.contains(&file_extension(filename))
}

/// Cut `text` down to at most `max_chars` characters, marking the cut with "...".
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    if max_chars < ELLIPSIS.len() {
        return ELLIPSIS.chars().take(max_chars).collect();
    }

    let mut out: String = text.chars().take(max_chars - ELLIPSIS.len()).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Strip a single Markdown code fence (with optional language tag) around `text`.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    if let Some(rest) = trimmed.strip_prefix("```") {
        let body = match rest.find('\n') {
            Some(pos) => &rest[pos + 1..],
            None => rest,
        };
        if let Some(inner) = body.trim_end().strip_suffix("```") {
            return inner.trim();
        }
    }
    trimmed
}
