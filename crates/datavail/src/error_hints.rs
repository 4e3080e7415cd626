use anyhow::Error;

pub(crate) fn format(err: &Error) -> String {
    let mut out = format!("Error: {err:#}");
    let hints = suggestions(err);
    if !hints.is_empty() {
        out.push_str("\n\nHints:\n");
        for hint in hints {
            out.push_str("- ");
            out.push_str(&hint);
            out.push('\n');
        }
    }
    out
}

fn suggestions(err: &Error) -> Vec<String> {
    let chain: Vec<String> = err.chain().map(|e| e.to_string()).collect();
    let haystack = chain.join(" | ").to_ascii_lowercase();
    let mut out: Vec<String> = Vec::new();

    if haystack.contains("no such file or directory") || haystack.contains("cannot find the file") {
        push_hint(&mut out, "Verify the input path exists and is readable.");
        push_hint(
            &mut out,
            "Use an absolute path to avoid working-directory confusion.",
        );
    }

    if haystack.contains("[invalid_json]") {
        push_hint(&mut out, "The report must be a single JSON document.");
    }

    if haystack.contains("[invalid_report]") {
        push_hint(
            &mut out,
            "A report needs `resources`, `fields` and `lookupValues` arrays.",
        );
    }

    if haystack.contains("unknown reference version") {
        push_hint(
            &mut out,
            "Check that the reference directory holds `dd-<version>.json` for that version.",
        );
        push_hint(&mut out, "Pick a version explicitly with `--dd-version`.");
    }

    if haystack.contains("no reference directory") {
        push_hint(
            &mut out,
            "Pass `--reference-dir <DIR>` or set `[reference] dir` in `datavail.toml`.",
        );
    }

    if haystack.contains("failed to parse reference file") {
        push_hint(
            &mut out,
            "Reference files must hold `fields` and `lookups` arrays.",
        );
    }

    if haystack.contains("config file") {
        push_hint(
            &mut out,
            "Check `datavail.toml` syntax and key names; sections are [reference], [classification] and [output].",
        );
    }

    out
}

fn push_hint(out: &mut Vec<String>, hint: &str) {
    if !out.iter().any(|h| h == hint) {
        out.push(hint.to_string());
    }
}
