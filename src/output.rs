use std::io::Write;

use anyhow::Result;
use console::{style, Term};
use textwrap::wrap;

use crate::models::{DiagnosticEntry, SupportedProduct};

const AVAILABILITY_NOTE: &str = "Important: this analysis is based on the requirements \
specified in your manifest and does not account for any runtime JavaScript calls made by \
your add-in. Check the API sets your add-in relies on against the requirement sets each \
platform supports before publishing.";

const MOBILE_NOTE: &str = "Note: mobile clients are not included in this list. Support for \
mobile clients is opted into separately when the add-in is submitted to the store.";

/// Severity of a rendered diagnostic collection, in descending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// Why a run ended with [`crate::models::ValidationOutcome::Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCause {
    /// The service answered with a non-200 status code.
    Status(u16),
    /// The service could not be reached at all.
    Transport,
    /// Anything else, including an unreadable 200 payload.
    Unexpected,
}

fn terminal_width() -> usize {
    let (_, cols) = Term::stdout().size();
    cols as usize
}

/// Write a paragraph wrapped to the terminal width.
fn write_paragraph(w: &mut dyn Write, text: &str) -> Result<()> {
    let width = terminal_width().max(20);
    for line in wrap(text, width) {
        writeln!(w, "{line}")?;
    }
    Ok(())
}

pub fn manifest_valid(w: &mut dyn Write) -> Result<()> {
    writeln!(w, "{}", style("The manifest is valid.").green().bold())?;
    writeln!(w)?;
    Ok(())
}

pub fn manifest_invalid(w: &mut dyn Write) -> Result<()> {
    writeln!(w, "{}", style("The manifest is not valid.").red().bold())?;
    writeln!(w)?;
    Ok(())
}

/// Render one collection of diagnostic entries in their original order.
/// No-op when the collection is empty.
///
/// Errors and warnings carry a 1-based counter in their heading; info
/// entries are not numbered, so every info heading reads identically.
pub fn diagnostics(w: &mut dyn Write, entries: &[DiagnosticEntry], severity: Severity) -> Result<()> {
    for (index, entry) in entries.iter().enumerate() {
        let heading = match severity {
            Severity::Error => style(format!("Error #{}:", index + 1)).red(),
            Severity::Warning => style(format!("Warning #{}:", index + 1)).yellow(),
            Severity::Info => style("Info:".to_string()).cyan(),
        };
        writeln!(w, "{}", heading.bold())?;
        writeln!(w, "{}: {} (link: {})", entry.title, entry.detail, entry.link)?;
        if let Some(code) = &entry.code {
            writeln!(w, "  Code: {code}")?;
        }
        if let Some(line) = entry.line {
            writeln!(w, "  Line: {line}")?;
        }
        if let Some(column) = entry.column {
            writeln!(w, "  Column: {column}")?;
        }
        writeln!(w)?;
    }
    Ok(())
}

/// Render the platform availability summary for a passing manifest.
/// No-op when the product list is empty.
///
/// Titles repeat in the payload (one entry per capability requiring the
/// platform), so they are deduplicated keeping first-seen order.
pub fn platform_summary(w: &mut dyn Write, products: &[SupportedProduct]) -> Result<()> {
    if products.is_empty() {
        return Ok(());
    }

    let mut platforms: Vec<&str> = Vec::new();
    for product in products {
        if !platforms.contains(&product.title.as_str()) {
            platforms.push(&product.title);
        }
    }

    writeln!(
        w,
        "{}",
        style(
            "Based on the requirements specified in your manifest, your add-in can run on the following platforms:"
        )
        .bold()
    )?;
    for platform in platforms {
        writeln!(w, "  - {platform}")?;
    }
    writeln!(w)?;
    write_paragraph(w, AVAILABILITY_NOTE)?;
    writeln!(w)?;
    write_paragraph(w, MOBILE_NOTE)?;
    Ok(())
}

/// Render the failure banner plus, for the known status codes, exactly one
/// explanation line. Transport and unexpected failures get the banner only.
pub fn failure(w: &mut dyn Write, cause: FailureCause) -> Result<()> {
    writeln!(
        w,
        "{}",
        style("Validation failed. The manifest could not be verified.")
            .red()
            .bold()
    )?;

    let detail = match cause {
        FailureCause::Status(400) => Some(
            "The service could not process the manifest: the XML is malformed, or the file exceeds the 256 KB size limit.",
        ),
        FailureCause::Status(415) => Some(
            "The service rejected the request Content-Type. Manifests must be submitted as application/xml.",
        ),
        FailureCause::Status(500) => {
            Some("The validation service encountered an unexpected error.")
        }
        FailureCause::Status(503) => Some("The validation service has been disabled via BRS."),
        FailureCause::Status(_) | FailureCause::Transport | FailureCause::Unexpected => None,
    };
    if let Some(detail) = detail {
        writeln!(w, "{detail}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, detail: &str, link: &str) -> DiagnosticEntry {
        DiagnosticEntry {
            title: title.to_string(),
            detail: detail.to_string(),
            link: link.to_string(),
            code: None,
            line: None,
            column: None,
        }
    }

    fn product(title: &str) -> SupportedProduct {
        SupportedProduct {
            title: title.to_string(),
            version: None,
        }
    }

    fn render(f: impl Fn(&mut dyn Write) -> Result<()>) -> String {
        console::set_colors_enabled(false);
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_empty_collections_render_nothing() {
        for severity in [Severity::Error, Severity::Warning, Severity::Info] {
            let out = render(|w| diagnostics(w, &[], severity));
            assert_eq!(out, "");
        }
        let out = render(|w| platform_summary(w, &[]));
        assert_eq!(out, "");
    }

    #[test]
    fn test_errors_and_warnings_are_numbered_from_one() {
        let entries = vec![
            entry("First", "first detail", "https://aka.ms/one"),
            entry("Second", "second detail", "https://aka.ms/two"),
        ];

        let out = render(|w| diagnostics(w, &entries, Severity::Error));
        assert_eq!(
            out,
            concat!(
                "Error #1:\n",
                "First: first detail (link: https://aka.ms/one)\n",
                "\n",
                "Error #2:\n",
                "Second: second detail (link: https://aka.ms/two)\n",
                "\n",
            )
        );

        let out = render(|w| diagnostics(w, &entries, Severity::Warning));
        assert!(out.contains("Warning #1:"));
        assert!(out.contains("Warning #2:"));
    }

    #[test]
    fn test_info_entries_are_not_numbered() {
        let entries = vec![
            entry("Hint", "something to know", "https://aka.ms/hint"),
            entry("Other", "something else", "https://aka.ms/other"),
        ];
        let out = render(|w| diagnostics(w, &entries, Severity::Info));
        assert_eq!(out.matches("Info:\n").count(), 2);
        assert!(!out.contains('#'));
    }

    #[test]
    fn test_optional_fields_render_only_when_present() {
        let mut located = entry("Schema violation", "bad element", "https://aka.ms/schema");
        located.code = Some("XSD1001".to_string());
        located.line = Some(12);
        located.column = Some(4);

        let out = render(|w| diagnostics(w, std::slice::from_ref(&located), Severity::Error));
        assert_eq!(
            out,
            concat!(
                "Error #1:\n",
                "Schema violation: bad element (link: https://aka.ms/schema)\n",
                "  Code: XSD1001\n",
                "  Line: 12\n",
                "  Column: 4\n",
                "\n",
            )
        );

        let bare = entry("Schema violation", "bad element", "https://aka.ms/schema");
        let out = render(|w| diagnostics(w, std::slice::from_ref(&bare), Severity::Error));
        assert!(!out.contains("Code:"));
        assert!(!out.contains("Line:"));
        assert!(!out.contains("Column:"));
    }

    #[test]
    fn test_platform_summary_dedupes_preserving_order() {
        let products = vec![
            product("Excel"),
            product("Word"),
            product("Excel"),
            product("Outlook"),
            product("Word"),
        ];
        let out = render(|w| platform_summary(w, &products));

        let bullets: Vec<&str> = out.lines().filter(|l| l.starts_with("  - ")).collect();
        assert_eq!(bullets, vec!["  - Excel", "  - Word", "  - Outlook"]);
        assert!(out.contains("can run on the following platforms:"));
        assert!(out.contains("Important:"));
        assert!(out.contains("Note:"));
    }

    #[test]
    fn test_failure_explanations_by_status() {
        let out = render(|w| failure(w, FailureCause::Status(400)));
        assert!(out.contains("256 KB"));

        let out = render(|w| failure(w, FailureCause::Status(415)));
        assert!(out.contains("Content-Type"));

        let out = render(|w| failure(w, FailureCause::Status(500)));
        assert!(out.contains("unexpected error"));

        let out = render(|w| failure(w, FailureCause::Status(503)));
        assert!(out.contains("disabled via BRS"));
    }

    #[test]
    fn test_unknown_causes_get_the_banner_only() {
        for cause in [
            FailureCause::Status(404),
            FailureCause::Transport,
            FailureCause::Unexpected,
        ] {
            let out = render(|w| failure(w, cause));
            assert_eq!(out, "Validation failed. The manifest could not be verified.\n");
        }
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let mut located = entry("Schema violation", "bad element", "https://aka.ms/schema");
        located.line = Some(3);
        let entries = vec![located, entry("Other", "detail", "https://aka.ms/other")];
        let products = vec![product("Excel"), product("Excel"), product("Word")];

        let first = render(|w| {
            diagnostics(w, &entries, Severity::Warning)?;
            platform_summary(w, &products)
        });
        let second = render(|w| {
            diagnostics(w, &entries, Severity::Warning)?;
            platform_summary(w, &products)
        });
        assert_eq!(first, second);
    }
}
