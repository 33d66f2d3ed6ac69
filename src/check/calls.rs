//! Call-site checks against the catalog indexes.

use std::sync::Arc;

use super::index::CatalogSet;
use crate::base::Location;
use crate::catalog::placeholder;
use crate::diagnostics::{codes, Diagnostic, Reporter};
use crate::source::{lex_source, scan_calls, CallFinding, CallSite};

/// Scan one source file's text and check every lookup call in it.
pub fn check_source(
    source: &str,
    file: impl Into<Arc<str>>,
    function: &str,
    catalogs: &CatalogSet,
    sink: &mut dyn Reporter,
) {
    let file = file.into();
    let tokens = lex_source(source);
    for finding in scan_calls(&tokens, function) {
        check_finding(finding, &file, function, catalogs, sink);
    }
}

/// Turn one scanner finding into diagnostics.
pub fn check_finding(
    finding: CallFinding,
    file: &Arc<str>,
    function: &str,
    catalogs: &CatalogSet,
    sink: &mut dyn Reporter,
) {
    match finding {
        CallFinding::QuoteStyle { pos, argument } => {
            let loc = Location::new(file.clone(), pos);
            sink.report(
                Diagnostic::warning(
                    &loc,
                    format!(
                        "{} argument of {function}() should be a single quoted string",
                        ordinal(argument)
                    ),
                )
                .with_code(codes::QUOTE_STYLE),
            );
        }
        CallFinding::Malformed { pos, missing } => {
            let loc = Location::new(file.clone(), pos);
            sink.report(
                Diagnostic::error(&loc, format!("invalid {function}() call: missing {missing}"))
                    .with_code(codes::MALFORMED_CALL),
            );
        }
        CallFinding::Call(site) => check_call(&site, file, catalogs, sink),
    }
}

fn check_call(site: &CallSite, file: &Arc<str>, catalogs: &CatalogSet, sink: &mut dyn Reporter) {
    let loc = Location::new(file.clone(), site.pos);
    let domain = site.domain.text.as_str();
    let key = site.key.text.as_str();

    let Some(index) = catalogs.domain(domain) else {
        sink.report(
            Diagnostic::error(&loc, format!("unknown domain: {domain}"))
                .with_code(codes::UNKNOWN_DOMAIN),
        );
        return;
    };
    let Some(entry) = index.get(key) else {
        sink.report(
            Diagnostic::error(&loc, format!("unknown msgid: {key} (domain {domain})"))
                .with_code(codes::UNKNOWN_KEY),
        );
        return;
    };

    let required = entry.required_arguments();
    if site.argument_count < required {
        sink.report(
            Diagnostic::error(
                &loc,
                format!(
                    "missing argument for `{}`: msgid {key} needs {required}, got {}",
                    placeholder(site.argument_count),
                    site.argument_count
                ),
            )
            .with_code(codes::MISSING_ARGUMENT),
        );
    }
}

fn ordinal(n: usize) -> String {
    match n {
        1 => "1st".to_string(),
        2 => "2nd".to_string(),
        3 => "3rd".to_string(),
        n => format!("{n}th"),
    }
}
