use std::io::{self, Stdout, Write};

use tracing::warn;

use super::{write_plain, ErrorCounter};
use crate::diagnostics::{Diagnostic, Reporter};

/// Prints `file:line:col:LEVEL: message` per diagnostic.
#[derive(Debug)]
pub struct PlainReporter<W: Write = Stdout> {
    out: W,
    counter: ErrorCounter,
}

impl PlainReporter<Stdout> {
    pub fn stdout(strip_prefix: impl Into<String>) -> Self {
        Self::new(io::stdout(), strip_prefix)
    }
}

impl<W: Write> PlainReporter<W> {
    pub fn new(out: W, strip_prefix: impl Into<String>) -> Self {
        Self {
            out,
            counter: ErrorCounter::new(strip_prefix),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for PlainReporter<W> {
    fn report(&mut self, diagnostic: Diagnostic) {
        let name = self.counter.display_name(&diagnostic.file);
        if let Err(err) = write_plain(&mut self.out, name, &diagnostic) {
            warn!(%err, "failed to write diagnostic");
        }
        self.counter.record(diagnostic.severity);
    }

    fn error_count(&self) -> usize {
        self.counter.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{LineCol, Location};
    use crate::diagnostics::Severity;

    #[test]
    fn test_plain_format() {
        let mut reporter = PlainReporter::new(Vec::new(), "/src/");
        let loc = Location::new("/src/app/a.php", LineCol::new(11, 8));
        reporter.report(Diagnostic::error(&loc, "unknown domain: cake"));
        reporter.report(Diagnostic::warning(&loc, "style"));
        reporter.report(Diagnostic::for_file(Severity::Fatal, "/src/x.po", "broken"));

        assert_eq!(reporter.error_count(), 2);
        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(
            text,
            "app/a.php:12:9:ERR: unknown domain: cake\n\
             app/a.php:12:9:WRN: style\n\
             x.po:0:0:FATAL: broken\n"
        );
    }
}
