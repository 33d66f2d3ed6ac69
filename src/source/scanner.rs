//! Call-site scanner.
//!
//! Looks for `NAME ( 'domain' , 'key' ,|)` in a folded token stream. Calls
//! whose domain or key is not a literal cannot be resolved statically and
//! are skipped without a finding. Broken shapes produce a finding and the
//! scan moves on to the next candidate identifier.

use super::lexer::{Token, TokenKind};
use crate::base::LineCol;

/// A lookup call with literal domain and key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallSite {
    pub domain: Token,
    pub key: Token,
    /// Arguments after the key.
    pub argument_count: usize,
    /// Position of the function name.
    pub pos: LineCol,
}

/// What the scanner found at one candidate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallFinding {
    /// Domain (`argument` 1) or key (`argument` 2) is double quoted.
    QuoteStyle { pos: LineCol, argument: usize },
    /// The call is structurally broken; `missing` names what was expected.
    Malformed { pos: LineCol, missing: &'static str },
    Call(CallSite),
}

/// Tokens from the function name through the key's separator.
const CALL_HEAD_LEN: usize = 6;

/// Scan a folded token stream for calls to `function`.
pub fn scan_calls(tokens: &[Token], function: &str) -> Vec<CallFinding> {
    let mut findings = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        if token.is(TokenKind::Identifier, function) {
            scan_candidate(&tokens[i..], &mut findings);
        }
    }
    findings
}

/// Inspect one candidate; `tokens[0]` is the function name.
fn scan_candidate(tokens: &[Token], findings: &mut Vec<CallFinding>) {
    let pos = tokens[0].pos;
    let malformed = |missing| CallFinding::Malformed { pos, missing };

    if tokens.len() < CALL_HEAD_LEN {
        findings.push(malformed("arguments"));
        return;
    }
    if !tokens[1].is_symbol("(") {
        findings.push(malformed("'('"));
        return;
    }
    if !literal_argument(&tokens[2], 1, pos, findings) {
        return;
    }
    if !tokens[3].is_symbol(",") {
        findings.push(malformed("','"));
        return;
    }
    if !literal_argument(&tokens[4], 2, pos, findings) {
        return;
    }
    let separator = &tokens[5];
    let argument_count = if separator.is_symbol(",") {
        count_arguments(&tokens[CALL_HEAD_LEN..])
    } else if separator.is_symbol(")") {
        0
    } else {
        findings.push(malformed("',' or ')'"));
        return;
    };

    findings.push(CallFinding::Call(CallSite {
        domain: tokens[2].clone(),
        key: tokens[4].clone(),
        argument_count,
        pos,
    }));
}

/// Accept a literal argument, noting double quotes. `false` means skip the call.
fn literal_argument(
    token: &Token,
    argument: usize,
    pos: LineCol,
    findings: &mut Vec<CallFinding>,
) -> bool {
    match token.kind {
        TokenKind::StringSingle => true,
        TokenKind::StringDouble => {
            findings.push(CallFinding::QuoteStyle { pos, argument });
            true
        }
        _ => false,
    }
}

/// Count comma-separated arguments up to the closer that ends the list.
///
/// Brackets nest, so an array literal or a nested call is one argument. An
/// empty slot (a trailing comma) does not count.
pub fn count_arguments(tokens: &[Token]) -> usize {
    let mut count = 0;
    let mut depth = 0usize;
    let mut filled = false;
    for token in tokens {
        if token.kind == TokenKind::Symbol {
            match token.text.as_str() {
                "(" | "[" | "{" => depth += 1,
                ")" | "]" | "}" => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                "," if depth == 0 => {
                    if filled {
                        count += 1;
                    }
                    filled = false;
                    continue;
                }
                _ => {}
            }
        }
        filled = true;
    }
    if filled {
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::fold::fold_literals;
    use crate::source::lexer::tokenize;

    fn tokens(source: &str) -> Vec<Token> {
        fold_literals(tokenize(source))
    }

    fn calls(source: &str) -> Vec<CallFinding> {
        scan_calls(&tokens(source), "__d")
    }

    #[test]
    fn test_count_arguments() {
        let cases: &[(&str, usize, usize)] = &[
            ("__d('cake', 'a', 'b')", 2, 3),
            ("__d('cake', 'a', 'b')", 4, 2),
            ("__d('cake', 'a', 'b')", 6, 1),
            ("__d('cake', 'a', 'b',)", 6, 1),
            ("__d('cake', 'a', __d('boo', 'ruuuu', 3))", 4, 2),
            ("__d('cake', 'a', __d('boo', 'ruuuu', 3))", 6, 1),
            ("__d('cake', 'a', __d('boo', 'ruuuu', 3,))", 6, 1),
            (
                "__d('access_counters', 'The number of ', [ __d('access_counters', 'Starting Value'), 0, AccessCounterConst::MAX_COUNT_START, ],",
                7,
                3,
            ),
        ];
        for &(source, start, expected) in cases {
            let toks = tokens(source);
            assert_eq!(
                count_arguments(&toks[start..]),
                expected,
                "{source} from token {start}"
            );
        }
    }

    #[test]
    fn test_simple_call() {
        let found = calls("echo __d('d', 'k');");
        assert_eq!(found.len(), 1);
        let CallFinding::Call(site) = &found[0] else {
            panic!("expected a call, got {found:?}");
        };
        assert_eq!(site.domain.text, "d");
        assert_eq!(site.key.text, "k");
        assert_eq!(site.argument_count, 0);
        assert_eq!(site.pos, LineCol::new(0, 5));
    }

    #[test]
    fn test_trailing_arguments() {
        let found = calls("__d('d', 'k', $x, [1, 2], f($a, $b))");
        assert!(matches!(&found[0], CallFinding::Call(s) if s.argument_count == 3));
    }

    #[test]
    fn test_variable_arguments_skipped() {
        assert!(calls("__d($domain, 'k'); __d('d', $key);").is_empty());
    }

    #[test]
    fn test_function_definition_skipped() {
        assert!(calls("function __d($domain, $msg, ...$args) { return 1; }").is_empty());
    }

    #[test]
    fn test_double_quoted_argument_warned_but_resolved() {
        let found = calls("__d(\"d\", 'k')");
        assert_eq!(found.len(), 2);
        assert!(matches!(found[0], CallFinding::QuoteStyle { argument: 1, .. }));
        assert!(matches!(found[1], CallFinding::Call(_)));
    }

    #[test]
    fn test_malformed_shapes() {
        let missing = |source| match calls(source).as_slice() {
            [CallFinding::Malformed { missing, .. }] => *missing,
            other => panic!("{source}: {other:?}"),
        };
        assert_eq!(missing("$f = __d; $g = 1; $h = 2;"), "'('");
        assert_eq!(missing("__d('d' 'x' . $k, 1);"), "','");
        assert_eq!(missing("__d('d', 'k' + 1);"), "',' or ')'");
        assert_eq!(missing("__d('d'"), "arguments");
    }

    #[test]
    fn test_nested_calls_each_found() {
        let found = calls("__d('a', 'x {0}', __d('b', 'y'))");
        let keys: Vec<_> = found
            .iter()
            .filter_map(|f| match f {
                CallFinding::Call(site) => Some(site.key.text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(keys, vec!["x {0}", "y"]);
    }

    #[test]
    fn test_call_at_end_of_input() {
        assert!(matches!(calls("__d('d', 'k')").as_slice(), [CallFinding::Call(_)]));
    }
}
