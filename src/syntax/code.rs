//! Detection of code regions that inline rewrites must leave alone.

use std::ops::Range;

/// Returns the byte ranges of fenced code blocks and inline code spans.
///
/// Fences open with three or more backticks or tildes (indented at most three
/// spaces) and close with a run of the same character at least as long. An
/// unterminated fence extends to the end of the document. Inline spans pair
/// backtick runs of equal length; an unmatched run is literal text.
///
/// Ranges are sorted and non-overlapping.
pub fn code_regions(doc: &str) -> Vec<Range<usize>> {
    let mut regions = Vec::new();
    let mut fence: Option<(u8, usize, usize)> = None; // (marker, run length, start)
    let mut prose_start = 0;
    let mut offset = 0;

    for line in doc.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();

        match fence {
            None => {
                if let Some((marker, len)) = opening_fence(line) {
                    inline_code_spans(doc, prose_start..line_start, &mut regions);
                    fence = Some((marker, len, line_start));
                }
            }
            Some((marker, len, start)) => {
                if is_closing_fence(line, marker, len) {
                    regions.push(start..offset);
                    fence = None;
                    prose_start = offset;
                }
            }
        }
    }

    match fence {
        Some((_, _, start)) => regions.push(start..doc.len()),
        None => inline_code_spans(doc, prose_start..doc.len(), &mut regions),
    }

    regions
}

/// Returns true if `pos` falls inside one of the sorted `regions`.
pub fn in_regions(regions: &[Range<usize>], pos: usize) -> bool {
    let idx = regions.partition_point(|r| r.end <= pos);
    regions.get(idx).is_some_and(|r| r.start <= pos)
}

fn fence_run(line: &str) -> Option<(u8, usize, &str)> {
    let trimmed = line.trim_start_matches(' ');
    if line.len() - trimmed.len() > 3 {
        return None;
    }

    let marker = *trimmed.as_bytes().first()?;
    if marker != b'`' && marker != b'~' {
        return None;
    }

    let len = trimmed.bytes().take_while(|&b| b == marker).count();
    Some((marker, len, &trimmed[len..]))
}

fn opening_fence(line: &str) -> Option<(u8, usize)> {
    let (marker, len, info) = fence_run(line)?;
    if len < 3 {
        return None;
    }
    // A backtick fence's info string cannot itself contain backticks.
    if marker == b'`' && info.contains('`') {
        return None;
    }
    Some((marker, len))
}

fn is_closing_fence(line: &str, marker: u8, open_len: usize) -> bool {
    match fence_run(line) {
        Some((m, len, rest)) => m == marker && len >= open_len && rest.trim().is_empty(),
        None => false,
    }
}

fn inline_code_spans(doc: &str, range: Range<usize>, regions: &mut Vec<Range<usize>>) {
    let bytes = doc.as_bytes();
    let end = range.end;
    let mut i = range.start;

    while i < end {
        if bytes[i] != b'`' {
            i += 1;
            continue;
        }

        let open_len = backtick_run(bytes, i, end);
        let mut k = i + open_len;
        let mut closed = false;

        while k < end {
            if bytes[k] == b'`' {
                let run = backtick_run(bytes, k, end);
                if run == open_len {
                    regions.push(i..k + run);
                    i = k + run;
                    closed = true;
                    break;
                }
                k += run;
            } else {
                k += 1;
            }
        }

        if !closed {
            i += open_len;
        }
    }
}

fn backtick_run(bytes: &[u8], start: usize, end: usize) -> usize {
    bytes[start..end].iter().take_while(|&&b| b == b'`').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn covered<'a>(doc: &'a str, regions: &[Range<usize>]) -> Vec<&'a str> {
        regions.iter().map(|r| &doc[r.clone()]).collect()
    }

    #[test]
    fn no_code_yields_no_regions() {
        assert!(code_regions("plain #text ^ref").is_empty());
        assert!(code_regions("").is_empty());
    }

    #[test]
    fn inline_code_span() {
        let doc = "use `#include` here";
        let regions = code_regions(doc);
        assert_eq!(covered(doc, &regions), vec!["`#include`"]);
    }

    #[test]
    fn inline_code_with_double_backticks() {
        let doc = "a ``code ` tick`` b `x`";
        let regions = code_regions(doc);
        assert_eq!(covered(doc, &regions), vec!["``code ` tick``", "`x`"]);
    }

    #[test]
    fn unmatched_backtick_is_literal() {
        let doc = "a ` b #tag";
        assert!(code_regions(doc).is_empty());
    }

    #[test]
    fn fenced_block_with_backticks() {
        let doc = "before\n```rust\n#[derive(Debug)]\n```\nafter";
        let regions = code_regions(doc);
        assert_eq!(
            covered(doc, &regions),
            vec!["```rust\n#[derive(Debug)]\n```\n"]
        );
    }

    #[test]
    fn fenced_block_with_tildes() {
        let doc = "~~~\n# comment\n~~~\n";
        let regions = code_regions(doc);
        assert_eq!(covered(doc, &regions), vec![doc]);
    }

    #[test]
    fn closing_fence_must_match_marker_and_length() {
        let doc = "````\n```\n~~~~\n````\ntail";
        let regions = code_regions(doc);
        assert_eq!(covered(doc, &regions), vec!["````\n```\n~~~~\n````\n"]);
    }

    #[test]
    fn unterminated_fence_runs_to_end() {
        let doc = "text\n```\ncode #notatag\nmore";
        let regions = code_regions(doc);
        assert_eq!(covered(doc, &regions), vec!["```\ncode #notatag\nmore"]);
    }

    #[test]
    fn deeply_indented_fence_is_not_a_fence() {
        assert!(code_regions("    ```\n#tag\n").is_empty());
    }

    #[test]
    fn inline_spans_before_and_after_fence() {
        let doc = "`a`\n```\nb\n```\n`c`";
        let regions = code_regions(doc);
        assert_eq!(covered(doc, &regions), vec!["`a`", "```\nb\n```\n", "`c`"]);
    }

    #[test]
    fn in_regions_checks_membership() {
        let regions = vec![2..5, 10..12];
        assert!(!in_regions(&regions, 1));
        assert!(in_regions(&regions, 2));
        assert!(in_regions(&regions, 4));
        assert!(!in_regions(&regions, 5));
        assert!(in_regions(&regions, 11));
        assert!(!in_regions(&regions, 12));
        assert!(!in_regions(&[], 0));
    }
}
