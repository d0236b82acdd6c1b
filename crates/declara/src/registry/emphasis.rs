use crate::workflows::declarations::document::Span;

/// Names rendered in bold wherever they appear in a project's qualification text.
pub const EMPHASIS_ALLOWLIST: [&str; 4] = [
    "EMCCAMP INCORPORAÇÃO SC 34 SPE LTDA",
    "DIOGO ROSSI DE LIMA CANO",
    "JOÃO VICTOR MICHEL",
    "JULIA DE OLIVEIRA LONGUINI",
];

/// Split pre-authored text into plain and emphasized spans using an allowlist of names.
///
/// Occurrences are matched left to right; when two names start at the same offset the
/// longer one wins. Text outside the allowlist is always plain.
pub fn emphasize(text: &str, allowlist: &[&str]) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let next = allowlist
            .iter()
            .filter(|name| !name.is_empty())
            .filter_map(|name| rest.find(name).map(|offset| (offset, *name)))
            .min_by(|(left_offset, left), (right_offset, right)| {
                left_offset
                    .cmp(right_offset)
                    .then_with(|| right.len().cmp(&left.len()))
            });

        match next {
            Some((offset, name)) => {
                if offset > 0 {
                    spans.push(Span::plain(&rest[..offset]));
                }
                spans.push(Span::emphasis(name));
                rest = &rest[offset + name.len()..];
            }
            None => {
                spans.push(Span::plain(rest));
                break;
            }
        }
    }

    spans
}
