//! Markup stripping for document-store storage bodies.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static CDATA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!\[CDATA\[(.*?)\]\]>").expect("unreachable error: invalid CDATA pattern")
});
static COMMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!--.*?-->").expect("unreachable error: invalid comment pattern")
});
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("unreachable error: invalid tag pattern"));
static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]{2,8});")
        .expect("unreachable error: invalid entity pattern")
});

fn named_entity(name: &str) -> Option<char> {
    Some(match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "ndash" => '–',
        "mdash" => '—',
        "hellip" => '…',
        "lsquo" => '‘',
        "rsquo" => '’',
        "ldquo" => '“',
        "rdquo" => '”',
        "bull" => '•',
        "middot" => '·',
        "copy" => '©',
        "reg" => '®',
        "trade" => '™',
        _ => return None,
    })
}

fn decode_entity(caps: &Captures<'_>) -> String {
    let body = &caps[1];
    let decoded = if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
        u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
    } else if let Some(dec) = body.strip_prefix('#') {
        dec.parse::<u32>().ok().and_then(char::from_u32)
    } else {
        named_entity(body)
    };
    decoded.map(String::from).unwrap_or_else(|| caps[0].to_string())
}

fn strip_segment(segment: &str, out: &mut String) {
    let text = COMMENT.replace_all(segment, "");
    let text = TAG.replace_all(&text, "");
    out.push_str(&ENTITY.replace_all(&text, decode_entity));
}

/// Remove every tag from `markup` and decode character references.
///
/// Text between tags is kept verbatim; whitespace is not normalised.
/// CDATA bodies are copied through untouched, so code in them keeps its
/// `<`, `>` and `&` characters.
pub fn strip_markup(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut last = 0;
    for caps in CDATA.captures_iter(markup) {
        let (Some(whole), Some(body)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        strip_segment(&markup[last..whole.start()], &mut out);
        out.push_str(body.as_str());
        last = whole.end();
    }
    strip_segment(&markup[last..], &mut out);
    out
}
