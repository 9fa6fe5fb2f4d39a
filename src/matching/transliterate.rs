use deunicode::deunicode_char;

/// Convert a label into its lowercase Latin reading.
///
/// ASCII characters are kept as they are (lowercased). Every other character is
/// replaced by its transliteration with surrounding whitespace removed, so
/// ideographs collapse into an unspaced syllable run: `张杰` becomes
/// `zhangjie`. Characters without a known reading are dropped.
pub fn normalize(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    for ch in label.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii() {
            out.push(ch);
            continue;
        }
        if let Some(reading) = deunicode_char(ch) {
            out.extend(
                reading
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .map(|c| c.to_ascii_lowercase()),
            );
        }
    }
    out
}
