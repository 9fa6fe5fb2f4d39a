use quick_launcher::matching::{match_text, normalize};

#[test]
fn empty_query_matches_every_candidate() {
    for candidate in ["", "abc", "张杰", "  ", "(.*)"] {
        assert!(match_text("", candidate), "{candidate:?}");
    }
}

#[test]
fn case_insensitive_substring() {
    let pairs = [
        ("ext", "Extensions"),
        ("EXT", "extensions"),
        ("sion", "ExtenSIONs"),
        ("open url", "Open URL in a new tab"),
        ("é", "Café"),
        ("É", "café"),
    ];
    for (query, candidate) in pairs {
        assert!(match_text(query, candidate), "{query:?} vs {candidate:?}");
    }
}

#[test]
fn phonetic_substring() {
    assert!(match_text("zhangjie", "张杰"));
    assert!(match_text("jie", "张杰"));
    assert!(match_text("guo", "中国"));
}

#[test]
fn phonetic_subsequence() {
    assert!(match_text("zj", "张杰"));
    assert!(match_text("z j", "张杰"));
    assert!(match_text("zg", "中国"));
    assert!(match_text("QQzg", "QQ中国"));
}

#[test]
fn unrelated_text_is_rejected() {
    assert!(!match_text("xyz", "张杰"));
    assert!(!match_text("tabs", "Extensions"));
    assert!(!match_text("jz", "张杰"));
}

#[test]
fn regex_metacharacters_in_query_are_literal() {
    assert!(!match_text(".", "abc"));
    assert!(!match_text("*", "abc"));
    assert!(!match_text("(", "abc"));
    assert!(!match_text("a.c", "abbc"));
    assert!(match_text("a.c", "a.b.c"));
    assert!(match_text("c++", "C++ Reference"));
    assert!(match_text("(b", "a (beta)"));
    assert!(!match_text("[a-z]", "abc"));
}

#[test]
fn normalized_latin_text_is_stable() {
    for label in ["google chrome", "Visual Studio Code", "张杰", "Ünïcödé"] {
        let once = normalize(label);
        assert!(once.is_ascii());
        assert_eq!(normalize(&once), once);
    }
}
