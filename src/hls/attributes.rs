//! HLS attribute-list handling
//!
//! Tags such as `#EXT-X-STREAM-INF` and `#EXT-X-MEDIA` carry a
//! comma-separated `KEY=VALUE` list after the colon. Quoted values may
//! themselves contain commas, e.g. `NAME="Low, Quality"`.

/// Parsed attribute list in manifest order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeList {
    entries: Vec<(String, String)>,
}

impl AttributeList {
    /// Value for `key` (case-sensitive); the last occurrence wins
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Owned copy of the value for `key`
    pub fn get_owned(&self, key: &str) -> Option<String> {
        self.get(key).map(str::to_string)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split raw attribute-list text into trimmed tokens
///
/// Commas only separate tokens outside double quotes. An unbalanced quote
/// leaves the remainder of the input in a single token.
pub fn tokenize_attribute_list(raw: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in raw.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                current.push(ch);
            }
            ',' if !in_quotes => {
                push_token(&mut tokens, &current);
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    push_token(&mut tokens, &current);

    tokens
}

fn push_token(tokens: &mut Vec<String>, raw: &str) {
    let token = raw.trim();
    if !token.is_empty() {
        tokens.push(token.to_string());
    }
}

/// Parse raw attribute-list text into keys and unquoted values
///
/// Tokens without `=` are skipped. Keys are trimmed but keep their case.
pub fn parse_attribute_list(raw: &str) -> AttributeList {
    let entries = tokenize_attribute_list(raw)
        .into_iter()
        .filter_map(|token| {
            let (key, value) = token.split_once('=')?;
            Some((key.trim().to_string(), unquote(value.trim()).to_string()))
        })
        .collect();

    AttributeList { entries }
}

fn unquote(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_quoted_comma_does_not_split() {
        let tokens = tokenize_attribute_list(r#"NAME="A, B",BANDWIDTH=10"#);
        assert_eq!(tokens, vec![r#"NAME="A, B""#, "BANDWIDTH=10"]);
    }

    #[test]
    fn test_tokens_are_trimmed_and_empty_dropped() {
        let tokens = tokenize_attribute_list(" A=1 , ,B=2,  ");
        assert_eq!(tokens, vec!["A=1", "B=2"]);
    }

    #[test]
    fn test_unbalanced_quote_keeps_remainder() {
        let tokens = tokenize_attribute_list(r#"A=1,NAME="broken,B=2"#);
        assert_eq!(tokens, vec!["A=1", r#"NAME="broken,B=2"#]);
    }

    #[test]
    fn test_parse_skips_invalid_pairs() {
        let parsed = parse_attribute_list(r#"BANDWIDTH=800000,NAME="Main",BROKEN"#);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.get("BANDWIDTH"), Some("800000"));
        assert_eq!(parsed.get("NAME"), Some("Main"));
        assert_eq!(parsed.get("BROKEN"), None);
    }

    #[test]
    fn test_parse_keeps_key_case_and_splits_on_first_equals() {
        let parsed = parse_attribute_list(r#"uri="a.m3u8?x=1",Type=AUDIO"#);
        assert_eq!(parsed.get("uri"), Some("a.m3u8?x=1"));
        assert_eq!(parsed.get("Type"), Some("AUDIO"));
        assert_eq!(parsed.get("TYPE"), None);
    }

    #[test]
    fn test_unquote_strips_one_pair_only() {
        let parsed = parse_attribute_list(r#"A="",B="x",C=""y"",D=""#);
        assert_eq!(parsed.get("A"), Some(""));
        assert_eq!(parsed.get("B"), Some("x"));
        assert_eq!(parsed.get("C"), Some(r#""y""#));
        assert_eq!(parsed.get("D"), Some(r#"""#));
    }

    #[test]
    fn test_repeated_key_last_wins() {
        let parsed = parse_attribute_list("A=1,A=2");
        assert_eq!(parsed.get("A"), Some("2"));
        assert_eq!(parsed.len(), 2);
    }

    proptest! {
        #[test]
        fn prop_never_panics(raw in ".*") {
            let _ = parse_attribute_list(&raw);
        }

        #[test]
        fn prop_quoted_commas_never_split(
            name in "[A-Za-z ,]{0,20}",
            bandwidth in 0u64..10_000_000,
        ) {
            let raw = format!("NAME=\"{name}\",BANDWIDTH={bandwidth}");
            let tokens = tokenize_attribute_list(&raw);
            prop_assert_eq!(tokens.len(), 2);
            let parsed = parse_attribute_list(&raw);
            prop_assert_eq!(parsed.get("NAME"), Some(name.as_str()));
            let expected = bandwidth.to_string();
            prop_assert_eq!(parsed.get("BANDWIDTH"), Some(expected.as_str()));
        }
    }
}
