//! Minimal JSON-with-comments support for `tsconfig.json` files

/// Remove `//` and `/* */` comments and trailing commas so the text can be
/// handed to `serde_json`. Newlines inside block comments are kept so error
/// positions still point at the right line.
pub fn strip_jsonc(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '/' if chars.peek() == Some(&'/') => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut previous = '\0';
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                    }
                    if previous == '*' && next == '/' {
                        break;
                    }
                    previous = next;
                }
            }
            '}' | ']' => {
                drop_trailing_comma(&mut out);
                out.push(c);
            }
            _ => out.push(c),
        }
    }

    out
}

fn drop_trailing_comma(out: &mut String) {
    let trimmed_len = out.trim_end().len();
    if out[..trimmed_len].ends_with(',') {
        out.remove(trimmed_len - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_strips_comments_outside_strings() {
        let input = r#"{
  // line comment
  "a": "http://example.com", /* block
  comment */ "b": 1
}"#;
        let value: serde_json::Value = serde_json::from_str(&strip_jsonc(input)).unwrap();
        assert_eq!(value["a"], "http://example.com");
        assert_eq!(value["b"], 1);
    }

    #[test]
    fn test_trailing_commas() {
        let input = r#"{ "paths": { "@app/*": ["src/*",], }, }"#;
        let value: serde_json::Value = serde_json::from_str(&strip_jsonc(input)).unwrap();
        assert_eq!(value["paths"]["@app/*"][0], "src/*");
    }

    #[test]
    fn test_escaped_quotes_in_strings() {
        let input = r#"{ "a": "say \"hi\" // not a comment" }"#;
        let value: serde_json::Value = serde_json::from_str(&strip_jsonc(input)).unwrap();
        assert_eq!(value["a"], "say \"hi\" // not a comment");
    }

    #[test]
    fn test_block_comment_keeps_line_count() {
        let input = "{\n/* a\nb\n*/\n\"x\": 1}";
        assert_eq!(strip_jsonc(input).lines().count(), input.lines().count());
    }
}
