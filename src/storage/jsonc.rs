/// Removes `//` and `/* */` comments that sit outside string literals.
/// Newlines inside comments are kept so parser line numbers still match.
#[must_use]
pub fn strip_comments(source: &str) -> String {
    let mut output = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            output.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        output.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                output.push(c);
            }
            ('/', Some('/')) => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        output.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut previous = '\0';
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        output.push('\n');
                    }
                    if previous == '*' && skipped == '/' {
                        break;
                    }
                    previous = skipped;
                }
            }
            _ => output.push(c),
        }
    }

    output
}
