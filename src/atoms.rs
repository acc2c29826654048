//! Splitting of protocol lines into atoms.
//!
//! DICT replies put multi-word values (descriptions, headwords) inside quotes,
//! e.g. `wn "WordNet (r) 3.0 (2006)"`. An atom is either a run of
//! non-whitespace characters or a quoted span with the quotes removed.

/// Split `line` into atoms.
///
/// # Example
/// ```rust
/// use dictum::atoms::split_atoms;
///
/// let atoms = split_atoms(r#"151 "ice cream" wn "WordNet (r) 3.0""#);
/// assert_eq!(atoms, vec!["151", "ice cream", "wn", "WordNet (r) 3.0"]);
/// ```
pub fn split_atoms(line: &str) -> Vec<String> {
    let mut atoms = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_ascii_whitespace() {
            chars.next();
            continue;
        }

        let mut atom = String::new();
        if c == '"' || c == '\'' {
            let quote = c;
            chars.next();
            while let Some(c) = chars.next() {
                match c {
                    '\\' => {
                        if let Some(escaped) = chars.next() {
                            atom.push(escaped);
                        }
                    }
                    c if c == quote => break,
                    c => atom.push(c),
                }
            }
        } else {
            while let Some(&c) = chars.peek() {
                if c.is_ascii_whitespace() {
                    break;
                }
                atom.push(c);
                chars.next();
            }
        }
        atoms.push(atom);
    }

    atoms
}
