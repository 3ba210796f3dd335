//! Reader for the XML subset used by locale catalog files.
//!
//! This is not a general-purpose XML parser. It understands exactly what the
//! catalog files contain: an optional declaration, comments, nested elements
//! with quoted attributes, and text content using the five standard entities
//! (`&quot;` `&apos;` `&lt;` `&gt;` `&amp;`) plus numeric character
//! references. Reserved characters appearing unescaped in text content fail
//! the whole document; the loader turns that into a per-file error while the
//! remaining manifest files keep loading.

use crate::error::{ParseError, ParseErrorKind};

/// One element of a parsed document, with 1-based source position.
///
/// `text` is the concatenation of all text nodes directly under the element,
/// entities already resolved. Whitespace between child elements ends up here
/// too; callers that only care about child elements ignore it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Element>,
    pub text: String,
    pub line: u32,
    pub col: u32,
}

impl Element {
    /// Value of the named attribute, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Parses a complete document and returns its root element.
pub fn parse_document(input: &str) -> Result<Element, ParseError> {
    let mut cur = Cursor::new(input);
    cur.skip_misc()?;
    if cur.peek().is_none() {
        return Err(cur.error(ParseErrorKind::MissingRoot));
    }
    let root = cur.parse_element()?;
    cur.skip_misc()?;
    if cur.peek().is_some() {
        return Err(cur.error(ParseErrorKind::TrailingContent));
    }
    Ok(root)
}

struct Cursor<'a> {
    rest: &'a str,
    line: u32,
    col: u32,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        let rest = input.strip_prefix('\u{feff}').unwrap_or(input);
        Cursor { rest, line: 1, col: 1 }
    }

    fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn starts_with(&self, pat: &str) -> bool {
        self.rest.starts_with(pat)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.rest = &self.rest[c.len_utf8()..];
        if c == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(c)
    }

    /// Consumes `pat` if the input starts with it.
    fn eat(&mut self, pat: &str) -> bool {
        if self.starts_with(pat) {
            for _ in pat.chars() {
                self.bump();
            }
            true
        } else {
            false
        }
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError {
            kind,
            line: self.line,
            col: self.col,
        }
    }

    fn error_at(&self, kind: ParseErrorKind, line: u32, col: u32) -> ParseError {
        ParseError { kind, line, col }
    }

    fn expect(&mut self, expected: char, what: &'static str) -> Result<(), ParseError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.bump();
                Ok(())
            }
            Some(found) => Err(self.error(ParseErrorKind::Unexpected {
                expected: what,
                found,
            })),
            None => Err(self.error(ParseErrorKind::UnexpectedEof)),
        }
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.bump();
        }
    }

    /// Skips whitespace, declarations and comments between markup.
    fn skip_misc(&mut self) -> Result<(), ParseError> {
        loop {
            self.skip_ws();
            if self.starts_with("<?") {
                while !self.eat("?>") {
                    if self.bump().is_none() {
                        return Err(self.error(ParseErrorKind::UnexpectedEof));
                    }
                }
            } else if self.starts_with("<!--") {
                self.skip_comment()?;
            } else {
                return Ok(());
            }
        }
    }

    fn skip_comment(&mut self) -> Result<(), ParseError> {
        debug_assert!(self.starts_with("<!--"));
        self.eat("<!--");
        while !self.eat("-->") {
            if self.bump().is_none() {
                return Err(self.error(ParseErrorKind::UnexpectedEof));
            }
        }
        Ok(())
    }

    fn parse_name(&mut self) -> Result<String, ParseError> {
        let mut name = String::new();
        match self.peek() {
            Some(c) if is_name_start(c) => {
                name.push(c);
                self.bump();
            }
            Some(found) => {
                return Err(self.error(ParseErrorKind::Unexpected {
                    expected: "a name",
                    found,
                }));
            }
            None => return Err(self.error(ParseErrorKind::UnexpectedEof)),
        }
        while let Some(c) = self.peek() {
            if !is_name_char(c) {
                break;
            }
            name.push(c);
            self.bump();
        }
        Ok(name)
    }

    fn parse_element(&mut self) -> Result<Element, ParseError> {
        let (line, col) = (self.line, self.col);
        self.expect('<', "'<'")?;
        let name = self.parse_name()?;
        let mut element = Element {
            name,
            attrs: Vec::new(),
            children: Vec::new(),
            text: String::new(),
            line,
            col,
        };

        loop {
            self.skip_ws();
            match self.peek() {
                Some('>') => {
                    self.bump();
                    break;
                }
                Some('/') => {
                    self.bump();
                    self.expect('>', "'>'")?;
                    return Ok(element);
                }
                Some(_) => {
                    let attr_name = self.parse_name()?;
                    self.skip_ws();
                    self.expect('=', "'='")?;
                    self.skip_ws();
                    let value = self.parse_attr_value()?;
                    element.attrs.push((attr_name, value));
                }
                None => return Err(self.error(ParseErrorKind::UnexpectedEof)),
            }
        }

        self.parse_content(&mut element)?;
        Ok(element)
    }

    fn parse_attr_value(&mut self) -> Result<String, ParseError> {
        let quote = match self.peek() {
            Some(c @ ('"' | '\'')) => {
                self.bump();
                c
            }
            Some(found) => {
                return Err(self.error(ParseErrorKind::Unexpected {
                    expected: "a quoted attribute value",
                    found,
                }));
            }
            None => return Err(self.error(ParseErrorKind::UnexpectedEof)),
        };
        let mut value = String::new();
        loop {
            match self.peek() {
                Some(c) if c == quote => {
                    self.bump();
                    return Ok(value);
                }
                Some('&') => value.push(self.parse_entity()?),
                Some('<') => {
                    return Err(self.error(ParseErrorKind::UnescapedReservedChar('<')));
                }
                Some(c) => {
                    value.push(c);
                    self.bump();
                }
                None => return Err(self.error(ParseErrorKind::UnexpectedEof)),
            }
        }
    }

    /// Text and child elements up to the matching closing tag.
    fn parse_content(&mut self, element: &mut Element) -> Result<(), ParseError> {
        loop {
            match self.peek() {
                Some('<') if self.starts_with("<!--") => self.skip_comment()?,
                Some('<') if self.starts_with("</") => {
                    let (line, col) = (self.line, self.col);
                    self.eat("</");
                    let found = self.parse_name()?;
                    if found != element.name {
                        return Err(self.error_at(
                            ParseErrorKind::MismatchedClosingTag {
                                expected: element.name.clone(),
                                found,
                            },
                            line,
                            col,
                        ));
                    }
                    self.skip_ws();
                    self.expect('>', "'>'")?;
                    return Ok(());
                }
                Some('<') => {
                    // Only markup may follow '<'; anything else is a literal
                    // that should have been written as &lt;.
                    if self.rest[1..].chars().next().is_some_and(is_name_start) {
                        element.children.push(self.parse_element()?);
                    } else {
                        return Err(self.error(ParseErrorKind::UnescapedReservedChar('<')));
                    }
                }
                Some('>') => {
                    return Err(self.error(ParseErrorKind::UnescapedReservedChar('>')));
                }
                Some('&') => {
                    let c = self.parse_entity()?;
                    element.text.push(c);
                }
                Some(c) => {
                    element.text.push(c);
                    self.bump();
                }
                None => return Err(self.error(ParseErrorKind::UnexpectedEof)),
            }
        }
    }

    /// Resolves an entity starting at `&`. A bare ampersand that does not
    /// form a complete entity is reported as an unescaped reserved character.
    fn parse_entity(&mut self) -> Result<char, ParseError> {
        let (line, col) = (self.line, self.col);
        self.bump(); // '&'
        let mut body = String::new();
        loop {
            match self.peek() {
                Some(';') => {
                    self.bump();
                    break;
                }
                Some(c) if c.is_ascii_alphanumeric() || c == '#' => {
                    // Entity bodies are short; a runaway one means the
                    // ampersand was meant literally.
                    if body.len() > 8 {
                        return Err(self.error_at(
                            ParseErrorKind::UnescapedReservedChar('&'),
                            line,
                            col,
                        ));
                    }
                    body.push(c);
                    self.bump();
                }
                _ => {
                    return Err(self.error_at(
                        ParseErrorKind::UnescapedReservedChar('&'),
                        line,
                        col,
                    ));
                }
            }
        }
        match body.as_str() {
            "quot" => Ok('"'),
            "apos" => Ok('\''),
            "lt" => Ok('<'),
            "gt" => Ok('>'),
            "amp" => Ok('&'),
            _ => {
                if let Some(digits) = body.strip_prefix('#') {
                    let code = if let Some(hex) = digits.strip_prefix('x') {
                        u32::from_str_radix(hex, 16).ok()
                    } else {
                        digits.parse::<u32>().ok()
                    };
                    code.and_then(char::from_u32).ok_or_else(|| {
                        self.error_at(
                            ParseErrorKind::InvalidCharRef(digits.to_string()),
                            line,
                            col,
                        )
                    })
                } else {
                    Err(self.error_at(ParseErrorKind::UnknownEntity(body), line, col))
                }
            }
        }
    }
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ':' | '_' | '-' | '.')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Element {
        parse_document(input).expect("document should parse")
    }

    fn parse_err(input: &str) -> ParseError {
        parse_document(input).expect_err("document should fail")
    }

    #[test]
    fn parses_declaration_comments_and_nesting() {
        let root = parse(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
             <!-- kill messages -->\n\
             <Messages>\n\
               <Entry Id=\"melee\">\n\
                 <String xml:lang=\"en-US\">{0} clobbered {1}</String>\n\
               </Entry>\n\
             </Messages>",
        );
        assert_eq!(root.name, "Messages");
        assert_eq!(root.children.len(), 1);
        let entry = &root.children[0];
        assert_eq!(entry.attr("Id"), Some("melee"));
        let string = &entry.children[0];
        assert_eq!(string.attr("xml:lang"), Some("en-US"));
        assert_eq!(string.text, "{0} clobbered {1}");
    }

    #[test]
    fn resolves_entities_in_text_and_attributes() {
        let root = parse(
            "<R note=\"&quot;x&quot; &amp; y\">a &lt;b&gt; c &amp; d &apos;&#65;&#x42;&apos;</R>",
        );
        assert_eq!(root.attr("note"), Some("\"x\" & y"));
        assert_eq!(root.text, "a <b> c & d 'AB'");
    }

    #[test]
    fn single_quoted_attributes_and_self_closing_tags() {
        let root = parse("<R><Empty Id='a'/><Empty Id='b' /></R>");
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[1].attr("Id"), Some("b"));
    }

    #[test]
    fn comment_inside_content_is_skipped() {
        let root = parse("<R>one<!-- two -->three</R>");
        assert_eq!(root.text, "onethree");
    }

    #[test]
    fn raw_ampersand_is_rejected_with_position() {
        let err = parse_err("<R>fish & chips</R>");
        assert_eq!(err.kind, ParseErrorKind::UnescapedReservedChar('&'));
        assert_eq!((err.line, err.col), (1, 9));
    }

    #[test]
    fn raw_less_than_in_text_is_rejected() {
        let err = parse_err("<R>a < b</R>");
        assert_eq!(err.kind, ParseErrorKind::UnescapedReservedChar('<'));
    }

    #[test]
    fn raw_greater_than_in_text_is_rejected() {
        let err = parse_err("<R>a > b</R>");
        assert_eq!(err.kind, ParseErrorKind::UnescapedReservedChar('>'));
    }

    #[test]
    fn unknown_entity_is_rejected() {
        let err = parse_err("<R>&nbsp;</R>");
        assert_eq!(err.kind, ParseErrorKind::UnknownEntity("nbsp".into()));
    }

    #[test]
    fn invalid_char_ref_is_rejected() {
        let err = parse_err("<R>&#x110000;</R>");
        assert_eq!(err.kind, ParseErrorKind::InvalidCharRef("x110000".into()));
    }

    #[test]
    fn mismatched_closing_tag_is_rejected() {
        let err = parse_err("<R><Entry></String></R>");
        assert_eq!(
            err.kind,
            ParseErrorKind::MismatchedClosingTag {
                expected: "Entry".into(),
                found: "String".into(),
            }
        );
    }

    #[test]
    fn truncated_document_is_rejected() {
        let err = parse_err("<R><Entry Id=\"x\">");
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);
    }

    #[test]
    fn content_after_root_is_rejected() {
        let err = parse_err("<R/><R/>");
        assert_eq!(err.kind, ParseErrorKind::TrailingContent);
    }

    #[test]
    fn empty_input_has_no_root() {
        let err = parse_err("  \n ");
        assert_eq!(err.kind, ParseErrorKind::MissingRoot);
    }

    #[test]
    fn error_positions_track_lines() {
        let err = parse_err("<R>\n  <E>bad & worse</E>\n</R>");
        assert_eq!((err.line, err.col), (2, 10));
    }
}
