/*
This code is part of the shape_ingest geospatial library.
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT
*/
use super::ParseError;
use crate::geometry::{normalize, RawGeometry, RawPolygon};
use crate::structures::{Point2D, Rectangle, Shape};

/// Parses a shape definition such as `POLYGON ((100 0, 101 0, 101 1, 100 0))`.
pub fn parse(text: &str) -> Result<Shape, ParseError> {
    WktParser::new().parse(text)
}

/// A recursive-descent parser over a byte cursor. A parser can be reused
/// for any number of inputs, one at a time.
#[derive(Default, Debug)]
pub struct WktParser {
    offset: usize,
}

impl WktParser {
    pub fn new() -> WktParser {
        WktParser::default()
    }

    /// The offset reached by the most recent parse.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn parse(&mut self, text: &str) -> Result<Shape, ParseError> {
        let mut cursor = Cursor {
            text,
            bytes: text.as_bytes(),
            pos: 0,
        };
        let ret = cursor.shape();
        self.offset = cursor.pos;
        ret
    }
}

struct Cursor<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn shape(&mut self) -> Result<Shape, ParseError> {
        let keyword = self.keyword()?;
        let shape = match keyword.as_str() {
            "point" => {
                self.expect(b'(', "'('")?;
                let p = self.coordinate()?;
                self.expect(b')', "')'")?;
                Shape::Point(p)
            }
            "polygon" => {
                let raw = self.polygon()?;
                normalize(&RawGeometry::Polygon(raw))?
            }
            "multipolygon" => {
                let polygons = self.multipolygon()?;
                normalize(&RawGeometry::MultiPolygon(polygons))?
            }
            "envelope" => {
                self.expect(b'(', "'('")?;
                let top_left = self.coordinate()?;
                self.expect(b',', "','")?;
                let bottom_right = self.coordinate()?;
                self.expect(b')', "')'")?;
                Shape::Rectangle(Rectangle::from_corners(top_left, bottom_right))
            }
            _ => return Err(ParseError::UnknownShapeType { found: keyword }),
        };
        self.skip_whitespace();
        if self.pos < self.bytes.len() {
            return Err(ParseError::TrailingCharacters { offset: self.pos });
        }
        Ok(shape)
    }

    fn multipolygon(&mut self) -> Result<Vec<RawPolygon>, ParseError> {
        self.skip_whitespace();
        if self.peek().map_or(false, |c| c.is_ascii_alphabetic()) {
            let start = self.pos;
            if self.keyword()? == "empty" {
                return Ok(vec![]);
            }
            return Err(ParseError::Unexpected {
                offset: start,
                expected: "'('",
                found: self.char_at(start),
            });
        }
        self.expect(b'(', "'('")?;
        let mut polygons = vec![self.polygon()?];
        while self.separator()? {
            polygons.push(self.polygon()?);
        }
        Ok(polygons)
    }

    fn polygon(&mut self) -> Result<RawPolygon, ParseError> {
        self.expect(b'(', "'('")?;
        let shell = self.coordinate_sequence()?;
        let mut holes = vec![];
        while self.separator()? {
            holes.push(self.coordinate_sequence()?);
        }
        Ok(RawPolygon { shell, holes })
    }

    fn coordinate_sequence(&mut self) -> Result<Vec<Point2D>, ParseError> {
        self.expect(b'(', "'('")?;
        let mut sequence = vec![self.coordinate()?];
        while self.separator()? {
            sequence.push(self.coordinate()?);
        }
        Ok(sequence)
    }

    /// Consumes a ',' (returning true) or a closing ')' (returning false).
    fn separator(&mut self) -> Result<bool, ParseError> {
        match self.next_non_whitespace("',' or ')'")? {
            b',' => {
                self.pos += 1;
                Ok(true)
            }
            b')' => {
                self.pos += 1;
                Ok(false)
            }
            _ => Err(ParseError::Unexpected {
                offset: self.pos,
                expected: "',' or ')'",
                found: self.char_at(self.pos),
            }),
        }
    }

    fn coordinate(&mut self) -> Result<Point2D, ParseError> {
        let x = self.number()?;
        let y = self.number()?;
        Ok(Point2D::new(x, y))
    }

    fn number(&mut self) -> Result<f64, ParseError> {
        self.next_non_whitespace("number")?;
        let start = self.pos;
        while self.pos < self.bytes.len() {
            let c = self.bytes[self.pos];
            if !(c.is_ascii_digit() || c == b'.' || c == b'-') {
                break;
            }
            self.pos += 1;
        }
        if self.pos == self.bytes.len() {
            return Err(ParseError::UnexpectedEndOfInput {
                offset: self.pos,
                expected: "number",
            });
        }
        if self.pos == start {
            return Err(ParseError::Unexpected {
                offset: start,
                expected: "number",
                found: self.char_at(start),
            });
        }
        let text = String::from_utf8_lossy(&self.bytes[start..self.pos]).to_string();
        text.parse::<f64>()
            .map_err(|_| ParseError::InvalidNumber { offset: start, text })
    }

    /// Reads an alphabetic keyword, lower-cased.
    fn keyword(&mut self) -> Result<String, ParseError> {
        self.next_non_whitespace("shape type")?;
        let start = self.pos;
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_alphabetic() {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(ParseError::Unexpected {
                offset: start,
                expected: "shape type",
                found: self.char_at(start),
            });
        }
        Ok(String::from_utf8_lossy(&self.bytes[start..self.pos]).to_ascii_lowercase())
    }

    fn expect(&mut self, wanted: u8, expected: &'static str) -> Result<(), ParseError> {
        let c = self.next_non_whitespace(expected)?;
        if c != wanted {
            return Err(ParseError::Unexpected {
                offset: self.pos,
                expected,
                found: self.char_at(self.pos),
            });
        }
        self.pos += 1;
        Ok(())
    }

    /// Skips whitespace and returns the next byte without consuming it.
    fn next_non_whitespace(&mut self, expected: &'static str) -> Result<u8, ParseError> {
        self.skip_whitespace();
        self.peek().ok_or(ParseError::UnexpectedEndOfInput {
            offset: self.pos,
            expected,
        })
    }

    /// The full character starting at a byte offset.
    fn char_at(&self, pos: usize) -> char {
        self.text
            .get(pos..)
            .and_then(|rest| rest.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }
}
