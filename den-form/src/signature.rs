//! Pointer-drawn signature capture.
//!
//! `SignaturePad` records strokes as the host forwards pointer events. The
//! drawing is serialized to an SVG data URI, which is the opaque value stored
//! as a signature answer.

use std::fmt::Write as _;

/// A point on the pad, in pad pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A drawing surface for signatures.
#[derive(Debug, Clone, PartialEq)]
pub struct SignaturePad {
    width: u32,
    height: u32,
    strokes: Vec<Vec<Point>>,
    /// The stroke being drawn, if the pointer is down.
    current: Option<Vec<Point>>,
}

impl Default for SignaturePad {
    fn default() -> Self {
        Self::new(500, 160)
    }
}

impl SignaturePad {
    /// Create an empty pad of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            strokes: Vec::new(),
            current: None,
        }
    }

    /// Pointer down: start a new stroke.
    ///
    /// An unfinished stroke is discarded.
    pub fn begin_stroke(&mut self, at: Point) {
        self.current = Some(vec![at]);
    }

    /// Pointer move while down.
    pub fn extend_stroke(&mut self, to: Point) {
        if let Some(stroke) = &mut self.current {
            stroke.push(to);
        }
    }

    /// Pointer up: commit the current stroke.
    ///
    /// Returns `true` if a stroke was committed.
    pub fn end_stroke(&mut self) -> bool {
        match self.current.take() {
            Some(stroke) => {
                self.strokes.push(stroke);
                true
            }
            None => false,
        }
    }

    /// Erase everything.
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.current = None;
    }

    /// Check if no stroke has been committed.
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Number of committed strokes.
    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    /// Serialize the committed strokes, or `None` if the pad is empty.
    pub fn to_data_uri(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }

        let mut path = String::new();
        for stroke in &self.strokes {
            for (i, point) in stroke.iter().enumerate() {
                let op = if i == 0 { 'M' } else { 'L' };
                if !path.is_empty() {
                    path.push(' ');
                }
                // Writing into a String cannot fail.
                let _ = write!(path, "{op}{:.1} {:.1}", point.x, point.y);
            }
        }

        Some(format!(
            "data:image/svg+xml;utf8,<svg xmlns=\"http://www.w3.org/2000/svg\" \
             width=\"{}\" height=\"{}\"><path d=\"{path}\" fill=\"none\" \
             stroke=\"black\" stroke-width=\"2\"/></svg>",
            self.width, self.height
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed() -> SignaturePad {
        let mut pad = SignaturePad::new(100, 40);
        pad.begin_stroke(Point::new(1.0, 2.0));
        pad.extend_stroke(Point::new(3.0, 4.0));
        pad.end_stroke();
        pad
    }

    #[test]
    fn empty_pad_has_no_data() {
        assert_eq!(SignaturePad::default().to_data_uri(), None);
    }

    #[test]
    fn unfinished_stroke_is_not_serialized() {
        let mut pad = SignaturePad::new(100, 40);
        pad.begin_stroke(Point::new(1.0, 2.0));
        assert!(pad.is_empty());
        assert_eq!(pad.to_data_uri(), None);
    }

    #[test]
    fn committed_strokes_become_path_data() {
        let data = signed().to_data_uri().unwrap();
        assert!(data.starts_with("data:image/svg+xml;utf8,<svg"));
        assert!(data.contains("d=\"M1.0 2.0 L3.0 4.0\""));
        assert!(data.contains("width=\"100\" height=\"40\""));
    }

    #[test]
    fn clear_erases_strokes() {
        let mut pad = signed();
        pad.clear();
        assert!(pad.is_empty());
        assert!(!pad.end_stroke());
    }
}
