//! SVG builder — a small tree of drawing primitives and its serialization.
//!
//! Groups own their children and an optional transform list. Reusable glyphs
//! live in the drawing's symbol table and are placed with [`Element::Use`].

use std::fmt::Write as _;

use super::constants::FONT_FAMILY;

// ═══════════════════════════════════════════════════════════════════════
// Primitives
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    Translate(f64, f64),
    Scale(f64),
    Rotate(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

/// Fill or outline of a closed shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Fill(&'static str),
    Stroke(&'static str, f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub bold: bool,
    pub italic: bool,
    pub anchor: Anchor,
    /// Hang the text below `y` instead of sitting on it.
    pub hanging: bool,
    pub color: &'static str,
}

impl TextStyle {
    pub fn new(size: f64) -> Self {
        Self {
            size,
            bold: false,
            italic: false,
            anchor: Anchor::Start,
            hanging: false,
            color: "#000000",
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn hanging(mut self) -> Self {
        self.hanging = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: &'static str,
        width: f64,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: &'static str,
    },
    Ellipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
        rotate: f64,
        paint: Paint,
    },
    Path {
        d: String,
        paint: Paint,
    },
    Text {
        x: f64,
        y: f64,
        content: String,
        style: TextStyle,
    },
    Use {
        symbol: &'static str,
        x: f64,
        y: f64,
    },
    Group(Group),
}

// ═══════════════════════════════════════════════════════════════════════
// Group
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    pub transforms: Vec<Transform>,
    pub children: Vec<Element>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translated(x: f64, y: f64) -> Self {
        Self {
            transforms: vec![Transform::Translate(x, y)],
            children: Vec::new(),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transforms.push(transform);
        self
    }

    pub fn push(&mut self, element: Element) {
        self.children.push(element);
    }

    pub fn group(&mut self, group: Group) {
        self.children.push(Element::Group(group));
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: &'static str, width: f64) {
        self.children.push(Element::Line { x1, y1, x2, y2, color, width });
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: &'static str) {
        self.children.push(Element::Rect { x, y, width, height, fill });
    }

    pub fn ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, rotate: f64, paint: Paint) {
        self.children.push(Element::Ellipse { cx, cy, rx, ry, rotate, paint });
    }

    pub fn path(&mut self, d: impl Into<String>, paint: Paint) {
        self.children.push(Element::Path { d: d.into(), paint });
    }

    pub fn text(&mut self, x: f64, y: f64, content: impl Into<String>, style: TextStyle) {
        self.children.push(Element::Text {
            x,
            y,
            content: content.into(),
            style,
        });
    }

    pub fn use_symbol(&mut self, symbol: &'static str, x: f64, y: f64) {
        self.children.push(Element::Use { symbol, x, y });
    }

    /// All elements in this group and its descendants, depth first.
    pub fn walk(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        for child in &self.children {
            out.push(child);
            if let Element::Group(g) = child {
                out.extend(g.walk());
            }
        }
        out
    }

    fn write_svg(&self, out: &mut String, attrs: &str, depth: usize) {
        indent(out, depth);
        out.push_str("<g");
        out.push_str(attrs);
        if !self.transforms.is_empty() {
            let list: Vec<String> = self.transforms.iter().map(transform_attr).collect();
            let _ = write!(out, r#" transform="{}""#, list.join(" "));
        }
        out.push_str(">\n");
        for child in &self.children {
            child.write_svg(out, depth + 1);
        }
        indent(out, depth);
        out.push_str("</g>\n");
    }
}

impl Element {
    fn write_svg(&self, out: &mut String, depth: usize) {
        if let Element::Group(g) = self {
            g.write_svg(out, "", depth);
            return;
        }
        indent(out, depth);
        let _ = match self {
            Element::Line { x1, y1, x2, y2, color, width } => write!(
                out,
                r#"<line x1="{:.3}" y1="{:.3}" x2="{:.3}" y2="{:.3}" stroke="{}" stroke-width="{:.3}"/>"#,
                x1, y1, x2, y2, color, width
            ),
            Element::Rect { x, y, width, height, fill } => write!(
                out,
                r#"<rect x="{:.3}" y="{:.3}" width="{:.3}" height="{:.3}" fill="{}"/>"#,
                x, y, width, height, fill
            ),
            Element::Ellipse { cx, cy, rx, ry, rotate, paint } => write!(
                out,
                r#"<ellipse cx="{:.3}" cy="{:.3}" rx="{:.3}" ry="{:.3}" {} transform="rotate({:.1},{:.3},{:.3})"/>"#,
                cx, cy, rx, ry, paint_attrs(paint), rotate, cx, cy
            ),
            Element::Path { d, paint } => write!(out, r#"<path d="{}" {}/>"#, d, paint_attrs(paint)),
            Element::Text { x, y, content, style } => write!(
                out,
                r#"<text x="{:.3}" y="{:.3}" font-size="{:.2}" font-weight="{}" font-style="{}" fill="{}" text-anchor="{}" dominant-baseline="{}">{}</text>"#,
                x,
                y,
                style.size,
                if style.bold { "bold" } else { "normal" },
                if style.italic { "italic" } else { "normal" },
                style.color,
                style.anchor.as_str(),
                if style.hanging { "hanging" } else { "auto" },
                escape(content)
            ),
            Element::Use { symbol, x, y } => write!(
                out,
                r##"<use xlink:href="#{}" x="{:.3}" y="{:.3}"/>"##,
                symbol, x, y
            ),
            Element::Group(_) => Ok(()),
        };
        out.push('\n');
    }
}

fn paint_attrs(paint: &Paint) -> String {
    match paint {
        Paint::Fill(color) => format!(r#"fill="{}" stroke="none""#, color),
        Paint::Stroke(color, width) => format!(r#"fill="none" stroke="{}" stroke-width="{:.3}""#, color, width),
    }
}

fn transform_attr(t: &Transform) -> String {
    match t {
        Transform::Translate(x, y) => format!("translate({:.3},{:.3})", x, y),
        Transform::Scale(s) => format!("scale({})", s),
        Transform::Rotate(deg) => format!("rotate({})", deg),
    }
}

fn escape(content: &str) -> String {
    content
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Drawing
// ═══════════════════════════════════════════════════════════════════════

/// A complete document of fixed size with its symbol definitions.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    pub width: f64,
    pub height: f64,
    symbols: Vec<(&'static str, Group)>,
    pub root: Group,
}

impl Drawing {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            symbols: Vec::new(),
            root: Group::new(),
        }
    }

    pub fn define_symbol(&mut self, id: &'static str, group: Group) {
        self.symbols.push((id, group));
    }

    pub fn push(&mut self, element: Element) {
        self.root.push(element);
    }

    pub fn to_svg(&self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" viewBox="0 0 {:.3} {:.3}" width="{:.3}" height="{:.3}" style="font-family: {};">"#,
            self.width, self.height, self.width, self.height, FONT_FAMILY
        );
        svg.push('\n');
        if !self.symbols.is_empty() {
            svg.push_str("  <defs>\n");
            for (id, group) in &self.symbols {
                group.write_svg(&mut svg, &format!(r#" id="{}""#, id), 2);
            }
            svg.push_str("  </defs>\n");
        }
        for child in &self.root.children {
            child.write_svg(&mut svg, 1);
        }
        svg.push_str("</svg>\n");
        svg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_groups_carry_transforms() {
        let mut inner = Group::translated(10.0, 0.0).with_transform(Transform::Scale(2.0));
        inner.line(0.0, 0.0, 1.0, 1.0, "black", 0.5);
        let mut drawing = Drawing::new(100.0, 50.0);
        drawing.push(Element::Group(inner));
        let svg = drawing.to_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"transform="translate(10.000,0.000) scale(2)""#));
        assert!(svg.contains("<line x1=\"0.000\""));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn symbols_are_defined_once_and_referenced() {
        let mut dot = Group::new();
        dot.ellipse(0.0, 0.0, 1.0, 1.0, 0.0, Paint::Fill("black"));
        let mut drawing = Drawing::new(10.0, 10.0);
        drawing.define_symbol("dot", dot);
        let mut g = Group::new();
        g.use_symbol("dot", 1.0, 2.0);
        g.use_symbol("dot", 3.0, 4.0);
        drawing.push(Element::Group(g));
        let svg = drawing.to_svg();
        assert_eq!(svg.matches("<ellipse").count(), 1);
        assert_eq!(svg.matches("xlink:href=\"#dot\"").count(), 2);
        assert!(svg.contains(r#"<g id="dot">"#));
    }

    #[test]
    fn text_is_escaped() {
        let mut g = Group::new();
        g.text(0.0, 0.0, "Horn <F> & Bb", TextStyle::new(3.0).bold().italic(true));
        let mut drawing = Drawing::new(10.0, 10.0);
        drawing.push(Element::Group(g));
        let svg = drawing.to_svg();
        assert!(svg.contains("Horn &lt;F&gt; &amp; Bb"));
        assert!(svg.contains(r#"font-weight="bold" font-style="italic""#));
    }

    #[test]
    fn walk_visits_descendants() {
        let mut inner = Group::new();
        inner.rect(0.0, 0.0, 1.0, 1.0, "white");
        let mut outer = Group::new();
        outer.line(0.0, 0.0, 1.0, 0.0, "black", 1.0);
        outer.group(inner);
        assert_eq!(outer.walk().len(), 3);
    }
}
