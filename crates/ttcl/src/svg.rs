//! SVG loading - pull collision shapes out of SVG documents.
//!
//! Streams the document with quick-xml instead of building a tree, and maps
//! each drawing element to a shape:
//!
//! | element      | shape                                   |
//! |--------------|-----------------------------------------|
//! | `<circle>`   | [`Circle`]                              |
//! | `<line>`     | open two-point [`Polygon`]              |
//! | `<polyline>` | open [`Polygon`]                        |
//! | `<polygon>`  | closed [`Polygon`]                      |
//! | `<rect>`     | closed four-point [`Polygon`]           |
//! | `<path>`     | one [`Polygon`] per subpath, closed on Z |
//!
//! Transforms are ignored and anything inside `<defs>` (or other containers
//! that are never drawn directly) is skipped.
//!
//! ## Curve Flattening
//!
//! Paths may contain Bézier curves. These are flattened into line segments
//! with lyon_geom before they become polyline edges.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use lyon_geom::{CubicBezierSegment, QuadraticBezierSegment, point};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use svgtypes::{Length, PointsParser, SimplePathSegment, SimplifyingPathParser};

use crate::dispatch::Shape;
use crate::error::CollisionError;
use crate::geometry::Point;
use crate::shape::{Circle, Polygon};

/// Tolerance for curve flattening, in user units.
/// Lower = more points, closer fit, more edge pairs to test.
pub const CURVE_TOLERANCE: f64 = 0.1;

/// Containers whose children are never rendered directly.
const HIDDEN_CONTAINERS: &[&str] = &["defs", "clipPath", "mask", "symbol", "marker", "pattern"];

/// Error type for SVG loading.
#[derive(Debug)]
pub enum SvgError {
    /// Malformed XML or an attribute that doesn't parse.
    Parse(String),
    /// The element parsed fine but describes an invalid shape.
    Shape { element: String, source: CollisionError },
    /// The document has no drawable shapes.
    NoShapes,
}

impl fmt::Display for SvgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SvgError::Parse(msg) => write!(f, "SVG parse error: {}", msg),
            SvgError::Shape { element, source } => write!(f, "{}: {}", element, source),
            SvgError::NoShapes => write!(f, "No shapes found in SVG"),
        }
    }
}

impl std::error::Error for SvgError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SvgError::Shape { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// A shape plus where it came from in the document.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedShape {
    /// The element's `id` attribute, if any.
    pub id: Option<String>,
    /// Element name (`circle`, `path`, ...).
    pub element: String,
    pub shape: Shape,
}

impl NamedShape {
    /// The id, or `#<index>` for anonymous shapes.
    pub fn label(&self, index: usize) -> String {
        match &self.id {
            Some(id) => id.clone(),
            None => format!("#{}", index),
        }
    }
}

/// Extract every drawable shape from an SVG document, in document order.
pub fn extract_shapes_from_svg(svg_content: &str) -> Result<Vec<NamedShape>, SvgError> {
    let mut reader = Reader::from_str(svg_content);
    reader.config_mut().trim_text(true);

    let mut shapes = Vec::new();
    let mut hidden_depth = 0usize;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if is_hidden_container(e) {
                    hidden_depth += 1;
                } else if hidden_depth == 0 {
                    extract_element(e, &mut shapes)?;
                }
            }
            Ok(Event::Empty(ref e)) => {
                if hidden_depth == 0 && !is_hidden_container(e) {
                    extract_element(e, &mut shapes)?;
                }
            }
            Ok(Event::End(ref e)) => {
                let name = e.local_name();
                let name = std::str::from_utf8(name.as_ref()).unwrap_or("");
                if HIDDEN_CONTAINERS.contains(&name) {
                    hidden_depth = hidden_depth.saturating_sub(1);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(SvgError::Parse(format!(
                    "XML error at position {}: {}",
                    reader.error_position(),
                    e
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    if shapes.is_empty() {
        Err(SvgError::NoShapes)
    } else {
        Ok(shapes)
    }
}

fn is_hidden_container(e: &BytesStart) -> bool {
    let name = e.local_name();
    let name = std::str::from_utf8(name.as_ref()).unwrap_or("");
    HIDDEN_CONTAINERS.contains(&name)
}

// ============================================================================
// ELEMENTS
// ============================================================================

/// Element attributes by local name.
struct Attributes {
    element: String,
    values: HashMap<String, String>,
}

impl Attributes {
    fn read(element: &str, e: &BytesStart) -> Result<Self, SvgError> {
        let mut values = HashMap::new();
        for attr in e.attributes() {
            let attr = attr.map_err(|err| SvgError::Parse(format!("<{}>: {}", element, err)))?;
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|err| SvgError::Parse(format!("<{}>: {}", element, err)))?;
            values.insert(key, value.into_owned());
        }
        Ok(Self { element: element.to_string(), values })
    }

    fn id(&self) -> Option<String> {
        self.values.get("id").filter(|id| !id.is_empty()).cloned()
    }

    fn require(&self, key: &str) -> Result<&str, SvgError> {
        self.values.get(key).map(String::as_str).ok_or_else(|| {
            SvgError::Parse(format!("<{}> is missing the '{}' attribute", self.element, key))
        })
    }

    /// A length attribute, units ignored.
    fn length(&self, key: &str) -> Result<f64, SvgError> {
        let raw = self.require(key)?;
        Length::from_str(raw).map(|len| len.number).map_err(|err| {
            SvgError::Parse(format!("<{}> {}=\"{}\": {}", self.element, key, raw, err))
        })
    }

    fn length_or_zero(&self, key: &str) -> Result<f64, SvgError> {
        if self.values.contains_key(key) {
            self.length(key)
        } else {
            Ok(0.0)
        }
    }

    /// Turn a construction failure into an error naming this element.
    fn shape_error(&self, source: CollisionError) -> SvgError {
        let element = match self.id() {
            Some(id) => format!("<{} id=\"{}\">", self.element, id),
            None => format!("<{}>", self.element),
        };
        SvgError::Shape { element, source }
    }
}

fn extract_element(e: &BytesStart, shapes: &mut Vec<NamedShape>) -> Result<(), SvgError> {
    let name = e.local_name();
    let name = std::str::from_utf8(name.as_ref()).unwrap_or("");

    // ## Rust Lesson #22: Matching on &str
    //
    // Only the elements we understand are read; everything else (groups,
    // text, images...) falls through to `_` and is ignored.
    let built = match name {
        "circle" => vec![circle_from(&Attributes::read(name, e)?)?],
        "line" => vec![line_from(&Attributes::read(name, e)?)?],
        "polyline" => vec![points_from(&Attributes::read(name, e)?, false)?],
        "polygon" => vec![points_from(&Attributes::read(name, e)?, true)?],
        "rect" => rect_from(&Attributes::read(name, e)?)?.into_iter().collect(),
        "path" => path_from(&Attributes::read(name, e)?)?,
        _ => return Ok(()),
    };

    shapes.extend(built);
    Ok(())
}

fn named(attrs: &Attributes, shape: Shape) -> NamedShape {
    NamedShape { id: attrs.id(), element: attrs.element.clone(), shape }
}

fn circle_from(attrs: &Attributes) -> Result<NamedShape, SvgError> {
    let center = Point::new(attrs.length_or_zero("cx")?, attrs.length_or_zero("cy")?);
    let radius = attrs.length("r")?;
    let circle = Circle::new(center, radius).map_err(|err| attrs.shape_error(err))?;
    Ok(named(attrs, circle.into()))
}

fn line_from(attrs: &Attributes) -> Result<NamedShape, SvgError> {
    let start = Point::new(attrs.length_or_zero("x1")?, attrs.length_or_zero("y1")?);
    let end = Point::new(attrs.length_or_zero("x2")?, attrs.length_or_zero("y2")?);
    polygon_from(attrs, vec![start, end], false)
}

fn points_from(attrs: &Attributes, closed: bool) -> Result<NamedShape, SvgError> {
    let points = PointsParser::from(attrs.require("points")?)
        .map(|(x, y)| Point::new(x, y))
        .collect();
    polygon_from(attrs, points, closed)
}

/// Rects with a zero or negative size are not drawn, so they yield nothing.
fn rect_from(attrs: &Attributes) -> Result<Option<NamedShape>, SvgError> {
    let (x, y) = (attrs.length_or_zero("x")?, attrs.length_or_zero("y")?);
    let (w, h) = (attrs.length("width")?, attrs.length("height")?);
    if w <= 0.0 || h <= 0.0 {
        return Ok(None);
    }

    let corners = vec![
        Point::new(x, y),
        Point::new(x + w, y),
        Point::new(x + w, y + h),
        Point::new(x, y + h),
    ];
    polygon_from(attrs, corners, true).map(Some)
}

fn polygon_from(
    attrs: &Attributes,
    points: Vec<Point>,
    closed: bool,
) -> Result<NamedShape, SvgError> {
    let points = clean_ring(points, closed);
    let polygon = Polygon::new(points, closed).map_err(|err| attrs.shape_error(err))?;
    Ok(named(attrs, polygon.into()))
}

// ============================================================================
// PATHS
// ============================================================================

/// Split a path into one polyline per subpath.
///
/// Subpaths that collapse to a single point are dropped.
fn path_from(attrs: &Attributes) -> Result<Vec<NamedShape>, SvgError> {
    let d = attrs.require("d")?;

    let mut rings: Vec<(Vec<Point>, bool)> = Vec::new();
    let mut current: Vec<Point> = Vec::new();
    let mut subpath_start: Option<Point> = None;

    for segment in SimplifyingPathParser::from(d) {
        let segment = segment.map_err(|err| {
            SvgError::Parse(format!("<{}> d=\"{}\": {}", attrs.element, d, err))
        })?;

        match segment {
            SimplePathSegment::MoveTo { x, y } => {
                flush_ring(&mut current, false, &mut rings);
                let p = Point::new(x, y);
                current.push(p);
                subpath_start = Some(p);
            }
            SimplePathSegment::LineTo { x, y } => {
                resume_subpath(&mut current, subpath_start);
                current.push(Point::new(x, y));
            }
            SimplePathSegment::Quadratic { x1, y1, x, y } => {
                resume_subpath(&mut current, subpath_start);
                match current.last().copied() {
                    Some(from) => {
                        let curve = QuadraticBezierSegment {
                            from: point(from.x, from.y),
                            ctrl: point(x1, y1),
                            to: point(x, y),
                        };
                        curve.for_each_flattened(CURVE_TOLERANCE, &mut |segment| {
                            current.push(Point::new(segment.to.x, segment.to.y));
                        });
                    }
                    None => current.push(Point::new(x, y)),
                }
            }
            SimplePathSegment::CurveTo { x1, y1, x2, y2, x, y } => {
                resume_subpath(&mut current, subpath_start);
                match current.last().copied() {
                    Some(from) => {
                        let curve = CubicBezierSegment {
                            from: point(from.x, from.y),
                            ctrl1: point(x1, y1),
                            ctrl2: point(x2, y2),
                            to: point(x, y),
                        };
                        curve.for_each_flattened(CURVE_TOLERANCE, &mut |segment| {
                            current.push(Point::new(segment.to.x, segment.to.y));
                        });
                    }
                    None => current.push(Point::new(x, y)),
                }
            }
            SimplePathSegment::ClosePath => {
                // The pen goes back to the subpath start; a following
                // LineTo begins a new subpath from there.
                flush_ring(&mut current, true, &mut rings);
            }
        }
    }
    flush_ring(&mut current, false, &mut rings);

    rings
        .into_iter()
        .map(|(points, closed)| {
            let polygon = Polygon::new(points, closed).map_err(|err| attrs.shape_error(err))?;
            Ok(named(attrs, polygon.into()))
        })
        .collect()
}

/// After a ClosePath the next drawing command starts from the subpath start.
fn resume_subpath(current: &mut Vec<Point>, subpath_start: Option<Point>) {
    if current.is_empty() {
        if let Some(start) = subpath_start {
            current.push(start);
        }
    }
}

fn flush_ring(current: &mut Vec<Point>, closed: bool, rings: &mut Vec<(Vec<Point>, bool)>) {
    let points = clean_ring(std::mem::take(current), closed);
    if points.len() >= 2 {
        rings.push((points, closed));
    }
}

/// Remove zero-length edges.
///
/// Collapses runs of identical points, and for closed rings drops a final
/// point that repeats the first (the wraparound edge already covers it).
fn clean_ring(mut points: Vec<Point>, closed: bool) -> Vec<Point> {
    points.dedup();
    if closed && points.len() > 2 && points.first() == points.last() {
        points.pop();
    }
    points
}

// ============================================================================
// TESTS
// ============================================================================
