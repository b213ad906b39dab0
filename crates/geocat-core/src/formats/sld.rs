//! Styled Layer Descriptor (SLD 1.0) parsing
//!
//! Only the structure of the document is kept: layers, user styles, feature type
//! styles, rules and the kinds of symbolizers they carry. Symbolizer parameters
//! are not interpreted.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{GeocatError, Result};

const ROOT_ELEMENT: &str = "StyledLayerDescriptor";

/// Parsed SLD document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyledLayerDescriptor {
    pub name: Option<String>,
    pub layers: Vec<NamedLayer>,
}

impl StyledLayerDescriptor {
    /// The style flagged as default, falling back to the first style
    pub fn default_style(&self) -> Option<&UserStyle> {
        let mut styles = self.layers.iter().flat_map(|l| l.styles.iter());
        let first = styles.clone().next();
        styles.find(|s| s.is_default).or(first)
    }

    /// Every symbolizer of every rule, in document order
    pub fn symbolizers(&self) -> impl Iterator<Item = &Symbolizer> {
        self.layers
            .iter()
            .flat_map(|l| l.styles.iter())
            .flat_map(|s| s.feature_type_styles.iter())
            .flat_map(|f| f.rules.iter())
            .flat_map(|r| r.symbolizers.iter())
    }
}

/// `NamedLayer` or `UserLayer` element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamedLayer {
    pub name: Option<String>,
    pub styles: Vec<UserStyle>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserStyle {
    pub name: Option<String>,
    pub title: Option<String>,
    pub is_default: bool,
    pub feature_type_styles: Vec<FeatureTypeStyle>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureTypeStyle {
    pub rules: Vec<Rule>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rule {
    pub name: Option<String>,
    pub title: Option<String>,
    pub symbolizers: Vec<Symbolizer>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbolizer {
    Point,
    Line,
    Polygon,
    Text,
    Raster,
}

impl Symbolizer {
    fn from_element(name: &str) -> Option<Self> {
        match name {
            "PointSymbolizer" => Some(Symbolizer::Point),
            "LineSymbolizer" => Some(Symbolizer::Line),
            "PolygonSymbolizer" => Some(Symbolizer::Polygon),
            "TextSymbolizer" => Some(Symbolizer::Text),
            "RasterSymbolizer" => Some(Symbolizer::Raster),
            _ => None,
        }
    }
}

/// Partially built elements, innermost last
#[derive(Default)]
struct ParseState {
    document: Option<StyledLayerDescriptor>,
    layer: Option<NamedLayer>,
    style: Option<UserStyle>,
    feature_type_style: Option<FeatureTypeStyle>,
    rule: Option<Rule>,
}

impl ParseState {
    fn open(&mut self, element: &str) {
        match element {
            "NamedLayer" | "UserLayer" => self.layer = Some(NamedLayer::default()),
            "UserStyle" => self.style = Some(UserStyle::default()),
            "FeatureTypeStyle" => self.feature_type_style = Some(FeatureTypeStyle::default()),
            "Rule" => self.rule = Some(Rule::default()),
            other => {
                if let (Some(symbolizer), Some(rule)) = (Symbolizer::from_element(other), self.rule.as_mut()) {
                    rule.symbolizers.push(symbolizer);
                }
            }
        }
    }

    fn close(&mut self, element: &str) {
        match element {
            "Rule" => {
                if let (Some(rule), Some(fts)) = (self.rule.take(), self.feature_type_style.as_mut()) {
                    fts.rules.push(rule);
                }
            }
            "FeatureTypeStyle" => {
                if let (Some(fts), Some(style)) = (self.feature_type_style.take(), self.style.as_mut()) {
                    style.feature_type_styles.push(fts);
                }
            }
            "UserStyle" => {
                if let (Some(style), Some(layer)) = (self.style.take(), self.layer.as_mut()) {
                    layer.styles.push(style);
                }
            }
            "NamedLayer" | "UserLayer" => {
                if let (Some(layer), Some(document)) = (self.layer.take(), self.document.as_mut()) {
                    document.layers.push(layer);
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, element: &str, parent: &str, value: String) {
        match (parent, element) {
            ("Rule", "Name") => set(self.rule.as_mut().map(|r| &mut r.name), value),
            ("Rule", "Title") => set(self.rule.as_mut().map(|r| &mut r.title), value),
            ("UserStyle", "Name") => set(self.style.as_mut().map(|s| &mut s.name), value),
            ("UserStyle", "Title") => set(self.style.as_mut().map(|s| &mut s.title), value),
            ("UserStyle", "IsDefault") => {
                if let Some(style) = self.style.as_mut() {
                    style.is_default = matches!(value.as_str(), "1" | "true");
                }
            }
            ("NamedLayer", "Name") | ("UserLayer", "Name") => {
                set(self.layer.as_mut().map(|l| &mut l.name), value)
            }
            (ROOT_ELEMENT, "Name") => set(self.document.as_mut().map(|d| &mut d.name), value),
            _ => {}
        }
    }
}

fn set(slot: Option<&mut Option<String>>, value: String) {
    if let Some(slot) = slot {
        *slot = Some(value);
    }
}

/// Parse an SLD document; `name` identifies the document in errors
pub fn parse(name: &str, xml: &str) -> Result<StyledLayerDescriptor> {
    let invalid = |reason: String| GeocatError::InvalidStyle { name: name.to_string(), reason };

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut state = ParseState::default();
    let mut stack: Vec<String> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let element = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if stack.is_empty() {
                    if element != ROOT_ELEMENT {
                        return Err(invalid(format!("unexpected root element {}", element)));
                    }
                    state.document = Some(StyledLayerDescriptor::default());
                }
                state.open(&element);
                stack.push(element);
            }
            Ok(Event::Empty(e)) => {
                let element = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if stack.is_empty() {
                    return Err(invalid(format!("unexpected root element {}", element)));
                }
                state.open(&element);
                state.close(&element);
            }
            Ok(Event::End(e)) => {
                let element = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                state.close(&element);
                stack.pop();
            }
            Ok(Event::Text(t)) => {
                if let [.., parent, element] = stack.as_slice() {
                    let value = t.unescape().map_err(|e| invalid(e.to_string()))?;
                    state.text(element, parent, value.into_owned());
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(invalid(e.to_string())),
            _ => {}
        }
    }

    state.document.ok_or_else(|| invalid("empty document".to_string()))
}
