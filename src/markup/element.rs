//! Typed markup elements.

/// Stacking layer of an element inside a page container.
///
/// Elements are emitted in layer order, and each carries the matching
/// z-index so stacking does not depend on document order alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    Drawing,
    Image,
    Text,
}

impl Layer {
    pub fn z_index(self) -> u8 {
        match self {
            Layer::Drawing => 0,
            Layer::Image => 1,
            Layer::Text => 2,
        }
    }
}

/// One node of the output tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Svg(SvgCanvas),
    Path(SvgPath),
    Image(ImageElement),
    Text(TextElement),
}

impl Element {
    /// Layer of a page child. Paths live inside the canvas and have none.
    pub fn layer(&self) -> Option<Layer> {
        match self {
            Element::Svg(_) => Some(Layer::Drawing),
            Element::Image(_) => Some(Layer::Image),
            Element::Text(_) => Some(Layer::Text),
            Element::Path(_) => None,
        }
    }
}

/// A `.page` container sized to the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageContainer {
    /// 1-based page number, used for the element id.
    pub number: u32,
    pub width: f32,
    pub height: f32,
    pub children: Vec<Element>,
}

impl PageContainer {
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            children: Vec::new(),
        }
    }

    pub fn push(&mut self, element: impl Into<Element>) {
        self.children.push(element.into());
    }

    /// Stable sort of children by layer: drawings, then images, then text.
    pub fn sort_layers(&mut self) {
        self.children.sort_by_key(|e| e.layer());
    }
}

/// An SVG canvas covering the whole page.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgCanvas {
    pub width: f32,
    pub height: f32,
    pub children: Vec<Element>,
}

impl SvgCanvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            children: Vec::new(),
        }
    }

    pub fn push(&mut self, path: SvgPath) {
        self.children.push(Element::Path(path));
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// A `<path>` with resolved paint.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgPath {
    /// Path data, e.g. `M 10.00 10.00 L 20.00 20.00`.
    pub data: String,
    /// CSS colour or `none`.
    pub stroke: String,
    /// CSS colour or `none`.
    pub fill: String,
    pub stroke_width: f32,
}

/// An absolutely positioned raster image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageElement {
    /// File name relative to the HTML file.
    pub src: String,
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// An absolutely positioned text span.
#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    pub text: String,
    pub left: f32,
    pub top: f32,
    /// CSS `font-family` value, fallback included.
    pub font_family: String,
    pub font_size: f32,
    /// `#rrggbb`
    pub color: String,
}

macro_rules! impl_into_element {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Element {
                fn from(value: $ty) -> Self {
                    Element::$variant(value)
                }
            }
        )*
    };
}

impl_into_element! {
    SvgCanvas => Svg,
    SvgPath => Path,
    ImageElement => Image,
    TextElement => Text,
}
