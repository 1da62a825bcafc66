//! Page sizes, orientations, units and margins.
use crate::error::StyleError;
use crate::parsers;
use serde::{Deserialize, Deserializer, Serialize, de};

/// A measurement unit accepted in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Pt,
    #[default]
    Mm,
    Cm,
    In,
}

impl Unit {
    pub fn points_per_unit(self) -> f32 {
        match self {
            Unit::Pt => 1.0,
            Unit::Mm => 2.835,
            Unit::Cm => 28.35,
            Unit::In => 72.0,
        }
    }

    pub fn to_points(self, value: f32) -> f32 {
        value * self.points_per_unit()
    }

    pub fn parse(s: &str) -> Result<Self, StyleError> {
        match parsers::parse_unit(s.trim()) {
            Ok(("", unit)) => Ok(unit),
            _ => Err(StyleError::UnknownUnit(s.to_string())),
        }
    }
}

/// A number with an optional unit; a missing unit means "the document unit".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct Length {
    pub value: f32,
    pub unit: Option<Unit>,
}

impl Length {
    pub fn new(value: f32, unit: Unit) -> Self {
        Self {
            value,
            unit: Some(unit),
        }
    }

    pub fn bare(value: f32) -> Self {
        Self { value, unit: None }
    }

    pub fn to_points(&self, document_unit: Unit) -> f32 {
        self.unit.unwrap_or(document_unit).to_points(self.value)
    }
}

impl<'de> Deserialize<'de> for Length {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum LengthDef {
            Num(f32),
            Str(String),
        }

        match LengthDef::deserialize(deserializer)? {
            LengthDef::Num(n) => Ok(Length::bare(n)),
            LengthDef::Str(s) => parsers::parse_length_str(&s).map_err(de::Error::custom),
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct Margins {
    pub top: Length,
    pub right: Length,
    pub bottom: Length,
    pub left: Length,
}

impl Margins {
    pub fn all(value: Length) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Resolves every side to points as `(top, right, bottom, left)`.
    pub fn to_points(&self, document_unit: Unit) -> (f32, f32, f32, f32) {
        (
            self.top.to_points(document_unit),
            self.right.to_points(document_unit),
            self.bottom.to_points(document_unit),
            self.left.to_points(document_unit),
        )
    }
}

impl<'de> Deserialize<'de> for Margins {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MarginsVisitor;
        impl<'de> de::Visitor<'de> for MarginsVisitor {
            type Value = Margins;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a number, a string like '10mm' or '10 20 20 10', or a map")
            }

            fn visit_f64<E>(self, value: f64) -> Result<Margins, E>
            where
                E: de::Error,
            {
                Ok(Margins::all(Length::bare(value as f32)))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Margins, E>
            where
                E: de::Error,
            {
                Ok(Margins::all(Length::bare(value as f32)))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Margins, E>
            where
                E: de::Error,
            {
                Ok(Margins::all(Length::bare(value as f32)))
            }

            fn visit_str<E>(self, value: &str) -> Result<Margins, E>
            where
                E: de::Error,
            {
                parsers::parse_shorthand_margins(value).map_err(E::custom)
            }

            fn visit_map<A>(self, mut map: A) -> Result<Margins, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut margins = Margins::default();
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "top" => margins.top = map.next_value()?,
                        "right" => margins.right = map.next_value()?,
                        "bottom" => margins.bottom = map.next_value()?,
                        "left" => margins.left = map.next_value()?,
                        _ => {
                            map.next_value::<de::IgnoredAny>()?;
                        }
                    }
                }
                Ok(margins)
            }
        }
        deserializer.deserialize_any(MarginsVisitor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// Orients a `(width, height)` pair.
    pub fn apply(self, (width, height): (f32, f32)) -> (f32, f32) {
        match self {
            Orientation::Portrait => (width.min(height), width.max(height)),
            Orientation::Landscape => (width.max(height), width.min(height)),
        }
    }
}

impl<'de> Deserialize<'de> for Orientation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.to_lowercase().as_str() {
            "p" | "portrait" => Ok(Orientation::Portrait),
            "l" | "landscape" => Ok(Orientation::Landscape),
            _ => Err(de::Error::custom(format!("Invalid orientation: '{}'", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub enum PageSize {
    A3,
    #[default]
    A4,
    A5,
    Letter,
    Legal,
    /// Dimensions in the document unit.
    Custom { width: f32, height: f32 },
}

impl PageSize {
    /// Page dimensions in points, before orientation is applied.
    pub fn dimensions_pt(&self, document_unit: Unit) -> (f32, f32) {
        match self {
            PageSize::A3 => (841.89, 1190.55),
            PageSize::A4 => (595.28, 841.89),
            PageSize::A5 => (419.53, 595.28),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Custom { width, height } => {
                (document_unit.to_points(*width), document_unit.to_points(*height))
            }
        }
    }

    pub fn parse(s: &str) -> Result<Self, StyleError> {
        match s.to_lowercase().as_str() {
            "a3" => Ok(PageSize::A3),
            "a4" => Ok(PageSize::A4),
            "a5" => Ok(PageSize::A5),
            "letter" => Ok(PageSize::Letter),
            "legal" => Ok(PageSize::Legal),
            _ => Err(StyleError::UnknownPageSize(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for PageSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum PageSizeDef {
            Str(String),
            Map { width: f32, height: f32 },
        }

        match PageSizeDef::deserialize(deserializer)? {
            PageSizeDef::Str(s) => Self::parse(&s).map_err(de::Error::custom),
            PageSizeDef::Map { width, height } => Ok(PageSize::Custom { width, height }),
        }
    }
}
