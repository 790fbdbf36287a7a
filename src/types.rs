// src/types.rs
use smallvec::SmallVec;
use std::fmt;

/// Primitive element type of a datatable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// Opaque bytes, interpretation given by the hint or the type name.
    Custom,
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    F32,
    F64,
    /// Any other value of the primitive bits.
    Unknown(u8),
}

impl Primitive {
    pub const MASK: u16 = 0x008F;

    pub fn from_bits(bits: u16) -> Self {
        match bits & Self::MASK {
            0 => Primitive::Custom,
            2 => Primitive::U8,
            3 => Primitive::I8,
            4 => Primitive::U16,
            5 => Primitive::I16,
            6 => Primitive::U32,
            7 => Primitive::I32,
            8 => Primitive::U64,
            9 => Primitive::I64,
            10 => Primitive::F32,
            11 => Primitive::F64,
            other => Primitive::Unknown(other as u8),
        }
    }

    pub fn bits(&self) -> u16 {
        match self {
            Primitive::Custom => 0,
            Primitive::U8 => 2,
            Primitive::I8 => 3,
            Primitive::U16 => 4,
            Primitive::I16 => 5,
            Primitive::U32 => 6,
            Primitive::I32 => 7,
            Primitive::U64 => 8,
            Primitive::I64 => 9,
            Primitive::F32 => 10,
            Primitive::F64 => 11,
            Primitive::Unknown(value) => *value as u16 & Self::MASK,
        }
    }

    /// Element width in bytes, or None for custom and unknown primitives
    pub fn size(&self) -> Option<usize> {
        match self {
            Primitive::U8 | Primitive::I8 => Some(1),
            Primitive::U16 | Primitive::I16 => Some(2),
            Primitive::U32 | Primitive::I32 | Primitive::F32 => Some(4),
            Primitive::U64 | Primitive::I64 | Primitive::F64 => Some(8),
            Primitive::Custom | Primitive::Unknown(_) => None,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self,
            Primitive::U8 | Primitive::I8 | Primitive::U16 | Primitive::I16 |
            Primitive::U32 | Primitive::I32 | Primitive::U64 | Primitive::I64
        )
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Primitive::F32 | Primitive::F64)
    }

    /// Short name, `None` for unknown primitives
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Primitive::Custom => Some("?"),
            Primitive::U8 => Some("u8"),
            Primitive::I8 => Some("i8"),
            Primitive::U16 => Some("u16"),
            Primitive::I16 => Some("i16"),
            Primitive::U32 => Some("u32"),
            Primitive::I32 => Some("i32"),
            Primitive::U64 => Some("u64"),
            Primitive::I64 => Some("i64"),
            Primitive::F32 => Some("f32"),
            Primitive::F64 => Some("f64"),
            Primitive::Unknown(_) => None,
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{:#x}", self.bits()),
        }
    }
}

/// Declared dimensionality of a datatable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    Scalar,
    D1,
    D2,
    D3,
}

impl Dimension {
    pub const MASK: u16 = 0x0030;

    pub fn from_bits(bits: u16) -> Self {
        match (bits & Self::MASK) >> 4 {
            0 => Dimension::Scalar,
            1 => Dimension::D1,
            2 => Dimension::D2,
            _ => Dimension::D3,
        }
    }

    pub fn bits(&self) -> u16 {
        (self.rank() as u16) << 4
    }

    /// Number of declared dimensions
    pub fn rank(&self) -> usize {
        match self {
            Dimension::Scalar => 0,
            Dimension::D1 => 1,
            Dimension::D2 => 2,
            Dimension::D3 => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Scalar => "scalar",
            Dimension::D1 => "1d",
            Dimension::D2 => "2d",
            Dimension::D3 => "3d",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Semantic interpretation of a datatable's contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeHint {
    None,
    Text,
    Json,
    /// File offsets of child datasets.
    Dataset,
    Index,
    Range,
    Coord,
    Line,
    Transform,
    /// Colour channels; has no display name and renders as `9`.
    Rgb,
    /// Any other value of the hint bits, already shifted down.
    Unknown(u8),
}

impl TypeHint {
    pub const MASK: u16 = 0x3F00;

    pub fn from_bits(bits: u16) -> Self {
        match (bits & Self::MASK) >> 8 {
            0 => TypeHint::None,
            1 => TypeHint::Text,
            2 => TypeHint::Json,
            3 => TypeHint::Dataset,
            4 => TypeHint::Index,
            5 => TypeHint::Range,
            6 => TypeHint::Coord,
            7 => TypeHint::Line,
            8 => TypeHint::Transform,
            9 => TypeHint::Rgb,
            other => TypeHint::Unknown(other as u8),
        }
    }

    pub fn bits(&self) -> u16 {
        let value = match self {
            TypeHint::None => 0,
            TypeHint::Text => 1,
            TypeHint::Json => 2,
            TypeHint::Dataset => 3,
            TypeHint::Index => 4,
            TypeHint::Range => 5,
            TypeHint::Coord => 6,
            TypeHint::Line => 7,
            TypeHint::Transform => 8,
            TypeHint::Rgb => 9,
            TypeHint::Unknown(value) => *value as u16,
        };
        (value << 8) & Self::MASK
    }

    pub fn name(&self) -> Option<&'static str> {
        match self {
            TypeHint::None => Some("none"),
            TypeHint::Text => Some("text"),
            TypeHint::Json => Some("json"),
            TypeHint::Dataset => Some("dataset"),
            TypeHint::Index => Some("index"),
            TypeHint::Range => Some("range"),
            TypeHint::Coord => Some("coord"),
            TypeHint::Line => Some("line"),
            TypeHint::Transform => Some("transform"),
            TypeHint::Rgb | TypeHint::Unknown(_) => None,
        }
    }
}

impl fmt::Display for TypeHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", self.bits() >> 8),
        }
    }
}

/// Decoded 16-bit datatable type descriptor.
///
/// The three fields occupy disjoint bit ranges of the packed value:
/// primitive `0x008F`, dimension `0x0030` and hint `0x3F00`. Bits outside
/// these masks are not represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeTag {
    pub primitive: Primitive,
    pub dimension: Dimension,
    pub hint: TypeHint,
}

impl TypeTag {
    pub const fn new(primitive: Primitive, dimension: Dimension, hint: TypeHint) -> Self {
        TypeTag { primitive, dimension, hint }
    }

    /// Decode a packed type descriptor. Never fails.
    pub fn decode(type_info: u16) -> Self {
        TypeTag {
            primitive: Primitive::from_bits(type_info),
            dimension: Dimension::from_bits(type_info),
            hint: TypeHint::from_bits(type_info),
        }
    }

    /// Pack the fields back into the on-disk representation
    pub fn encode(&self) -> u16 {
        self.primitive.bits() | self.dimension.bits() | self.hint.bits()
    }
}

impl From<u16> for TypeTag {
    fn from(type_info: u16) -> Self {
        TypeTag::decode(type_info)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hint == TypeHint::None {
            write!(f, "{}:{}", self.primitive, self.dimension)
        } else {
            write!(f, "{}:{}:{}", self.primitive, self.dimension, self.hint)
        }
    }
}

/// Extents of a datatable, outermost first. At most three dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Shape(SmallVec<[u32; 3]>);

impl Shape {
    pub const MAX_RANK: usize = 3;

    pub fn scalar() -> Self {
        Shape(SmallVec::new())
    }

    /// Reconstruct the shape from the two packed shape words.
    ///
    /// `shape1` carries the second extent in its low 24 bits and the third
    /// in its high 8 bits. Trailing zero extents are dropped unless the
    /// declared dimension requires them.
    pub fn decode(dimension: Dimension, shape0: u32, shape1: u32) -> Self {
        let x = shape0;
        let y = shape1 & 0x00FF_FFFF;
        let z = (shape1 >> 24) & 0xFF;

        let mut dims = SmallVec::new();
        if z == 0 && dimension < Dimension::D3 {
            if y == 0 && dimension < Dimension::D2 {
                if x == 0 && dimension < Dimension::D1 {
                    return Shape(dims);
                }
                dims.push(x);
            } else {
                dims.extend_from_slice(&[x, y]);
            }
        } else {
            dims.extend_from_slice(&[x, y, z]);
        }
        Shape(dims)
    }

    pub fn dims(&self) -> &[u32] {
        &self.0
    }

    pub fn rank(&self) -> usize {
        self.0.len()
    }

    pub fn is_scalar(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<u32> {
        self.0.get(index).copied()
    }

    /// Product of all extents, 1 for a scalar
    pub fn element_count(&self) -> u64 {
        self.0.iter().map(|&d| d as u64).product()
    }
}

impl From<&[u32]> for Shape {
    fn from(dims: &[u32]) -> Self {
        Shape(SmallVec::from_slice(dims))
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("scalar");
        }
        for (i, dim) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("x")?;
            }
            write!(f, "{}", dim)?;
        }
        Ok(())
    }
}
