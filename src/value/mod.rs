//! The input data model for tree building.
//!
//! A [`Value`] is a tagged union over the three shapes the builder knows how
//! to handle: scalars (written as text), sequences (flattened into a
//! container element), and composites (recursed into member by member).
//! Absence is always expressed as `Option` at the point of use — a missing
//! member or element is `None`/[`MemberValue::Absent`], never an in-band
//! "null" variant.
//!
//! Classification is purely structural: a value is a leaf if and only if it
//! is a [`Scalar`]. A string is [`Scalar::Text`] and therefore can never be
//! iterated into per-character elements, no matter how it is nested.

use bigdecimal::BigDecimal;
use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat};
use uuid::Uuid;

/// A leaf value, written into the tree as element text.
///
/// The variant set mirrors the classic "simple type" allow-list of
/// schema-less serializers: primitives, text, enumerations, date/times with
/// and without a zone offset, arbitrary-precision decimals, and unique
/// identifiers.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// A boolean, rendered as `true`/`false`.
    Bool(bool),
    /// A signed integer. Narrower widths convert losslessly via `From`.
    Int(i64),
    /// An unsigned integer.
    UInt(u64),
    /// A floating-point number.
    Float(f64),
    /// A single character.
    Char(char),
    /// A string. Always a leaf — never treated as a sequence of characters.
    Text(String),
    /// An enumeration value. Serializes as the underlying integer
    /// representation, never the symbolic variant name.
    Enum {
        /// The enumeration's type name (used when naming sequence elements).
        type_name: String,
        /// The underlying integer value.
        repr: i64,
    },
    /// A date/time without zone offset.
    DateTime(NaiveDateTime),
    /// A date/time with a fixed zone offset.
    DateTimeTz(DateTime<FixedOffset>),
    /// An arbitrary-precision decimal.
    Decimal(BigDecimal),
    /// A unique identifier.
    Uuid(Uuid),
}

impl Scalar {
    /// Returns the text payload this scalar contributes to its element.
    #[must_use]
    pub fn text_form(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
            Self::UInt(u) => u.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Char(c) => c.to_string(),
            Self::Text(s) => s.clone(),
            Self::Enum { repr, .. } => repr.to_string(),
            Self::DateTime(dt) => dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
            Self::DateTimeTz(dt) => dt.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            Self::Decimal(d) => d.to_string(),
            Self::Uuid(u) => u.to_string(),
        }
    }

    /// Returns the scalar's type name, used to name sequence elements.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "i64",
            Self::UInt(_) => "u64",
            Self::Float(_) => "f64",
            Self::Char(_) => "char",
            Self::Text(_) => "String",
            Self::Enum { type_name, .. } => type_name,
            Self::DateTime(_) => "NaiveDateTime",
            Self::DateTimeTz(_) => "DateTime",
            Self::Decimal(_) => "BigDecimal",
            Self::Uuid(_) => "Uuid",
        }
    }
}

/// A naming annotation attached to a member or to a type itself.
///
/// Hints are kept in declaration order; when several are present, the last
/// one wins (override-by-last-write, not first-match).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameHint {
    /// An explicit element name for a member.
    Element(String),
    /// An explicit root name for the value itself.
    Root(String),
}

impl NameHint {
    /// Creates an explicit element-name hint.
    pub fn element(name: impl Into<String>) -> Self {
        Self::Element(name.into())
    }

    /// Creates an explicit root-name hint.
    pub fn root(name: impl Into<String>) -> Self {
        Self::Root(name.into())
    }

    /// Returns the name this hint carries.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Element(name) | Self::Root(name) => name,
        }
    }
}

/// Resolves a node name from a hint list, falling back to `fallback` when
/// no hint is present. The last hint in declaration order wins.
#[must_use]
pub fn resolved_name<'a>(hints: &'a [NameHint], fallback: &'a str) -> &'a str {
    hints.last().map_or(fallback, NameHint::name)
}

/// The result of reading one member of a composite value.
#[derive(Debug, Clone, PartialEq)]
pub enum MemberValue {
    /// The member has a value.
    Present(Value),
    /// The member is absent (a null reference); it contributes no element.
    Absent,
    /// The member could not be read (e.g. a visibility restriction).
    /// Reaching one of these aborts the build with a
    /// [`BuildError`](crate::error::BuildError).
    Unreadable {
        /// Why the member could not be read.
        reason: String,
    },
}

/// One accessible member of a composite value: its declared name, its
/// naming hints in declaration order, and the outcome of reading it.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    /// The member's declared identifier.
    pub name: String,
    /// Naming annotations, in declaration order.
    pub hints: Vec<NameHint>,
    /// The member's value (or absence, or the failure to read it).
    pub value: MemberValue,
}

impl Member {
    /// Creates a member with a present value.
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            hints: Vec::new(),
            value: MemberValue::Present(value.into()),
        }
    }

    /// Creates a member from an optional value; `None` becomes
    /// [`MemberValue::Absent`] and the member is omitted from the tree.
    pub fn optional<T: Into<Value>>(name: impl Into<String>, value: Option<T>) -> Self {
        Self {
            name: name.into(),
            hints: Vec::new(),
            value: value.map_or(MemberValue::Absent, |v| MemberValue::Present(v.into())),
        }
    }

    /// Creates an absent member.
    pub fn absent(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hints: Vec::new(),
            value: MemberValue::Absent,
        }
    }

    /// Creates an unreadable member. Building a composite containing one
    /// fails with a `MemberUnreadable` error.
    pub fn unreadable(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hints: Vec::new(),
            value: MemberValue::Unreadable {
                reason: reason.into(),
            },
        }
    }

    /// Appends a naming hint.
    #[must_use]
    pub fn hint(mut self, hint: NameHint) -> Self {
        self.hints.push(hint);
        self
    }
}

/// A composite value: a type name plus its accessible members, split into
/// property-like and field-like groups. Properties are always enumerated
/// before fields; each group preserves declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Composite {
    /// The runtime type name (used to name sequence elements).
    pub type_name: String,
    /// Naming annotations on the type itself, in declaration order.
    pub hints: Vec<NameHint>,
    /// Property-like members, in declaration order.
    pub properties: Vec<Member>,
    /// Field-like members, in declaration order.
    pub fields: Vec<Member>,
}

impl Composite {
    /// Creates an empty composite with the given type name.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    /// Appends a naming hint on the type itself.
    #[must_use]
    pub fn hint(mut self, hint: NameHint) -> Self {
        self.hints.push(hint);
        self
    }

    /// Appends a property-like member.
    #[must_use]
    pub fn property(mut self, member: Member) -> Self {
        self.properties.push(member);
        self
    }

    /// Appends a field-like member.
    #[must_use]
    pub fn field(mut self, member: Member) -> Self {
        self.fields.push(member);
        self
    }
}

/// A sequence of values, flattened into one container element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sequence {
    /// The runtime type name of the sequence itself.
    pub type_name: String,
    /// Naming annotations on the sequence's type, in declaration order.
    pub hints: Vec<NameHint>,
    /// The elements, in iteration order. Absent elements contribute nothing.
    pub elements: Vec<Option<Value>>,
}

impl Sequence {
    /// Creates an empty sequence with the given type name.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    /// Appends a naming hint on the sequence's type.
    #[must_use]
    pub fn hint(mut self, hint: NameHint) -> Self {
        self.hints.push(hint);
        self
    }

    /// Appends a present element.
    #[must_use]
    pub fn element(mut self, value: impl Into<Value>) -> Self {
        self.elements.push(Some(value.into()));
        self
    }

    /// Appends an absent element (skipped when building).
    #[must_use]
    pub fn absent_element(mut self) -> Self {
        self.elements.push(None);
        self
    }
}

/// A value to be converted into an element tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A leaf, written as element text.
    Scalar(Scalar),
    /// A sequence, flattened into a container element.
    Sequence(Sequence),
    /// A composite, recursed into member by member.
    Composite(Composite),
}

impl Value {
    /// Returns the value's runtime type name, used to name sequence elements.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Scalar(s) => s.type_name(),
            Self::Sequence(s) => &s.type_name,
            Self::Composite(c) => &c.type_name,
        }
    }

    /// Returns `true` if this value is a leaf kind.
    ///
    /// Classification is structural (by variant), never by inspecting the
    /// contained data.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    /// Creates an enumeration scalar from a type name and its underlying
    /// integer representation.
    pub fn enumeration(type_name: impl Into<String>, repr: i64) -> Self {
        Self::Scalar(Scalar::Enum {
            type_name: type_name.into(),
            repr,
        })
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Self::Scalar(s)
    }
}

impl From<Sequence> for Value {
    fn from(s: Sequence) -> Self {
        Self::Sequence(s)
    }
}

impl From<Composite> for Value {
    fn from(c: Composite) -> Self {
        Self::Composite(c)
    }
}

macro_rules! scalar_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Self::Scalar(Scalar::Int(i64::from(v)))
            }
        })*
    };
}

macro_rules! scalar_from_uint {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Self::Scalar(Scalar::UInt(u64::from(v)))
            }
        })*
    };
}

scalar_from_int!(i8, i16, i32, i64);
scalar_from_uint!(u8, u16, u32, u64);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Scalar(Scalar::Bool(v))
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Scalar(Scalar::Float(f64::from(v)))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Scalar(Scalar::Float(v))
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Self::Scalar(Scalar::Char(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Scalar(Scalar::Text(v.to_string()))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Scalar(Scalar::Text(v))
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Self::Scalar(Scalar::DateTime(v))
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(v: DateTime<FixedOffset>) -> Self {
        Self::Scalar(Scalar::DateTimeTz(v))
    }
}

impl From<BigDecimal> for Value {
    fn from(v: BigDecimal) -> Self {
        Self::Scalar(Scalar::Decimal(v))
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Self::Scalar(Scalar::Uuid(v))
    }
}
