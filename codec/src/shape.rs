//! Descriptions of the data shapes the codec understands.
//!
//! Every codec type reports its [Shape] through [crate::Schema]. The set of shapes is closed: the
//! encoder and decoder only ever recurse through the variants below. Children are referenced
//! through [Describe] function pointers rather than stored inline, so a type that contains itself
//! (through an owned reference) still has a finite description.

use std::fmt;

/// Lazily produces the shape of a child.
pub type Describe = fn() -> Shape;

/// Shape descriptors nested deeper than this are not inspected by [Shape::min_size].
const MAX_INSPECT_DEPTH: usize = 32;

/// A named field of a record.
#[derive(Clone, Copy, Debug)]
pub struct Field {
    pub name: &'static str,
    pub shape: Describe,
}

/// A named variant of a tagged union.
#[derive(Clone, Copy, Debug)]
pub struct Variant {
    pub name: &'static str,
    pub payload: Describe,
}

/// The structure of an encodable type.
#[derive(Clone, Copy, Debug)]
pub enum Shape {
    /// Two's complement integer, `bits / 8` bytes little-endian.
    Integer { bits: u16, signed: bool },
    /// IEEE 754 float, `bits / 8` bytes little-endian.
    Float { bits: u16 },
    /// Zero-sized marker.
    Unit,
    /// One byte, 0 or 1.
    Bool,
    /// `len` elements with no length prefix.
    Array { len: usize, element: Describe },
    /// `u32` length prefix followed by the elements.
    Sequence { element: Describe, terminated: bool },
    /// A heap-owned value, encoded inline.
    Boxed(Describe),
    /// Named fields encoded in declaration order.
    Record {
        name: &'static str,
        fields: &'static [Field],
    },
    /// One byte holding the declaration-order index of a nullary variant.
    Enumeration {
        name: &'static str,
        variants: &'static [&'static str],
    },
    /// One byte holding the declaration-order index, followed by the variant's payload.
    Union {
        name: &'static str,
        variants: &'static [Variant],
    },
    /// Presence byte followed by the inner value when present.
    Optional(Describe),
}

impl Shape {
    /// Returns a lower bound on the number of bytes any value of this shape encodes to.
    ///
    /// Used to bound how much capacity a sequence length read from untrusted input may claim.
    pub fn min_size(&self) -> usize {
        self.min_size_within(MAX_INSPECT_DEPTH)
    }

    fn min_size_within(&self, budget: usize) -> usize {
        // Stopping early only loosens the bound.
        let Some(budget) = budget.checked_sub(1) else {
            return 0;
        };
        match self {
            Shape::Integer { bits, .. } | Shape::Float { bits } => usize::from(*bits / 8),
            Shape::Unit => 0,
            Shape::Bool | Shape::Enumeration { .. } | Shape::Optional(_) => 1,
            Shape::Sequence { .. } => 4,
            Shape::Array { len, element } => {
                len.saturating_mul(element().min_size_within(budget))
            }
            Shape::Boxed(target) => target().min_size_within(budget),
            Shape::Record { fields, .. } => fields.iter().fold(0usize, |total, field| {
                total.saturating_add((field.shape)().min_size_within(budget))
            }),
            Shape::Union { variants, .. } => variants
                .iter()
                .map(|variant| (variant.payload)().min_size_within(budget))
                .min()
                .map_or(1, |payload| payload.saturating_add(1)),
        }
    }

    /// Returns the number of declared variants, if this is an enumeration or a tagged union.
    pub fn variant_count(&self) -> Option<usize> {
        match self {
            Shape::Enumeration { variants, .. } => Some(variants.len()),
            Shape::Union { variants, .. } => Some(variants.len()),
            _ => None,
        }
    }
}

/// Renders the shape the way the type is written in Rust.
///
/// Named shapes print their name. The alternate form (`{:#}`) also lists a named shape's fields
/// or variants, one level deep.
impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Integer { bits, signed: true } => write!(f, "i{bits}"),
            Shape::Integer {
                bits,
                signed: false,
            } => write!(f, "u{bits}"),
            Shape::Float { bits } => write!(f, "f{bits}"),
            Shape::Unit => f.write_str("()"),
            Shape::Bool => f.write_str("bool"),
            Shape::Array { len, element } => write!(f, "[{}; {len}]", element()),
            Shape::Sequence {
                element,
                terminated: false,
            } => write!(f, "Vec<{}>", element()),
            Shape::Sequence {
                element,
                terminated: true,
            } => write!(f, "Terminated<{}>", element()),
            Shape::Boxed(target) => write!(f, "Box<{}>", target()),
            Shape::Optional(inner) => write!(f, "Option<{}>", inner()),
            Shape::Record { name, fields } => {
                f.write_str(name)?;
                if f.alternate() {
                    f.write_str(" { ")?;
                    for (i, field) in fields.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{}: {}", field.name, (field.shape)())?;
                    }
                    f.write_str(" }")?;
                }
                Ok(())
            }
            Shape::Enumeration { name, variants } => {
                f.write_str(name)?;
                if f.alternate() {
                    write!(f, " {{ {} }}", variants.join(", "))?;
                }
                Ok(())
            }
            Shape::Union { name, variants } => {
                f.write_str(name)?;
                if f.alternate() {
                    f.write_str(" { ")?;
                    for (i, variant) in variants.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{}({})", variant.name, (variant.payload)())?;
                    }
                    f.write_str(" }")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn byte() -> Shape {
        Shape::Integer {
            bits: 8,
            signed: false,
        }
    }

    fn bytes() -> Shape {
        Shape::Sequence {
            element: byte,
            terminated: false,
        }
    }

    fn wide() -> Shape {
        Shape::Float { bits: 64 }
    }

    // A shape that contains itself through an owned reference.
    fn chain() -> Shape {
        const FIELDS: &[Field] = &[
            Field {
                name: "value",
                shape: byte,
            },
            Field {
                name: "next",
                shape: next,
            },
        ];
        Shape::Record {
            name: "Chain",
            fields: FIELDS,
        }
    }

    fn next() -> Shape {
        Shape::Optional(boxed_chain)
    }

    fn boxed_chain() -> Shape {
        Shape::Boxed(chain)
    }

    // A shape whose only way out is a payload of itself.
    fn endless() -> Shape {
        const VARIANTS: &[Variant] = &[Variant {
            name: "Again",
            payload: boxed_endless,
        }];
        Shape::Union {
            name: "Endless",
            variants: VARIANTS,
        }
    }

    fn boxed_endless() -> Shape {
        Shape::Boxed(endless)
    }

    #[test]
    fn test_min_size() {
        assert_eq!(byte().min_size(), 1);
        assert_eq!(wide().min_size(), 8);
        assert_eq!(Shape::Unit.min_size(), 0);
        assert_eq!(bytes().min_size(), 4);
        assert_eq!(
            Shape::Array {
                len: 3,
                element: wide
            }
            .min_size(),
            24
        );
        assert_eq!(Shape::Optional(wide).min_size(), 1);
        assert_eq!(chain().min_size(), 2);
    }

    #[test]
    fn test_min_size_terminates_on_recursive_shapes() {
        // Every level adds one tag byte until inspection stops.
        assert_eq!(endless().min_size(), MAX_INSPECT_DEPTH / 2);
    }

    #[test]
    fn test_variant_count() {
        assert_eq!(endless().variant_count(), Some(1));
        assert_eq!(chain().variant_count(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(bytes().to_string(), "Vec<u8>");
        assert_eq!(
            Shape::Array {
                len: 4,
                element: wide
            }
            .to_string(),
            "[f64; 4]"
        );
        assert_eq!(chain().to_string(), "Chain");
        assert_eq!(
            format!("{:#}", chain()),
            "Chain { value: u8, next: Option<Box<Chain>> }"
        );
        assert_eq!(format!("{:#}", endless()), "Endless { Again(Box<Endless>) }");
    }
}
