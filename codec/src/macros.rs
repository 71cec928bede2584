//! Declarative macros that declare records, enumerations and tagged unions together with their
//! codec implementations.
//!
//! Each macro takes an ordinary Rust item, emits it unchanged, and implements [crate::Schema],
//! [crate::EncodeSize], [crate::Write] and [crate::Read] for it. Wire order is declaration order.

/// Declares a struct with named fields, encoded as its fields concatenated in declaration order.
///
/// Tuple structs are not accepted: every field needs a name.
///
/// # Examples
///
/// ```
/// use canon_codec::{record, Decode, Encode};
///
/// record! {
///     #[derive(Debug, Clone, PartialEq)]
///     pub struct Point {
///         pub x: i32,
///         pub y: i32,
///     }
/// }
///
/// let point = Point { x: 1, y: -1 };
/// let encoded = point.encode().unwrap();
/// assert_eq!(encoded, [1, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF]);
/// assert_eq!(Point::decode(&encoded).unwrap(), point);
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$field_meta:meta])* $field_vis:vis $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $( $(#[$field_meta])* $field_vis $field: $ty, )*
        }

        impl $crate::Schema for $name {
            fn shape() -> $crate::Shape {
                const FIELDS: &[$crate::Field] = &[
                    $(
                        $crate::Field {
                            name: ::core::stringify!($field),
                            shape: <$ty as $crate::Schema>::shape,
                        },
                    )*
                ];
                $crate::Shape::Record {
                    name: ::core::stringify!($name),
                    fields: FIELDS,
                }
            }
        }

        impl $crate::EncodeSize for $name {
            #[allow(unused_variables)]
            fn encode_size(
                &self,
                enc: &mut $crate::Encoder,
            ) -> ::core::result::Result<usize, $crate::EncodeError> {
                let total = 0usize;
                $(
                    let size = enc.descend(|enc| $crate::EncodeSize::encode_size(&self.$field, enc))?;
                    let total = total
                        .checked_add(size)
                        .ok_or($crate::EncodeError::SizeOverflow)?;
                )*
                ::core::result::Result::Ok(total)
            }
        }

        impl $crate::Write for $name {
            #[allow(unused_variables)]
            fn write(
                &self,
                buf: &mut impl $crate::__private::BufMut,
                enc: &mut $crate::Encoder,
            ) -> ::core::result::Result<(), $crate::EncodeError> {
                $( enc.descend(|enc| $crate::Write::write(&self.$field, buf, enc))?; )*
                ::core::result::Result::Ok(())
            }
        }

        impl $crate::Read for $name {
            #[allow(unused_variables)]
            fn read(
                buf: &mut impl $crate::__private::Buf,
                dec: &mut $crate::Decoder<'_>,
            ) -> ::core::result::Result<Self, $crate::DecodeError> {
                ::core::result::Result::Ok(Self {
                    $( $field: dec.descend(|dec| <$ty as $crate::Read>::read(buf, dec))?, )*
                })
            }

            fn heap_size(&self) -> usize {
                0 $( + $crate::Read::heap_size(&self.$field) )*
            }
        }
    };
}

/// Declares a fieldless enum, encoded as one byte holding the declaration-order index of the
/// variant.
///
/// At most 255 variants are accepted; more fail to compile.
///
/// # Examples
///
/// ```
/// use canon_codec::{enumeration, Decode, DecodeError, Encode};
///
/// enumeration! {
///     #[derive(Debug, Clone, Copy, PartialEq)]
///     pub enum Color {
///         Red,
///         Green,
///         Blue,
///     }
/// }
///
/// assert_eq!(Color::Blue.encode().unwrap(), [2]);
/// assert_eq!(Color::decode(&[1]).unwrap(), Color::Green);
/// assert_eq!(Color::decode(&[3]), Err(DecodeError::InvalidEnumTag(3)));
/// ```
#[macro_export]
macro_rules! enumeration {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$variant_meta:meta])* $variant:ident ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $( $(#[$variant_meta])* $variant, )+
        }

        const _: () = {
            const VARIANTS: &[&str] = &[ $( ::core::stringify!($variant), )+ ];
            ::core::assert!(VARIANTS.len() <= 255, "an enumeration has at most 255 variants");

            impl $crate::Schema for $name {
                fn shape() -> $crate::Shape {
                    $crate::Shape::Enumeration {
                        name: ::core::stringify!($name),
                        variants: VARIANTS,
                    }
                }
            }

            impl $crate::EncodeSize for $name {
                #[inline]
                fn encode_size(
                    &self,
                    _: &mut $crate::Encoder,
                ) -> ::core::result::Result<usize, $crate::EncodeError> {
                    ::core::result::Result::Ok(1)
                }
            }

            impl $crate::Write for $name {
                fn write(
                    &self,
                    buf: &mut impl $crate::__private::BufMut,
                    _: &mut $crate::Encoder,
                ) -> ::core::result::Result<(), $crate::EncodeError> {
                    let tag = match self {
                        $( Self::$variant => Self::$variant as u8, )+
                    };
                    $crate::__private::write_byte(buf, tag)
                }
            }

            impl $crate::Read for $name {
                fn read(
                    buf: &mut impl $crate::__private::Buf,
                    _: &mut $crate::Decoder<'_>,
                ) -> ::core::result::Result<Self, $crate::DecodeError> {
                    let tag = $crate::__private::read_byte(buf)?;
                    $(
                        if tag == Self::$variant as u8 {
                            return ::core::result::Result::Ok(Self::$variant);
                        }
                    )+
                    ::core::result::Result::Err($crate::DecodeError::InvalidEnumTag(tag))
                }
            }
        };
    };
}

/// Declares an enum whose variants each carry one payload, encoded as one byte holding the
/// declaration-order index of the active variant followed by its payload.
///
/// Variants without data carry `()`. At most 255 variants are accepted; more fail to compile.
///
/// # Examples
///
/// ```
/// use canon_codec::{tagged_union, Decode, DecodeError, Encode};
///
/// tagged_union! {
///     #[derive(Debug, Clone, PartialEq)]
///     pub enum Message {
///         Ping(u16),
///         Text(Vec<u8>),
///         Quit(()),
///     }
/// }
///
/// let message = Message::Ping(7);
/// assert_eq!(message.encode().unwrap(), [0, 7, 0]);
/// assert_eq!(Message::decode(&[2]).unwrap(), Message::Quit(()));
/// assert_eq!(Message::decode(&[3]), Err(DecodeError::InvalidTaggedUnionTag(3)));
/// ```
#[macro_export]
macro_rules! tagged_union {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$variant_meta:meta])* $variant:ident ( $payload:ty ) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $( $(#[$variant_meta])* $variant($payload), )+
        }

        const _: () = {
            #[allow(non_camel_case_types, dead_code)]
            enum __Tag {
                $( $variant, )+
            }

            const VARIANTS: &[$crate::Variant] = &[
                $(
                    $crate::Variant {
                        name: ::core::stringify!($variant),
                        payload: <$payload as $crate::Schema>::shape,
                    },
                )+
            ];
            ::core::assert!(VARIANTS.len() <= 255, "a tagged union has at most 255 variants");

            impl $crate::Schema for $name {
                fn shape() -> $crate::Shape {
                    $crate::Shape::Union {
                        name: ::core::stringify!($name),
                        variants: VARIANTS,
                    }
                }
            }

            impl $crate::EncodeSize for $name {
                fn encode_size(
                    &self,
                    enc: &mut $crate::Encoder,
                ) -> ::core::result::Result<usize, $crate::EncodeError> {
                    let payload = match self {
                        $(
                            Self::$variant(payload) => {
                                enc.descend(|enc| $crate::EncodeSize::encode_size(payload, enc))?
                            }
                        )+
                    };
                    payload.checked_add(1).ok_or($crate::EncodeError::SizeOverflow)
                }
            }

            impl $crate::Write for $name {
                fn write(
                    &self,
                    buf: &mut impl $crate::__private::BufMut,
                    enc: &mut $crate::Encoder,
                ) -> ::core::result::Result<(), $crate::EncodeError> {
                    match self {
                        $(
                            Self::$variant(payload) => {
                                $crate::__private::write_byte(buf, __Tag::$variant as u8)?;
                                enc.descend(|enc| $crate::Write::write(payload, buf, enc))
                            }
                        )+
                    }
                }
            }

            impl $crate::Read for $name {
                fn read(
                    buf: &mut impl $crate::__private::Buf,
                    dec: &mut $crate::Decoder<'_>,
                ) -> ::core::result::Result<Self, $crate::DecodeError> {
                    let tag = $crate::__private::read_byte(buf)?;
                    $(
                        if tag == __Tag::$variant as u8 {
                            let payload =
                                dec.descend(|dec| <$payload as $crate::Read>::read(buf, dec))?;
                            return ::core::result::Result::Ok(Self::$variant(payload));
                        }
                    )+
                    ::core::result::Result::Err($crate::DecodeError::InvalidTaggedUnionTag(tag))
                }

                fn heap_size(&self) -> usize {
                    match self {
                        $( Self::$variant(payload) => $crate::Read::heap_size(payload), )+
                    }
                }
            }
        };
    };
}
