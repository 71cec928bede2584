//! The values each case expects, and the dispatch from case id to value.

use crate::Error;
use borsh::{BorshDeserialize, BorshSerialize};
use core::fmt::Debug;

/// [Person] with [person]'s contents.
pub const PERSON: u8 = 0;
/// `Option<u32>` holding nothing.
pub const ABSENT_OPTIONAL: u8 = 1;
/// `Vec<u32>` with no elements.
pub const EMPTY_SEQUENCE: u8 = 2;
/// [Suit::Spades].
pub const ENUMERATION: u8 = 3;
/// [events].
pub const TAGGED_UNION: u8 = 4;
/// [chain].
pub const LINKED_LIST: u8 = 5;
/// [fixed].
pub const FIXED: u8 = 6;

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct Person {
    pub name: Vec<u8>,
    pub age: u128,
    pub prob: f64,
    pub data: Vec<i32>,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub enum Event {
    Idle,
    Move(i32),
    Label(Vec<u8>),
    Resize(Size),
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct Node {
    pub value: u32,
    pub next: Option<Box<Node>>,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct Fixed {
    pub key: [u8; 8],
    pub flags: [bool; 3],
    pub enabled: bool,
    pub grid: [[i16; 2]; 2],
}

pub fn person() -> Person {
    Person {
        name: b"ccccc".to_vec(),
        age: 541212312321534534,
        prob: 0.69,
        data: vec![31, 69],
    }
}

/// One event of every kind.
pub fn events() -> Vec<Event> {
    vec![
        Event::Idle,
        Event::Move(-12),
        Event::Label(b"north".to_vec()),
        Event::Resize(Size {
            width: 640,
            height: 480,
        }),
    ]
}

/// A list holding 1, 2 and 3, in that order.
pub fn chain() -> Node {
    (1..=3).rev().fold(None, |next, value| {
        Some(Node {
            value,
            next: next.map(Box::new),
        })
    })
    .unwrap_or(Node {
        value: 0,
        next: None,
    })
}

pub fn fixed() -> Fixed {
    Fixed {
        key: *b"canon-01",
        flags: [true, false, true],
        enabled: true,
        grid: [[1, -1], [i16::MIN, i16::MAX]],
    }
}

/// Decodes `input` as a `T`, checks it against `expected` and returns `expected` re-encoded.
fn check<T>(id: u8, input: &[u8], expected: T) -> Result<Vec<u8>, Error>
where
    T: BorshSerialize + BorshDeserialize + PartialEq + Debug,
{
    let decoded = T::try_from_slice(input).map_err(Error::Decode)?;
    if decoded != expected {
        return Err(Error::Mismatch(id));
    }
    borsh::to_vec(&expected).map_err(Error::Encode)
}

/// Dispatches `input` to case `id`.
pub fn run(id: u8, input: &[u8]) -> Result<Vec<u8>, Error> {
    match id {
        PERSON => check(id, input, person()),
        ABSENT_OPTIONAL => check(id, input, None::<u32>),
        EMPTY_SEQUENCE => check(id, input, Vec::<u32>::new()),
        ENUMERATION => check(id, input, Suit::Spades),
        TAGGED_UNION => check(id, input, events()),
        LINKED_LIST => check(id, input, chain()),
        FIXED => check(id, input, fixed()),
        _ => Err(Error::UnknownCase(id)),
    }
}
