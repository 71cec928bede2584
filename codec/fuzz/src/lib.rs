//! Types shared by the fuzz targets.

use arbitrary::Arbitrary;
use canon_codec::{enumeration, record, tagged_union};

record! {
    #[derive(Arbitrary, Debug, Clone, PartialEq)]
    pub struct Person {
        pub name: Vec<u8>,
        pub age: u128,
        pub prob: f64,
        pub data: Vec<i32>,
    }
}

record! {
    #[derive(Arbitrary, Debug, Clone, PartialEq)]
    pub struct Node {
        pub value: u16,
        pub next: Option<Box<Node>>,
    }
}

enumeration! {
    #[derive(Arbitrary, Debug, Clone, Copy, PartialEq)]
    pub enum Suit {
        Clubs,
        Diamonds,
        Hearts,
        Spades,
    }
}

tagged_union! {
    #[derive(Arbitrary, Debug, Clone, PartialEq)]
    pub enum Message {
        Empty(()),
        Small(u8),
        Wide(i128),
        Text(Vec<u8>),
        Flags([bool; 4]),
        Card(Suit),
        Named(Person),
        Reply(Option<Box<Message>>),
    }
}
