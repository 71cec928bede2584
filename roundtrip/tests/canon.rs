//! Drives every case with encodings produced by `canon-codec`, the way a foreign driver would.

use canon_codec::{
    deserialize, enumeration, record, release, tagged_union, to_vec, Decode, Encode, Read,
    Tracked,
};
use canon_roundtrip::{cases, roundtrip_free, roundtrip_test_case};
use core::ptr;

record! {
    #[derive(Debug, Clone, PartialEq)]
    struct Person {
        name: Vec<u8>,
        age: u128,
        prob: f64,
        data: Vec<i32>,
    }
}

enumeration! {
    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Suit {
        Clubs,
        Diamonds,
        Hearts,
        Spades,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq)]
    struct Size {
        width: u16,
        height: u16,
    }
}

tagged_union! {
    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Idle(()),
        Move(i32),
        Label(Vec<u8>),
        Resize(Size),
    }
}

record! {
    #[derive(Debug, Clone, PartialEq)]
    struct Node {
        value: u32,
        next: Option<Box<Node>>,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq)]
    struct Fixed {
        key: [u8; 8],
        flags: [bool; 3],
        enabled: bool,
        grid: [[i16; 2]; 2],
    }
}

fn init() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Calls the harness through its C entry point, copying out and freeing any returned buffer.
fn call(id: u8, input: &[u8]) -> Option<Vec<u8>> {
    let mut out = ptr::null();
    let mut len = 0;
    unsafe { roundtrip_test_case(id, input.as_ptr(), input.len(), &mut out, &mut len) };
    if out.is_null() {
        assert_eq!(len, 0);
        return None;
    }
    let bytes = unsafe { core::slice::from_raw_parts(out, len) }.to_vec();
    unsafe { roundtrip_free(out, len) };
    Some(bytes)
}

/// Sends `value` through case `id` and decodes the reference encoding that comes back.
fn roundtrip<T: Encode + Decode + PartialEq + core::fmt::Debug>(id: u8, value: &T) {
    let encoded = to_vec(value).unwrap();
    let returned = call(id, &encoded).expect("case rejected a matching value");
    assert_eq!(returned, encoded);

    let alloc = Tracked::new();
    let decoded: T = deserialize(&returned, &alloc, 20).unwrap();
    assert_eq!(&decoded, value);
    assert_eq!(alloc.outstanding(), decoded.heap_size());
    release(decoded, &alloc);
    assert_eq!(alloc.outstanding(), 0);
}

fn person() -> Person {
    Person {
        name: b"ccccc".to_vec(),
        age: 541212312321534534,
        prob: 0.69,
        data: vec![31, 69],
    }
}

#[test]
fn test_person() {
    init();
    roundtrip(cases::PERSON, &person());
}

#[test]
fn test_absent_optional() {
    init();
    assert_eq!(None::<u32>.encode().unwrap(), [0]);
    roundtrip(cases::ABSENT_OPTIONAL, &None::<u32>);
}

#[test]
fn test_empty_sequence() {
    init();
    assert_eq!(Vec::<u32>::new().encode().unwrap(), [0, 0, 0, 0]);
    roundtrip(cases::EMPTY_SEQUENCE, &Vec::<u32>::new());
}

#[test]
fn test_enumeration() {
    init();
    roundtrip(cases::ENUMERATION, &Suit::Spades);
}

#[test]
fn test_tagged_union() {
    init();
    let events = vec![
        Event::Idle(()),
        Event::Move(-12),
        Event::Label(b"north".to_vec()),
        Event::Resize(Size {
            width: 640,
            height: 480,
        }),
    ];
    roundtrip(cases::TAGGED_UNION, &events);
}

#[test]
fn test_linked_list() {
    init();
    let chain = Node {
        value: 1,
        next: Some(Box::new(Node {
            value: 2,
            next: Some(Box::new(Node {
                value: 3,
                next: None,
            })),
        })),
    };
    roundtrip(cases::LINKED_LIST, &chain);
}

#[test]
fn test_fixed() {
    init();
    let fixed = Fixed {
        key: *b"canon-01",
        flags: [true, false, true],
        enabled: true,
        grid: [[1, -1], [i16::MIN, i16::MAX]],
    };
    roundtrip(cases::FIXED, &fixed);
}

#[test]
fn test_mismatch() {
    init();
    let mut other = person();
    other.data.push(1);
    assert_eq!(call(cases::PERSON, &other.encode().unwrap()), None);
    assert_eq!(call(cases::ENUMERATION, &Suit::Hearts.encode().unwrap()), None);
}

#[test]
fn test_malformed() {
    init();
    let mut encoded = person().encode().unwrap();
    encoded.pop();
    assert_eq!(call(cases::PERSON, &encoded), None);
    assert_eq!(call(cases::ABSENT_OPTIONAL, &[2]), None);
    assert_eq!(call(u8::MAX, &[]), None);

    // Both sides reject the same out-of-range tag.
    assert!(Suit::decode(&[4]).is_err());
    assert_eq!(call(cases::ENUMERATION, &[4]), None);
}
