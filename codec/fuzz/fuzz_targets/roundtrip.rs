#![no_main]

use arbitrary::Arbitrary;
use canon_codec::{
    deserialize_cfg, size, size_cfg, to_vec_cfg, Codec, Config, EncodeError, Terminated,
    Unbounded,
};
use canon_codec_fuzz::{Message, Node, Person, Suit};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Value {
    U8(u8),
    I16(i16),
    U32(u32),
    I64(i64),
    U128(u128),
    F32(f32),
    F64(f64),
    Bool(bool),
    Bytes(Vec<u8>),
    Words(Vec<u64>),
    Bools(Vec<bool>),
    Nested(Vec<Vec<i16>>),
    Array([u32; 4]),
    Optional(Option<i64>),
    Boxed(Box<Vec<u8>>),
    Terminated(Vec<u8>),
    Person(Person),
    People(Vec<Person>),
    Node(Node),
    Suit(Suit),
    Message(Message),
}

fn roundtrip<T: Codec>(value: &T) {
    let encoded = match value.encode() {
        Ok(encoded) => encoded,
        Err(err) => {
            // Only values nested too deeply may be refused.
            assert_eq!(err, EncodeError::MaxRecursionDepthReached);
            return;
        }
    };
    assert_eq!(size(value), Ok(encoded.len()));

    let decoded = T::decode(&encoded).expect("failed to decode a successfully encoded value");
    assert_eq!(
        decoded.encode().expect("failed to re-encode a decoded value"),
        encoded
    );
}

fn roundtrip_terminated(bytes: Vec<u8>) {
    let items = bytes.into_iter().filter(|b| *b != 0).collect();
    let value = Terminated::<u8>::new(items).expect("terminator was filtered out");
    roundtrip(&value);

    // The legacy layout carries one trailing terminator.
    let legacy = Config::default().legacy();
    let encoded = to_vec_cfg(&value, legacy).expect("failed to encode legacy layout");
    assert_eq!(size_cfg(&value, legacy), Ok(encoded.len()));
    assert_eq!(encoded.last(), Some(&0));
    let decoded: Terminated<u8> =
        deserialize_cfg(&encoded, &Unbounded, legacy).expect("failed to decode legacy layout");
    assert_eq!(decoded, value);
}

fn fuzz(value: Value) {
    match value {
        Value::U8(v) => roundtrip(&v),
        Value::I16(v) => roundtrip(&v),
        Value::U32(v) => roundtrip(&v),
        Value::I64(v) => roundtrip(&v),
        Value::U128(v) => roundtrip(&v),
        Value::F32(v) => roundtrip(&v),
        Value::F64(v) => roundtrip(&v),
        Value::Bool(v) => roundtrip(&v),
        Value::Bytes(v) => roundtrip(&v),
        Value::Words(v) => roundtrip(&v),
        Value::Bools(v) => roundtrip(&v),
        Value::Nested(v) => roundtrip(&v),
        Value::Array(v) => roundtrip(&v),
        Value::Optional(v) => roundtrip(&v),
        Value::Boxed(v) => roundtrip(&v),
        Value::Terminated(v) => roundtrip_terminated(v),
        Value::Person(v) => roundtrip(&v),
        Value::People(v) => roundtrip(&v),
        Value::Node(v) => roundtrip(&v),
        Value::Suit(v) => roundtrip(&v),
        Value::Message(v) => roundtrip(&v),
    }
}

fuzz_target!(|value: Value| {
    fuzz(value);
});
