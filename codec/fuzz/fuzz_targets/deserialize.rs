#![no_main]

use arbitrary::Arbitrary;
use canon_codec::{deserialize_cfg, release, Config, Decode, Terminated, Tracked};
use canon_codec_fuzz::{Message, Node, Person, Suit};
use libfuzzer_sys::fuzz_target;

/// Bytes any single decode may reserve.
const LIMIT: usize = 1 << 20;

#[derive(Arbitrary, Debug)]
enum Target {
    U8,
    I64,
    U128,
    F64,
    Bool,
    Unit,
    Bytes,
    Words,
    Bools,
    Nested,
    Array,
    Optional,
    Boxed,
    Terminated,
    Person,
    Node,
    Suit,
    Message,
}

#[derive(Arbitrary, Debug)]
struct FuzzInput<'a> {
    target: Target,
    max_depth: u8,
    legacy: bool,
    data: &'a [u8],
}

fn check<T: Decode>(data: &[u8], config: Config) {
    let alloc = Tracked::with_limit(LIMIT);
    if let Ok(value) = deserialize_cfg::<T>(data, &alloc, config) {
        release(value, &alloc);
    }
    assert_eq!(alloc.outstanding(), 0, "reservations outlived the decode");
}

fn fuzz(input: FuzzInput) {
    let mut config = Config::new(usize::from(input.max_depth));
    if input.legacy {
        config = config.legacy();
    }
    let data = input.data;
    match input.target {
        Target::U8 => check::<u8>(data, config),
        Target::I64 => check::<i64>(data, config),
        Target::U128 => check::<u128>(data, config),
        Target::F64 => check::<f64>(data, config),
        Target::Bool => check::<bool>(data, config),
        Target::Unit => check::<()>(data, config),
        Target::Bytes => check::<Vec<u8>>(data, config),
        Target::Words => check::<Vec<u32>>(data, config),
        Target::Bools => check::<Vec<bool>>(data, config),
        Target::Nested => check::<Vec<Vec<u16>>>(data, config),
        Target::Array => check::<[Option<u32>; 3]>(data, config),
        Target::Optional => check::<Option<Option<i8>>>(data, config),
        Target::Boxed => check::<Vec<Box<u64>>>(data, config),
        Target::Terminated => check::<Vec<Terminated<u16>>>(data, config),
        Target::Person => check::<Person>(data, config),
        Target::Node => check::<Node>(data, config),
        Target::Suit => check::<Suit>(data, config),
        Target::Message => check::<Message>(data, config),
    }
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
