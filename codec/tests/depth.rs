//! Integration tests for the recursion depth guard.

use canon_codec::{
    deserialize, record, release, size_cfg, to_vec_cfg, Config, DecodeError, EncodeError, Schema,
    Tracked,
};
use test_case::test_case;

record! {
    #[derive(Debug, Clone, PartialEq)]
    struct Node {
        value: u8,
        next: Option<Box<Node>>,
    }
}

/// Builds a list of `len` nodes (at least one).
fn list(len: usize) -> Node {
    let mut head = Node {
        value: 0,
        next: None,
    };
    for value in 1..len {
        head = Node {
            value: value as u8,
            next: Some(Box::new(head)),
        };
    }
    head
}

/// Depth of the deepest node in a list of `len` nodes.
///
/// Each link costs three levels (field, optional payload, box target), and the last node's
/// fields sit one below it.
fn deepest(len: usize) -> usize {
    3 * len - 2
}

#[test_case(1)]
#[test_case(2)]
#[test_case(3)]
#[test_case(4)]
#[test_case(5)]
#[test_case(6)]
#[test_case(7)]
#[test_case(8)]
#[test_case(9)]
#[test_case(10)]
#[test_case(11)]
#[test_case(12)]
#[test_case(13)]
#[test_case(14)]
#[test_case(15)]
#[test_case(16)]
#[test_case(17)]
#[test_case(18)]
#[test_case(19)]
#[test_case(20)]
fn test_decode_depth(max_depth: usize) {
    for len in 1..=8 {
        let value = list(len);
        let encoded = to_vec_cfg(&value, Config::new(64)).unwrap();
        assert_eq!(encoded.len(), 2 * len);

        let alloc = Tracked::new();
        let result = deserialize::<Node>(&encoded, &alloc, max_depth);
        if deepest(len) < max_depth {
            let decoded = result.unwrap();
            assert_eq!(decoded, value);
            release(decoded, &alloc);
        } else {
            assert_eq!(result, Err(DecodeError::MaxRecursionDepthReached));
        }
        assert_eq!(alloc.outstanding(), 0);
    }
}

#[test_case(1)]
#[test_case(4)]
#[test_case(5)]
#[test_case(20)]
fn test_encode_depth(max_depth: usize) {
    for len in 1..=8 {
        let value = list(len);
        let config = Config::new(max_depth);
        if deepest(len) < max_depth {
            assert_eq!(size_cfg(&value, config), Ok(2 * len));
            assert_eq!(to_vec_cfg(&value, config).map(|v| v.len()), Ok(2 * len));
        } else {
            assert_eq!(
                size_cfg(&value, config),
                Err(EncodeError::MaxRecursionDepthReached)
            );
            assert_eq!(
                to_vec_cfg(&value, config),
                Err(EncodeError::MaxRecursionDepthReached)
            );
        }
    }
}

#[test]
fn test_zero_depth_rejects_root() {
    assert_eq!(
        size_cfg(&7u8, Config::new(0)),
        Err(EncodeError::MaxRecursionDepthReached)
    );
    assert_eq!(
        deserialize::<u8>(&[7], &Tracked::new(), 0),
        Err(DecodeError::MaxRecursionDepthReached)
    );
    assert_eq!(deserialize::<u8>(&[7], &Tracked::new(), 1), Ok(7));
}

#[test]
fn test_guard_precedes_input() {
    // The guard trips before the truncated tail is reached.
    let encoded = to_vec_cfg(&list(8), Config::new(64)).unwrap();
    let alloc = Tracked::new();
    assert_eq!(
        deserialize::<Node>(&encoded[..encoded.len() - 1], &alloc, 4),
        Err(DecodeError::MaxRecursionDepthReached)
    );
    assert_eq!(alloc.outstanding(), 0);
}

#[test]
fn test_recursive_shape() {
    assert_eq!(
        format!("{:#}", Node::shape()),
        "Node { value: u8, next: Option<Box<Node>> }"
    );
    assert_eq!(Node::shape().min_size(), 2);
}
