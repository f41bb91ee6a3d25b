use super::decode::*;
use super::{DecodeOptions, ParseMode, Slot, Value, io::SliceInput, read_array, read_map};
use alloc::{boxed::Box, string::String, vec, vec::Vec};
use hex_literal::hex;

#[test]
fn rfc_tests() {
    // RFC 8949, Appendix A:
    // https://www.rfc-editor.org/rfc/rfc8949.html#section-appendix.a

    assert_eq!(0, parse(&hex!("00")).unwrap());
    assert_eq!(1, parse(&hex!("01")).unwrap());
    assert_eq!(10, parse(&hex!("0a")).unwrap());
    assert_eq!(23, parse(&hex!("17")).unwrap());
    assert_eq!(24, parse(&hex!("1818")).unwrap());
    assert_eq!(25, parse(&hex!("1819")).unwrap());
    assert_eq!(100, parse(&hex!("1864")).unwrap());
    assert_eq!(1000, parse(&hex!("1903e8")).unwrap());
    assert_eq!(1000000, parse(&hex!("1a000f4240")).unwrap());
    assert_eq!(
        1000000000000u64,
        parse(&hex!("1b000000e8d4a51000")).unwrap()
    );
    assert_eq!(
        18446744073709551615u64,
        parse(&hex!("1bffffffffffffffff")).unwrap()
    );
    // Bignums are tags, not integers
    assert_eq!(
        Err(Error::ItemTypeMismatch),
        parse::<u64>(&hex!("c249010000000000000000"))
    );
    assert_eq!(
        Err(Error::ItemValueOutOfRange),
        parse::<i64>(&hex!("3bffffffffffffffff"))
    );
    assert_eq!(
        Value::Negative(u64::MAX),
        parse(&hex!("3bffffffffffffffff")).unwrap()
    );
    assert_eq!(
        Some(-18446744073709551616i128),
        parse::<Value>(&hex!("3bffffffffffffffff"))
            .unwrap()
            .as_integer()
    );
    assert_eq!(-1, parse(&hex!("20")).unwrap());
    assert_eq!(-10, parse(&hex!("29")).unwrap());
    assert_eq!(-100, parse(&hex!("3863")).unwrap());
    assert_eq!(-1000, parse(&hex!("3903e7")).unwrap());
    assert_eq!(0.0, parse(&hex!("f90000")).unwrap());
    assert_eq!(-0.0, parse(&hex!("f98000")).unwrap());
    assert_eq!(1.0, parse(&hex!("f93c00")).unwrap());
    assert_eq!(1.1, parse(&hex!("fb3ff199999999999a")).unwrap());
    assert_eq!(1.5, parse(&hex!("f93e00")).unwrap());
    assert_eq!(65504.0, parse(&hex!("f97bff")).unwrap());
    assert_eq!(100000.0, parse(&hex!("fa47c35000")).unwrap());
    assert_eq!(3.4028234663852886e+38, parse(&hex!("fa7f7fffff")).unwrap());
    assert_eq!(1.0e+300, parse(&hex!("fb7e37e43c8800759c")).unwrap());
    assert_eq!(5.960464477539063e-8, parse(&hex!("f90001")).unwrap());
    assert_eq!(0.00006103515625, parse(&hex!("f90400")).unwrap());
    assert_eq!(-4.0, parse(&hex!("f9c400")).unwrap());
    assert_eq!(-4.1, parse(&hex!("fbc010666666666666")).unwrap());
    assert_eq!(f32::INFINITY, parse(&hex!("f97c00")).unwrap());
    assert!(parse::<f32>(&hex!("f97e00")).unwrap().is_nan());
    assert_eq!(f32::NEG_INFINITY, parse(&hex!("f9fc00")).unwrap());
    assert_eq!(f64::INFINITY, parse(&hex!("fa7f800000")).unwrap());
    assert!(parse::<f32>(&hex!("fa7fc00000")).unwrap().is_nan());
    assert_eq!(f64::NEG_INFINITY, parse(&hex!("faff800000")).unwrap());
    assert_eq!(f64::INFINITY, parse(&hex!("fb7ff0000000000000")).unwrap());
    assert!(parse::<f64>(&hex!("fb7ff8000000000000")).unwrap().is_nan());
    assert_eq!(
        f64::NEG_INFINITY,
        parse(&hex!("fbfff0000000000000")).unwrap()
    );
    assert_eq!(false, parse(&hex!("f4")).unwrap());
    assert_eq!(true, parse(&hex!("f5")).unwrap());
    assert_eq!(Value::Null, parse(&hex!("f6")).unwrap());
    assert_eq!(Value::Undefined, parse(&hex!("f7")).unwrap());
    assert_eq!(Value::Simple(16), parse(&hex!("f0")).unwrap());
    assert_eq!(
        (Value::Simple(255), 2),
        parse_with(&hex!("f8ff"), &DecodeOptions::default()).unwrap()
    );
    assert_eq!(
        (
            Value::Tag(0, Box::new(Value::Text("2013-03-21T20:04:00Z".into()))),
            22
        ),
        parse_with(
            &hex!("c074323031332d30332d32315432303a30343a30305a"),
            &DecodeOptions::default()
        )
        .unwrap()
    );
    assert_eq!(
        (Value::Tag(1, Box::new(Value::Unsigned(1363896240))), 6),
        parse_with(&hex!("c11a514b67b0"), &DecodeOptions::default()).unwrap()
    );
    assert_eq!(
        (Value::Tag(1, Box::new(Value::Float(1363896240.5))), 10),
        parse_with(&hex!("c1fb41d452d9ec200000"), &DecodeOptions::default()).unwrap()
    );
    assert_eq!(
        Value::Tag(23, Box::new(Value::Bytes(hex!("01020304").to_vec()))),
        parse(&hex!("d74401020304")).unwrap()
    );
    assert_eq!(
        Value::Tag(24, Box::new(Value::Bytes(hex!("6449455446").to_vec()))),
        parse(&hex!("d818456449455446")).unwrap()
    );
    assert_eq!(
        Value::Tag(32, Box::new(Value::Text("http://www.example.com".into()))),
        parse(&hex!("d82076687474703a2f2f7777772e6578616d706c652e636f6d")).unwrap()
    );
    assert!(parse::<Vec<u8>>(&hex!("40")).unwrap().is_empty());
    assert_eq!(
        hex!("01020304").to_vec(),
        parse::<Vec<u8>>(&hex!("4401020304")).unwrap()
    );
    assert!(parse::<String>(&hex!("60")).unwrap().is_empty());
    assert_eq!("a", &parse::<String>(&hex!("6161")).unwrap());
    assert_eq!("IETF", &parse::<String>(&hex!("6449455446")).unwrap());
    assert_eq!("\"\\", &parse::<String>(&hex!("62225c")).unwrap());
    assert_eq!("\u{00fc}", &parse::<String>(&hex!("62c3bc")).unwrap());
    assert_eq!("\u{6c34}", &parse::<String>(&hex!("63e6b0b4")).unwrap());
    assert_eq!(
        "\u{10151}", /* surrogate pair: \u{d800}\u{dd51} */
        &parse::<String>(&hex!("64f0908591")).unwrap()
    );
    assert_eq!(Value::Array(vec![]), parse(&hex!("80")).unwrap());
    assert_eq!(
        Value::Array(vec![
            Value::Unsigned(1),
            Value::Unsigned(2),
            Value::Unsigned(3)
        ]),
        parse(&hex!("83010203")).unwrap()
    );
    assert_eq!(
        Value::Array(vec![
            Value::Unsigned(1),
            Value::Array(vec![Value::Unsigned(2), Value::Unsigned(3)]),
            Value::Array(vec![Value::Unsigned(4), Value::Unsigned(5)]),
        ]),
        parse(&hex!("8301820203820405")).unwrap()
    );
    assert_eq!(
        (
            Value::Array((1..=25).map(Value::Unsigned).collect()),
            29
        ),
        parse_with(
            &hex!("98190102030405060708090a0b0c0d0e0f101112131415161718181819"),
            &DecodeOptions::default()
        )
        .unwrap()
    );
    assert_eq!(Value::Map(vec![]), parse(&hex!("a0")).unwrap());
    assert_eq!(
        Value::Map(vec![
            (Value::Unsigned(1), Value::Unsigned(2)),
            (Value::Unsigned(3), Value::Unsigned(4)),
        ]),
        parse(&hex!("a201020304")).unwrap()
    );
    assert_eq!(
        Value::Map(vec![
            (Value::Text("a".into()), Value::Unsigned(1)),
            (
                Value::Text("b".into()),
                Value::Array(vec![Value::Unsigned(2), Value::Unsigned(3)])
            ),
        ]),
        parse(&hex!("a26161016162820203")).unwrap()
    );
    assert_eq!(
        Value::Array(vec![
            Value::Text("a".into()),
            Value::Map(vec![(Value::Text("b".into()), Value::Text("c".into()))]),
        ]),
        parse(&hex!("826161a161626163")).unwrap()
    );
    assert_eq!(
        hex!("0102030405").to_vec(),
        parse::<Vec<u8>>(&hex!("5f42010243030405ff")).unwrap()
    );
    assert_eq!(
        "streaming",
        &parse::<String>(&hex!("7f657374726561646d696e67ff")).unwrap()
    );
    assert_eq!(Value::Array(vec![]), parse(&hex!("9fff")).unwrap());
    assert_eq!(
        Value::Array(vec![
            Value::Unsigned(1),
            Value::Array(vec![Value::Unsigned(2), Value::Unsigned(3)]),
            Value::Array(vec![Value::Unsigned(4), Value::Unsigned(5)]),
        ]),
        parse(&hex!("9f018202039f0405ffff")).unwrap()
    );
    assert_eq!(
        parse::<Value>(&hex!("8301820203820405")).unwrap(),
        parse(&hex!("83018202039f0405ff")).unwrap()
    );
    assert_eq!(
        parse::<Value>(&hex!("8301820203820405")).unwrap(),
        parse(&hex!("83019f0203ff820405")).unwrap()
    );
    assert_eq!(
        Value::Array((1..=25).map(Value::Unsigned).collect()),
        parse(&hex!(
            "9f0102030405060708090a0b0c0d0e0f101112131415161718181819ff"
        ))
        .unwrap()
    );
    assert_eq!(
        Value::Map(vec![
            (Value::Text("a".into()), Value::Unsigned(1)),
            (
                Value::Text("b".into()),
                Value::Array(vec![Value::Unsigned(2), Value::Unsigned(3)])
            ),
        ]),
        parse(&hex!("bf61610161629f0203ffff")).unwrap()
    );
    assert_eq!(
        Value::Array(vec![
            Value::Text("a".into()),
            Value::Map(vec![(Value::Text("b".into()), Value::Text("c".into()))]),
        ]),
        parse(&hex!("826161bf61626163ff")).unwrap()
    );
    assert_eq!(
        Value::Map(vec![
            (Value::Text("Fun".into()), Value::True),
            (Value::Text("Amt".into()), Value::Negative(1)),
        ]),
        parse(&hex!("bf6346756ef563416d7421ff")).unwrap()
    );
}

#[test]
fn typed_arrays_and_maps() {
    let options = DecodeOptions::default();

    let mut input = SliceInput::new(&hex!("9f0102ff"));
    let mut v = Vec::new();
    assert_eq!(
        2,
        read_array(&mut input, &options, |input| {
            v.push(u32::from_cbor(input, &options)?);
            Ok(())
        })
        .unwrap()
    );
    assert_eq!(vec![1, 2], v);
    assert!(input.is_empty());

    let mut input = SliceInput::new(&hex!("a2616101616202"));
    let mut keys = Vec::new();
    let mut values = Vec::new();
    assert_eq!(
        2,
        read_map(&mut input, &options, |input, slot| {
            match slot {
                Slot::Key => keys.push(String::from_cbor(input, &options)?),
                Slot::Value => values.push(i8::from_cbor(input, &options)?),
            }
            Ok(())
        })
        .unwrap()
    );
    assert_eq!(vec!["a", "b"], keys);
    assert_eq!(vec![1, 2], values);

    assert_eq!(
        Err(Error::ItemTypeMismatch),
        read_array(&mut SliceInput::new(&hex!("a0")), &options, |_| Ok(()))
    );
}

#[test]
fn out_of_range() {
    assert_eq!(Err(Error::ItemValueOutOfRange), parse::<u8>(&hex!("190100")));
    assert_eq!(Err(Error::ItemValueOutOfRange), parse::<i8>(&hex!("3880")));
    assert_eq!(-128, parse::<i8>(&hex!("387f")).unwrap());
    assert_eq!(
        i64::MIN,
        parse::<i64>(&hex!("3b7fffffffffffffff")).unwrap()
    );
    assert_eq!(Err(Error::ItemTypeMismatch), parse::<u32>(&hex!("20")));
    assert_eq!(Err(Error::ItemTypeMismatch), parse::<bool>(&hex!("f6")));
    // 1.1 cannot be narrowed to f32 without loss
    assert_eq!(
        Err(Error::ItemValueOutOfRange),
        parse::<f32>(&hex!("fb3ff199999999999a"))
    );
}

#[test]
fn options() {
    assert_eq!(None, parse::<Option<u32>>(&hex!("f6")).unwrap());
    assert_eq!(None, parse::<Option<u32>>(&hex!("f7")).unwrap());
    assert_eq!(Some(7), parse::<Option<u32>>(&hex!("07")).unwrap());
}

#[test]
fn value_type_names() {
    let names: Vec<&str> = parse_sequence::<Value>(
        &hex!("0720410161618080c101f5f6f7f0f93c00"),
        &DecodeOptions::default(),
    )
    .unwrap()
    .iter()
    .map(Value::type_name)
    .collect();
    assert_eq!(
        names,
        [
            "Unsigned Integer",
            "Negative Integer",
            "Byte String",
            "Text String",
            "Array",
            "Array",
            "Tag",
            "Boolean",
            "Null",
            "Undefined",
            "Simple Value",
            "Float",
        ]
    );
    assert_eq!(parse::<Value>(&hex!("a0")).unwrap().type_name(), "Map");
}

#[test]
fn sequences() {
    let options = DecodeOptions::default();
    assert_eq!(
        vec![1u8, 2, 3],
        parse_sequence(&hex!("010203"), &options).unwrap()
    );
    assert!(parse_sequence::<u8>(&[], &options).unwrap().is_empty());
    assert_eq!(
        Err(Error::MissingData),
        parse_sequence::<String>(&hex!("616162"), &options)
    );
}

#[test]
fn parse_modes() {
    let canonical = DecodeOptions::with_mode(ParseMode::Canonical);
    let strict = DecodeOptions::with_mode(ParseMode::Strict);

    assert_eq!(
        (0u64, 9),
        parse_with(&hex!("1b0000000000000000"), &DecodeOptions::default()).unwrap()
    );
    assert_eq!(
        Err(Error::OversizedAdditionalInformationCoding),
        parse_with::<u64>(&hex!("1b0000000000000000"), &canonical)
    );
    assert_eq!(
        Err(Error::OversizedAdditionalInformationCoding),
        parse_with::<u64>(&hex!("1817"), &canonical)
    );
    assert_eq!(
        (24u64, 2),
        parse_with(&hex!("1818"), &canonical).unwrap()
    );
    assert_eq!(
        Err(Error::OversizedAdditionalInformationCoding),
        parse_with::<Value>(&hex!("f814"), &canonical)
    );
    assert_eq!(Value::False, parse(&hex!("f814")).unwrap());
    assert_eq!(
        Err(Error::IndefiniteItem),
        parse_with::<String>(&hex!("7f657374726561646d696e67ff"), &canonical)
    );

    // 1.0 as a single is not the shortest form
    assert_eq!(
        (1.0f64, 5),
        parse_with(&hex!("fa3f800000"), &canonical).unwrap()
    );
    assert_eq!(
        Err(Error::OversizedAdditionalInformationCoding),
        parse_with::<f64>(&hex!("fa3f800000"), &strict)
    );
    assert_eq!(
        (100000.0f64, 5),
        parse_with(&hex!("fa47c35000"), &strict).unwrap()
    );
    assert!(parse_with::<f64>(&hex!("f97e00"), &strict).unwrap().0.is_nan());
    assert_eq!(
        Err(Error::OversizedAdditionalInformationCoding),
        parse_with::<f64>(&hex!("fb7ff8000000000000"), &strict)
    );
}

#[test]
fn nesting_depth() {
    let shallow = DecodeOptions {
        max_depth: 2,
        ..Default::default()
    };
    let deep = DecodeOptions {
        max_depth: 3,
        ..Default::default()
    };
    assert_eq!(
        Err(Error::MaxNestingDepth),
        parse_with::<Value>(&hex!("81818101"), &shallow)
    );
    assert!(parse_with::<Value>(&hex!("81818101"), &deep).is_ok());
    assert_eq!(
        Err(Error::MaxNestingDepth),
        parse_with::<Value>(&hex!("c1c1c101"), &shallow)
    );
}

#[test]
fn malformed() {
    assert_eq!(Err(Error::EndOfStream), parse::<u32>(&[]));
    assert_eq!(Err(Error::EndOfStream), parse::<u32>(&hex!("19 01")));
    assert_eq!(
        Err(Error::InvalidAdditionalInformation(28)),
        parse::<u32>(&hex!("1c"))
    );
    assert_eq!(
        Err(Error::InvalidAdditionalInformation(31)),
        parse::<Value>(&hex!("1f"))
    );
    assert_eq!(Err(Error::ItemTypeMismatch), parse::<Value>(&hex!("ff")));
    assert_eq!(Err(Error::InvalidUtf8), parse::<String>(&hex!("62c328")));
    // Each chunk of an indefinite text string must be valid on its own
    assert_eq!(
        Err(Error::InvalidUtf8),
        parse::<String>(&hex!("7f61c361bcff"))
    );
    assert_eq!(
        Err(Error::InvalidIndefiniteSubitem),
        parse::<Vec<u8>>(&hex!("5f6161ff"))
    );
    assert_eq!(
        Err(Error::InvalidIndefiniteSubitem),
        parse::<Vec<u8>>(&hex!("5f5f4101ffff"))
    );
    // A count the input cannot hold is rejected before anything is read
    assert_eq!(
        Err(Error::MissingData),
        parse::<Value>(&hex!("9b00000001000000000102"))
    );
}
