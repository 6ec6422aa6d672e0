use kaldi_holder::{
    from_slice, to_vec, BoolHolder, DoubleHolder, Error, FloatHolder, Holder, Int32Holder,
    Int32VectorHolder, Int8Holder, Kind, Mode, RecordReader, ScalarHolder, ScalarType,
    SequenceHolder, TokenHolder, UInt32Holder, Value,
};

/// Writes `keys[i] values[i]` pairs the way a table writer would: the key as a token-like
/// prefix, then the holder's record.
fn write_archive<H: Holder>(entries: &[(&str, H::Value)], mode: Mode) -> Vec<u8> {
    let mut buf = Vec::new();
    for (key, value) in entries {
        buf.extend_from_slice(key.as_bytes());
        buf.push(b' ');
        H::write(&mut buf, mode, value).unwrap();
    }
    buf
}

fn read_archive<H: Holder>(bytes: &[u8]) -> Vec<(String, H::Value)> {
    let mut reader = RecordReader::new(bytes);
    let mut entries = Vec::new();
    let mut holder = H::default();
    while !reader.at_end().unwrap() {
        let mut key = Vec::new();
        loop {
            let mut byte = [0u8; 1];
            std::io::Read::read_exact(&mut reader, &mut byte).unwrap();
            if byte[0] == b' ' {
                break;
            }
            key.push(byte[0]);
        }
        holder.read(&mut reader).unwrap();
        let mut fresh = H::default();
        fresh.swap(&mut holder);
        entries.push((String::from_utf8(key).unwrap(), fresh.into_value()));
    }
    entries
}

#[test]
fn test_int32_table_text() {
    let bytes = write_archive::<Int32Holder>(&[("a", 10), ("b", 20)], Mode::Text);
    assert_eq!(bytes, b"a 10 \nb 20 \n");

    let entries = read_archive::<Int32Holder>(&bytes);
    assert_eq!(entries, vec![("a".to_string(), 10), ("b".to_string(), 20)]);
}

#[test]
fn test_int32_table_binary() {
    let bytes = write_archive::<Int32Holder>(&[("a", 10), ("b", 20)], Mode::Binary);
    let entries = read_archive::<Int32Holder>(&bytes);
    assert_eq!(entries, vec![("a".to_string(), 10), ("b".to_string(), 20)]);
}

#[test]
fn test_vector_table_mixed_lengths() {
    let entries = vec![
        ("utt1", vec![1, 2, 3]),
        ("utt2", vec![]),
        ("utt3", vec![-7]),
    ];
    for mode in [Mode::Text, Mode::Binary] {
        let bytes = write_archive::<Int32VectorHolder>(&entries, mode);
        let back = read_archive::<Int32VectorHolder>(&bytes);
        assert_eq!(back.len(), 3);
        for ((key, value), (key_back, value_back)) in entries.iter().zip(&back) {
            assert_eq!(key, key_back);
            assert_eq!(value, value_back);
        }
    }
}

#[test]
fn test_token_table() {
    let entries = vec![("utt1", "spk1".to_string()), ("utt2", "spk2".to_string())];
    let bytes = write_archive::<TokenHolder>(&entries, Mode::Binary);
    assert_eq!(bytes, b"utt1 spk1\nutt2 spk2\n");
    let back = read_archive::<TokenHolder>(&bytes);
    assert_eq!(back[1].1, "spk2");
}

#[test]
fn test_bool_and_float_records() {
    for mode in [Mode::Text, Mode::Binary] {
        assert!(from_slice::<BoolHolder>(&to_vec::<BoolHolder>(mode, &true).unwrap()).unwrap());
        assert_eq!(
            from_slice::<FloatHolder>(&to_vec::<FloatHolder>(mode, &-2.75).unwrap()).unwrap(),
            -2.75
        );
        assert_eq!(
            from_slice::<DoubleHolder>(&to_vec::<DoubleHolder>(mode, &1e-300).unwrap()).unwrap(),
            1e-300
        );
    }
}

#[test]
fn test_float_record_read_as_double() {
    let bytes = to_vec::<FloatHolder>(Mode::Binary, &0.125).unwrap();
    assert_eq!(from_slice::<DoubleHolder>(&bytes).unwrap(), 0.125);
}

#[test]
fn test_text_scalar_missing_newline_never_succeeds() {
    for input in [&b"10"[..], b"10 ", b"10 \t", b"10 11\n"] {
        assert!(from_slice::<Int32Holder>(input).is_err(), "{:?}", input);
    }
}

#[test]
fn test_scalar_out_of_range_text() {
    assert!(from_slice::<Int8Holder>(b"200 \n").is_err());
    assert!(from_slice::<UInt32Holder>(b"-1 \n").is_err());
}

#[test]
fn test_binary_sequence_past_eof() {
    // Declares five elements but only carries one.
    let bytes = b"\0B\x04\x05\x00\x00\x00\x04\x01\x00\x00\x00";
    let err = from_slice::<Int32VectorHolder>(bytes).unwrap_err();
    assert_eq!(err.record_offset(), Some(0));
    assert!(err.to_string().contains("beginning at position 0"));
}

#[test]
fn test_binary_sequence_wrong_element_type() {
    let bytes = to_vec::<SequenceHolder<i64>>(Mode::Binary, &vec![1, 2]).unwrap();
    assert!(matches!(
        from_slice::<Int32VectorHolder>(&bytes),
        Err(Error::Record { .. })
    ));
}

#[test]
fn test_clear_resets_to_default() {
    let mut scalar = ScalarHolder::new(99u16);
    scalar.clear();
    assert_eq!(*scalar.value(), 0);

    let mut seq = Int32VectorHolder::new(vec![1, 2]);
    seq.clear();
    assert!(seq.value().is_empty());

    let mut token = TokenHolder::new("abc".to_string());
    token.clear();
    assert_eq!(token.value(), "");
}

#[test]
fn test_value_mut_and_swap() {
    let mut a = Int32Holder::default();
    let mut b = Int32Holder::new(5);
    *a.value_mut() = 3;
    a.swap(&mut b);
    assert_eq!((*a.value(), *b.value()), (5, 3));
}

#[test]
fn test_extract_range_unsupported_everywhere() {
    let mut seq = Int32VectorHolder::default();
    assert!(matches!(
        seq.extract_range(&Int32VectorHolder::default(), "0:2"),
        Err(Error::Unsupported(_))
    ));
    let mut token = TokenHolder::default();
    assert!(token.extract_range(&TokenHolder::default(), "0:1").is_err());
}

#[test]
fn test_dynamic_value_json_dump() {
    let bytes = to_vec::<Int32VectorHolder>(Mode::Binary, &vec![4, 5]).unwrap();
    let value = Value::read(
        &mut RecordReader::new(&bytes[..]),
        Kind::Sequence(ScalarType::Int32),
    )
    .unwrap();

    let json = serde_json::to_value(&value).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"sequence": {"type": "int32", "values": [4, 5]}})
    );

    let back: Value = serde_json::from_value(json).unwrap();
    assert_eq!(back, value);
}

#[test]
fn test_kind_json_shape() {
    let json = serde_json::to_string(&Kind::Scalar(ScalarType::Double)).unwrap();
    assert_eq!(json, r#"{"shape":"scalar","type":"double"}"#);
    let kind: Kind = serde_json::from_str(r#"{"shape":"token"}"#).unwrap();
    assert_eq!(kind, Kind::Token);
}
