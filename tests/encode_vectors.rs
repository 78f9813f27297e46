use canon_bencode::{decode, encode, encoded_len, Dict, EncodeError, Encoder, Value};

fn dict(entries: &[(&str, Value)]) -> Value {
    entries
        .iter()
        .map(|(k, v)| (k.as_bytes().to_vec(), v.clone()))
        .collect::<Dict>()
        .into()
}

#[test]
fn encode_integers() {
    assert_eq!(encode(&Value::Integer(42)), b"i42e");
    assert_eq!(encode(&Value::Integer(0)), b"i0e");
    assert_eq!(encode(&Value::Integer(-42)), b"i-42e");
    assert_eq!(encode(&Value::Integer(i64::MAX)), b"i9223372036854775807e");
    assert_eq!(encode(&Value::Integer(i64::MIN)), b"i-9223372036854775808e");
}

#[test]
fn encode_byte_strings() {
    assert_eq!(encode(&Value::string("")), b"0:");
    assert_eq!(encode(&Value::string("foobar")), b"6:foobar");
    assert_eq!(encode(&Value::Bytes(vec![0x00, 0xff])), b"2:\x00\xff");

    let long = Value::Bytes(vec![b'a'; 12]);
    assert_eq!(encode(&long), b"12:aaaaaaaaaaaa");
}

#[test]
fn encode_lists_preserve_order() {
    let v = Value::List(vec![Value::string("spam"), Value::string("eggs")]);
    assert_eq!(encode(&v), b"l4:spam4:eggse");
    assert_eq!(encode(&Value::empty_list()), b"le");

    let nested = Value::List(vec![Value::Integer(2), Value::List(vec![Value::Integer(1)])]);
    assert_eq!(encode(&nested), b"li2eli1eee");
}

#[test]
fn encode_dicts_in_ascending_key_order() {
    let v = dict(&[
        ("wiki", Value::string("bencode")),
        ("meaning", Value::Integer(42)),
    ]);
    assert_eq!(encode(&v), b"d7:meaningi42e4:wiki7:bencodee");

    let v = dict(&[("spam", Value::string("eggs")), ("cow", Value::string("moo"))]);
    assert_eq!(encode(&v), b"d3:cow3:moo4:spam4:eggse");
    assert_eq!(encode(&Value::empty_dict()), b"de");
}

#[test]
fn dict_keys_compare_as_unsigned_bytes_with_prefix_first() {
    let mut d = Dict::new();
    d.insert(vec![0xff], Value::Integer(1));
    d.insert(b"ab".to_vec(), Value::Integer(2));
    d.insert(b"a".to_vec(), Value::Integer(3));
    d.insert(b"B".to_vec(), Value::Integer(4));
    assert_eq!(
        encode(&Value::Dict(d)),
        b"d1:Bi4e1:ai3e2:abi2e1:\xffi1ee".to_vec()
    );
}

#[test]
fn encoded_len_is_exact() {
    let v = dict(&[
        ("list", Value::List(vec![Value::Integer(-7), Value::string("xyz")])),
        ("n", Value::Integer(1_000_000)),
    ]);
    assert_eq!(encoded_len(&v), encode(&v).len());
}

#[test]
fn streaming_encoder_matches_tree_encoder() {
    let tree = dict(&[
        ("info", dict(&[("length", Value::Integer(1024)), ("name", Value::string("a.txt"))])),
        ("announce", Value::string("http://tracker.example/announce")),
    ]);

    let mut enc = Encoder::new();
    enc.dict(|d| -> Result<(), EncodeError> {
        d.entry(b"info", |e| -> Result<(), EncodeError> {
            e.dict(|info| {
                info.entry_value(b"name", &Value::string("a.txt"))
                    .entry_value(b"length", &Value::Integer(1024));
                Ok(())
            })
        })?;
        d.entry(b"announce", |e| -> Result<(), EncodeError> {
            e.str("http://tracker.example/announce");
            Ok(())
        })?;
        Ok(())
    })
    .unwrap();

    assert_eq!(enc.as_bytes(), encode(&tree));
    let canon = enc.into_canonical().unwrap();
    assert_eq!(canon.to_value().unwrap(), tree);
}

#[test]
fn streaming_encoder_error_leaves_no_partial_output() {
    let mut enc = Encoder::new();
    enc.list(|l| {
        l.int(1);
        Ok::<_, ()>(())
    })
    .unwrap();

    let res: Result<(), &str> = enc.dict(|d| {
        d.entry_value(b"a", &Value::Integer(1));
        Err("abort")
    });
    assert_eq!(res, Err("abort"));
    assert_eq!(enc.as_bytes(), b"li1ee");
}

#[test]
fn dict_entry_must_write_exactly_one_value() {
    let mut enc = Encoder::new();
    enc.int(7);

    let res = enc.dict(|d| -> Result<(), EncodeError> {
        d.entry_value(b"ok", &Value::Integer(1));
        d.entry(b"a", |_e| -> Result<(), EncodeError> { Ok(()) })?;
        Ok(())
    });
    assert_eq!(res, Err(EncodeError::EntryValueCount { written: 0 }));
    assert_eq!(enc.as_bytes(), b"i7e");

    let res = enc.dict(|d| -> Result<(), EncodeError> {
        d.entry(b"b", |e| -> Result<(), EncodeError> {
            e.int(1).int(2);
            Ok(())
        })?;
        Ok(())
    });
    assert_eq!(res, Err(EncodeError::EntryValueCount { written: 2 }));
    assert_eq!(enc.as_bytes(), b"i7e");
    assert_eq!(decode(enc.as_bytes()).unwrap(), Value::Integer(7));
}

#[test]
fn rejected_dict_entry_inside_list_rolls_back_the_list() {
    let mut enc = Encoder::new();
    let res = enc.list(|l| -> Result<(), EncodeError> {
        l.int(1);
        l.dict(|d| -> Result<(), EncodeError> {
            d.entry(b"k", |_e| -> Result<(), EncodeError> { Ok(()) })?;
            Ok(())
        })
    });
    assert_eq!(res, Err(EncodeError::EntryValueCount { written: 0 }));
    assert!(enc.is_empty());

    enc.dict(|d| -> Result<(), EncodeError> {
        d.entry(b"k", |e| -> Result<(), EncodeError> {
            e.list(|l| {
                l.int(1).int(2);
                Ok(())
            })
        })?;
        Ok(())
    })
    .unwrap();
    assert_eq!(enc.as_bytes(), b"d1:kli1ei2eee");
}

#[test]
fn into_canonical_rejects_multiple_top_level_values() {
    let mut enc = Encoder::new();
    enc.int(1).int(2);
    assert!(enc.into_canonical().is_err());
    assert!(Encoder::new().into_canonical().is_err());
}
