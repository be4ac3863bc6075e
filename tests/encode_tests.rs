use qrmatrix::structure::{format_bits, version_bits};
use qrmatrix::{
    encode, EncodeOptions, ErrorKind, QrCode, QrCodeEcc, QrData, QrError, QrSegmentMode,
    SegmentInput, Version,
};

fn ecl(name: &str) -> EncodeOptions {
    EncodeOptions::new().error_correction_level_name(name)
}

fn v1_high() -> EncodeOptions {
    ecl("H").version(1)
}

#[test]
fn same_input_gives_same_symbol() {
    let options = ecl("H");
    let a = encode("http://www.google.com", &options).unwrap();
    let b = encode("http://www.google.com", &options).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.mask(), b.mask());
    assert_eq!(a.modules(), b.modules());
}

#[test]
fn different_inputs_give_different_symbols() {
    let options = EncodeOptions::new();
    let a = encode("hello world", &options).unwrap();
    let b = encode("hello World", &options).unwrap();
    assert_eq!(a.version(), b.version());
    assert_ne!(a.modules(), b.modules());
}

#[test]
fn size_follows_version() {
    for len in [1usize, 50, 300, 1200, 2900] {
        let data = vec![b'x'; len];
        let qr = encode(data, &ecl("L")).unwrap();
        assert_eq!(qr.size(), i32::from(qr.version().value()) * 4 + 17);
        assert_eq!(qr.modules().size() as i32, qr.size());
    }
}

#[test]
fn short_alphanumeric_text_uses_defaults() {
    let qr = encode("ABCDEFG", &EncodeOptions::new()).unwrap();
    assert_eq!(qr.version(), Version::MIN);
    assert_eq!(qr.error_correction_level(), QrCodeEcc::Medium);
    assert_eq!(qr.segments().len(), 1);
    assert_eq!(qr.segments()[0].mode(), QrSegmentMode::Alphanumeric);
    assert_eq!(qr.segments()[0].num_chars(), 7);
}

#[test]
fn single_digit_segment_is_four_bits() {
    let qr = encode("8", &EncodeOptions::new()).unwrap();
    let seg = &qr.segments()[0];
    assert_eq!(seg.mode(), QrSegmentMode::Numeric);
    assert_eq!(seg.bit_length(), 4);
}

#[test]
fn forced_alphanumeric_letter() {
    let inputs = vec![SegmentInput::text("A").with_mode(QrSegmentMode::Alphanumeric)];
    let qr = encode(inputs, &EncodeOptions::new()).unwrap();
    let seg = &qr.segments()[0];
    assert_eq!(seg.bit_length(), 6);
    assert_eq!(seg.data(), &[0b0010_1000]);
}

#[test]
fn version_one_high_capacity() {
    assert!(encode(vec![b'a'; 7], &v1_high()).is_ok());
    assert!(encode("1".repeat(17), &v1_high()).is_ok());
    assert!(encode("A".repeat(10), &v1_high()).is_ok());

    for data in [
        QrData::Bytes(vec![b'a'; 8]),
        QrData::Text("1".repeat(18)),
        QrData::Text("A".repeat(11)),
    ] {
        let err = encode(data, &v1_high()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Capacity);
        assert!(matches!(err, QrError::VersionTooSmall { requested: 1, .. }));
    }
}

#[test]
fn fixed_mask_on_mixed_text() {
    let options = v1_high().mask_pattern(1);
    let qr = encode("a123456A", &options).unwrap();
    assert_eq!(qr.size(), 21);
    assert_eq!(qr.mask().value(), 1);
    assert!(qr.modules().get(qr.modules().size() - 8, 8));
}

#[test]
fn format_info_matches_level_and_mask() {
    for name in ["L", "M", "Q", "H"] {
        let qr = encode("format check", &ecl(name)).unwrap();
        let bits = format_bits(qr.error_correction_level(), qr.mask());
        let m = qr.modules();
        let size = m.size();
        for i in 0..6 {
            assert_eq!(m.get(i, 8), (bits >> i) & 1 == 1);
        }
        for i in 0..8 {
            assert_eq!(m.get(8, size - 1 - i), (bits >> i) & 1 == 1);
        }
    }
}

#[test]
fn version_info_from_version_seven() {
    let qr = encode("version seven", &EncodeOptions::new().version(7)).unwrap();
    assert_eq!(qr.version(), Version::new(7));
    let bits = version_bits(qr.version());
    let m = qr.modules();
    let size = m.size();
    for i in 0..18 {
        let bit = (bits >> i) & 1 == 1;
        assert_eq!(m.get(i / 3, size - 11 + i % 3), bit);
        assert_eq!(m.get(size - 11 + i % 3, i / 3), bit);
    }
}

#[test]
fn level_names_and_fallback() {
    let cases = [
        ("l", QrCodeEcc::Low),
        ("LOW", QrCodeEcc::Low),
        ("q", QrCodeEcc::Quartile),
        ("High", QrCodeEcc::High),
        ("bogus", QrCodeEcc::Medium),
    ];
    for (name, expected) in cases {
        let qr = encode("levels", &ecl(name)).unwrap();
        assert_eq!(qr.error_correction_level(), expected, "{}", name);
    }
}

#[test]
fn version_options() {
    let auto = encode("ABC", &EncodeOptions::new().version(0)).unwrap();
    assert_eq!(auto.version(), Version::MIN);

    let larger = encode("ABC", &EncodeOptions::new().version(5)).unwrap();
    assert_eq!(larger.version(), Version::new(5));
    assert_eq!(larger.size(), 37);

    let err = encode("ABC", &EncodeOptions::new().version(41)).unwrap_err();
    assert_eq!(err, QrError::VersionOutOfRange(41));
    assert_eq!(err.kind(), ErrorKind::Capacity);
}

#[test]
fn invalid_mask_is_auto_selected() {
    let auto = encode("mask", &EncodeOptions::new()).unwrap();
    let invalid = encode("mask", &EncodeOptions::new().mask_pattern(9)).unwrap();
    assert_eq!(auto, invalid);
    assert!(invalid.mask().value() <= 7);
}

#[test]
fn explicit_mode_mismatch() {
    let inputs = vec![SegmentInput::text("12AB").with_mode(QrSegmentMode::Numeric)];
    let err = encode(inputs, &EncodeOptions::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ModeMismatch);
    assert_eq!(
        err,
        QrError::ModeMismatch {
            data: "12AB".to_string(),
            mode: QrSegmentMode::Numeric,
            suggested: QrSegmentMode::Alphanumeric,
        }
    );

    let raw = vec![SegmentInput::bytes(vec![0xc3, 0x28]).with_mode_name("alphanumeric")];
    let err = encode(raw, &EncodeOptions::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ModeMismatch);
}

#[test]
fn missing_input() {
    let options = EncodeOptions::new();
    for data in [
        QrData::Text(String::new()),
        QrData::Bytes(Vec::new()),
        QrData::Segments(Vec::new()),
        QrData::Segments(vec![SegmentInput::text("")]),
    ] {
        let err = encode(data, &options).unwrap_err();
        assert_eq!(err, QrError::NoInput);
        assert_eq!(err.kind(), ErrorKind::Input);
    }
}

#[test]
fn too_much_data() {
    let err = encode(vec![0u8; 4000], &ecl("L")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Capacity);
    assert!(matches!(err, QrError::DataOverCapacity(_, 23648)));
}

#[test]
fn mixed_segments_keep_order() {
    let inputs = vec![
        SegmentInput::text("ABCDEFG").with_mode_name("ALPHANUMERIC"),
        SegmentInput::text("abcdefg"),
        SegmentInput::text("0123456"),
        SegmentInput::bytes(vec![0xff, 0xfe, 0xfd]),
    ];
    let qr = QrCode::encode_inputs(&inputs, &EncodeOptions::new()).unwrap();
    let modes: Vec<_> = qr.segments().iter().map(|s| s.mode()).collect();
    assert_eq!(
        modes,
        vec![
            QrSegmentMode::Alphanumeric,
            QrSegmentMode::Byte,
            QrSegmentMode::Numeric,
            QrSegmentMode::Byte
        ]
    );
}

#[test]
fn kanji_without_mapping_is_byte() {
    let qr = encode("漢字", &EncodeOptions::new()).unwrap();
    assert_eq!(qr.segments()[0].mode(), QrSegmentMode::Byte);
    assert_eq!(qr.segments()[0].num_chars(), 6);
}

#[cfg(feature = "sjis")]
#[test]
fn kanji_with_mapping() {
    let options = v1_high().to_sjis(qrmatrix::encoding_rs_to_sjis);
    let qr = encode("漢字漢字", &options).unwrap();
    assert_eq!(qr.segments()[0].mode(), QrSegmentMode::Kanji);
    assert_eq!(qr.segments()[0].num_chars(), 4);

    let err = encode("漢字漢字漢", &options).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Capacity);
}
