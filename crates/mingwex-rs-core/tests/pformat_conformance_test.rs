//! End-to-end conformance checks for the formatting engine, exercised
//! through the public printf-family wrappers.

use std::cell::Cell;

use mingwex_rs_core::stdio::{PFormatArg, PFormatSink, pformat, snprintf, sprintf};

fn render(fmt: &[u8], args: &[PFormatArg<'_>]) -> (String, usize) {
    let mut out = Vec::new();
    let n = sprintf(&mut out, fmt, args).unwrap();
    (String::from_utf8(out).unwrap(), n)
}

#[test]
fn literal_only_output_equals_input() {
    for text in [&b""[..], b"plain", b"with spaces and\nnewlines\t!"] {
        let (s, n) = render(text, &[]);
        assert_eq!(s.as_bytes(), text);
        assert_eq!(n, text.len());
    }
}

#[test]
fn double_percent_consumes_no_argument() {
    let (s, n) = render(b"%% %d %%", &[PFormatArg::Int(1)]);
    assert_eq!(s, "% 1 %");
    assert_eq!(n, 5);
}

#[test]
fn integer_base_round_trip() {
    let values: [i64; 8] = [0, 1, -1, 42, -9999, i64::from(i32::MAX), 65535, 123456789];
    for v in values {
        let (dec, _) = render(b"%lld", &[PFormatArg::Int(v)]);
        assert_eq!(dec.trim_start_matches('-').parse::<u64>().unwrap(), v.unsigned_abs());

        let u = v.unsigned_abs();
        let (hex, _) = render(b"%llx", &[PFormatArg::Uint(u)]);
        assert_eq!(u64::from_str_radix(&hex, 16).unwrap(), u);

        let (oct, _) = render(b"%llo", &[PFormatArg::Uint(u)]);
        assert_eq!(u64::from_str_radix(&oct, 8).unwrap(), u);
    }
}

#[test]
fn float_round_trip_within_precision() {
    for v in [0.0, 1.5, -2.25, 1234.5678, 1e-3] {
        let (s, _) = render(b"%.17g", &[PFormatArg::Float(v)]);
        assert_eq!(s.parse::<f64>().unwrap(), v);
    }
}

#[test]
fn hex_float_round_trip_is_exact() {
    // %a is an exact encoding: lead digit, hex fraction, binary exponent.
    for v in [1.0f64, 0.5, 255.0, 3.141592653589793, 1e300] {
        let (s, _) = render(b"%a", &[PFormatArg::Float(v)]);
        let rest = s.strip_prefix("0x").unwrap();
        let (mantissa, exp) = rest.split_once('p').unwrap();
        let exp: i32 = exp.parse().unwrap();
        let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        let mut value = i64::from_str_radix(int_part, 16).unwrap() as f64;
        let mut scale = 1.0 / 16.0;
        for d in frac_part.chars() {
            value += d.to_digit(16).unwrap() as f64 * scale;
            scale /= 16.0;
        }
        assert_eq!(value * 2f64.powi(exp), v, "round-tripping {s}");
    }
}

#[test]
fn left_justify_beats_zero_pad() {
    let (with_both, _) = render(b"%-08d", &[PFormatArg::Int(42)]);
    assert_eq!(with_both, "42      ");
    assert!(!with_both.contains('0'));
}

#[test]
fn precision_zero_of_zero_is_empty() {
    let (s, n) = render(b"[%.0d]", &[PFormatArg::Int(0)]);
    assert_eq!(s, "[]");
    assert_eq!(n, 2);
}

#[test]
fn capacity_zero_sink_writes_nothing() {
    let unbounded = render(b"%d/%s", &[PFormatArg::Int(42), PFormatArg::Str(Some(b"ok"))]).1;
    let mut empty: [u8; 0] = [];
    let n = snprintf(
        &mut empty,
        b"%d/%s",
        &[PFormatArg::Int(42), PFormatArg::Str(Some(b"ok"))],
    )
    .unwrap();
    assert_eq!(n, unbounded);
}

#[test]
fn spec_scenarios() {
    let (s, n) = render(b"%5d", &[PFormatArg::Int(42)]);
    assert_eq!((s.as_str(), n), ("   42", 5));

    let (s, n) = render(b"%-5.2f", &[PFormatArg::Float(3.14159)]);
    assert_eq!((s.as_str(), n), ("3.14 ", 5));

    let (s, n) = render(b"%#x", &[PFormatArg::Int(255)]);
    assert_eq!((s.as_str(), n), ("0xff", 4));

    let (s, n) = render(b"%s", &[PFormatArg::Str(Some(b"hi"))]);
    assert_eq!((s.as_str(), n), ("hi", 2));
    let (s, n) = render(b"%.1s", &[PFormatArg::Str(Some(b"hi"))]);
    assert_eq!((s.as_str(), n), ("h", 1));
}

#[test]
fn count_conversion_emits_nothing() {
    let cell = Cell::new(-1i64);
    let (s, _) = render(b"abc%n", &[PFormatArg::Count(&cell)]);
    assert_eq!(s, "abc");
    assert_eq!(cell.get(), 3);
}

#[test]
fn count_sees_intended_length_under_truncation() {
    // %n reflects the running tally, not the bytes a bounded sink kept.
    let cell = Cell::new(0i64);
    let mut buf = [0u8; 2];
    let n = snprintf(
        &mut buf,
        b"hello%n",
        &[PFormatArg::Count(&cell)],
    )
    .unwrap();
    assert_eq!(n, 5);
    assert_eq!(cell.get(), 5);
    assert_eq!(&buf, b"he");
}

#[test]
fn mixed_conversions_in_one_call() {
    let (s, n) = render(
        b"%s: %d items, %.1f%% done (%c)",
        &[
            PFormatArg::Str(Some(b"scan")),
            PFormatArg::Int(12),
            PFormatArg::Float(62.5),
            PFormatArg::Char(b'A'),
        ],
    );
    assert_eq!(s, "scan: 12 items, 62.5% done (A)");
    assert_eq!(n, s.len());
}

#[test]
fn stream_sink_matches_buffer_sink() {
    let args = [PFormatArg::Int(-7), PFormatArg::Float(0.125)];
    let (expected, expected_n) = render(b"<%04d|%e>", &args);

    let mut streamed = Vec::new();
    let n = pformat(PFormatSink::Stream(&mut streamed), b"<%04d|%e>", &args).unwrap();
    assert_eq!(streamed, expected.as_bytes());
    assert_eq!(n, expected_n);
}

#[test]
fn wide_arguments_render_as_utf8() {
    let chars: Vec<char> = "grüß".chars().collect();
    let (s, n) = render(b"%ls/%lc", &[PFormatArg::WideStr(Some(&chars)), PFormatArg::WideChar('ß')]);
    assert_eq!(s, "grüß/ß");
    // The tally counts bytes, not characters.
    assert_eq!(n, "grüß/ß".len());
}

#[test]
fn pointer_rendering() {
    let (s, _) = render(b"%p", &[PFormatArg::Ptr(0x7fff_1234)]);
    assert_eq!(s, "0x7fff1234");
}

#[test]
fn errors_are_negative_at_the_c_boundary() {
    // The wrappers surface Result; the C-style mapping is error => -1.
    let mut out = Vec::new();
    let ret = sprintf(&mut out, b"%", &[])
        .map(|n| n as i64)
        .unwrap_or(-1);
    assert_eq!(ret, -1);
}
