//! String and memory primitives: strlen, strnlen, strcmp, strncmp, strchr,
//! strrchr, memchr, memcmp.
//!
//! Safe Rust implementations over byte slices that model NUL-terminated C
//! strings: a `0x00` byte marks the logical end; a slice with no NUL is
//! treated as exactly its own length. The formatting engine's `%s` path
//! is built on [`strnlen`].

/// Length of a NUL-terminated byte string, not counting the NUL.
pub fn strlen(s: &[u8]) -> usize {
    memchr(s, 0).unwrap_or(s.len())
}

/// Like [`strlen`] but scans at most `max` bytes.
///
/// Used by `%s` with a precision: C99 permits the source to be
/// unterminated as long as the precision bounds the scan.
pub fn strnlen(s: &[u8], max: usize) -> usize {
    let cap = max.min(s.len());
    memchr(&s[..cap], 0).unwrap_or(cap)
}

/// Lexicographic comparison of two NUL-terminated byte strings.
///
/// Negative if `s1 < s2`, zero if equal, positive if `s1 > s2`.
pub fn strcmp(s1: &[u8], s2: &[u8]) -> i32 {
    strncmp(s1, s2, usize::MAX)
}

/// Like [`strcmp`], limited to the first `n` bytes.
pub fn strncmp(s1: &[u8], s2: &[u8], n: usize) -> i32 {
    let mut i = 0;
    while i < n {
        let a = s1.get(i).copied().unwrap_or(0);
        let b = s2.get(i).copied().unwrap_or(0);
        if a != b {
            return i32::from(a) - i32::from(b);
        }
        if a == 0 {
            break;
        }
        i += 1;
    }
    0
}

/// First occurrence of `c` before the NUL terminator.
///
/// Searching for `0` finds the terminator itself, as in C.
pub fn strchr(s: &[u8], c: u8) -> Option<usize> {
    let len = strlen(s);
    if c == 0 {
        return (len < s.len()).then_some(len);
    }
    memchr(&s[..len], c)
}

/// Last occurrence of `c` before the NUL terminator.
pub fn strrchr(s: &[u8], c: u8) -> Option<usize> {
    let len = strlen(s);
    if c == 0 {
        return (len < s.len()).then_some(len);
    }
    s[..len].iter().rposition(|&b| b == c)
}

/// First occurrence of `c` anywhere in `s` (no NUL semantics).
pub fn memchr(s: &[u8], c: u8) -> Option<usize> {
    s.iter().position(|&b| b == c)
}

/// Byte-wise comparison of `n` bytes.
pub fn memcmp(s1: &[u8], s2: &[u8], n: usize) -> i32 {
    let n = n.min(s1.len()).min(s2.len());
    for i in 0..n {
        if s1[i] != s2[i] {
            return i32::from(s1[i]) - i32::from(s2[i]);
        }
    }
    0
}
