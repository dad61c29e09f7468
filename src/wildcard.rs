//! Glob-style wildcard matching for catalogue queries.
//!
//! Supports `*` (any run, including empty) and `?` (exactly one byte).
//! Matching is ASCII case-insensitive, consistent with name hashing being
//! case-insensitive.

/// Match `text` against a glob `pattern` with `*` and `?` wildcards.
pub fn wildcard_match(text: &[u8], pattern: &[u8]) -> bool {
    match_inner(text, pattern, 0, 0)
}

fn match_inner(txt: &[u8], pat: &[u8], mut ti: usize, mut pi: usize) -> bool {
    while pi < pat.len() {
        match pat[pi] {
            b'*' => {
                while pi < pat.len() && pat[pi] == b'*' {
                    pi += 1;
                }
                if pi >= pat.len() {
                    return true;
                }
                for start in ti..=txt.len() {
                    if match_inner(txt, pat, start, pi) {
                        return true;
                    }
                }
                return false;
            }
            b'?' => {
                if ti >= txt.len() {
                    return false;
                }
                ti += 1;
                pi += 1;
            }
            lit => {
                if ti >= txt.len() || !txt[ti].eq_ignore_ascii_case(&lit) {
                    return false;
                }
                ti += 1;
                pi += 1;
            }
        }
    }
    ti == txt.len()
}
