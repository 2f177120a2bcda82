use bytes::Bytes;

const CURRENT_MARKER: &[u8] = b"<<<<<<< HEAD\n";
const SEPARATOR: &[u8] = b"=======\n";
const GIVEN_MARKER: &[u8] = b">>>>>>>\n";

/// Wrap both sides of a conflicted file in conflict markers
///
/// A side that does not have the file contributes nothing. Contents are pasted
/// verbatim, without adding a trailing newline.
pub fn render_conflict(current: Option<&[u8]>, given: Option<&[u8]>) -> Bytes {
    [
        CURRENT_MARKER,
        current.unwrap_or_default(),
        SEPARATOR,
        given.unwrap_or_default(),
        GIVEN_MARKER,
    ]
    .concat()
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::both_sides(Some("3"), Some("2"), "<<<<<<< HEAD\n3=======\n2>>>>>>>\n")]
    #[case::deleted_in_given(Some("kept\n"), None, "<<<<<<< HEAD\nkept\n=======\n>>>>>>>\n")]
    #[case::deleted_in_current(None, Some("new\n"), "<<<<<<< HEAD\n=======\nnew\n>>>>>>>\n")]
    fn markers_surround_each_side(
        #[case] current: Option<&str>,
        #[case] given: Option<&str>,
        #[case] expected: &str,
    ) {
        let rendered = render_conflict(current.map(str::as_bytes), given.map(str::as_bytes));

        assert_eq!(&rendered[..], expected.as_bytes());
    }
}
