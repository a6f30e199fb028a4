//! `nom` parsers for the RIFF-style chunk stream and the primitive records inside chunk payloads.
//!
//! Chunk framing uses the streaming parsers, so a stream that ends inside a chunk fails with `nom::Err::Incomplete`.
//! Payload records use the complete parsers, so a payload shorter than its chunk id requires is a plain `nom::Err::Error`.

use crate::Dict;

use nom::{
    bytes::{complete, streaming},
    combinator::map,
    multi::fold_many_m_n,
    number::{
        complete::{le_u32, le_u8},
        streaming as streaming_number,
    },
    sequence::tuple,
    IResult,
};

pub(crate) type ParseResult<'a, O> = IResult<&'a [u8], O>;

/// A four byte tag, like the file magic or a chunk id.
pub(crate) fn fourcc(input: &[u8]) -> ParseResult<'_, [u8; 4]> {
    map(
        tuple((
            streaming_number::le_u8,
            streaming_number::le_u8,
            streaming_number::le_u8,
            streaming_number::le_u8,
        )),
        |(a, b, c, d)| [a, b, c, d],
    )(input)
}

/// The file version that follows the magic.
pub(crate) fn version(input: &[u8]) -> ParseResult<'_, u32> {
    streaming_number::le_u32(input)
}

/// The content and children lengths that follow a chunk id.
pub(crate) fn chunk_lengths(input: &[u8]) -> ParseResult<'_, (u32, u32)> {
    tuple((streaming_number::le_u32, streaming_number::le_u32))(input)
}

/// The next `len` bytes, or `Incomplete` if the stream is shorter.
pub(crate) fn body(input: &[u8], len: u32) -> ParseResult<'_, &[u8]> {
    streaming::take(len)(input)
}

/// One chunk: its id, then its content and children split off by their declared lengths.
pub(crate) fn chunk(input: &[u8]) -> ParseResult<'_, RawChunk<'_>> {
    let (input, id) = fourcc(input)?;
    let (input, (content_len, children_len)) = chunk_lengths(input)?;
    let (input, content) = body(input, content_len)?;
    let (input, children) = body(input, children_len)?;

    Ok((
        input,
        RawChunk {
            id,
            content,
            children,
        },
    ))
}

pub(crate) struct RawChunk<'a> {
    pub id: [u8; 4],
    pub content: &'a [u8],
    pub children: &'a [u8],
}

/// A length-prefixed string. Invalid UTF-8 is replaced rather than rejected.
pub(crate) fn string(input: &[u8]) -> ParseResult<'_, String> {
    let (input, len) = le_u32(input)?;

    map(complete::take(len), |bytes: &[u8]| {
        String::from_utf8_lossy(bytes).into_owned()
    })(input)
}

/// A `count` followed by `count` key-value string pairs.
pub(crate) fn dict(input: &[u8]) -> ParseResult<'_, Dict> {
    let (input, count) = le_u32(input)?;
    let count = count as usize;

    fold_many_m_n(
        count,
        count,
        tuple((string, string)),
        Dict::new,
        |mut dict, (key, value)| {
            dict.insert(key, value);
            dict
        },
    )(input)
}

/// A `u32` count followed by that many `item`s.
///
/// The count comes from the file, so nothing is reserved up front; a lying count fails once the payload runs out.
pub(crate) fn counted<'a, O>(
    mut item: impl FnMut(&'a [u8]) -> ParseResult<'a, O>,
) -> impl FnMut(&'a [u8]) -> ParseResult<'a, Vec<O>> {
    move |input| {
        let (input, count) = le_u32(input)?;
        let count = count as usize;

        fold_many_m_n(count, count, |i: &'a [u8]| item(i), Vec::new, |mut items, o| {
            items.push(o);
            items
        })(input)
    }
}

/// Four raw bytes from a payload.
pub(crate) fn quad(input: &[u8]) -> ParseResult<'_, [u8; 4]> {
    map(tuple((le_u8, le_u8, le_u8, le_u8)), |(a, b, c, d)| {
        [a, b, c, d]
    })(input)
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

#[cfg(test)]
mod test {
    use super::*;

    use pretty_assertions::assert_eq;

    fn push_string(bytes: &mut Vec<u8>, s: &str) {
        bytes.extend_from_slice(&(s.len() as u32).to_le_bytes());
        bytes.extend_from_slice(s.as_bytes());
    }

    #[test]
    fn short_frame_is_incomplete() {
        assert!(matches!(fourcc(&[1, 0, 0]), Err(nom::Err::Incomplete(_))));
        assert!(matches!(version(&[1, 0, 0]), Err(nom::Err::Incomplete(_))));
    }

    #[test]
    fn short_payload_is_an_error() {
        assert!(matches!(quad(&[1, 0, 0]), Err(nom::Err::Error(_))));
        assert!(matches!(string(&[9, 0, 0, 0, b'a']), Err(nom::Err::Error(_))));
    }

    #[test]
    fn dict_preserves_insertion_order() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&2u32.to_le_bytes());
        for s in ["_t", "1 2 3", "_r", "4"].iter() {
            push_string(&mut bytes, s);
        }

        let (rest, dict) = dict(&bytes).unwrap();

        assert!(rest.is_empty());
        let keys: Vec<_> = dict.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["_t", "_r"]);
        assert_eq!(dict["_t"], "1 2 3");
    }

    #[test]
    fn lying_count_fails_without_reserving() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&u32::MAX.to_le_bytes());
        bytes.extend_from_slice(&7u32.to_le_bytes());

        assert!(counted(le_u32)(&bytes).is_err());
        assert!(dict(&bytes).is_err());
    }

    #[test]
    fn chunk_with_short_children_is_incomplete() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"SIZE");
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(&8u32.to_le_bytes());
        bytes.extend_from_slice(&[0; 4]);

        assert!(matches!(chunk(&bytes), Err(nom::Err::Incomplete(_))));
    }

    #[test]
    fn chunk_splits_content_and_children() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"MAIN");
        bytes.extend_from_slice(&1u32.to_le_bytes());
        bytes.extend_from_slice(&2u32.to_le_bytes());
        bytes.extend_from_slice(&[9, 8, 7, 6]);

        let (rest, chunk) = chunk(&bytes).unwrap();

        assert_eq!(&chunk.id, b"MAIN");
        assert_eq!(chunk.content, &[9]);
        assert_eq!(chunk.children, &[8, 7]);
        assert_eq!(rest, &[6]);
    }
}
