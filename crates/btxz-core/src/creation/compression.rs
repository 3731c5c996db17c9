//! xz encoder construction from a profile.
//!
//! Each profile fixes an LZMA2 preset and overrides its dictionary size, so
//! memory use on both ends follows the profile instead of the preset.

use std::io::Write;

use xz2::stream::Check;
use xz2::stream::Filters;
use xz2::stream::LzmaOptions;
use xz2::stream::Stream;
use xz2::write::XzEncoder;

use crate::ArchiveError;
use crate::Result;
use crate::profile::ProfileParams;

/// Builds an xz encoder writing into `inner` with the profile's preset and
/// dictionary size, using a CRC64 integrity check.
///
/// # Errors
///
/// Returns `CorruptStream` if liblzma rejects the options.
pub fn xz_encoder<W: Write>(inner: W, params: &ProfileParams) -> Result<XzEncoder<W>> {
    let mut options = LzmaOptions::new_preset(params.xz_preset)
        .map_err(|e| ArchiveError::CorruptStream(format!("invalid xz preset: {e}")))?;
    options.dict_size(params.dict_size);

    let mut filters = Filters::new();
    filters.lzma2(&options);

    let stream = Stream::new_stream_encoder(&filters, Check::Crc64)
        .map_err(|e| ArchiveError::CorruptStream(format!("failed to create xz writer: {e}")))?;

    Ok(XzEncoder::new_stream(inner, stream))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::Profile;
    use std::io::Read;

    #[test]
    fn test_every_profile_builds_an_encoder() {
        for profile in Profile::ALL {
            let mut encoder = xz_encoder(Vec::new(), &profile.params()).unwrap();
            encoder.write_all(b"payload").unwrap();
            let compressed = encoder.finish().unwrap();

            let mut out = Vec::new();
            xz2::read::XzDecoder::new(&compressed[..])
                .read_to_end(&mut out)
                .unwrap();
            assert_eq!(out, b"payload");
        }
    }

    #[test]
    fn test_output_is_xz_stream() {
        let mut encoder = xz_encoder(Vec::new(), &Profile::Low.params()).unwrap();
        encoder.write_all(b"x").unwrap();
        let compressed = encoder.finish().unwrap();
        assert_eq!(&compressed[..6], b"\xFD7zXZ\x00");
    }
}
