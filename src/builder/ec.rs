use std::ops::Deref;

use tracing::trace;

use crate::common::{
    bitstream::BitStream,
    block::{rs_blocks, RSBlock},
    codec::ByteSegment,
    metadata::{ECLevel, Version},
    poly::{error_correct_polynomial, Polynomial},
};
use crate::error::{QRError, QRResult};

const PAD0: u8 = 0xEC;
const PAD1: u8 = 0x11;

/// Encodes the segments into the final codeword sequence for `version`: data bits,
/// terminator & padding up to capacity, then per block ecc and interleaving.
pub fn create_data(
    version: Version,
    ec_level: ECLevel,
    segments: &[ByteSegment],
) -> QRResult<Vec<u8>> {
    let blocks = rs_blocks(version, ec_level);
    let bit_capacity = blocks.iter().map(|b| b.data_count).sum::<usize>() << 3;

    let bits = segments.iter().map(|s| s.bit_len(version)).sum::<usize>();
    if bits > bit_capacity {
        return Err(QRError::CapacityOverflow { bits, capacity: bit_capacity });
    }

    let mut buffer = BitStream::with_capacity(bit_capacity);
    for seg in segments {
        seg.write_with_header(&mut buffer, version);
    }

    // Terminator
    if buffer.len() + 4 <= bit_capacity {
        buffer.put(0u8, 4);
    }

    while buffer.len() & 7 != 0 {
        buffer.put_bit(false);
    }

    for pad in [PAD0, PAD1].into_iter().cycle() {
        if buffer.len() >= bit_capacity {
            break;
        }
        buffer.put(pad, 8);
    }

    trace!(bits = buffer.len(), capacity = bit_capacity, "Data bits padded");
    create_bytes(&buffer, &blocks)
}

/// Splits the padded data into blocks, computes each block's ecc and interleaves
/// data codewords followed by ecc codewords.
pub fn create_bytes(buffer: &BitStream, blocks: &[RSBlock]) -> QRResult<Vec<u8>> {
    let data = buffer.data();
    debug_assert_eq!(
        data.len(),
        blocks.iter().map(|b| b.data_count).sum::<usize>(),
        "Data len doesn't match total data codewords of blocks"
    );

    let mut offset = 0;
    let mut data_blocks = Vec::with_capacity(blocks.len());
    let mut ecc_blocks = Vec::with_capacity(blocks.len());
    for block in blocks {
        let dc = &data[offset..offset + block.data_count];
        offset += block.data_count;
        ecc_blocks.push(compute_ecc(dc, block.ec_count())?);
        data_blocks.push(dc);
    }

    let mut res = interleave(&data_blocks);
    res.extend(interleave(&ecc_blocks));
    debug_assert_eq!(
        res.len(),
        blocks.iter().map(|b| b.total_count).sum::<usize>(),
        "Codeword count doesn't match total codewords of blocks"
    );
    Ok(res)
}

// Remainder of the data polynomial · x^ec_count divided by the generator,
// left padded with zeros to ec_count coefficients
fn compute_ecc(data: &[u8], ec_count: usize) -> QRResult<Vec<u8>> {
    let gen_poly = error_correct_polynomial(ec_count)?;
    let raw_poly = Polynomial::new(data, gen_poly.len() - 1);
    let rem = raw_poly.rem(&gen_poly)?;

    let mut ecc = vec![0u8; ec_count];
    let pad = ec_count - rem.len();
    ecc[pad..].copy_from_slice(rem.coefficients());
    Ok(ecc)
}

pub fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
    let max_block_size = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
    let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
    let mut res = Vec::with_capacity(total_size);
    for i in 0..max_block_size {
        for b in blocks {
            if i < b.len() {
                res.push(b[i]);
            }
        }
    }
    res
}
