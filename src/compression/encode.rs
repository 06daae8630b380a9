//! Encoder: turns bytes into Huffman coded bits.
//!

use log::debug;

use crate::bitstream::BitSink;
use crate::error::{Error, Result};
use crate::huffman_coding::symbol::Symbol;
use crate::huffman_coding::CodeTable;

/// What an encoding pass produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeReport {
    /// Bits handed to the sink, including the end-of-stream code.
    pub bits_written: u64,
    /// Every bit as `0`/`1` text, when recording was requested.
    pub bit_string: Option<String>,
}

/// Writes the code of each input byte, then the end-of-stream code, to a bit sink.
pub struct Encoder<'t> {
    table: &'t CodeTable,
    record_bits: bool,
}

impl<'t> Encoder<'t> {
    pub fn new(table: &'t CodeTable) -> Self {
        Self {
            table,
            record_bits: false,
        }
    }

    /// Also return the full bit string in the report. Costs one char per bit.
    pub fn record_bits(mut self, record: bool) -> Self {
        self.record_bits = record;
        self
    }

    /// Encode `input` into `sink`. Fails with EncodeGap on the first byte that has no code, which
    /// means the table was not built from this input's frequencies.
    pub fn encode<S: BitSink>(&self, input: &[u8], sink: &mut S) -> Result<EncodeReport> {
        let mut report = EncodeReport {
            bits_written: 0,
            bit_string: if self.record_bits {
                Some(String::new())
            } else {
                None
            },
        };

        for &byte in input {
            self.emit(Symbol::Byte(byte), sink, &mut report)?;
        }
        self.emit(Symbol::PseudoEof, sink, &mut report)?;

        debug!(
            "Encoded {} bytes into {} bits",
            input.len(),
            report.bits_written
        );
        Ok(report)
    }

    fn emit<S: BitSink>(
        &self,
        symbol: Symbol,
        sink: &mut S,
        report: &mut EncodeReport,
    ) -> Result<()> {
        let code = self
            .table
            .lookup(&symbol)
            .ok_or(Error::EncodeGap(symbol))?;
        for &bit in code.bits() {
            sink.write_bit(bit)?;
        }
        report.bits_written += code.len() as u64;
        if let Some(text) = report.bit_string.as_mut() {
            text.push_str(&code.to_string());
        }
        Ok(())
    }
}
