use std::io::{self, Write};

use super::BitSink;

/// Bytes held in memory before they are handed to the writer.
const BUFFER_SIZE: usize = 64 * 1024;

/// Packs bits MSB first and writes them out in buffered chunks. Byte-aligned data such as the
/// frequency header goes in through put_bytes() before the first bit. Call finish() to pad the
/// last byte and flush everything to the writer.
pub struct BitWriter<W: Write> {
    /// Packed bytes waiting to be written.
    output: Vec<u8>,
    /// Private queue to hold bits that are waiting to be put as bytes into the output buffer.
    queue: u64,
    /// Count of valid bits in the queue.
    q_bits: u8,
    /// Handle to the output stream
    writer: W,
    /// Bits written through write_bit(), not counting put_bytes() data or padding.
    payload_bits: u64,
    /// Bytes handed to the writer so far.
    bytes_written: u64,
}

impl<W: Write> BitWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            output: Vec::with_capacity(BUFFER_SIZE),
            queue: 0,
            q_bits: 0,
            writer,
            payload_bits: 0,
            bytes_written: 0,
        }
    }

    /// Number of bits written with write_bit() so far.
    pub fn payload_bits(&self) -> u64 {
        self.payload_bits
    }

    /// Put whole bytes on the stream.
    pub fn put_bytes(&mut self, data: &[u8]) -> io::Result<()> {
        data.iter().for_each(|&x| self.out8(x));
        self.drain_output()
    }

    /// Pad the last byte with zero bits, write everything out and hand back the writer along
    /// with the total number of bytes written.
    pub fn finish(mut self) -> io::Result<(W, u64)> {
        self.flush_queue();
        self.write_output()?;
        self.writer.flush()?;
        Ok((self.writer, self.bytes_written))
    }

    /// Move full bytes out of the queue once it is close to full.
    fn push_queue(&mut self) {
        if self.q_bits > 56 {
            while self.q_bits > 7 {
                let byte = (self.queue >> (self.q_bits - 8)) as u8;
                self.output.push(byte); //push the packed byte out
                self.q_bits -= 8; //adjust the count of bits left in the queue
            }
        }
    }

    /// Put a byte on the stream.
    fn out8(&mut self, data: u8) {
        // Make sure the queue is empty enough to hold the data
        self.push_queue();
        self.queue <<= 8; //shift queue by one byte
        self.queue |= data as u64; //add the byte to queue
        self.q_bits += 8; //update depth of queue bits
    }

    /// Flushes the remaining bits (1-7) from the queue, padding with 0s in the least
    /// significant bits.
    fn flush_queue(&mut self) {
        // First push out all the full bytes
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte);
            self.q_bits -= 8;
        }
        // Then push out the remaining bits
        if self.q_bits > 0 {
            let mut byte = (self.queue & (0xff >> (8 - self.q_bits)) as u64) as u8;
            byte <<= 8 - self.q_bits;
            self.output.push(byte);
            self.q_bits = 0;
        }
    }

    /// Write the output buffer once it reaches BUFFER_SIZE.
    fn drain_output(&mut self) -> io::Result<()> {
        if self.output.len() >= BUFFER_SIZE {
            self.write_output()?;
        }
        Ok(())
    }

    fn write_output(&mut self) -> io::Result<()> {
        self.writer.write_all(&self.output)?;
        self.bytes_written += self.output.len() as u64;
        self.output.clear();
        Ok(())
    }
}

impl<W: Write> BitSink for BitWriter<W> {
    fn write_bit(&mut self, bit: bool) -> io::Result<()> {
        self.push_queue();
        self.queue = (self.queue << 1) | bit as u64;
        self.q_bits += 1;
        self.payload_bits += 1;
        self.drain_output()
    }
}
